//! Schedule / reschedule task lines.
//!
//! Reads the selection, runs the scheduling pipeline, and prints the
//! normalized replacement text. Lines that could not be resolved are
//! reported on stderr and dropped from the output.

use std::path::Path;

use timeblock_core::{Config, SchedulePipeline};

use super::read_selection;

pub async fn run(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_selection(file)?;
    let config = Config::load()?;
    let pipeline = SchedulePipeline::new(&config);

    let report = pipeline.schedule(text.trim()).await;
    for skipped in &report.skipped {
        eprintln!("skipped line {}: {}", skipped.line, skipped.reason);
    }
    println!("{}", report.to_normalized_text());
    Ok(())
}
