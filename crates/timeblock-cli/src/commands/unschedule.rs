//! Convert normalized lines back to informal task lines.

use std::path::Path;

use timeblock_core::unschedule;

use super::read_selection;

pub fn run(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_selection(file)?;
    let replacement = unschedule(text.trim())?;
    println!("{replacement}");
    Ok(())
}
