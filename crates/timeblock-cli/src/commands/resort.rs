//! Reorder task lines by completion marker.

use std::path::Path;

use timeblock_core::resort_by_completion;

use super::read_selection;

pub fn run(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_selection(file)?;
    println!("{}", resort_by_completion(&text));
    Ok(())
}
