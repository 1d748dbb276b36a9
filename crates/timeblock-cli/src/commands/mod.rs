pub mod config;
pub mod resort;
pub mod schedule;
pub mod unschedule;

use std::io::Read;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

/// Install the terminal logger. Warnings only unless `verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Read the selection text from `file`, or stdin when absent.
pub fn read_selection(file: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
