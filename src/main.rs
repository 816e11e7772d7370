mod cli;
mod config;

use std::{io, process};

use config::Config;

fn main() {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let level = match config.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // Logs go to stderr so stdout carries only trees and session replies.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
