// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;

/// Parse a JSON document and print the resulting value tree.
#[derive(Parser, Debug)]
#[command(name = "jsonparser", version)]
struct Cli {
    /// Path to the JSON document
    path: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too; only real usage errors fail
            let failed = e.use_stderr();
            let _ = e.print();
            std::process::exit(if failed { 1 } else { 0 });
        }
    };

    let source = match fs::read_to_string(&cli.path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!(
                "Error: Unable to read file '{}': {}",
                cli.path.display(),
                e
            );
            std::process::exit(1);
        }
    };
    info!("read {} bytes from {}", source.len(), cli.path.display());

    match jsonparser::from_str(&source) {
        Ok(value) => {
            println!("{value:#?}");
            std::process::exit(0);
        }
        Err(e) => {
            println!("{e}");
            std::process::exit(1);
        }
    }
}
