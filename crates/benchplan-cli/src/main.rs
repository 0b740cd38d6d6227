use std::io;
use std::process::ExitCode;

use benchplan_cli::{console, run, Args};
use clap::Parser;

fn main() -> ExitCode {
    let args = Args::parse();
    console::init();

    let stdout = io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
