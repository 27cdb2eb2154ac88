#![deny(warnings)]

use clap::Parser;
use product_analyzer::Cli;
use product_analyzer::logging::*;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let log = DEFAULT.new(o!("function" => "main"));
    debug!(log, "Starting up");

    let cli = Cli::parse();

    match product_analyzer::run(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(log, "command failed"; "error" => %err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
