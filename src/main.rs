use clap::Parser;
use smarttrade::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
