use std::process;

mod cli;
#[cfg(feature = "tui")]
mod tui;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
