//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = stopline_cli::run() {
        eprintln!("stopline: {err}");
        std::process::exit(1);
    }
}
