//! Knight interpreter CLI.

use knight::commands::run_source;
use knight::{Command, USAGE};

fn main() {
    knight::tracing_setup::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match Command::parse(&args) {
        Ok(Command::Run { source, options }) => {
            std::process::exit(run_source(&source, &options));
        }
        Ok(Command::Help) => print!("{USAGE}"),
        Ok(Command::Version) => println!("knight {}", env!("CARGO_PKG_VERSION")),
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            eprint!("{USAGE}");
            std::process::exit(1);
        }
    }
}
