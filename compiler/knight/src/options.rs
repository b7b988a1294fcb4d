//! Command-line parsing.

use std::path::PathBuf;

pub const USAGE: &str = "\
Knight interpreter

Usage: knight (-e <expr> | -f <file>) [options]

Options:
  -e <expr>          Run <expr> as a Knight program
  -f <file>          Run the program in <file>
  --sandbox          Deny SYSTEM (`) and limit nesting depth
  --seed=<n>         Seed RANDOM for a reproducible run
  --max-depth=<n>    Fail once builtin calls nest deeper than <n>
  --stats            Report string cache and call statistics on stderr
  help               Show this help message
  version            Show version information

Set RUST_LOG (e.g. RUST_LOG=kn_eval=trace) to trace evaluation.
";

/// Where the program text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Expr(String),
    File(PathBuf),
}

/// Interpreter settings taken from flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub sandbox: bool,
    pub seed: Option<u64>,
    pub max_depth: Option<usize>,
    pub stats: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run { source: Source, options: RunOptions },
    Help,
    Version,
}

impl Command {
    /// Parse the arguments following the program name.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        match args.first().map(String::as_str) {
            Some("help" | "--help" | "-h") => return Ok(Command::Help),
            Some("version" | "--version" | "-V") => return Ok(Command::Version),
            _ => {}
        }

        let mut source = None;
        let mut options = RunOptions::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-e" | "-f" => {
                    let Some(value) = iter.next() else {
                        return Err(format!("`{arg}` needs an argument"));
                    };
                    if source.is_some() {
                        return Err("only one of `-e` or `-f` may be given".to_string());
                    }
                    source = Some(if arg == "-e" {
                        Source::Expr(value.clone())
                    } else {
                        Source::File(PathBuf::from(value))
                    });
                }
                "--sandbox" => options.sandbox = true,
                "--stats" => options.stats = true,
                _ => {
                    if let Some(seed) = arg.strip_prefix("--seed=") {
                        options.seed = Some(parse_number(seed, "--seed")?);
                    } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
                        options.max_depth = Some(parse_number(depth, "--max-depth")?);
                    } else {
                        return Err(format!("unknown argument `{arg}`"));
                    }
                }
            }
        }

        match source {
            Some(source) => Ok(Command::Run { source, options }),
            None => Err("missing `-e <expr>` or `-f <file>`".to_string()),
        }
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, flag: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("`{flag}` expects a non-negative integer, got `{text}`"))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Command, String> {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        Command::parse(&args)
    }

    #[test]
    fn expression_source() {
        assert_eq!(
            parse(&["-e", "O 1"]).unwrap(),
            Command::Run {
                source: Source::Expr("O 1".to_string()),
                options: RunOptions::default(),
            }
        );
    }

    #[test]
    fn file_source_with_flags() {
        assert_eq!(
            parse(&["--sandbox", "-f", "prog.kn", "--seed=3", "--max-depth=50", "--stats"])
                .unwrap(),
            Command::Run {
                source: Source::File(PathBuf::from("prog.kn")),
                options: RunOptions {
                    sandbox: true,
                    seed: Some(3),
                    max_depth: Some(50),
                    stats: true,
                },
            }
        );
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn missing_source_is_an_error() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--stats"]).is_err());
        assert!(parse(&["-e"]).unwrap_err().contains("-e"));
    }

    #[test]
    fn two_sources_are_an_error() {
        assert!(parse(&["-e", "1", "-f", "x.kn"]).is_err());
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(parse(&["-e", "1", "--seed=abc"]).is_err());
        assert!(parse(&["-e", "1", "--max-depth=-1"]).is_err());
        assert!(parse(&["-e", "1", "--bogus"])
            .unwrap_err()
            .contains("--bogus"));
    }
}
