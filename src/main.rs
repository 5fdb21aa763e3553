//! shsplit: split shell-like input into tokens and print them.
//!
//! Reads from `-c STRING`, from file arguments (`-` is stdin), or from stdin
//! when neither is given. Tokens are printed one per line, as a JSON array, or
//! POSIX-quoted on one line.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use log::{debug, info};
use shsplit::config::{Config, OutputFormat};

const USAGE: &str = "\
usage: shsplit [options] [-c STRING | FILE...]

options:
  -c STRING           split STRING instead of reading input
  --format FMT        lines, json or shell (default from config)
  --log-level LEVEL   off, error, warn, info, debug or trace
  --dump-config       print the merged configuration and exit
  -h, --help          print this help
  -V, --version       print the version";

// ─── Arguments ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Stdin,
    Text(String),
    File(String),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    inputs: Vec<Input>,
    format: Option<OutputFormat>,
    log_level: Option<String>,
    dump_config: bool,
    help: bool,
    version: bool,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Options::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-c" => {
                    let text = iter.next().ok_or("-c requires an argument")?;
                    opts.inputs.push(Input::Text(text.clone()));
                }
                "--format" => {
                    let value = iter.next().ok_or("--format requires an argument")?;
                    opts.format = Some(value.parse()?);
                }
                "--log-level" => {
                    let value = iter.next().ok_or("--log-level requires an argument")?;
                    opts.log_level = Some(value.clone());
                }
                "--dump-config" => opts.dump_config = true,
                "-h" | "--help" => opts.help = true,
                "-V" | "--version" => opts.version = true,
                "-" => opts.inputs.push(Input::Stdin),
                flag if flag.starts_with('-') => return Err(format!("unknown option '{flag}'")),
                path => opts.inputs.push(Input::File(path.to_string())),
            }
        }
        if opts.inputs.is_empty() {
            opts.inputs.push(Input::Stdin);
        }
        Ok(opts)
    }
}

// ─── Output ──────────────────────────────────────────

fn render(tokens: &[String], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Lines => Ok(tokens.iter().map(|t| format!("{t}\n")).collect()),
        OutputFormat::Json => serde_json::to_string(tokens)
            .map(|s| s + "\n")
            .map_err(|e| format!("failed to encode tokens: {e}")),
        OutputFormat::Shell => {
            let quoted = tokens
                .iter()
                .map(|t| shlex::try_quote(t).map_err(|e| format!("cannot quote {t:?}: {e}")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("{}\n", quoted.join(" ")))
        }
    }
}

fn emit(tokens: &[String], format: OutputFormat) -> Result<(), String> {
    let text = render(tokens, format)?;
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| format!("failed to write output: {e}"))
}

// ─── Entry point ─────────────────────────────────────

enum Failure {
    Usage(String),
    Split(String),
}

fn split_input(input: &Input) -> Result<Vec<String>, shsplit::SplitError> {
    match input {
        Input::Text(text) => shsplit::split_str(text),
        Input::Stdin => shsplit::split(io::stdin().lock()),
        Input::File(path) => match std::fs::File::open(path) {
            Ok(file) => shsplit::split(file),
            Err(e) => Err(shsplit::SplitError {
                tokens: Vec::new(),
                error: e.into(),
            }),
        },
    }
}

fn describe(input: &Input) -> &str {
    match input {
        Input::Stdin => "<stdin>",
        Input::Text(_) => "<-c>",
        Input::File(path) => path,
    }
}

fn run() -> Result<(), Failure> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = Options::parse(&args).map_err(Failure::Usage)?;

    if opts.help {
        println!("{USAGE}");
        return Ok(());
    }
    if opts.version {
        println!("shsplit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = Config::load();
    if let Some(format) = opts.format {
        config.output.format = format;
    }
    if opts.dump_config {
        let text = config.to_toml().map_err(Failure::Split)?;
        print!("{text}");
        return Ok(());
    }

    shsplit::logging::init(&config.logging, opts.log_level.as_deref()).map_err(Failure::Usage)?;
    let format = config.output.format;
    info!("splitting {} input(s) as {format}", opts.inputs.len());

    for input in &opts.inputs {
        let name = describe(input);
        match split_input(input) {
            Ok(tokens) => {
                debug!("{name}: {} token(s)", tokens.len());
                emit(&tokens, format).map_err(Failure::Split)?;
            }
            Err(err) => {
                emit(&err.tokens, format).map_err(Failure::Split)?;
                return Err(Failure::Split(format!("{name}: {}", err.error)));
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Usage(msg)) => {
            eprintln!("shsplit: {msg}\n\n{USAGE}");
            ExitCode::from(2)
        }
        Err(Failure::Split(msg)) => {
            eprintln!("shsplit: {msg}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ───────────────────────────────────────────
