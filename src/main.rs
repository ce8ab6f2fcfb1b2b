use std::{env, fmt, fs::read_to_string, io, path::PathBuf, process::ExitCode};

use clite::{display_error, errors::errors::Error, run_pipeline, Output, Stage};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: clite [--lex | --parse | --check | --transform] [--trace] <file>";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Config {
    file: PathBuf,
    stage: Stage,
    trace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arg {
    Stop(Stage),
    Trace,
}

impl Arg {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "--lex" => Some(Arg::Stop(Stage::Lex)),
            "--parse" => Some(Arg::Stop(Stage::Parse)),
            "--check" => Some(Arg::Stop(Stage::Check)),
            "--transform" => Some(Arg::Stop(Stage::Transform)),
            "--trace" => Some(Arg::Trace),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum CliError {
    Usage,
    Read(PathBuf, io::Error),
    Clite(Error, String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Usage => write!(f, "{}", USAGE),
            CliError::Read(path, error) => write!(f, "could not read {}: {}", path.display(), error),
            CliError::Clite(error, _) => write!(f, "{}", error),
        }
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Config, CliError> {
    let mut file = None;
    let mut stage = Stage::Run;
    let mut trace = false;

    for arg in args {
        match Arg::parse(&arg) {
            Some(Arg::Stop(stop)) if stage == Stage::Run => stage = stop,
            Some(Arg::Trace) => trace = true,
            None if !arg.starts_with('-') && file.is_none() => file = Some(PathBuf::from(arg)),
            _ => return Err(CliError::Usage),
        }
    }

    Ok(Config {
        file: file.ok_or(CliError::Usage)?,
        stage,
        trace,
    })
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute(config: &Config) -> Result<(), CliError> {
    let source = read_to_string(&config.file).map_err(|e| CliError::Read(config.file.clone(), e))?;
    let file_name = config
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.file.to_string_lossy().into_owned());

    let output = run_pipeline(source.clone(), &file_name, config.stage)
        .map_err(|error| CliError::Clite(error, source))?;

    match output {
        Output::Tokens(tokens) => {
            for token in tokens {
                println!("{}", token);
            }
        }
        Output::Ast(program) => println!("{:#?}", program),
        Output::Types(globals) => {
            println!("Globals = {{");
            print!("{}", globals);
            println!("}}");
        }
        Output::Transformed(program) => println!("{:#?}", program),
        Output::Store(store) => {
            for (name, value) in store {
                println!("{} = {}", name, value);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let config = match parse_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.trace);

    match execute(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Clite(error, source)) => {
            display_error(&error, &source);
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args_defaults_to_run() {
        let config = parse_args(args(&["prog.cl"])).unwrap();
        assert_eq!(config.file, PathBuf::from("prog.cl"));
        assert_eq!(config.stage, Stage::Run);
        assert!(!config.trace);
    }

    #[test]
    fn test_parse_args_stage_and_trace_in_any_order() {
        let config = parse_args(args(&["--trace", "prog.cl", "--check"])).unwrap();
        assert_eq!(config.stage, Stage::Check);
        assert!(config.trace);
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(matches!(parse_args(args(&[])), Err(CliError::Usage)));
        assert!(matches!(parse_args(args(&["--lex", "--parse", "a.cl"])), Err(CliError::Usage)));
        assert!(matches!(parse_args(args(&["a.cl", "b.cl"])), Err(CliError::Usage)));
        assert!(matches!(parse_args(args(&["--bogus", "a.cl"])), Err(CliError::Usage)));
    }
}
