use std::{fs, process::ExitCode};

use clap::{ArgAction, Parser};
use sprig::{
    ast::dump,
    config::{Config, DEFAULT_MAX_CALL_DEPTH},
    interpreter::{parser::core::parse_source, value::core::Value},
};
use tracing::Level;

/// sprig is a small imperative scripting language with typed functions,
/// dynamically typed variables and lexical scoping.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells sprig to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints out the value of the last top-level
    /// statement of a script, unless it has none.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Prints the parsed syntax tree instead of running the script.
    #[arg(long)]
    dump_ast: bool,

    /// How many user function calls may be nested before the run fails.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Raises log verbosity on stderr: -v for debug, -vv for trace.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    if args.dump_ast {
        return match parse_source(&script) {
            Ok(program) => {
                print!("{}", dump(&program));
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    let config = Config::default().with_max_call_depth(args.max_depth);
    match sprig::run(&script, &config) {
        Ok(value) => {
            if args.pipe_mode && value != Value::None {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt().with_max_level(level)
                             .with_writer(std::io::stderr)
                             .init();
}
