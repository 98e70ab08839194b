//! CLI entry point: `loom [path/to/script.loom]`, reading from stdin when no
//! path is given (spec.md §6 External Interfaces, matching the original
//! `cli.py`'s exact argument and error-message shape).

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::{env, fs, io};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let filepath = args.next();

    let source = match &filepath {
        Some(path) => match read_file(path) {
            Ok(source) => source,
            Err(()) => {
                eprintln!("\x1b[31mError:\x1b[m Unable to open file: '{path}'");
                return ExitCode::FAILURE;
            }
        },
        None => match read_stdin() {
            Ok(source) => source,
            Err(()) => {
                eprintln!("\x1b[31mError:\x1b[m Unable to read from stdin");
                return ExitCode::FAILURE;
            }
        },
    };

    // Imports resolve relative to the current working directory, not the
    // script's own location (spec.md §4.3/§6, modules.rs's doc comment).
    let base_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match loom_lang::interpret_in_dir(&source, base_dir, loom_lang::EvalLimits::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn read_file(path: &str) -> Result<String, ()> {
    if fs::metadata(path).is_err() {
        return Err(());
    }
    fs::read_to_string(path).map_err(|_| ())
}

fn read_stdin() -> Result<String, ()> {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source).map_err(|_| ())?;
    Ok(source)
}
