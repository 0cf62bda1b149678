mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use cli::{init_tracing, print_failed, print_finished, print_running, report, warn};
use genz_core::{
    eval::prelude::{execute, Outcome},
    parser::prelude::{parse_module_from_stream, Parsed},
    utils::prelude::Error
};
use tracing::debug;
use utf8_chars::BufReadCharsExt;

const BANNER: &str = "--- GenZ-Lang v6.0 (Final) ---";

#[derive(Parser)]
#[command(name = "genzc", version, about = "Interpreter for GenZ-Lang")]
enum Command {
    /// Runs a program
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the language banner before running
        #[arg(long, default_value_t = false)]
        banner: bool,
    },
    /// Parses a program and prints it back
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
    /// Runs Read Eval Print Loop
    Repl,
}

fn main() -> ExitCode {
    init_tracing();

    let code = match Command::parse() {
        Command::Run { path, banner } => {
            print_running(&path.display().to_string());
            let start = Instant::now();

            let code = match run(&path, banner) {
                Ok(Outcome::Ok) => 0,
                Ok(outcome @ Outcome::Fatal(_)) => {
                    let code = outcome.exit_code();

                    if let Err(error) = outcome.into_result() {
                        report(&Error::Runtime { path: path.clone(), error });
                    }

                    code
                },
                Err(err) => {
                    report(&err);
                    1
                }
            };

            if code == 0 {
                print_finished(start.elapsed());
            } else {
                print_failed(start.elapsed());
            }

            code
        },
        Command::Parse { path, print_ast } => {
            match load_module(&path) {
                Ok(parsed) => {
                    if print_ast {
                        println!("{:#?}", parsed.module.program);
                    } else {
                        println!("{}", parsed.module.program);
                    }

                    0
                },
                Err(err) => {
                    report(&err);
                    1
                }
            }
        },
        Command::Rlpl => interactive(rlpl::start),
        Command::Rppl => interactive(rppl::start),
        Command::Repl => interactive(repl::start),
    };

    ExitCode::from(code as u8)
}

fn run(path: &Path, banner: bool) -> Result<Outcome, Error> {
    let parsed = load_module(path)?;

    if banner {
        println!("{BANNER}");
    }

    let Some(root) = parsed.module.program.root else {
        warn("Empty program", &format!("{} has no statements to run", path.display()));
        return Ok(Outcome::Ok);
    };

    let stdout = std::io::stdout().lock();

    Ok(execute(&root, stdout))
}

/// Reads `path` as a UTF-8 character stream straight into the parser. The
/// whole text is kept for diagnostics.
fn load_module(path: &Path) -> Result<Parsed, Error> {
    let file = File::open(path).map_err(|err| Error::file_io(path, err))?;
    let file_size = file.metadata().map_err(|err| Error::file_io(path, err))?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut read_error = None;
    let mut reader = BufReader::new(file);
    let mut chars = reader.chars();

    let parsed = parse_module_from_stream(chars.by_ref().map_while(|c| match c {
        Ok(c) => {
            src.push(c);
            Some(c)
        },
        Err(err) => {
            read_error = Some(err);
            None
        }
    }));

    if let Some(err) = read_error {
        return Err(Error::file_io(path, err));
    }

    match parsed {
        Ok(mut parsed) => {
            debug!(path = %path.display(), comments = parsed.comments.len(), "parsed module");

            parsed.module.name = path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            Ok(parsed)
        },
        Err(error) => {
            for c in chars {
                src.push(c.map_err(|err| Error::file_io(path, err))?);
            }

            Err(Error::Parse { path: path.to_path_buf(), src, error })
        }
    }
}

fn interactive(start: fn() -> std::io::Result<()>) -> i32 {
    ctrlc::set_handler(|| {
        eprintln!();
        std::process::exit(130);
    }).expect("Error setting Ctrl-C handler");

    match start() {
        Ok(()) => 0,
        Err(err) => {
            report(&Error::from(err));
            1
        }
    }
}
