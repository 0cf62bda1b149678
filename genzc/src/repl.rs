use std::{io::Write, path::PathBuf};

use genz_core::{
	eval::prelude::Interpreter,
	parser::prelude::parse_module,
	utils::prelude::Error,
};

use crate::cli::report;

const PROMPT: &str = "genz> ";
const SOURCE_NAME: &str = "<repl>";

/// Each line runs against the same bindings. A fatal error ends only the
/// line that raised it and is reported on stderr.
pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let mut interpreter = Interpreter::new(std::io::stdout());

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		match input.trim_end_matches(['\n', '\r']) {
			"" => {},
			".exit" => return Ok(()),
			".env" => {
				for (name, value) in interpreter.environment().iter() {
					println!("{name} = {}", value.as_literal());
				}
			},
			line => {
				if let Err(err) = eval_line(&mut interpreter, line) {
					report(&err);
				}
			}
		}
	}
}

fn eval_line<W: Write>(interpreter: &mut Interpreter<W>, line: &str) -> Result<(), Error> {
	let parsed = parse_module(line).map_err(|error| Error::Parse {
		path: PathBuf::from(SOURCE_NAME),
		src: line.to_string(),
		error,
	})?;

	if let Some(root) = parsed.module.program.root {
		interpreter.evaluate(&root).map_err(|error| Error::Runtime {
			path: PathBuf::from(SOURCE_NAME),
			error,
		})?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use genz_core::{eval::prelude::{Interpreter, RuntimeError}, utils::prelude::Error};

	use super::eval_line;

	#[test]
	fn test_errors_stay_out_of_program_output() {
		let mut interpreter = Interpreter::new(Vec::new());

		assert_eq!(eval_line(&mut interpreter, "x = 2; spill x;"), Ok(()));
		assert!(matches!(eval_line(&mut interpreter, "spill ;"), Err(Error::Parse { .. })));
		assert_eq!(
			eval_line(&mut interpreter, "spill x; spill x / 0;"),
			Err(Error::Runtime {
				path: "<repl>".into(),
				error: RuntimeError::DivisionByZero,
			})
		);
		assert_eq!(eval_line(&mut interpreter, "spill x + 1;"), Ok(()));

		let (_, out) = interpreter.into_parts();
		assert_eq!(String::from_utf8(out).unwrap(), "2\n2\n3\n");
	}
}
