use std::io::Write;

use genz_core::parser::prelude::parse_module;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

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
			line => {
				match parse_module(line) {
                    Ok(parsed) => match parsed.module.program.root {
						Some(root) => println!("{root}\n{root:#?}"),
						None => println!("(no statements)"),
					},
                    Err(err) => {
                        let (message, messages) = err.details();

                        println!("[at {}] Parse error: {}.\n\t{}", err.span, message, messages.join(";\n\t"))
                    }
                }
			}
		}
	}
}
