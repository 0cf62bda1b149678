use std::io::Write;

use genz_core::lexer::prelude::{Lexer, Token};

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
				let lexer = Lexer::new(line.char_indices().map(|(i, c)| (i as u32, c)));

				for res in lexer {
                    match res {
                        Ok((start, token, end)) => {
							if token == Token::Eof {
								break;
							}

                            println!("{start}..{end} {:?}", token);
                        },
                        Err(err) => {
                            let (message, hints) = err.details();
                            println!("[at {}] Lexical error: {}", err.location, message);
                            if !hints.is_empty() {
                                println!("{}", hints.join("\n"));
                            }
							break;
                        }
                    }
				}
			}
		}
	}
}
