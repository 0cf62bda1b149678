use pretty_assertions::assert_eq;

use super::prelude::{LexResult, Lexer, LexicalError, LexicalErrorType, Token};

fn lex(input: &str) -> Vec<LexResult> {
    Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c))).collect()
}

fn tokens(input: &str) -> Result<Vec<Token>, LexicalError> {
    lex(input)
        .into_iter()
        .map(|res| res.map(|(_, token, _)| token))
        .collect()
}

#[test]
fn test_statements() -> Result<(), LexicalError> {
    let input = r#"
        x = 5;
        spill x;
    "#;

    assert_eq!(
        tokens(input)?,
        vec![
            Token::Ident("x".into()),
            Token::Assign,
            Token::Int(5),
            Token::Semicolon,
            Token::Spill,
            Token::Ident("x".into()),
            Token::Semicolon,
            Token::Eof,
        ]
    );

    Ok(())
}

#[test]
fn test_operators() -> Result<(), LexicalError> {
    let input = "+ - * / = == != < <= > >=";

    assert_eq!(
        tokens(input)?,
        vec![
            Token::Plus,
            Token::Minus,
            Token::Asterisk,
            Token::Slash,
            Token::Assign,
            Token::Equal,
            Token::NotEqual,
            Token::LessThan,
            Token::LessThanOrEqual,
            Token::GreaterThan,
            Token::GreaterThanOrEqual,
            Token::Eof,
        ]
    );

    Ok(())
}

#[test]
fn test_keywords_and_identifiers() -> Result<(), LexicalError> {
    let input = "if else while spill iffy _tmp Spill x1";

    assert_eq!(
        tokens(input)?,
        vec![
            Token::If,
            Token::Else,
            Token::While,
            Token::Spill,
            Token::Ident("iffy".into()),
            Token::Ident("_tmp".into()),
            Token::Ident("Spill".into()),
            Token::Ident("x1".into()),
            Token::Eof,
        ]
    );

    Ok(())
}

#[test]
fn test_strings() -> Result<(), LexicalError> {
    let input = r#"spill "no cap\n" "say \"hi\"" "a\\b\tc";"#;

    assert_eq!(
        tokens(input)?,
        vec![
            Token::Spill,
            Token::Str("no cap\n".into()),
            Token::Str("say \"hi\"".into()),
            Token::Str("a\\b\tc".into()),
            Token::Semicolon,
            Token::Eof,
        ]
    );

    Ok(())
}

#[test]
fn test_comments() -> Result<(), LexicalError> {
    let input = "# leading comment\nx = 1; # trailing\n";

    assert_eq!(
        tokens(input)?,
        vec![
            Token::Comment,
            Token::Ident("x".into()),
            Token::Assign,
            Token::Int(1),
            Token::Semicolon,
            Token::Comment,
            Token::Eof,
        ]
    );

    Ok(())
}

#[test]
fn test_spans() {
    let spans = lex("ab >= \"é\"")
        .into_iter()
        .map(|res| {
            let (start, _, end) = res.unwrap();
            (start, end)
        })
        .collect::<Vec<_>>();

    assert_eq!(spans, vec![(0, 2), (3, 5), (6, 10), (10, 10)]);
}

#[test]
fn test_stops_after_eof() {
    let mut lexer = Lexer::new("".char_indices().map(|(i, c)| (i as u32, c)));

    assert_eq!(lexer.next(), Some(Ok((0, Token::Eof, 0))));
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_invalid_input() {
    let cases = [
        ("x = 1 @", LexicalErrorType::UnrecognizedToken { tok: '@' }),
        ("!x", LexicalErrorType::UnrecognizedToken { tok: '!' }),
        ("\"open", LexicalErrorType::UnterminatedString),
        ("\"bad \\q\"", LexicalErrorType::UnknownEscape { ch: 'q' }),
        ("99999999999999999999", LexicalErrorType::IntegerOverflow),
    ];

    for (input, expected) in cases {
        let error = lex(input)
            .into_iter()
            .find_map(|res| res.err())
            .unwrap_or_else(|| panic!("expected `{input}` to fail"));

        assert_eq!(error.error, expected, "input: {input}");
    }
}

#[test]
fn test_error_spans() {
    let cases = [
        ("x = 1 @", (6, 7)),
        ("\"open", (0, 5)),
        ("\"bad \\q\"", (5, 7)),
        ("spill 99999999999999999999;", (6, 26)),
    ];

    for (input, (start, end)) in cases {
        let error = lex(input)
            .into_iter()
            .find_map(|res| res.err())
            .unwrap_or_else(|| panic!("expected `{input}` to fail"));

        assert_eq!((error.location.start, error.location.end), (start, end), "input: {input}");
    }
}
