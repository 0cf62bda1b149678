use pretty_assertions::assert_eq;

use crate::{
    environment::prelude::{Environment, Value, ValueType},
    parser::prelude::{parse_module, BinaryOperator, Node}
};

use super::prelude::{apply, execute, Interpreter, Operation, Outcome, RuntimeError};

fn run(src: &str) -> (String, Outcome) {
    let parsed = parse_module(src).expect("valid program");
    let mut out = Vec::new();

    let outcome = match &parsed.module.program.root {
        Some(root) => execute(root, &mut out),
        None => Outcome::Ok,
    };

    (String::from_utf8(out).expect("utf8 output"), outcome)
}

fn divide(left: i64, right: i64) -> Result<Value, RuntimeError> {
    let node = Node::binary(BinaryOperator::Div, Node::int(left), Node::int(right));

    Interpreter::new(std::io::sink()).evaluate(&node)
}

#[test]
fn test_assign_and_spill() {
    assert_eq!(run("x = 5; spill x;"), ("5\n".to_string(), Outcome::Ok));
}

#[test]
fn test_division_by_zero_is_fatal() {
    let (output, outcome) = run("x = 10; y = 0; spill x / y;");

    assert_eq!(output, "");
    assert_eq!(outcome, Outcome::Fatal(RuntimeError::DivisionByZero));
    assert_ne!(outcome.exit_code(), 0);
}

#[test]
fn test_counting_loop() {
    let (output, outcome) = run("i = 0; while (i < 3) { spill i; i = i + 1; }");

    assert_eq!(output, "0\n1\n2\n");
    assert!(outcome.is_ok());
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn test_undefined_variable_is_fatal() {
    let (output, outcome) = run("spill missing;");

    assert_eq!(output, "");
    assert_eq!(
        outcome,
        Outcome::Fatal(RuntimeError::UndefinedVariable { name: "missing".into() })
    );
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn test_if_else_takes_one_branch() {
    assert_eq!(
        run("if (1 > 0) { spill 1; } else { spill 2; }"),
        ("1\n".to_string(), Outcome::Ok)
    );
    assert_eq!(
        run("if (1 < 0) { spill 1; } else { spill 2; }"),
        ("2\n".to_string(), Outcome::Ok)
    );
    assert_eq!(run("if (0) { spill 1; }"), ("".to_string(), Outcome::Ok));
    assert_eq!(
        run("if (0 - 7) { spill \"nonzero is true\"; }"),
        ("nonzero is true\n".to_string(), Outcome::Ok)
    );
}

#[test]
fn test_else_if_chain() {
    let src = r#"
        n = 15;
        if (n / 15 * 15 == n) { spill "FizzBuzz"; }
        else if (n / 5 * 5 == n) { spill "Buzz"; }
        else { spill n; }
    "#;

    assert_eq!(run(src), ("FizzBuzz\n".to_string(), Outcome::Ok));
}

#[test]
fn test_loop_with_false_condition_never_runs() {
    let (output, outcome) = run("while (0) { spill missing; } spill \"after\";");

    assert_eq!(output, "after\n");
    assert!(outcome.is_ok());
}

#[test]
fn test_loop_rechecks_condition_after_each_body() {
    let src = r#"
        i = 0;
        while (i < 4) { i = i + 1; }
        spill i;
    "#;

    assert_eq!(run(src).0, "4\n");

    let mut interpreter = Interpreter::new(Vec::new());
    let counted = Node::while_loop(
        Node::binary(
            BinaryOperator::LessThan,
            Node::ident("i"),
            Node::int(3),
        ),
        Node::assign("i", Node::binary(BinaryOperator::Add, Node::ident("i"), Node::int(1))),
    );

    interpreter.evaluate(&Node::assign("i", Node::int(0))).unwrap();
    interpreter.evaluate(&counted).unwrap();

    assert_eq!(interpreter.environment().lookup("i"), Ok(Value::Integer { value: 3 }));
}

#[test]
fn test_output_before_failure_is_kept() {
    let (output, outcome) = run(r#"spill "first"; spill 2; spill 1 / 0; spill "never";"#);

    assert_eq!(output, "first\n2\n");
    assert_eq!(outcome, Outcome::Fatal(RuntimeError::DivisionByZero));
}

#[test]
fn test_failure_stops_assignments() {
    let parsed = parse_module("a = 1; b = missing; c = 3;").unwrap();
    let root = parsed.module.program.root.unwrap();

    let mut interpreter = Interpreter::new(Vec::new());
    let result = interpreter.evaluate(&root);

    assert_eq!(result, Err(RuntimeError::UndefinedVariable { name: "missing".into() }));
    assert_eq!(interpreter.environment().len(), 1);
    assert_eq!(interpreter.environment().get("c"), None);
}

#[test]
fn test_operands_evaluate_left_to_right_without_short_circuit() {
    assert_eq!(
        run("spill missing * (1 / 0);").1,
        Outcome::Fatal(RuntimeError::UndefinedVariable { name: "missing".into() })
    );
    assert_eq!(
        run("spill 0 * (1 / 0);").1,
        Outcome::Fatal(RuntimeError::DivisionByZero)
    );
    assert_eq!(
        run("spill (0 == 1) * nope;").1,
        Outcome::Fatal(RuntimeError::UndefinedVariable { name: "nope".into() })
    );
}

#[test]
fn test_long_flat_program() {
    let src = "x = x + 1;\n".repeat(100_000);
    let (output, outcome) = run(&format!("x = 0;\n{src}spill x;"));

    assert_eq!(output, "100000\n");
    assert!(outcome.is_ok());
}

#[test]
fn test_long_program_stops_at_failure() {
    let src = format!("{}spill 1 / 0;\n{}", "spill 7;\n".repeat(50_000), "spill 8;\n".repeat(50_000));
    let (output, outcome) = run(&src);

    assert_eq!(output.lines().count(), 50_000);
    assert!(output.lines().all(|line| line == "7"));
    assert_eq!(outcome, Outcome::Fatal(RuntimeError::DivisionByZero));
}

#[test]
fn test_division_truncates_toward_zero() {
    let cases = [(7, 2, 3), (-7, 2, -3), (7, -2, -3), (-7, -2, 3), (0, 5, 0), (6, 3, 2)];

    for (left, right, expected) in cases {
        assert_eq!(
            divide(left, right),
            Ok(Value::Integer { value: expected }),
            "{left} / {right}"
        );
    }

    assert_eq!(divide(42, 0), Err(RuntimeError::DivisionByZero));
    assert_eq!(divide(i64::MIN, -1), Ok(Value::Integer { value: i64::MIN }));
}

#[test]
fn test_operator_results() {
    let int = |value: i64| Value::Integer { value };

    let cases = [
        (BinaryOperator::Add, 2, 3, 5),
        (BinaryOperator::Sub, 2, 3, -1),
        (BinaryOperator::Mul, -4, 3, -12),
        (BinaryOperator::Equal, 3, 3, 1),
        (BinaryOperator::Equal, 3, 4, 0),
        (BinaryOperator::NotEqual, 3, 4, 1),
        (BinaryOperator::GreaterThan, 4, 3, 1),
        (BinaryOperator::GreaterThan, 3, 3, 0),
        (BinaryOperator::LessThan, 3, 4, 1),
        (BinaryOperator::GreaterThanOrEqual, 3, 3, 1),
        (BinaryOperator::LessThanOrEqual, 4, 3, 0),
    ];

    for (operator, left, right, expected) in cases {
        assert_eq!(
            apply(operator, &int(left), &int(right)),
            Ok(int(expected)),
            "{left} {operator} {right}"
        );
    }

    assert_eq!(apply(BinaryOperator::Add, &int(i64::MAX), &int(1)), Ok(int(i64::MIN)));
}

#[test]
fn test_text_operands_are_rejected() {
    assert_eq!(
        run(r#"spill "a" + 1;"#).1,
        Outcome::Fatal(RuntimeError::TypeMismatch {
            operation: Operation::Operand(BinaryOperator::Add),
            found: ValueType::String,
        })
    );
    assert_eq!(
        run(r#"s = "yes"; if (s) { spill 1; }"#).1,
        Outcome::Fatal(RuntimeError::TypeMismatch {
            operation: Operation::Condition,
            found: ValueType::String,
        })
    );
    assert_eq!(
        RuntimeError::TypeMismatch {
            operation: Operation::Operand(BinaryOperator::Div),
            found: ValueType::String,
        }.to_string(),
        "expected an Integer as operand of `/`, found a String"
    );
}

#[test]
fn test_strings_print_verbatim() {
    let (output, outcome) = run(r#"msg = "no cap\tfr"; spill msg; spill "";"#);

    assert_eq!(output, "no cap\tfr\n\n");
    assert!(outcome.is_ok());
}

#[test]
fn test_statements_yield_zero() {
    let mut interpreter = Interpreter::new(Vec::new());

    assert_eq!(interpreter.evaluate(&Node::assign("x", Node::int(9))), Ok(Value::Integer { value: 0 }));
    assert_eq!(interpreter.evaluate(&Node::print(Node::ident("x"))), Ok(Value::Integer { value: 0 }));
    assert_eq!(interpreter.evaluate(&Node::ident("x")), Ok(Value::Integer { value: 9 }));
    assert_eq!(interpreter.evaluate(&Node::string("lit")), Ok(Value::from("lit")));

    let (_, out) = interpreter.into_parts();
    assert_eq!(out, b"9\n");
}

#[test]
fn test_runs_do_not_share_state() {
    assert!(run("leak = 1;").1.is_ok());
    assert_eq!(
        run("spill leak;").1,
        Outcome::Fatal(RuntimeError::UndefinedVariable { name: "leak".into() })
    );
}

#[test]
fn test_interpreter_keeps_bindings_between_calls() {
    let mut env = Environment::new();
    env.store("base", Value::Integer { value: 40 });

    let mut interpreter = Interpreter::with_environment(env, Vec::new());

    for src in ["x = base + 1;", "x = x + 1;", "spill x;"] {
        let root = parse_module(src).unwrap().module.program.root.unwrap();
        interpreter.evaluate(&root).unwrap();
    }

    assert_eq!(interpreter.output(), b"42\n");
}

#[test]
fn test_failing_output_is_fatal() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let outcome = execute(&Node::print(Node::int(1)), Broken);

    assert_eq!(
        outcome,
        Outcome::Fatal(RuntimeError::Io { err: std::io::ErrorKind::BrokenPipe })
    );
}

#[test]
fn test_demo_programs() {
    let (output, outcome) = run(include_str!("../../../demos/fizzbuzz.genz"));

    assert!(outcome.is_ok());
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec![
            "1", "2", "Fizz", "4", "Buzz", "Fizz", "7", "8", "Fizz", "Buzz",
            "11", "Fizz", "13", "14", "FizzBuzz",
        ]
    );

    assert_eq!(
        run(include_str!("../../../demos/factorial.genz")),
        ("10! is\n3628800\n".to_string(), Outcome::Ok)
    );
}
