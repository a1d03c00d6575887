use super::*;
use crate::parser::ast::Statement;
use crate::parser::tokenizer::{Lexer, Token, TokenType};
use crate::parser::Parser;

fn parse(input: &str) -> Program {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "\nParse errors for \"{}\": {:?}\n",
        input,
        parser.errors()
    );
    program
}

fn run(input: &str) -> Object {
    let mut env = Environment::new();
    evaluate(&parse(input), &mut env)
}

fn assert_integer(input: &str, expected: i32) {
    match run(input) {
        Object::Integer(value) => assert_eq!(value, expected, "\nInput: \"{}\"\n", input),
        other => panic!("expected Integer({expected}) for \"{input}\", got {other:?}"),
    }
}

fn assert_boolean(input: &str, expected: bool) {
    match run(input) {
        Object::Boolean(value) => assert_eq!(value, expected, "\nInput: \"{}\"\n", input),
        other => panic!("expected Boolean({expected}) for \"{input}\", got {other:?}"),
    }
}

fn assert_null(input: &str) {
    match run(input) {
        Object::Null => {}
        other => panic!("expected Null for \"{input}\", got {other:?}"),
    }
}

#[test]
fn test_integer_expressions() {
    assert_integer("5", 5);
    assert_integer("-5", -5);
    assert_integer("--5", 5);
    assert_integer("5 + 5 * 2", 15);
    assert_integer("(5 + 5) * 2", 20);
    assert_integer("50 / 2 * 2 + 10", 60);
    assert_integer("3 - 10", -7);
    assert_integer("-7 / 2", -3);
    assert_integer("7 / 2", 3);
}

#[test]
fn test_arithmetic_wraps_around() {
    assert_integer("2147483647 + 1", i32::MIN);
    assert_integer("-2147483647 - 2", i32::MAX);
    assert_integer("2147483647 * 2", -2);
}

#[test]
fn test_boolean_expressions() {
    assert_boolean("true", true);
    assert_boolean("false", false);
    assert_boolean("1 < 2", true);
    assert_boolean("1 > 2", false);
    assert_boolean("5 <= 5", true);
    assert_boolean("4 >= 5", false);
    assert_boolean("5 == 5", true);
    assert_boolean("1 != 1", false);
    assert_boolean("true == true", true);
    assert_boolean("false == false", true);
    assert_boolean("true != false", true);
}

#[test]
fn test_bang_operator() {
    assert_boolean("!true", false);
    assert_boolean("!false", true);
    assert_boolean("!5", false);
    assert_boolean("!!5", true);
    assert_boolean("!0", false);
    assert_boolean("!foobar", true);
}

#[test]
fn test_equality_across_types() {
    assert_boolean("5 == true", false);
    assert_boolean("5 != true", true);
    assert_boolean("true == 1", false);
    // a function value is identical to itself
    assert_boolean("let f = function() { 1; }; f == f", true);
    assert_boolean(
        "let f = function() { 1; }; let g = function() { 1; }; f == g",
        false,
    );
}

#[test]
fn test_type_errors_degrade_to_null() {
    assert_null("-true");
    assert_null("true + true");
    assert_null("5 + true");
    assert_null("true < false");
}

#[test]
fn test_if_expressions() {
    assert_integer("if (true) { 10 }", 10);
    assert_null("if (false) { 10 }");
    assert_integer("if (0) { 10 }", 10);
    assert_integer("if (1 < 2) { 10 } else { 20 }", 10);
    assert_integer("if (1 > 2) { 10 } else { 20 }", 20);
}

#[test]
fn test_let_statements() {
    assert_integer("let x = 10; x + 5;", 15);
    assert_integer("let a = 5; let b = a; b;", 5);
    assert_integer("let a = 5; let a = a + 1; a;", 6);
    // a let statement evaluates to the bound value
    assert_integer("let a = 3 * 3", 9);
}

#[test]
fn test_unbound_identifier_is_null() {
    assert_null("foobar");
    assert_null("let x = 5; y;");
}

#[test]
fn test_top_level_return() {
    let result = run("return 10; 9;");
    match result {
        Object::Return(ref value) => match **value {
            Object::Integer(10) => {}
            ref other => panic!("expected wrapped Integer(10), got {other:?}"),
        },
        ref other => panic!("expected Return wrapper, got {other:?}"),
    }
    assert_eq!(result.inspect(), "10");
}

#[test]
fn test_function_application() {
    assert_integer("let identity = function(x) { x; }; identity(5);", 5);
    assert_integer("let add = function(x, y) { x + y; }; add(2, 3);", 5);
    assert_integer("function(x) { x; }(5)", 5);
    assert_integer("let d = function(x) { x + 1; }; d(d(4));", 6);
    // return stops the body
    assert_integer("let f = function() { return 3; 9; }; f();", 3);
}

#[test]
fn test_call_errors_degrade_to_null() {
    assert_null("let identity = function(x) { x; }; identity(1, 2);");
    assert_null("let identity = function(x) { x; }; identity();");
    assert_null("let x = 5; x(3);");
}

#[test]
fn test_closures() {
    assert_integer(
        "let newAdder = function(x) { function(y) { x + y; }; }; \
         let addTwo = newAdder(2); \
         addTwo(3);",
        5,
    );
}

#[test]
fn test_closure_sees_later_bindings() {
    // the captured scope is shared, not copied
    assert_integer("let counter = function() { x; }; let x = 5; counter();", 5);
}

#[test]
fn test_recursion() {
    assert_integer(
        "let fact = function(n) { if (n < 2) { 1 } else { n * fact(n - 1) } }; fact(5);",
        120,
    );
}

#[test]
fn test_while_loops() {
    assert_integer(
        "let sum = 0; let i = 1; \
         while (i <= 4) { let sum = sum + i; let i = i + 1; } \
         sum;",
        10,
    );
    assert_null("while (false) { 1 }");
}

#[test]
fn test_for_loops() {
    assert_integer(
        "let total = 0; \
         for (let i = 1; i <= 4; let i = i + 1) { let total = total + i; } \
         total;",
        10,
    );
    assert_integer(
        "let i = 0; for (; i < 3;) { let i = i + 1; } i;",
        3,
    );
}

#[test]
fn test_return_unwinds_out_of_loops() {
    assert_integer("let f = function() { while (true) { return 42; } }; f();", 42);
    assert_integer("let f = function() { for (;;) { return 7; } }; f();", 7);
}

#[test]
fn test_last_statement_value() {
    assert_integer("5; 6;", 6);
    let mut env = Environment::new();
    let empty = Program { statements: vec![] };
    assert!(matches!(evaluate(&empty, &mut env), Object::Null));
}

#[test]
#[should_panic]
fn test_division_by_zero_panics() {
    run("5 / 0;");
}

#[test]
fn test_program_and_block_agree() {
    let program = parse("let x = 2; x * 3;");
    let mut env = Environment::new();
    let direct = evaluate(&program, &mut env);

    let block = Statement::Block(BlockStatement {
        token: Token::new(TokenType::LBRACE, "{"),
        statements: parse("let x = 2; x * 3;").statements,
    });
    let mut env = Environment::new();
    let wrapped = eval_statement(&block, &mut env, Environment::GLOBAL);

    assert_eq!(direct.inspect(), wrapped.inspect());
    assert_eq!(direct.inspect(), "6");
}

#[test]
fn test_environment_chain() {
    let mut env = Environment::new();
    env.set(Environment::GLOBAL, "x", Object::Integer(1));
    let inner = env.enclosed(Environment::GLOBAL);

    // lookups walk outward
    assert!(matches!(env.get(inner, "x"), Some(Object::Integer(1))));
    assert!(env.get(inner, "y").is_none());

    // writes shadow locally without touching the outer binding
    env.set(inner, "x", Object::Integer(2));
    assert!(matches!(env.get(inner, "x"), Some(Object::Integer(2))));
    assert!(matches!(
        env.get(Environment::GLOBAL, "x"),
        Some(Object::Integer(1))
    ));

    assert!(env.defined_locally(inner, "x"));
    assert!(!env.defined_locally(inner, "y"));
    let empty = env.enclosed(inner);
    assert!(!env.defined_locally(empty, "x"));
}

#[test]
fn test_string_identity() {
    let first = Object::Str(Rc::new("hello".to_string()));
    let same = first.clone();
    let other = Object::Str(Rc::new("hello".to_string()));
    assert!(identical(&first, &same));
    assert!(!identical(&first, &other));
    assert_eq!(first.object_type(), ObjectType::Str);
    assert_eq!(first.inspect(), "hello");
}

#[test]
fn test_inspect() {
    assert_eq!(run("5").inspect(), "5");
    assert_eq!(run("true").inspect(), "true");
    assert_eq!(run("if (false) { 1 }").inspect(), "null");
    assert_eq!(run("function(x) { x; }").inspect(), "function(...)");
    assert_eq!(run("5").object_type(), ObjectType::Integer);
    assert_eq!(run("true").object_type(), ObjectType::Boolean);
    assert_eq!(run("foobar").object_type(), ObjectType::Null);
}
