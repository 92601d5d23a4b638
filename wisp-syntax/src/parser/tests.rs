use indoc::indoc;
use wisp_lexer::Lexer;

use super::Parser;
use crate::ast::{Expression, Statement};

fn parse(input: &str) -> crate::ast::Program {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "parser had errors: {:?}",
        parser.errors()
    );
    program
}

#[test]
fn let_statements_bind_name_to_value() {
    let program = parse("let x = 5; let y = 10; let foobar = 838383;");
    assert_eq!(program.statements.len(), 3);
    for (statement, expected_name) in program.statements.iter().zip(["x", "y", "foobar"]) {
        match statement {
            Statement::Let(let_stmt) => assert_eq!(let_stmt.name.value, expected_name),
            other => panic!("expected let statement, got {other}"),
        }
    }
}

#[test]
fn return_statements_are_parsed() {
    let program = parse("return 5; return 10; return 993322;");
    assert_eq!(program.statements.len(), 3);
    for statement in &program.statements {
        assert!(matches!(statement, Statement::Return(_)));
    }
}

#[test]
fn missing_assign_in_let_records_an_error() {
    let lexer = Lexer::new("let x 5;");
    let mut parser = Parser::new(lexer);
    parser.parse_program();
    assert_eq!(
        parser.errors(),
        vec!["expected peek type was = = got = INT instead".to_string()]
    );
}

#[test]
fn unknown_token_in_expression_position_records_an_error() {
    let lexer = Lexer::new(";");
    let mut parser = Parser::new(lexer);
    parser.parse_program();
    assert_eq!(
        parser.errors(),
        vec!["no prefix parse function for ; found".to_string()]
    );
}

#[test]
fn operator_precedence_matches_canonical_pretty_form() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true", "true"),
        ("false", "false"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (input, expected) in cases {
        let program = parse(input);
        assert_eq!(program.to_string(), expected, "input was {input:?}");
    }
}

#[test]
fn if_expression_pretty_form_omits_else_when_absent() {
    let program = parse("if (x < y) { x }");
    assert_eq!(program.to_string(), "if(x < y) x");
}

#[test]
fn if_else_expression_pretty_form_includes_both_branches() {
    let program = parse("if (x < y) { x } else { y }");
    assert_eq!(program.to_string(), "if(x < y) xelse y");
}

#[test]
fn function_literal_parses_parameters_and_body() {
    let program = parse("fn(x, y) { x + y; }");
    let Statement::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    let Expression::Function(function) = &stmt.expression else {
        panic!("expected function literal");
    };
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[0].value, "x");
    assert_eq!(function.parameters[1].value, "y");
    assert_eq!(function.body.to_string(), "(x + y)");
}

#[test]
fn function_literal_permits_an_empty_parameter_list() {
    let program = parse("fn() { 1; }");
    let Statement::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    let Expression::Function(function) = &stmt.expression else {
        panic!("expected function literal");
    };
    assert!(function.parameters.is_empty());
}

#[test]
fn array_literal_parses_elements() {
    let program = parse("[1, 2 * 2, 3 + 3]");
    assert_eq!(program.to_string(), "[1, (2 * 2), (3 + 3)]");
}

#[test]
fn hash_literal_parses_string_keys() {
    let program = parse(r#"{"one": 1, "two": 2, "three": 3}"#);
    let Statement::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    let Expression::Hash(hash) = &stmt.expression else {
        panic!("expected hash literal");
    };
    assert_eq!(hash.pairs.len(), 3);
}

#[test]
fn hash_literal_parses_when_empty() {
    let program = parse("{}");
    let Statement::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    let Expression::Hash(hash) = &stmt.expression else {
        panic!("expected hash literal");
    };
    assert!(hash.pairs.is_empty());
}

#[test]
fn index_expression_parses_left_and_index() {
    let program = parse("myArray[1 + 1]");
    assert_eq!(program.to_string(), "(myArray[(1 + 1)])");
}

#[test]
fn string_literal_is_not_quoted_in_pretty_form() {
    let program = parse(r#""hello world""#);
    assert_eq!(program.to_string(), "hello world");
}

#[test]
fn a_multi_statement_program_parses_into_one_statement_per_line() {
    let program = parse(indoc! {"
        let newAdder = fn(x) {
            fn(y) { x + y };
        };
        let addTwo = newAdder(2);
        addTwo(3);
    "});
    assert_eq!(program.statements.len(), 3);
    assert!(matches!(program.statements[0], Statement::Let(_)));
    assert!(matches!(program.statements[1], Statement::Let(_)));
    assert!(matches!(program.statements[2], Statement::Expression(_)));
}

#[test]
fn partial_parse_is_still_observable_after_an_error() {
    // The malformed `let` aborts mid-statement, leaving its leftover tokens
    // (`5;`) to be picked up as their own expression statement by the outer
    // loop — the parser does not resynchronize past the error.
    let lexer = Lexer::new("let x 5; let y = 10;");
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    assert!(!parser.errors().is_empty());
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0].to_string(), "5");
    assert!(matches!(program.statements[1], Statement::Let(_)));
}
