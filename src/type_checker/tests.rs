//! Unit tests for the type checker.
//!
//! This module contains tests for name resolution, type inference and the
//! facts collected for code generation.

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::{Type, UnderlyingKind},
    },
    config::Options,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    builtins::BuiltinRegistry,
    program::Program,
    scope::{ScopeArena, ScopeId, VariableKind},
    type_checker::{operator_is_defined, type_check, OperatorPosition},
};

fn at(line: u32, column: u32) -> Position {
    Position::new(Rc::new(String::from("test.sf")), line, column)
}

fn check_with(body: Vec<Node>, options: &Options) -> (Node, ScopeArena, Program, Vec<Error>) {
    let mut ast = Node::program("main", Node::block(body, at(1, 1)), at(1, 1));
    let builtins = BuiltinRegistry::new();
    let mut errors = vec![];
    let (scopes, program) = type_check(&mut ast, &builtins, options, &mut errors);
    (ast, scopes, program, errors)
}

fn check(body: Vec<Node>) -> (Node, ScopeArena, Program, Vec<Error>) {
    check_with(body, &Options::default())
}

fn statements(ast: &Node) -> &Vec<Node> {
    let NodeKind::Program { contents, .. } = &ast.kind else {
        panic!("Expected program");
    };
    let NodeKind::Block { body, .. } = &contents.kind else {
        panic!("Expected block");
    };
    body
}

fn error_names(errors: &[Error]) -> Vec<&str> {
    errors.iter().map(|error| error.get_error_name()).collect()
}

fn add_function() -> Node {
    Node::function(
        "add",
        vec![
            Node::parameter("int", "a", at(1, 10)),
            Node::parameter("int", "b", at(1, 17)),
        ],
        "int",
        Node::block(
            vec![Node::return_(
                Some(Node::binary(
                    TokenKind::Plus,
                    Node::identifier("a", at(2, 12)),
                    Node::identifier("b", at(2, 16)),
                    at(2, 12),
                )),
                at(2, 5),
            )],
            at(1, 25),
        ),
        at(1, 1),
    )
}

#[test]
fn test_declaration_round_trip() {
    let (ast, scopes, _, errors) = check(vec![
        Node::declaration("int", "x", Node::integer(5, at(1, 9)), at(1, 1)),
        Node::identifier("x", at(2, 1)),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
    let body = statements(&ast);
    assert_eq!(body[0].get_type(), Some(&Type::int()));
    assert_eq!(body[1].get_type(), Some(&Type::int()));

    let variable = scopes.get(ScopeId(0)).get_variable("x").unwrap();
    assert_eq!(variable.ty, Type::int());
    assert_eq!(variable.kind, VariableKind::Local);
}

#[test]
fn test_undefined_symbol() {
    let (ast, _, _, errors) = check(vec![Node::identifier("missing", at(3, 4))]);

    assert_eq!(error_names(&errors), vec!["UndefinedSymbol"]);
    assert_eq!(errors[0].get_position(), &at(3, 4));
    assert!(statements(&ast)[0].get_type().unwrap().is_error());
}

#[test]
fn test_declaration_is_not_visible_before_it() {
    let (_, _, _, errors) = check(vec![
        Node::identifier("x", at(1, 1)),
        Node::declaration("int", "x", Node::integer(1, at(2, 9)), at(2, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["UndefinedSymbol"]);
}

#[test]
fn test_nested_scope_sees_outer_declaration() {
    let (ast, _, _, errors) = check(vec![
        Node::declaration("string", "greeting", Node::string("hi", at(1, 19)), at(1, 1)),
        Node::if_(
            Node::boolean(true, at(2, 4)),
            Node::block(
                vec![Node::block(vec![Node::identifier("greeting", at(4, 9))], at(3, 5))],
                at(2, 9),
            ),
            None,
            at(2, 1),
        ),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
    let NodeKind::IfStatement { then, .. } = &statements(&ast)[1].kind else {
        panic!("Expected if statement");
    };
    let NodeKind::Block { body, .. } = &then.kind else {
        panic!("Expected block");
    };
    let NodeKind::Block { body, .. } = &body[0].kind else {
        panic!("Expected block");
    };
    assert_eq!(body[0].get_type(), Some(&Type::string()));
}

#[test]
fn test_inner_declaration_is_not_visible_outside() {
    let (_, _, _, errors) = check(vec![
        Node::block(
            vec![Node::declaration("int", "y", Node::integer(1, at(2, 13)), at(2, 5))],
            at(1, 1),
        ),
        Node::identifier("y", at(4, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["UndefinedSymbol"]);
    assert_eq!(errors[0].get_position().line, 4);
}

#[test]
fn test_declaration_type_mismatch() {
    let (ast, scopes, _, errors) = check(vec![
        Node::declaration("int", "x", Node::string("five", at(1, 9)), at(1, 1)),
        Node::identifier("x", at(2, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["TypeMismatch"]);
    assert_eq!(errors[0].get_position(), &at(1, 9));

    // The declared type wins, so later uses are not reported again.
    assert_eq!(statements(&ast)[1].get_type(), Some(&Type::int()));
    assert_eq!(scopes.get(ScopeId(0)).get_variable("x").unwrap().ty, Type::int());
}

#[test]
fn test_declaration_with_unknown_type() {
    let (_, _, _, errors) = check(vec![
        Node::declaration("widget", "w", Node::integer(1, at(1, 12)), at(1, 1)),
        Node::identifier("w", at(2, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["UnknownType"]);
}

#[test]
fn test_redeclaration_in_same_scope_overwrites() {
    let (ast, _, _, errors) = check(vec![
        Node::declaration("int", "x", Node::integer(1, at(1, 9)), at(1, 1)),
        Node::declaration("float", "x", Node::float(2.0, at(2, 11)), at(2, 1)),
        Node::identifier("x", at(3, 1)),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(statements(&ast)[2].get_type(), Some(&Type::float()));
}

#[test]
fn test_binary_op_type_mismatch_cites_right_operand() {
    let (ast, _, program, errors) = check(vec![Node::binary(
        TokenKind::Plus,
        Node::integer(1, at(1, 1)),
        Node::float(2.0, at(1, 5)),
        at(1, 1),
    )]);

    assert_eq!(error_names(&errors), vec!["TypeMismatch"]);
    assert_eq!(errors[0].get_position(), &at(1, 5));
    assert!(statements(&ast)[0].get_type().unwrap().is_error());
    assert!(program.binary_ops.is_empty());
}

#[test]
fn test_binary_ops_are_recorded_per_use() {
    let (ast, _, program, errors) = check(vec![
        Node::binary(TokenKind::Plus, Node::integer(1, at(1, 1)), Node::integer(2, at(1, 5)), at(1, 1)),
        Node::binary(TokenKind::Plus, Node::integer(3, at(2, 1)), Node::integer(4, at(2, 5)), at(2, 1)),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(statements(&ast)[0].get_type(), Some(&Type::int()));
    assert_eq!(program.binary_ops.len(), 2);
    assert_eq!(program.binary_ops[0].signature(), "add int int");
    assert_eq!(program.binary_ops[0].module, "main");
}

#[test]
fn test_undefined_operator() {
    let (_, _, program, errors) = check(vec![Node::binary(
        TokenKind::Dash,
        Node::string("a", at(1, 1)),
        Node::string("b", at(1, 7)),
        at(1, 5),
    )]);

    assert_eq!(error_names(&errors), vec!["UndefinedOperator"]);
    assert_eq!(
        errors[0].get_internal_error(),
        &ErrorImpl::UndefinedOperator {
            operator: String::from("-"),
            operand: String::from("string"),
        }
    );
    assert!(program.binary_ops.is_empty());
}

#[test]
fn test_lenient_operators() {
    let options = Options::default().with_strict_operators(false);
    let (_, _, program, errors) = check_with(
        vec![Node::binary(
            TokenKind::Dash,
            Node::string("a", at(1, 1)),
            Node::string("b", at(1, 7)),
            at(1, 5),
        )],
        &options,
    );

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(program.binary_ops[0].signature(), "sub string string");
}

#[test]
fn test_unary_and_inc_dec() {
    let (ast, _, program, errors) = check(vec![
        Node::declaration("int", "i", Node::integer(0, at(1, 9)), at(1, 1)),
        Node::inc_dec(TokenKind::PlusPlus, "i", at(2, 1)),
        Node::unary(TokenKind::Not, Node::boolean(false, at(3, 2)), at(3, 1)),
        Node::unary(TokenKind::Not, Node::integer(1, at(4, 2)), at(4, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["UndefinedOperator"]);
    assert_eq!(errors[0].get_position().line, 4);
    assert_eq!(statements(&ast)[1].get_type(), Some(&Type::int()));
    assert_eq!(program.inc_decs.len(), 1);
    assert_eq!(program.inc_decs[0].signature(), "inc int");
    assert_eq!(program.unary_ops.len(), 1);
    assert_eq!(program.unary_ops[0].signature(), "not bool");
}

#[test]
fn test_inc_dec_on_undeclared_variable() {
    let (_, _, program, errors) = check(vec![Node::inc_dec(TokenKind::MinusMinus, "n", at(1, 1))]);

    assert_eq!(error_names(&errors), vec!["UndefinedSymbol"]);
    assert!(program.inc_decs.is_empty());
}

#[test]
fn test_string_literals_deduplicated_by_value() {
    let (_, _, program, errors) = check(vec![
        Node::call("print", vec![Node::string("hello", at(1, 7))], at(1, 1)),
        Node::call("print", vec![Node::string("hello", at(2, 7))], at(2, 1)),
        Node::call("print", vec![Node::string("bye", at(3, 7))], at(3, 1)),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(program.strings, vec![String::from("hello"), String::from("bye")]);
}

#[test]
fn test_comparison_yields_bool() {
    let (ast, _, program, errors) = check(vec![Node::comparison(
        TokenKind::Less,
        Node::float(1.0, at(1, 1)),
        Node::float(2.0, at(1, 7)),
        at(1, 5),
    )]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(statements(&ast)[0].get_type(), Some(&Type::boolean()));
    assert_eq!(program.comparisons[0].signature(), "lt float float");
}

#[test]
fn test_comparison_type_mismatch_still_yields_bool() {
    let (ast, _, program, errors) = check(vec![Node::if_(
        Node::comparison(
            TokenKind::Equals,
            Node::integer(1, at(1, 4)),
            Node::string("1", at(1, 9)),
            at(1, 6),
        ),
        Node::block(vec![], at(1, 13)),
        None,
        at(1, 1),
    )]);

    assert_eq!(error_names(&errors), vec!["TypeMismatch"]);
    assert_eq!(errors[0].get_position(), &at(1, 9));
    assert!(program.comparisons.is_empty());
    let NodeKind::IfStatement { condition, .. } = &statements(&ast)[0].kind else {
        panic!("Expected if statement");
    };
    assert_eq!(condition.get_type(), Some(&Type::boolean()));
}

#[test]
fn test_non_boolean_condition() {
    let (_, _, _, errors) = check(vec![Node::if_(
        Node::integer(1, at(1, 4)),
        Node::block(vec![Node::identifier("a", at(2, 5))], at(1, 6)),
        Some(Node::block(vec![Node::identifier("b", at(4, 5))], at(3, 8))),
        at(1, 1),
    )]);

    // Both branches are still checked.
    assert_eq!(
        error_names(&errors),
        vec!["NonBooleanCondition", "UndefinedSymbol", "UndefinedSymbol"]
    );
    assert_eq!(errors[0].get_position(), &at(1, 4));
}

#[test]
fn test_function_parameters_are_params_in_body_scope() {
    let (ast, scopes, program, errors) = check(vec![add_function()]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(statements(&ast)[0].get_type(), Some(&Type::function()));

    let NodeKind::FunctionLiteral { body, .. } = &statements(&ast)[0].kind else {
        panic!("Expected function literal");
    };
    let NodeKind::Block { scope: Some(scope), .. } = &body.kind else {
        panic!("Expected linked block");
    };
    let a = scopes.get(*scope).get_variable("a").unwrap();
    assert_eq!(a.kind, VariableKind::Param);
    assert_eq!(a.ty, Type::int());
    assert!(scopes.get(ScopeId(0)).get_variable("a").is_none());

    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.functions[0].mangled_name(), "main.add");
    assert_eq!(program.binary_ops[0].signature(), "add int int");
}

#[test]
fn test_malformed_parameter_list() {
    let (_, _, _, errors) = check(vec![Node::function(
        "broken",
        vec![
            Node::parameter("int", "a", at(1, 11)),
            Node::integer(3, at(1, 18)),
        ],
        "void",
        Node::block(vec![], at(1, 26)),
        at(1, 1),
    )]);

    assert_eq!(error_names(&errors), vec!["MalformedParameterList"]);
    assert_eq!(errors[0].get_position(), &at(1, 18));
}

#[test]
fn test_call_resolves_user_function() {
    let (ast, _, _, errors) = check(vec![
        add_function(),
        Node::call("add", vec![Node::integer(1, at(4, 5)), Node::integer(2, at(4, 8))], at(4, 1)),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(statements(&ast)[1].get_type(), Some(&Type::int()));
}

#[test]
fn test_call_before_definition() {
    let (_, _, _, errors) = check(vec![
        Node::call("add", vec![Node::integer(1, at(1, 5)), Node::integer(2, at(1, 8))], at(1, 1)),
        add_function(),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
}

#[test]
fn test_user_function_takes_precedence_over_builtin() {
    let print = Node::function(
        "print",
        vec![Node::parameter("int", "value", at(1, 12))],
        "int",
        Node::block(vec![Node::return_(Some(Node::identifier("value", at(2, 12))), at(2, 5))], at(1, 30)),
        at(1, 1),
    );
    let (ast, _, _, errors) = check(vec![
        print,
        Node::call("print", vec![Node::integer(5, at(4, 7))], at(4, 1)),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(statements(&ast)[1].get_type(), Some(&Type::int()));
}

#[test]
fn test_call_arity_mismatch() {
    let (_, _, _, errors) = check(vec![
        add_function(),
        Node::call("add", vec![Node::integer(1, at(4, 5))], at(4, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["ArityMismatch"]);
    assert_eq!(
        errors[0].get_internal_error(),
        &ErrorImpl::ArityMismatch {
            function: String::from("add"),
            expected: 2,
            received: 1,
        }
    );
    assert_eq!(errors[0].get_position(), &at(4, 1));
}

#[test]
fn test_call_argument_type_mismatch() {
    let (_, _, _, errors) = check(vec![
        add_function(),
        Node::call(
            "add",
            vec![Node::string("1", at(4, 5)), Node::float(2.0, at(4, 10))],
            at(4, 1),
        ),
    ]);

    assert_eq!(error_names(&errors), vec!["TypeMismatch", "TypeMismatch"]);
    assert_eq!(errors[0].get_position(), &at(4, 5));
    assert_eq!(errors[1].get_position(), &at(4, 10));
}

#[test]
fn test_builtin_calls() {
    let (ast, _, _, errors) = check(vec![
        Node::call("sqrt", vec![Node::float(2.0, at(1, 6))], at(1, 1)),
        Node::call("pow", vec![Node::float(2.0, at(2, 5))], at(2, 1)),
        Node::call("len", vec![Node::integer(2, at(3, 5))], at(3, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["ArityMismatch", "TypeMismatch"]);
    assert_eq!(statements(&ast)[0].get_type(), Some(&Type::float()));
    assert_eq!(statements(&ast)[2].get_type(), Some(&Type::int()));
}

#[test]
fn test_undefined_function() {
    let (ast, _, program, errors) = check(vec![Node::call(
        "launch",
        vec![Node::string("rocket", at(1, 8))],
        at(1, 1),
    )]);

    assert_eq!(error_names(&errors), vec!["UndefinedFunction"]);
    // Arguments are still inferred.
    assert_eq!(program.strings, vec![String::from("rocket")]);
    assert!(statements(&ast)[0].get_type().unwrap().is_error());
}

#[test]
fn test_type_casts() {
    let (ast, _, program, errors) = check(vec![
        Node::cast("string", Node::integer(1, at(1, 8)), at(1, 1)),
        Node::cast("int", Node::integer(1, at(2, 5)), at(2, 1)),
        Node::cast("func", Node::integer(1, at(3, 6)), at(3, 1)),
        Node::cast("gizmo", Node::integer(1, at(4, 7)), at(4, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["InvalidCast", "UnknownType"]);
    assert_eq!(statements(&ast)[0].get_type(), Some(&Type::string()));
    assert_eq!(program.type_convs.len(), 1);
    assert_eq!(program.type_convs[0].signature(), "conv int string");
}

#[test]
fn test_return_type_mismatch() {
    let (_, _, _, errors) = check(vec![Node::function(
        "name",
        vec![],
        "string",
        Node::block(vec![Node::return_(Some(Node::integer(7, at(2, 12))), at(2, 5))], at(1, 20)),
        at(1, 1),
    )]);

    assert_eq!(error_names(&errors), vec!["TypeMismatch"]);
    assert_eq!(errors[0].get_position(), &at(2, 12));
}

#[test]
fn test_assignment_type_mismatch() {
    let (_, _, _, errors) = check(vec![
        Node::declaration("bool", "flag", Node::boolean(true, at(1, 13)), at(1, 1)),
        Node::assignment("flag", Node::boolean(false, at(2, 8)), at(2, 1)),
        Node::assignment("flag", Node::integer(0, at(3, 8)), at(3, 1)),
    ]);

    assert_eq!(error_names(&errors), vec!["TypeMismatch"]);
    assert_eq!(errors[0].get_position(), &at(3, 8));
}

#[test]
fn test_errors_are_reported_in_walk_order() {
    let (_, _, _, errors) = check(vec![
        Node::declaration("int", "a", Node::identifier("nope", at(1, 9)), at(1, 1)),
        Node::if_(Node::string("yes", at(2, 4)), Node::block(vec![], at(2, 10)), None, at(2, 1)),
        Node::call("missing", vec![], at(3, 1)),
    ]);

    assert_eq!(
        error_names(&errors),
        vec!["UndefinedSymbol", "NonBooleanCondition", "UndefinedFunction"]
    );
    let lines: Vec<u32> = errors.iter().map(|error| error.get_position().line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_nested_program_is_void() {
    let (ast, _, _, errors) = check(vec![Node::program(
        "inner",
        Node::block(vec![Node::identifier("ignored", at(2, 1))], at(1, 1)),
        at(1, 1),
    )]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(statements(&ast)[0].get_type(), Some(&Type::void()));
}

#[test]
fn test_every_node_is_typed() {
    fn assert_typed(node: &Node) {
        assert!(node.get_type().is_some(), "untyped {}", node.kind.name());
        for child in node.children() {
            assert_typed(child);
        }
    }

    let (ast, _, _, errors) = check(vec![
        add_function(),
        Node::declaration(
            "int",
            "sum",
            Node::call("add", vec![Node::integer(1, at(5, 15)), Node::integer(2, at(5, 18))], at(5, 11)),
            at(5, 1),
        ),
        Node::if_(
            Node::comparison(TokenKind::Greater, Node::identifier("sum", at(6, 4)), Node::integer(2, at(6, 10)), at(6, 8)),
            Node::block(vec![Node::call("println", vec![Node::string("big", at(7, 13))], at(7, 5))], at(6, 12)),
            Some(Node::block(vec![Node::inc_dec(TokenKind::PlusPlus, "sum", at(9, 5))], at(8, 8))),
            at(6, 1),
        ),
    ]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_typed(&ast);
}

#[test]
fn test_void_parameter_is_rejected() {
    let (ast, _, program, errors) = check(vec![Node::function(
        "consume",
        vec![Node::parameter("void", "nothing", at(1, 12))],
        "int",
        Node::block(vec![Node::return_(Some(Node::integer(0, at(2, 12))), at(2, 5))], at(1, 30)),
        at(1, 1),
    )]);

    assert_eq!(error_names(&errors), vec!["VoidParameter"]);
    assert_eq!(errors[0].get_position(), &at(1, 12));
    assert!(program.functions[0].params[0].ty.is_error());

    let NodeKind::FunctionLiteral { params, .. } = &statements(&ast)[0].kind else {
        panic!("Expected function literal");
    };
    assert!(params.children()[0].get_type().unwrap().is_error());
}

#[test]
fn test_inc_dec_requires_variable() {
    let target = Node::integer(5, at(1, 1));
    let (_, _, program, errors) = check(vec![Node::new(
        NodeKind::IncDec {
            operator: TokenKind::PlusPlus,
            target: Box::new(target),
        },
        at(1, 1),
    )]);

    assert_eq!(error_names(&errors), vec!["InvalidTarget"]);
    assert!(program.inc_decs.is_empty());
}

#[test]
fn test_assignment_requires_variable() {
    let (_, _, _, errors) = check(vec![Node::new(
        NodeKind::Assignment {
            target: Box::new(Node::call("input", vec![], at(1, 1))),
            value: Box::new(Node::string("text", at(1, 11))),
        },
        at(1, 1),
    )]);

    assert_eq!(error_names(&errors), vec!["InvalidTarget"]);
    assert_eq!(errors[0].get_position(), &at(1, 1));
}

#[test]
fn test_nested_program_functions_are_not_collected() {
    let (_, _, program, errors) = check(vec![Node::program(
        "inner",
        Node::block(
            vec![Node::function(
                "hidden",
                vec![Node::parameter("widget", "w", at(2, 12))],
                "gizmo",
                Node::block(vec![], at(2, 30)),
                at(2, 1),
            )],
            at(1, 1),
        ),
        at(1, 1),
    )]);

    assert!(errors.is_empty(), "{:?}", errors);
    assert!(program.functions.is_empty());
}

#[test]
fn test_comparison_position_only_accepts_comparison_operators() {
    assert!(operator_is_defined(
        TokenKind::Less,
        OperatorPosition::Comparison,
        UnderlyingKind::Integer
    ));
    assert!(!operator_is_defined(
        TokenKind::Plus,
        OperatorPosition::Comparison,
        UnderlyingKind::Integer
    ));
    assert!(!operator_is_defined(
        TokenKind::Less,
        OperatorPosition::Comparison,
        UnderlyingKind::Boolean
    ));
}
