//! Constructors for expression nodes.
//!
//! The external parser builds trees through these helpers, and so do the
//! tests. Every constructor takes the position the construct starts at.

use crate::{lexer::tokens::TokenKind, Position};

use super::ast::{Node, NodeKind};

impl Node {
    pub fn identifier(name: &str, position: Position) -> Self {
        Node::new(
            NodeKind::Identifier {
                name: name.to_string(),
                scope: None,
            },
            position,
        )
    }

    pub fn datatype(datatype: &str, position: Position) -> Self {
        Node::new(
            NodeKind::Datatype {
                datatype: datatype.to_string(),
                binding: None,
            },
            position,
        )
    }

    /// A `type name` entry of a parameter list.
    pub fn parameter(datatype: &str, name: &str, position: Position) -> Self {
        Node::new(
            NodeKind::Datatype {
                datatype: datatype.to_string(),
                binding: Some(name.to_string()),
            },
            position,
        )
    }

    pub fn list(values: Vec<Node>, position: Position) -> Self {
        Node::new(NodeKind::List { values }, position)
    }

    pub fn integer(value: i64, position: Position) -> Self {
        Node::new(NodeKind::IntegerLiteral(value), position)
    }

    pub fn float(value: f64, position: Position) -> Self {
        Node::new(NodeKind::FloatLiteral(value), position)
    }

    pub fn boolean(value: bool, position: Position) -> Self {
        Node::new(NodeKind::BoolLiteral(value), position)
    }

    pub fn string(value: &str, position: Position) -> Self {
        Node::new(NodeKind::StringLiteral(value.to_string()), position)
    }

    pub fn binary(operator: TokenKind, left: Node, right: Node, position: Position) -> Self {
        Node::new(
            NodeKind::BinaryOp {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            position,
        )
    }

    pub fn unary(operator: TokenKind, value: Node, position: Position) -> Self {
        Node::new(
            NodeKind::UnaryOp {
                operator,
                value: Box::new(value),
            },
            position,
        )
    }

    pub fn comparison(operator: TokenKind, left: Node, right: Node, position: Position) -> Self {
        Node::new(
            NodeKind::Comparison {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            position,
        )
    }

    pub fn cast(datatype: &str, value: Node, position: Position) -> Self {
        Node::new(
            NodeKind::TypeCast {
                datatype: datatype.to_string(),
                value: Box::new(value),
            },
            position,
        )
    }

    pub fn call(name: &str, args: Vec<Node>, position: Position) -> Self {
        Node::new(
            NodeKind::FunctionCall {
                name: name.to_string(),
                args,
            },
            position,
        )
    }

    pub fn function(
        name: &str,
        params: Vec<Node>,
        return_type: &str,
        body: Node,
        position: Position,
    ) -> Self {
        let params = Node::list(params, position.clone());
        Node::new(
            NodeKind::FunctionLiteral {
                name: name.to_string(),
                params: Box::new(params),
                return_type: return_type.to_string(),
                body: Box::new(body),
            },
            position,
        )
    }
}
