//! Constructors for statement nodes.

use crate::{lexer::tokens::TokenKind, Position};

use super::ast::{Node, NodeKind};

impl Node {
    pub fn program(module: &str, contents: Node, position: Position) -> Self {
        Node::new(
            NodeKind::Program {
                module: module.to_string(),
                contents: Box::new(contents),
            },
            position,
        )
    }

    pub fn block(body: Vec<Node>, position: Position) -> Self {
        Node::new(NodeKind::Block { body, scope: None }, position)
    }

    pub fn declaration(datatype: &str, variable: &str, value: Node, position: Position) -> Self {
        let variable = Node::identifier(variable, position.clone());
        Node::new(
            NodeKind::Declaration {
                datatype: datatype.to_string(),
                variable: Box::new(variable),
                value: Box::new(value),
            },
            position,
        )
    }

    pub fn assignment(target: &str, value: Node, position: Position) -> Self {
        let target = Node::identifier(target, position.clone());
        Node::new(
            NodeKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            position,
        )
    }

    /// `x++` / `x--`
    pub fn inc_dec(operator: TokenKind, target: &str, position: Position) -> Self {
        let target = Node::identifier(target, position.clone());
        Node::new(
            NodeKind::IncDec {
                operator,
                target: Box::new(target),
            },
            position,
        )
    }

    pub fn return_(value: Option<Node>, position: Position) -> Self {
        Node::new(
            NodeKind::Return {
                value: value.map(Box::new),
            },
            position,
        )
    }

    pub fn if_(condition: Node, then: Node, otherwise: Option<Node>, position: Position) -> Self {
        Node::new(
            NodeKind::IfStatement {
                condition: Box::new(condition),
                then: Box::new(then),
                otherwise: otherwise.map(Box::new),
            },
            position,
        )
    }
}
