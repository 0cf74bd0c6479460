use crate::{lexer::tokens::TokenKind, type_checker::scope::ScopeId, Position};

use super::types::Type;

/// A node of the parser's output tree.
///
/// `ty` starts out empty and is written by the type checker. Every node keeps
/// the position it was parsed at so errors can point back to the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
    pub ty: Option<Type>,
}

/// Node Kinds
///
/// The closed set of constructs the parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program {
        module: String,
        contents: Box<Node>,
    },
    /// Introduces a scope. `scope` is filled in by the link pass.
    Block {
        body: Vec<Node>,
        scope: Option<ScopeId>,
    },
    /// A use of a name. `scope` is filled in by the link pass.
    Identifier {
        name: String,
        scope: Option<ScopeId>,
    },
    /// A type annotation. Inside a parameter list `binding` holds the
    /// parameter name.
    Datatype {
        datatype: String,
        binding: Option<String>,
    },
    Declaration {
        datatype: String,
        variable: Box<Node>,
        value: Box<Node>,
    },
    Assignment {
        target: Box<Node>,
        value: Box<Node>,
    },
    List {
        values: Vec<Node>,
    },
    BinaryOp {
        operator: TokenKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOp {
        operator: TokenKind,
        value: Box<Node>,
    },
    IncDec {
        operator: TokenKind,
        target: Box<Node>,
    },
    Comparison {
        operator: TokenKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    TypeCast {
        datatype: String,
        value: Box<Node>,
    },
    FunctionLiteral {
        name: String,
        params: Box<Node>,
        return_type: String,
        body: Box<Node>,
    },
    FunctionCall {
        name: String,
        args: Vec<Node>,
    },
    IntegerLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),
    StringLiteral(String),
    Return {
        value: Option<Box<Node>>,
    },
    IfStatement {
        condition: Box<Node>,
        then: Box<Node>,
        otherwise: Option<Box<Node>>,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::Block { .. } => "Block",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Datatype { .. } => "Datatype",
            NodeKind::Declaration { .. } => "Declaration",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::List { .. } => "List",
            NodeKind::BinaryOp { .. } => "BinaryOp",
            NodeKind::UnaryOp { .. } => "UnaryOp",
            NodeKind::IncDec { .. } => "IncDec",
            NodeKind::Comparison { .. } => "Comparison",
            NodeKind::TypeCast { .. } => "TypeCast",
            NodeKind::FunctionLiteral { .. } => "FunctionLiteral",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::IntegerLiteral(_) => "IntegerLiteral",
            NodeKind::FloatLiteral(_) => "FloatLiteral",
            NodeKind::BoolLiteral(_) => "BoolLiteral",
            NodeKind::StringLiteral(_) => "StringLiteral",
            NodeKind::Return { .. } => "Return",
            NodeKind::IfStatement { .. } => "IfStatement",
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Node {
            kind,
            position,
            ty: None,
        }
    }

    pub fn set_type(&mut self, ty: Type) {
        self.ty = Some(ty);
    }

    pub fn get_type(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Program { contents, .. } => vec![contents.as_ref()],
            NodeKind::Block { body, .. } => body.iter().collect(),
            NodeKind::Identifier { .. } | NodeKind::Datatype { .. } => vec![],
            NodeKind::Declaration {
                variable, value, ..
            } => vec![variable.as_ref(), value.as_ref()],
            NodeKind::Assignment { target, value } => vec![target.as_ref(), value.as_ref()],
            NodeKind::List { values } => values.iter().collect(),
            NodeKind::BinaryOp { left, right, .. } | NodeKind::Comparison { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            NodeKind::UnaryOp { value, .. } | NodeKind::TypeCast { value, .. } => vec![value.as_ref()],
            NodeKind::IncDec { target, .. } => vec![target.as_ref()],
            NodeKind::FunctionLiteral { params, body, .. } => vec![params.as_ref(), body.as_ref()],
            NodeKind::FunctionCall { args, .. } => args.iter().collect(),
            NodeKind::IntegerLiteral(_)
            | NodeKind::FloatLiteral(_)
            | NodeKind::BoolLiteral(_)
            | NodeKind::StringLiteral(_) => vec![],
            NodeKind::Return { value } => value.iter().map(|value| value.as_ref()).collect(),
            NodeKind::IfStatement {
                condition,
                then,
                otherwise,
            } => {
                let mut children: Vec<&Node> = vec![condition.as_ref(), then.as_ref()];
                if let Some(otherwise) = otherwise {
                    children.push(otherwise.as_ref());
                }
                children
            }
        }
    }

    /// Mutable direct children in source order.
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        match &mut self.kind {
            NodeKind::Program { contents, .. } => vec![contents.as_mut()],
            NodeKind::Block { body, .. } => body.iter_mut().collect(),
            NodeKind::Identifier { .. } | NodeKind::Datatype { .. } => vec![],
            NodeKind::Declaration {
                variable, value, ..
            } => vec![variable.as_mut(), value.as_mut()],
            NodeKind::Assignment { target, value } => vec![target.as_mut(), value.as_mut()],
            NodeKind::List { values } => values.iter_mut().collect(),
            NodeKind::BinaryOp { left, right, .. } | NodeKind::Comparison { left, right, .. } => {
                vec![left.as_mut(), right.as_mut()]
            }
            NodeKind::UnaryOp { value, .. } | NodeKind::TypeCast { value, .. } => vec![value.as_mut()],
            NodeKind::IncDec { target, .. } => vec![target.as_mut()],
            NodeKind::FunctionLiteral { params, body, .. } => vec![params.as_mut(), body.as_mut()],
            NodeKind::FunctionCall { args, .. } => args.iter_mut().collect(),
            NodeKind::IntegerLiteral(_)
            | NodeKind::FloatLiteral(_)
            | NodeKind::BoolLiteral(_)
            | NodeKind::StringLiteral(_) => vec![],
            NodeKind::Return { value } => value.iter_mut().map(|value| value.as_mut()).collect(),
            NodeKind::IfStatement {
                condition,
                then,
                otherwise,
            } => {
                let mut children: Vec<&mut Node> = vec![condition.as_mut(), then.as_mut()];
                if let Some(otherwise) = otherwise {
                    children.push(otherwise.as_mut());
                }
                children
            }
        }
    }
}
