//! Facts collected about a program while it is checked.
//!
//! The compiler reads these lists instead of walking the tree again. Every
//! operation is appended once per occurrence; deduplication by signature
//! happens when the operations are lowered.

use std::collections::HashSet;

use crate::{ast::types::Type, lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

/// A user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub module: String,
    pub name: String,
    pub params: Vec<Parameter>,
    pub ret: Type,
    pub position: Position,
}

impl Function {
    /// Name of the declared function in the generated module.
    pub fn mangled_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub module: String,
    pub operator: TokenKind,
    pub left: Type,
    pub right: Type,
    pub ret: Type,
}

impl BinaryOperation {
    pub fn signature(&self) -> String {
        format!("{} {} {}", self.operator.operator_name(), self.left, self.right)
    }

    pub fn helper_name(&self) -> String {
        format!(
            "{}.{}.{}_{}",
            self.module,
            self.operator.operator_name(),
            self.left,
            self.right
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub module: String,
    pub operator: TokenKind,
    pub value: Type,
    pub ret: Type,
}

impl UnaryOperation {
    pub fn signature(&self) -> String {
        format!("{} {}", self.operator.unary_operator_name(), self.value)
    }

    pub fn helper_name(&self) -> String {
        format!(
            "{}.{}.{}",
            self.module,
            self.operator.unary_operator_name(),
            self.value
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncDecOperation {
    pub module: String,
    pub operator: TokenKind,
    pub var: Type,
}

impl IncDecOperation {
    pub fn signature(&self) -> String {
        format!("{} {}", self.operator.operator_name(), self.var)
    }

    pub fn helper_name(&self) -> String {
        format!("{}.{}.{}", self.module, self.operator.operator_name(), self.var)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub module: String,
    pub operator: TokenKind,
    pub left: Type,
    pub right: Type,
}

impl Comparison {
    pub fn signature(&self) -> String {
        format!("{} {} {}", self.operator.operator_name(), self.left, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeConversion {
    pub module: String,
    pub from: Type,
    pub to: Type,
}

impl TypeConversion {
    pub fn signature(&self) -> String {
        format!("conv {} {}", self.from, self.to)
    }

    pub fn helper_name(&self) -> String {
        format!("{}.conv.{}_{}", self.module, self.from, self.to)
    }
}

#[derive(Debug, Default)]
pub struct Program {
    pub module: String,
    pub functions: Vec<Function>,
    /// Distinct string literal values in the order they were first seen.
    pub strings: Vec<String>,
    pub binary_ops: Vec<BinaryOperation>,
    pub unary_ops: Vec<UnaryOperation>,
    pub comparisons: Vec<Comparison>,
    pub inc_decs: Vec<IncDecOperation>,
    pub type_convs: Vec<TypeConversion>,
    seen_strings: HashSet<String>,
}

impl Program {
    pub fn new(module: &str) -> Self {
        Program {
            module: module.to_string(),
            ..Default::default()
        }
    }

    /// Records a string literal value; repeated values are ignored.
    pub fn add_string(&mut self, value: &str) -> bool {
        if !self.seen_strings.insert(value.to_string()) {
            return false;
        }
        self.strings.push(value.to_string());
        true
    }

    /// First user function with the given name.
    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|function| function.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings_are_deduplicated_by_value() {
        let mut program = Program::new("main");

        assert!(program.add_string("hello"));
        assert!(program.add_string("world"));
        assert!(!program.add_string("hello"));

        assert_eq!(program.strings, vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn test_operation_signatures() {
        let add = BinaryOperation {
            module: String::from("main"),
            operator: TokenKind::Plus,
            left: Type::int(),
            right: Type::int(),
            ret: Type::int(),
        };
        assert_eq!(add.signature(), "add int int");
        assert_eq!(add.helper_name(), "main.add.int_int");

        let negate = UnaryOperation {
            module: String::from("main"),
            operator: TokenKind::Dash,
            value: Type::float(),
            ret: Type::float(),
        };
        assert_eq!(negate.signature(), "neg float");
        assert_eq!(negate.helper_name(), "main.neg.float");

        let conversion = TypeConversion {
            module: String::from("main"),
            from: Type::int(),
            to: Type::string(),
        };
        assert_eq!(conversion.signature(), "conv int string");
        assert_eq!(conversion.helper_name(), "main.conv.int_string");
    }

    #[test]
    fn test_first_function_wins() {
        let mut program = Program::new("main");
        for ret in [Type::int(), Type::string()] {
            program.functions.push(Function {
                module: String::from("main"),
                name: String::from("f"),
                params: vec![],
                ret,
                position: Position::null(),
            });
        }

        assert_eq!(program.get_function("f").unwrap().ret, Type::int());
        assert_eq!(program.functions[0].mangled_name(), "main.f");
    }
}
