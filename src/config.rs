//! Options shared by the type checker and the lowering stage.

/// Settings for a single check-and-lower session.
///
/// The same value is handed to [`crate::type_checker::type_checker::type_check`]
/// and [`crate::compiler::compiler::compile`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Reject operators that are not defined for their operand types
    /// (`"a" - "b"`, `!5`, ...). When off, any operator is accepted as long as
    /// both operands agree.
    pub strict_operators: bool,
    /// Target triple written onto the generated module, e.g.
    /// `x86_64-pc-linux-gnu`. Left empty when `None`.
    pub target_triple: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            strict_operators: true,
            target_triple: None,
        }
    }
}

impl Options {
    pub fn with_strict_operators(mut self, strict_operators: bool) -> Self {
        self.strict_operators = strict_operators;
        self
    }

    pub fn with_target_triple(mut self, triple: &str) -> Self {
        self.target_triple = Some(triple.to_string());
        self
    }
}
