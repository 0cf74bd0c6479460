use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("+", TokenKind::Plus);
        map.insert("-", TokenKind::Dash);
        map.insert("*", TokenKind::Star);
        map.insert("/", TokenKind::Slash);
        map.insert("%", TokenKind::Percent);
        map.insert("!", TokenKind::Not);
        map.insert("&&", TokenKind::And);
        map.insert("||", TokenKind::Or);
        map.insert("++", TokenKind::PlusPlus);
        map.insert("--", TokenKind::MinusMinus);
        map.insert("==", TokenKind::Equals);
        map.insert("!=", TokenKind::NotEquals);
        map.insert("<", TokenKind::Less);
        map.insert("<=", TokenKind::LessEquals);
        map.insert(">", TokenKind::Greater);
        map.insert(">=", TokenKind::GreaterEquals);
        map
    };
}

/// Operator tokens, as produced by the external lexer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    PlusPlus,
    MinusMinus,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
}

impl TokenKind {
    pub fn from_symbol(symbol: &str) -> Option<TokenKind> {
        OPERATOR_LOOKUP.get(symbol).copied()
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
        }
    }

    /// Canonical operator name used in signatures and generated helper names.
    ///
    /// `Dash` is `sub` in binary position; unary negation asks for
    /// [`TokenKind::unary_operator_name`] instead.
    pub fn operator_name(&self) -> &'static str {
        match self {
            TokenKind::Equals => "eq",
            TokenKind::Not => "not",
            TokenKind::NotEquals => "ne",
            TokenKind::Less => "lt",
            TokenKind::LessEquals => "le",
            TokenKind::Greater => "gt",
            TokenKind::GreaterEquals => "ge",
            TokenKind::Or => "or",
            TokenKind::And => "and",
            TokenKind::PlusPlus => "inc",
            TokenKind::MinusMinus => "dec",
            TokenKind::Plus => "add",
            TokenKind::Dash => "sub",
            TokenKind::Slash => "div",
            TokenKind::Star => "mul",
            TokenKind::Percent => "mod",
        }
    }

    pub fn unary_operator_name(&self) -> &'static str {
        match self {
            TokenKind::Dash => "neg",
            _ => self.operator_name(),
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
        )
    }

    pub fn is_inc_dec(&self) -> bool {
        matches!(self, TokenKind::PlusPlus | TokenKind::MinusMinus)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
