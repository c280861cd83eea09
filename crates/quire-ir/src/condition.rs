//! Classical conditions.
//!
//! A conditional instruction does not carry its own comparison. It refers to a
//! register slot that an earlier binary-function (`bfunc`) instruction filled
//! with a mask, a relation and a value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a binary function.
///
/// Symbols outside the known set are kept verbatim so that the consumer of
/// the condition decides whether it can express them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// Any other symbol, as written.
    Other(String),
}

impl Relation {
    /// Wire symbol of this relation.
    pub fn symbol(&self) -> &str {
        match self {
            Relation::Equal => "==",
            Relation::NotEqual => "!=",
            Relation::Less => "<",
            Relation::LessEqual => "<=",
            Relation::Greater => ">",
            Relation::GreaterEqual => ">=",
            Relation::Other(symbol) => symbol,
        }
    }

    /// Read a wire symbol.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "==" => Relation::Equal,
            "!=" => Relation::NotEqual,
            "<" => Relation::Less,
            "<=" => Relation::LessEqual,
            ">" => Relation::Greater,
            ">=" => Relation::GreaterEqual,
            other => Relation::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A binary function declaration (`bfunc`) binding a condition to a register slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryFunction {
    /// Register slot that conditional instructions refer to.
    pub register: u32,
    /// Classical bits taking part in the comparison.
    pub mask: u64,
    /// Comparison relation.
    pub relation: Relation,
    /// Value compared against, already shifted to the mask position.
    pub value: u64,
}

impl BinaryFunction {
    /// Create a new binary function.
    pub fn new(register: u32, mask: u64, relation: Relation, value: u64) -> Self {
        Self {
            register,
            mask,
            relation,
            value,
        }
    }

    /// Create an equality test, the only relation cQASM can express.
    pub fn equal(register: u32, mask: u64, value: u64) -> Self {
        Self::new(register, mask, Relation::Equal, value)
    }

    /// The value restricted to the bits of the mask.
    #[inline]
    pub fn masked_value(&self) -> u64 {
        self.mask & self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_from_symbol() {
        assert_eq!(Relation::from_symbol("=="), Relation::Equal);
        assert_eq!(Relation::from_symbol(">="), Relation::GreaterEqual);
        assert_eq!(Relation::from_symbol("=~"), Relation::Other("=~".into()));
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(Relation::NotEqual.to_string(), "!=");
        assert_eq!(Relation::Other("=~".into()).to_string(), "=~");
    }

    #[test]
    fn test_masked_value() {
        let bfunc = BinaryFunction::equal(1, 0x38, 0xFF);
        assert_eq!(bfunc.masked_value(), 0x38);
    }
}
