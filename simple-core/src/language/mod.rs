use derive_more::{Display, From};

mod expression;
mod statement;

pub use expression::{Expression, Operator};
pub use statement::Statement;

/// The name of a variable, as bound in an [`Environment`](crate::Environment).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, From)]
pub struct Variable(pub String);

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Variable(value.to_string())
    }
}

/// The kinds of literal a fully reduced expression can be.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum Kind {
    #[display("number")]
    Number,
    #[display("boolean")]
    Boolean,
}
