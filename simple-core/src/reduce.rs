use std::fmt::{Debug, Display};

use thiserror::Error;

use crate::{
    environment::Environment,
    language::{Expression, Kind, Statement, Variable},
    prettyprinter::PrettyPrint,
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReductionError {
    #[error("unbound variable `{0}`")]
    UnboundVariable(Variable),

    #[error("type mismatch in `{context}`: expected a {expected}, found `{found}`")]
    TypeMismatch {
        expected: Kind,
        found: Expression,
        context: String,
    },

    #[error("arithmetic overflow in `{0}`")]
    Overflow(String),

    #[error("term is already irreducible")]
    ReductionOnIrreducible,
}

/// A term of the language that can be rewritten one small step at a time.
///
/// Reduction never mutates the term or the environment it is given: the next
/// term and the (possibly new) environment are returned as fresh values.
pub trait Term: Clone + Debug + PartialEq + Display + PrettyPrint {
    fn is_reducible(&self) -> bool;

    /// Performs a single reduction step.
    ///
    /// An irreducible term reduces to itself with the environment unchanged.
    fn reduce_in(&self, env: &Environment) -> Result<(Self, Environment), ReductionError>;
}

impl Term for Expression {
    fn is_reducible(&self) -> bool {
        Expression::is_reducible(self)
    }

    fn reduce_in(&self, env: &Environment) -> Result<(Self, Environment), ReductionError> {
        Ok((self.reduce(env)?, env.clone()))
    }
}

impl Term for Statement {
    fn is_reducible(&self) -> bool {
        Statement::is_reducible(self)
    }

    fn reduce_in(&self, env: &Environment) -> Result<(Self, Environment), ReductionError> {
        self.reduce(env)
    }
}
