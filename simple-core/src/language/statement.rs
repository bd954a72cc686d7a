use super::{Expression, Kind, Variable};
use crate::{environment::Environment, prettyprinter::PrettyPrint, reduce::ReductionError};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Statement {
    /// The statement with nothing left to do.
    DoNothing,
    Assign {
        name: Variable,
        expression: Expression,
    },
    If {
        condition: Expression,
        consequence: Box<Statement>,
        alternative: Box<Statement>,
    },
}

impl Statement {
    pub fn assign(name: impl Into<Variable>, expression: impl Into<Expression>) -> Self {
        Self::Assign {
            name: name.into(),
            expression: expression.into(),
        }
    }

    pub fn if_else(
        condition: impl Into<Expression>,
        consequence: Statement,
        alternative: Statement,
    ) -> Self {
        Self::If {
            condition: condition.into(),
            consequence: Box::new(consequence),
            alternative: Box::new(alternative),
        }
    }

    pub fn is_reducible(&self) -> bool {
        !matches!(self, Self::DoNothing)
    }

    /// Performs one reduction step in `env`, returning the next statement and
    /// the environment it runs in.
    ///
    /// Assignment binds into a copy of `env`; the environment passed in is
    /// never modified.
    pub fn reduce(&self, env: &Environment) -> Result<(Statement, Environment), ReductionError> {
        match self {
            Self::DoNothing => Ok((Self::DoNothing, env.clone())),
            Self::Assign { name, expression } if expression.is_reducible() => Ok((
                Self::Assign {
                    name: name.clone(),
                    expression: expression.reduce(env)?,
                },
                env.clone(),
            )),
            Self::Assign { name, expression } => Ok((
                Self::DoNothing,
                env.bind(name.clone(), expression.clone()),
            )),
            Self::If {
                condition,
                consequence,
                alternative,
            } => {
                if condition.is_reducible() {
                    let condition = condition.reduce(env)?;
                    return Ok((
                        Self::If {
                            condition,
                            consequence: consequence.clone(),
                            alternative: alternative.clone(),
                        },
                        env.clone(),
                    ));
                }
                match condition {
                    Expression::Boolean(true) => Ok((consequence.as_ref().clone(), env.clone())),
                    Expression::Boolean(false) => Ok((alternative.as_ref().clone(), env.clone())),
                    found => Err(ReductionError::TypeMismatch {
                        expected: Kind::Boolean,
                        found: found.clone(),
                        context: self.to_string(),
                    }),
                }
            }
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_pretty())
    }
}
