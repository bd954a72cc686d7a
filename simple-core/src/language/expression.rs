use derive_more::Display;

use super::{Kind, Variable};
use crate::{environment::Environment, prettyprinter::PrettyPrint, reduce::ReductionError};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Expression {
    Number(i64),
    Boolean(bool),
    Variable(Variable),
    Add(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    LessThan(Box<Expression>, Box<Expression>),
}

/// The binary operators. Each binary expression reduces its operands left to
/// right and then combines the two literals with its operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum Operator {
    #[display("+")]
    Add,
    #[display("*")]
    Multiply,
    #[display("<")]
    LessThan,
}

impl Operator {
    /// Binding strength used when rendering; higher binds tighter.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Self::LessThan => 1,
            Self::Add => 2,
            Self::Multiply => 3,
        }
    }

    /// Builds the expression `left <op> right`.
    pub fn apply(self, left: Expression, right: Expression) -> Expression {
        let (left, right) = (Box::new(left), Box::new(right));
        match self {
            Self::Add => Expression::Add(left, right),
            Self::Multiply => Expression::Multiply(left, right),
            Self::LessThan => Expression::LessThan(left, right),
        }
    }

    fn reduce(
        self,
        left: &Expression,
        right: &Expression,
        env: &Environment,
    ) -> Result<Expression, ReductionError> {
        if left.is_reducible() {
            Ok(self.apply(left.reduce(env)?, right.clone()))
        } else if right.is_reducible() {
            Ok(self.apply(left.clone(), right.reduce(env)?))
        } else {
            self.combine(left, right)
        }
    }

    fn combine(self, left: &Expression, right: &Expression) -> Result<Expression, ReductionError> {
        let context = || self.apply(left.clone(), right.clone()).to_string();
        let l = left.expect_number(context)?;
        let r = right.expect_number(context)?;
        match self {
            Self::Add => l
                .checked_add(r)
                .map(Expression::Number)
                .ok_or_else(|| ReductionError::Overflow(context())),
            Self::Multiply => l
                .checked_mul(r)
                .map(Expression::Number)
                .ok_or_else(|| ReductionError::Overflow(context())),
            Self::LessThan => Ok(Expression::Boolean(l < r)),
        }
    }
}

impl Expression {
    pub fn variable(name: impl Into<Variable>) -> Self {
        Self::Variable(name.into())
    }

    pub fn add(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Operator::Add.apply(left.into(), right.into())
    }

    pub fn multiply(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Operator::Multiply.apply(left.into(), right.into())
    }

    pub fn less_than(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Operator::LessThan.apply(left.into(), right.into())
    }

    /// Literals are the only irreducible expressions. Variables always take a
    /// step to be looked up, and binary expressions always have at least
    /// their combining step left.
    pub fn is_reducible(&self) -> bool {
        !matches!(self, Self::Number(_) | Self::Boolean(_))
    }

    /// The operator and operands of a binary expression.
    pub fn as_binary(&self) -> Option<(Operator, &Expression, &Expression)> {
        match self {
            Self::Add(left, right) => Some((Operator::Add, left, right)),
            Self::Multiply(left, right) => Some((Operator::Multiply, left, right)),
            Self::LessThan(left, right) => Some((Operator::LessThan, left, right)),
            _ => None,
        }
    }

    /// Performs one reduction step in `env`.
    pub fn reduce(&self, env: &Environment) -> Result<Expression, ReductionError> {
        match self {
            Self::Number(_) | Self::Boolean(_) => Ok(self.clone()),
            Self::Variable(name) => env
                .get(name)
                .cloned()
                .ok_or_else(|| ReductionError::UnboundVariable(name.clone())),
            Self::Add(left, right) => Operator::Add.reduce(left, right, env),
            Self::Multiply(left, right) => Operator::Multiply.reduce(left, right, env),
            Self::LessThan(left, right) => Operator::LessThan.reduce(left, right, env),
        }
    }

    fn expect_number(&self, context: impl Fn() -> String) -> Result<i64, ReductionError> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(ReductionError::TypeMismatch {
                expected: Kind::Number,
                found: self.clone(),
                context: context(),
            }),
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        self.as_binary()
            .map_or(u8::MAX, |(operator, _, _)| operator.precedence())
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Variable> for Expression {
    fn from(value: Variable) -> Self {
        Self::Variable(value)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_pretty())
    }
}
