use derive_more::{Display, From};

use crate::{
    environment::Environment,
    language::{Expression, Statement},
};

/// A root term of either category.
#[derive(Clone, Debug, PartialEq, Eq, Display, From)]
pub enum Program {
    Expression(Expression),
    Statement(Statement),
}

pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub program: Program,
    pub env: Environment,
}

fn n(value: i64) -> Expression {
    Expression::Number(value)
}

/// Corresponds to `1 * 2 + 3 * 4`.
pub fn arithmetic() -> Example {
    Example {
        name: "arithmetic",
        description: "sum of two products",
        program: Expression::add(
            Expression::multiply(n(1), n(2)),
            Expression::multiply(n(3), n(4)),
        )
        .into(),
        env: Environment::new(),
    }
}

/// Corresponds to `5 < 2 + 2`.
pub fn comparison() -> Example {
    Example {
        name: "comparison",
        description: "comparison against a sum",
        program: Expression::less_than(n(5), Expression::add(n(2), n(2))).into(),
        env: Environment::new(),
    }
}

/// Corresponds to `x = x + 1` with `x` bound to 2.
pub fn increment() -> Example {
    Example {
        name: "increment",
        description: "assignment reading the variable it overwrites",
        program: Statement::assign("x", Expression::add(Expression::variable("x"), n(1))).into(),
        env: [("x", n(2))].into_iter().collect(),
    }
}

/// Corresponds to `if x { y = 1 } else { do-nothing }` with `x` bound to false.
pub fn branch() -> Example {
    Example {
        name: "branch",
        description: "conditional taking the empty alternative",
        program: Statement::if_else(
            Expression::variable("x"),
            Statement::assign("y", n(1)),
            Statement::DoNothing,
        )
        .into(),
        env: [("x", Expression::Boolean(false))].into_iter().collect(),
    }
}

/// Corresponds to `if x < 3 { y = x * 2 } else { do-nothing }` with `x` bound
/// to 2.
pub fn taken_branch() -> Example {
    Example {
        name: "taken-branch",
        description: "conditional whose consequence is then reduced",
        program: Statement::if_else(
            Expression::less_than(Expression::variable("x"), n(3)),
            Statement::assign("y", Expression::multiply(Expression::variable("x"), n(2))),
            Statement::DoNothing,
        )
        .into(),
        env: [("x", n(2))].into_iter().collect(),
    }
}

/// A variable that is not bound anywhere.
pub fn unbound() -> Example {
    Example {
        name: "unbound",
        description: "lookup of an unbound variable",
        program: Expression::variable("z").into(),
        env: Environment::new(),
    }
}

/// Corresponds to `true + 1`.
pub fn mismatch() -> Example {
    Example {
        name: "mismatch",
        description: "arithmetic on a boolean",
        program: Expression::add(Expression::Boolean(true), n(1)).into(),
        env: Environment::new(),
    }
}

pub fn all() -> Vec<Example> {
    vec![
        arithmetic(),
        comparison(),
        increment(),
        branch(),
        taken_branch(),
        unbound(),
        mismatch(),
    ]
}

pub fn find(name: &str) -> Option<Example> {
    all().into_iter().find(|example| example.name == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_unique() {
        let examples = all();
        let names: HashSet<_> = examples.iter().map(|example| example.name).collect();
        assert_eq!(names.len(), examples.len());
    }

    #[test]
    fn find_by_name() {
        let example = find("comparison").map(|example| example.program.to_string());
        assert_eq!(example.as_deref(), Some("5 < 2 + 2"));
        assert!(find("missing").is_none());
    }
}
