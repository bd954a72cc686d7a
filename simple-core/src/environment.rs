use std::{collections::BTreeMap, sync::Arc};

use crate::{
    language::{Expression, Variable},
    prettyprinter::PrettyPrint,
};

/// Bindings of variable names to fully reduced values.
///
/// Environments are values: binding a variable yields a new environment and
/// leaves the original as it was, so earlier snapshots of a run never change.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Environment(Arc<BTreeMap<Variable, Expression>>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &Variable) -> Option<&Expression> {
        self.0.get(name)
    }

    /// A copy of this environment with `name` bound to `value`.
    #[must_use]
    pub fn bind(&self, name: Variable, value: Expression) -> Self {
        let mut bindings = BTreeMap::clone(&self.0);
        bindings.insert(name, value);
        Self(Arc::new(bindings))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Expression)> {
        self.0.iter()
    }
}

impl<V: Into<Variable>> FromIterator<(V, Expression)> for Environment {
    fn from_iter<I: IntoIterator<Item = (V, Expression)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        ))
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_pretty())
    }
}
