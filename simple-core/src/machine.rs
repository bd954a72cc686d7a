use std::fmt::Debug;

use derive_more::Display;
use itertools::Itertools;
use pretty::RcDoc;
use thiserror::Error;

use crate::{
    environment::Environment,
    prettyprinter::PrettyPrint,
    reduce::{ReductionError, Term},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Upper bound on the number of reductions a machine may perform.
    /// `None` lets it run until the term is irreducible.
    pub max_steps: Option<usize>,
}

impl MachineConfig {
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum State {
    #[display("running")]
    Running,
    #[display("halted")]
    Halted,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("cannot reduce `{term}` at step {step}: {source}")]
    Stuck {
        term: String,
        step: usize,
        #[source]
        source: ReductionError,
    },

    #[error("step limit of {limit} reached at `{term}`")]
    StepLimitExceeded { limit: usize, term: String },
}

impl MachineError {
    /// The underlying reduction failure, if there is one.
    pub fn reduction_error(&self) -> Option<&ReductionError> {
        match self {
            Self::Stuck { source, .. } => Some(source),
            Self::StepLimitExceeded { .. } => None,
        }
    }
}

/// The machine's term and environment after `step` reductions.
#[derive(Clone, Debug, PartialEq, Display)]
#[display("{term}, {env}")]
pub struct Snapshot<T> {
    pub step: usize,
    pub term: T,
    pub env: Environment,
}

impl<T: PrettyPrint> PrettyPrint for Snapshot<T> {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        self.term
            .to_doc()
            .append(RcDoc::text(","))
            .append(RcDoc::space())
            .append(self.env.to_doc())
    }
}

/// Every state a run passed through, from the initial state to the last one
/// reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace<T>(Vec<Snapshot<T>>);

impl<T> Default for Trace<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Trace<T> {
    pub fn snapshots(&self) -> &[Snapshot<T>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Snapshot<T>> {
        self.0.last()
    }

    pub fn terms(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|snapshot| &snapshot.term)
    }

    fn push(&mut self, snapshot: Snapshot<T>) {
        self.0.push(snapshot);
    }
}

impl<T> IntoIterator for Trace<T> {
    type Item = Snapshot<T>;
    type IntoIter = std::vec::IntoIter<Snapshot<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Trace<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

/// A failed run, together with the states observed before the failure.
#[derive(Clone, Debug, PartialEq)]
pub struct RunError<T> {
    pub trace: Trace<T>,
    pub error: MachineError,
}

impl<T> std::fmt::Display for RunError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error, f)
    }
}

impl<T: Debug> std::error::Error for RunError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Drives a term to its irreducible form one reduction at a time.
#[derive(Clone, Debug)]
pub struct Machine<T> {
    term: T,
    env: Environment,
    state: State,
    steps: usize,
    config: MachineConfig,
}

impl<T: Term> Machine<T> {
    pub fn new(term: T, env: Environment) -> Self {
        let state = if term.is_reducible() {
            State::Running
        } else {
            State::Halted
        };
        Self {
            term,
            env,
            state,
            steps: 0,
            config: MachineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn term(&self) -> &T {
        &self.term
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Reductions performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            step: self.steps,
            term: self.term.clone(),
            env: self.env.clone(),
        }
    }

    /// Performs one reduction. On failure the machine is left unchanged.
    pub fn step(&mut self) -> Result<(), MachineError> {
        if self.state == State::Halted {
            return Err(self.stuck(ReductionError::ReductionOnIrreducible));
        }
        if let Some(limit) = self.config.max_steps {
            if self.steps >= limit {
                tracing::warn!(limit, term = %self.term, "step limit reached");
                return Err(MachineError::StepLimitExceeded {
                    limit,
                    term: self.term.to_string(),
                });
            }
        }

        let (term, env) = self
            .term
            .reduce_in(&self.env)
            .map_err(|err| self.stuck(err))?;
        tracing::trace!(step = self.steps, from = %self.term, to = %term, "reduced");

        self.term = term;
        self.env = env;
        self.steps += 1;
        if !self.term.is_reducible() {
            tracing::debug!(steps = self.steps, term = %self.term, "halted");
            self.state = State::Halted;
        }
        Ok(())
    }

    /// Runs until the term is irreducible, passing every state to `observe`
    /// before deciding whether to reduce further. Returns the final state.
    ///
    /// A halted machine reports its state once and does nothing else.
    pub fn run_with(
        &mut self,
        mut observe: impl FnMut(Snapshot<T>),
    ) -> Result<Snapshot<T>, MachineError> {
        loop {
            observe(self.snapshot());
            if self.state == State::Halted {
                return Ok(self.snapshot());
            }
            self.step()?;
        }
    }

    /// Runs until the term is irreducible and collects the trace.
    pub fn run(&mut self) -> Result<Trace<T>, RunError<T>> {
        let mut trace = Trace::default();
        match self.run_with(|snapshot| trace.push(snapshot)) {
            Ok(_) => Ok(trace),
            Err(error) => Err(RunError { trace, error }),
        }
    }

    fn stuck(&self, source: ReductionError) -> MachineError {
        tracing::warn!(step = self.steps, term = %self.term, "{source}");
        MachineError::Stuck {
            term: self.term.to_string(),
            step: self.steps,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use rstest::rstest;

    use super::*;
    use crate::language::{Expression, Statement};

    fn n(value: i64) -> Expression {
        Expression::Number(value)
    }

    #[test]
    fn irreducible_term_starts_halted() {
        let machine = Machine::new(Statement::DoNothing, Environment::new());
        assert_eq!(machine.state(), State::Halted);
    }

    #[test]
    fn step_moves_to_halted() -> Result<()> {
        let mut machine = Machine::new(Expression::add(n(1), n(1)), Environment::new());
        assert_eq!(machine.state(), State::Running);
        machine.step()?;
        assert_eq!(machine.state(), State::Halted);
        assert_eq!(machine.term(), &n(2));
        assert_eq!(machine.steps(), 1);
        Ok(())
    }

    #[test]
    fn stepping_a_halted_machine_fails() {
        let mut machine = Machine::new(n(1), Environment::new());
        let err = machine.step().expect_err("already halted");
        assert_eq!(
            err.reduction_error(),
            Some(&ReductionError::ReductionOnIrreducible)
        );
        assert_eq!(machine.steps(), 0);
    }

    #[rstest]
    #[case(n(4), 1)]
    #[case(Expression::add(n(1), n(1)), 2)]
    #[case(Expression::add(Expression::multiply(n(1), n(2)), n(3)), 3)]
    fn trace_has_one_entry_per_state(#[case] expr: Expression, #[case] entries: usize) -> Result<()> {
        let trace = Machine::new(expr, Environment::new()).run()?;
        assert_eq!(trace.len(), entries);
        let steps: Vec<usize> = trace.snapshots().iter().map(|s| s.step).collect();
        assert_eq!(steps, (0..entries).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn rerunning_a_halted_machine_emits_one_entry() -> Result<()> {
        let mut machine = Machine::new(Expression::add(n(1), n(1)), Environment::new());
        machine.run()?;
        let trace = machine.run()?;
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.terms().collect::<Vec<_>>(), vec![&n(2)]);
        assert_eq!(machine.steps(), 1);
        Ok(())
    }

    #[test]
    fn failed_run_keeps_partial_trace() {
        let expr = Expression::add(Expression::add(n(1), n(1)), Expression::variable("z"));
        let err = Machine::new(expr, Environment::new())
            .run()
            .expect_err("z is unbound");

        assert_eq!(err.trace.len(), 2);
        assert_eq!(
            err.error,
            MachineError::Stuck {
                term: "2 + z".to_string(),
                step: 1,
                source: ReductionError::UnboundVariable("z".into()),
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot reduce `2 + z` at step 1: unbound variable `z`"
        );
    }

    #[test]
    fn step_limit_stops_the_run() {
        let expr = Expression::add(Expression::add(n(1), n(2)), n(3));
        let mut machine =
            Machine::new(expr, Environment::new()).with_config(MachineConfig::with_max_steps(1));
        let err = machine.run().expect_err("two steps are needed");

        assert_eq!(
            err.error,
            MachineError::StepLimitExceeded {
                limit: 1,
                term: "3 + 3".to_string(),
            }
        );
        assert_eq!(err.trace.len(), 2);
        assert_eq!(machine.state(), State::Running);
    }

    #[test]
    fn trace_renders_one_line_per_state() -> Result<()> {
        let trace = Machine::new(Expression::add(n(1), n(1)), Environment::new()).run()?;
        assert_eq!(trace.to_string(), "1 + 1, {}\n2, {}");
        Ok(())
    }

    #[test]
    fn snapshot_rendering() {
        let env: Environment = [("x", n(2))].into_iter().collect();
        let machine = Machine::new(Statement::assign("x", n(3)), env);
        assert_eq!(machine.snapshot().to_string(), "x = 3, {x: 2}");
        assert_eq!(machine.snapshot().to_pretty(), "x = 3, {x: 2}");
    }
}
