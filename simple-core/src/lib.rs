#![warn(clippy::all, rust_2018_idioms)]

pub mod environment;
pub mod examples;
pub mod language;
pub mod machine;
pub mod prettyprinter;
pub mod reduce;

pub use environment::Environment;
pub use language::{Expression, Kind, Operator, Statement, Variable};
pub use machine::{Machine, MachineConfig, MachineError, RunError, Snapshot, State, Trace};
pub use reduce::{ReductionError, Term};
