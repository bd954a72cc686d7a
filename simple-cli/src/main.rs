#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, anyhow};
use clap::Parser;
use simple_core::{
    Environment, Machine, MachineConfig, Term,
    examples::{self, Program},
    prettyprinter::PrettyPrint,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Reduce a bundled Simple program one step at a time")]
struct Args {
    /// Name of the example program to run
    example: Option<String>,

    /// List the bundled example programs
    #[arg(short, long)]
    list: bool,

    /// Give up after this many reductions
    #[arg(long, value_name = "N", default_value_t = 1000)]
    max_steps: usize,

    /// Column width to lay out terms in
    #[arg(long, value_name = "N", default_value_t = 80)]
    width: usize,
}

fn run<T: Term>(term: T, env: Environment, args: &Args) -> anyhow::Result<()> {
    let mut machine =
        Machine::new(term, env).with_config(MachineConfig::with_max_steps(args.max_steps));
    let last = machine.run_with(|snapshot| {
        println!("{:>3}: {}", snapshot.step, snapshot.to_pretty_width(args.width));
    })?;
    tracing::info!(steps = last.step, "reached {}", last.term);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        for example in examples::all() {
            println!("{:<14} {} ({})", example.name, example.program, example.description);
        }
        return Ok(());
    }

    let name = args
        .example
        .as_deref()
        .context("no example given; use --list to see the available ones")?;
    let example = examples::find(name).ok_or_else(|| anyhow!("unknown example `{name}`"))?;

    match example.program {
        Program::Expression(expr) => run(expr, example.env, &args),
        Program::Statement(stmt) => run(stmt, example.env, &args),
    }
}
