//! grantcheck CLI
//!
//! Verifies `SHOW GRANTS` output against privilege policies before a dump or
//! a replication setup.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use grantcheck_core::{privileges, CheckResult, Policy, PrivilegeChecker, StaticGrants, State};

/// Check that a database account holds the privileges an operation needs.
///
/// Reads `SHOW GRANTS` output, one statement per line.
#[derive(Parser)]
#[command(name = "grantcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File with grant statements (stdin if not specified).
    input: Option<PathBuf>,

    /// Policies to check.
    #[arg(
        short,
        long,
        env = "GRANTCHECK_POLICY",
        value_enum,
        value_delimiter = ',',
        default_values_t = [PolicyArg::Dump, PolicyArg::Replication]
    )]
    policy: Vec<PolicyArg>,

    /// Extra privilege to require, checked as one additional check.
    #[arg(short, long = "require", value_name = "PRIVILEGE")]
    require: Vec<String>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Dump,
    Replication,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Dump => Self::Dump,
            PolicyArg::Replication => Self::Replication,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let grants = read_grants(cli.input.as_deref())?;
    debug!(count = grants.len(), "Read grant statements");

    let policies: Vec<Policy> = cli.policy.iter().copied().map(Policy::from).collect();
    let results = run_checks(grants, &policies, &cli.require);

    let mut stdout = io::stdout().lock();
    render(&results, cli.json, &mut stdout)?;

    if results.iter().all(|r| r.state == State::Success) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Reads grant statements from `input`, or from stdin when `None`.
fn read_grants(input: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read `{}`", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("could not read grants from stdin")?;
            text
        }
    };
    Ok(grant_lines(&text))
}

/// Splits input into statements, dropping blank lines.
fn grant_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Runs every requested policy, then the `--require` list if one was given.
fn run_checks(grants: Vec<String>, policies: &[Policy], require: &[String]) -> Vec<CheckResult> {
    let source = StaticGrants(grants);
    let mut checkers: Vec<PrivilegeChecker<StaticGrants>> = policies
        .iter()
        .map(|policy| PrivilegeChecker::new(source.clone(), *policy))
        .collect();
    if !require.is_empty() {
        checkers.push(PrivilegeChecker::custom(
            source,
            "required privileges checker",
            privileges(require),
        ));
    }

    checkers
        .iter()
        .zip(1u64..)
        .map(|(checker, id)| checker.check(id))
        .collect()
}

fn render(results: &[CheckResult], json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, results)?;
        writeln!(out)?;
        return Ok(());
    }

    for result in results {
        writeln!(out, "[{}] {}", result.state, result.name)?;
        if result.state == State::Failure {
            writeln!(out, "    {}", result.error_msg)?;
            writeln!(out, "    {}", result.instruction)?;
        }
    }
    Ok(())
}
