use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use serde_json::{Value, json};
use source_field::{
    Criteria, FieldValue, NormalizeOutcome, SourceField, SourceRegistry, source_types,
};
use std::io::Write;
use std::path::PathBuf;

use crate::loader::{load_catalog, load_settings};
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "source-field",
    version,
    about = "Inspect source field values against a source catalog"
)]
pub struct Cli {
    /// Source catalog file (JSON or YAML). Without it every lookup misses.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Field settings file (JSON or YAML). Defaults to an entries field.
    #[arg(long, global = true)]
    pub field: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize a stored value and show the selection and dropped entries
    Normalize {
        /// Stored value, e.g. '["section:uid-1"]'
        raw: String,
        /// Treat the value as belonging to a never-saved element
        #[arg(long)]
        fresh: bool,
    },
    /// Normalize a stored value and print its serialized form
    Serialize {
        /// Stored value
        raw: String,
    },
    /// Build query criteria for a stored value
    Criteria {
        /// Stored value
        raw: String,
        /// Base criteria as a JSON object
        #[arg(long)]
        base: Option<String>,
    },
    /// Show the input options and current selection for the field
    Options {
        /// Stored value to mark as selected
        #[arg(long)]
        value: Option<String>,
    },
    /// List the source types available with this catalog
    Types,
}

/// Loaded catalog and field for one invocation.
struct Session {
    registry: SourceRegistry,
    field: SourceField,
}

impl Session {
    fn load(cli: &Cli) -> Result<Self> {
        let registry = load_catalog(cli.catalog.as_deref())?.into_registry();
        let settings = load_settings(cli.field.as_deref())?;
        let field = SourceField::from_settings(&settings)?;
        Ok(Self { registry, field })
    }

    fn normalize(&self, raw: &str, fresh: bool) -> NormalizeOutcome {
        self.field
            .normalize_value_with_report(Value::String(raw.to_owned()), fresh, &self.registry)
    }
}

/// Run one parsed command and return its JSON output.
///
/// # Errors
/// Returns an error if an input file cannot be loaded, the field settings
/// are misconfigured, or `--base` is not a JSON object.
pub fn execute(cli: &Cli) -> Result<Value> {
    let session = Session::load(cli)?;

    let output = match &cli.command {
        Command::Normalize { raw, fresh } => {
            let outcome = session.normalize(raw, *fresh);
            report_drops(&outcome);
            serde_json::to_value(&outcome)?
        }
        Command::Serialize { raw } => {
            let outcome = session.normalize(raw, false);
            report_drops(&outcome);
            json!(session.field.serialize_value(&FieldValue::Selection(outcome.selection)))
        }
        Command::Criteria { raw, base } => {
            let base = match base {
                Some(text) => Criteria::try_from(
                    serde_json::from_str::<Value>(text).context("--base is not valid JSON")?,
                )?,
                None => Criteria::new(),
            };
            let outcome = session.normalize(raw, false);
            report_drops(&outcome);
            serde_json::to_value(outcome.selection.criteria(base))?
        }
        Command::Options { value } => {
            let raw = value.as_deref().unwrap_or_default();
            let selection = session.normalize(raw, true).selection;
            serde_json::to_value(session.field.input(&selection, &session.registry, &session.registry))?
        }
        Command::Types => serde_json::to_value(source_types(session.registry.commerce_enabled()))?,
    };

    Ok(output)
}

/// Warn on stderr about entries that were left out of a selection.
fn report_drops(outcome: &NormalizeOutcome) {
    if outcome.is_complete() {
        return;
    }
    let mut stderr = std::io::stderr().lock();
    for dropped in &outcome.dropped {
        let _ = writeln!(
            stderr,
            "{} dropped '{}' ({})",
            "warning:".yellow().bold(),
            dropped.raw,
            dropped.reason.as_str()
        );
    }
}

/// Parse arguments, run the command and print its output.
///
/// # Errors
/// Returns any error from [`execute`] or from writing to stdout.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let output = execute(&cli)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
