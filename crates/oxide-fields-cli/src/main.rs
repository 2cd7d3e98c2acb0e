//! oxide-fields CLI
//!
//! Renders and validates schema-driven forms from JSON documents.

mod page;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_fields::{
    validate_all, Clock, FieldRenderer, FixedClock, Rules, Schema, SystemClock, ValidationErrors,
    Values,
};

/// Render form fields that remember submitted values.
#[derive(Debug, Parser)]
#[command(name = "oxide-fields")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render every field of a schema.
    Render {
        /// JSON schema file.
        #[arg(short, long, env = "OXIDE_FIELDS_SCHEMA")]
        schema: PathBuf,

        /// Submitted values as a query string.
        #[arg(short, long, default_value = "")]
        query: String,

        /// Reference date for date fields (YYYY-MM-DD, defaults to today).
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the elements as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate submitted values against a rules file.
    Validate {
        /// JSON rules file.
        #[arg(short, long, env = "OXIDE_FIELDS_RULES")]
        rules: PathBuf,

        /// Submitted values as a query string.
        #[arg(short, long, default_value = "")]
        query: String,

        /// Print errors and corrected values as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate, then render a complete form page.
    Form {
        /// JSON schema file.
        #[arg(short, long, env = "OXIDE_FIELDS_SCHEMA")]
        schema: PathBuf,

        /// JSON rules file; validation is skipped without one.
        #[arg(short, long, env = "OXIDE_FIELDS_RULES")]
        rules: Option<PathBuf>,

        /// Submitted values as a query string.
        #[arg(short, long, default_value = "")]
        query: String,

        /// Reference date for date fields (YYYY-MM-DD, defaults to today).
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Form legend.
        #[arg(long, default_value = "Form")]
        legend: String,

        /// Form action URL.
        #[arg(long, default_value = "")]
        action: String,
    },
}

fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let schema = Schema::from_path(path)
        .with_context(|| format!("loading schema {}", path.display()))?;
    debug!(path = %path.display(), fields = schema.len(), "loaded schema");
    Ok(schema)
}

fn load_rules(path: &Path) -> anyhow::Result<Rules> {
    let rules =
        Rules::from_path(path).with_context(|| format!("loading rules {}", path.display()))?;
    debug!(path = %path.display(), "loaded rules");
    Ok(rules)
}

fn clock(today: Option<NaiveDate>) -> FixedClock {
    FixedClock(today.unwrap_or_else(|| SystemClock.today()))
}

fn print_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        println!("{}{message}", page::label_for(field));
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Render {
            schema,
            query,
            today,
            json,
        } => {
            let schema = load_schema(&schema)?;
            let values = Values::from_query_string(&query);
            let mut renderer = FieldRenderer::new(&schema, &values).with_clock(clock(today));
            let elements = renderer.render();
            info!("Rendered {} of {} fields.", elements.len(), schema.len());

            if json {
                println!("{}", serde_json::to_string_pretty(elements)?);
            } else {
                for (name, element) in elements {
                    println!("<!-- {name} -->");
                    println!("{element}");
                }
            }
        }

        Commands::Validate { rules, query, json } => {
            let rules = load_rules(&rules)?;
            let mut values = Values::from_query_string(&query);
            let errors = validate_all(&mut values, &rules);

            if json {
                let report = serde_json::json!({
                    "errors": errors,
                    "values": values,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_errors(&errors);
            }

            if !errors.is_empty() {
                anyhow::bail!("{} field(s) failed validation", errors.len());
            }
            info!("All fields are valid.");
        }

        Commands::Form {
            schema,
            rules,
            query,
            today,
            legend,
            action,
        } => {
            let schema = load_schema(&schema)?;
            let mut values = Values::from_query_string(&query);

            // An empty submission is a first visit, not a failed one.
            let errors = match &rules {
                Some(path) if !values.is_empty() => {
                    let rules = load_rules(path)?;
                    validate_all(&mut values, &rules)
                }
                _ => ValidationErrors::new(),
            };
            if !errors.is_empty() {
                info!("{} field(s) failed validation.", errors.len());
            }

            let mut renderer = FieldRenderer::new(&schema, &values).with_clock(clock(today));
            let elements = renderer.render();
            println!(
                "{}",
                page::render_form_page(&legend, &schema, elements, &errors, &action, "get")
            );
        }
    }

    Ok(())
}
