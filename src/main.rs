//! # Docket CLI
//!
//! ```bash
//! # Render the current template of a store against a record dump
//! docket render --template templates.json --data records.json --out print.html
//!
//! # Group pages by customer
//! docket render --template templates.json --data records.json --group-by 客户名称
//!
//! # Validate a backup file
//! docket check-backup backup-2024-06-01_10-00-00.json
//!
//! # Evaluate an arithmetic expression
//! docket eval "(1+2)*3"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use docket::common::number_string;
use docket::render::try_evaluate;
use docket::settings::AppConfig;
use docket::{check_backup, init_logging, LogOptions, RenderJob};

/// Docket - template designer and print renderer
#[derive(Parser, Debug)]
#[command(name = "docket")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template against a record dump into a print document
    Render {
        /// Template store file
        #[arg(long, value_name = "FILE")]
        template: PathBuf,

        /// Record dump with fields and records
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Output HTML file
        #[arg(long, value_name = "FILE", default_value = "print.html")]
        out: PathBuf,

        /// Template id or name (defaults to the current template)
        #[arg(long)]
        name: Option<String>,

        /// Grouping field id or name, one page per distinct value
        #[arg(long = "group-by", value_name = "FIELD")]
        group_by: Vec<String>,
    },

    /// Validate a backup payload
    CheckBackup {
        file: PathBuf,
    },

    /// Evaluate an arithmetic expression
    Eval {
        expr: String,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let path = match path {
        Some(path) => path,
        None => match AppConfig::default_path() {
            Ok(path) => path,
            Err(_) => return Ok(AppConfig::default()),
        },
    };
    AppConfig::load_or_default(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LogOptions {
        verbose: cli.verbose,
        json: cli.log_json,
    })?;
    tracing::debug!("docket {} built {}", docket::VERSION, docket::BUILD_DATE);
    docket::log_events();

    match cli.command {
        Commands::Render {
            template,
            data,
            out,
            name,
            group_by,
        } => {
            let config = load_config(cli.config)?;
            let job = RenderJob {
                store: template,
                data,
                out,
                template: name,
                group_by,
                options: config.print,
            };
            let summary = job.run()?;
            println!(
                "Rendered '{}': {} page(s) -> {}",
                summary.template,
                summary.pages,
                summary.out.display()
            );
        }
        Commands::CheckBackup { file } => {
            let payload = check_backup(&file)?;
            println!("Backup version {}", payload.version);
            if let Some(at) = payload.created_at() {
                println!("Created {}", at.to_rfc3339());
            }
            println!("{} template(s):", payload.templates.len());
            for template in &payload.templates {
                println!("  {} ({} components)", template.name, template.layout.len());
            }
        }
        Commands::Eval { expr } => {
            let value = try_evaluate(&expr).with_context(|| format!("Cannot evaluate '{expr}'"))?;
            println!("{}", number_string(value));
        }
    }

    Ok(())
}
