//! quarry: mine multi-level association rules from a labeled document store.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use quarry_core::config::{CliOverrides, QuarryConfig};
use quarry_core::errors::{PipelineError, QuarryErrorCode};
use quarry_core::tracing::init_tracing;
use quarry_storage::queries::rule_graph::{self, RuleRole, RuleRow};
use quarry_storage::{DatabaseManager, RetryPolicy};

use quarry_cli::{import_corpus, Pipeline};

#[derive(Parser)]
#[command(name = "quarry", version)]
#[command(about = "Multi-level association rule mining over a category hierarchy", long_about = None)]
struct Cli {
    /// Directory containing quarry.toml
    #[arg(long, global = true, default_value = ".")]
    config_root: PathBuf,

    /// SQLite store path
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract transactions, mine, rank, and write reports and graphs
    Run(RunArgs),

    /// Load a JSON Lines corpus into the store
    Import {
        /// One document per line
        corpus: PathBuf,
    },

    /// Print stored rules in rank order
    Rules {
        /// Only rules this category takes part in
        #[arg(short, long)]
        entity: Option<String>,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Args)]
struct RunArgs {
    #[arg(long)]
    min_support: Option<f64>,

    #[arg(long)]
    min_confidence: Option<f64>,

    /// Largest itemset size mined
    #[arg(long)]
    max_length: Option<usize>,

    /// Directory for transactions.csv and rules.txt
    #[arg(short, long)]
    output_dir: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "quarry failed");
            eprintln!("{}", e.report_string());
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<(), PipelineError> {
    let mut overrides = CliOverrides {
        database: cli.database,
        ..Default::default()
    };
    if let Command::Run(args) = &cli.command {
        overrides.min_support = args.min_support;
        overrides.min_confidence = args.min_confidence;
        overrides.max_length = args.max_length;
        overrides.output_dir = args.output_dir.clone();
    }
    let config = QuarryConfig::load(&cli.config_root, Some(&overrides))?;

    match cli.command {
        Command::Config => {
            print!("{}", config.resolved().to_toml()?);
        }
        Command::Run(_) => {
            let store = open_store(&config)?;
            let summary = Pipeline::new(&store, &config).run()?;
            println!(
                "{} documents, {} categories, {} candidate rules, {} ranked rules",
                summary.documents, summary.categories, summary.candidate_rules, summary.ranked_rules
            );
            println!("transactions: {}", config.output.transactions_path().display());
            println!("rules: {}", config.output.rules_path().display());
        }
        Command::Import { corpus } => {
            let store = open_store(&config)?;
            let summary = import_corpus(&store, &corpus)?;
            println!(
                "imported {} documents ({} occurrences)",
                summary.documents, summary.occurrences
            );
        }
        Command::Rules { entity, limit } => {
            let store = open_store(&config)?;
            match entity {
                Some(name) => {
                    let rules = store.with_conn(|conn| rule_graph::rules_for_entity(conn, &name))?;
                    for (row, role) in rules.iter().take(limit) {
                        let tag = match role {
                            RuleRole::Antecedent => "ANTE",
                            RuleRole::Consequent => "CONS",
                        };
                        println!("{tag} {}", format_row(row));
                    }
                }
                None => {
                    let rules = store.with_conn(|conn| rule_graph::list_rules(conn, limit))?;
                    for row in &rules {
                        println!("{}", format_row(row));
                    }
                }
            }
        }
    }
    Ok(())
}

fn open_store(config: &QuarryConfig) -> Result<DatabaseManager, PipelineError> {
    let path = config.storage.effective_database();
    let policy = RetryPolicy::from(&config.storage);
    Ok(DatabaseManager::open_with_retry(&path, &policy)?)
}

fn format_row(row: &RuleRow) -> String {
    format!(
        "#{} {} (Lift: {:.5}, Conf: {:.5}, Supp: {:.5})",
        row.rule_id, row.name, row.lift, row.confidence, row.support
    )
}
