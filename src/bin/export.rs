//! Journal Export Binary
//!
//! Writes the stored journal as a PDF or CSV report, or prints a summary,
//! without starting the desktop app.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tradejournal::application::journal::TradeJournal;
use tradejournal::application::report::{Report, signed_pl};
use tradejournal::config::JournalConfig;
use tradejournal::domain::performance::metrics::JournalMetrics;
use tradejournal::domain::performance::query::{CategoryFilter, TradeQuery};
use tradejournal::domain::performance::series::monthly_pl;
use tradejournal::domain::trading::instrument::InstrumentKind;
use tradejournal::infrastructure::JsonFileStore;
use tradejournal::infrastructure::export::{PageLayout, export_csv, export_pdf};

#[derive(Parser)]
#[command(author, version, about = "Trade Journal export tool", long_about = None)]
struct Cli {
    /// Data directory (overrides JOURNAL_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key (overrides JOURNAL_STORAGE_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a report file
    Export {
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: Format,

        /// Output path (defaults to JOURNAL_REPORT_DIR/trade_report.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only include one category (gold, oil, crypto, forex, other)
        #[arg(long)]
        category: Option<String>,
    },
    /// Print headline metrics and monthly P/L
    Summary,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    Csv,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = JournalConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }

    let store = JsonFileStore::new(&config.data_dir)?;
    let journal = TradeJournal::load(Arc::new(store), config.storage_key.clone())?;
    let trades = journal.snapshot();

    match cli.command {
        Commands::Export {
            format,
            output,
            category,
        } => {
            let query = TradeQuery {
                category: match category {
                    Some(raw) => CategoryFilter::Only(raw.parse::<InstrumentKind>()?),
                    None => CategoryFilter::All,
                },
                search: String::new(),
            };
            let selected: Vec<_> = query.apply(&trades).into_iter().cloned().collect();

            let path = match (output, format) {
                (Some(path), _) => path,
                (None, Format::Pdf) => config.pdf_output_path(),
                (None, Format::Csv) => config.csv_output_path(),
            };

            match format {
                Format::Pdf => {
                    let report = Report::build(config.report_title.clone(), &selected)?;
                    export_pdf(&report, PageLayout::new(config.rows_per_page), &path)
                        .with_context(|| format!("Failed to export {:?}", path))?;
                }
                Format::Csv => {
                    export_csv(&selected, &path)
                        .with_context(|| format!("Failed to export {:?}", path))?;
                }
            }
            info!("Exported {} trades to {}", selected.len(), path.display());
        }
        Commands::Summary => {
            let metrics = JournalMetrics::calculate(&trades);
            println!("{}", metrics.ticker());
            println!(
                "Gross profit: {:.2}   Gross loss: {:.2}   Profit factor: {}",
                metrics.gross_profit,
                metrics.gross_loss,
                metrics
                    .profit_factor
                    .map(|pf| format!("{:.2}", pf))
                    .unwrap_or_else(|| "—".to_string())
            );
            println!(
                "Average win: {}   Average loss: {}",
                signed_pl(metrics.average_win),
                signed_pl(metrics.average_loss)
            );
            for month in monthly_pl(&trades) {
                println!("  {}  {:>12}", month.month, signed_pl(month.pl));
            }
        }
    }

    Ok(())
}
