//! Command-line interface for company insight analysis

mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use insight_core::InsightClassifier;
use insight_engine::{InsightConfig, InsightEngine, LlmClassifier, LlmKind};
use insight_llm::LlmProvider;
use insight_llm::providers::{GeminiProvider, OpenAiProvider};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(about = "Company insight: symbol resolution, trends, sentiment, research", long_about = None)]
struct Cli {
    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a company name to a probe-verified market symbol
    Resolve {
        /// Company name or ticker, e.g. "Apple Inc"
        company: String,
    },
    /// Seasonal trend statistics over historical prices
    Trend {
        /// Market symbol, e.g. AAPL or RELIANCE.NS
        symbol: String,
        /// Years of history to analyze
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        years: u32,
    },
    /// Per-product sentiment insights for a company
    Sentiment {
        /// Company name
        company: String,
    },
    /// Fixed-query research bundle: news, products, analysis, sales
    Research {
        /// Company name
        company: String,
    },
    /// News coverage for a specific month and year
    Events {
        /// Company name
        company: String,
        /// Month name, e.g. March
        month: String,
        /// Calendar year, e.g. 2025
        year: i32,
    },
}

/// Initialize tracing; logs go to stderr so stdout stays machine-readable
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Wire the classifier named in the configuration, if any
fn build_classifier(
    config: &InsightConfig,
) -> anyhow::Result<Option<Arc<dyn InsightClassifier>>> {
    let Some(settings) = &config.llm else {
        info!("No LLM configured, using lexical fallback");
        return Ok(None);
    };

    let provider: Arc<dyn LlmProvider> = match settings.kind {
        LlmKind::Gemini => Arc::new(
            GeminiProvider::from_env().context("Failed to configure Gemini provider")?,
        ),
        LlmKind::OpenAi => Arc::new(
            OpenAiProvider::from_env().context("Failed to configure OpenAI provider")?,
        ),
    };

    info!("Using LLM classifier with model '{}'", settings.model);
    Ok(Some(Arc::new(LlmClassifier::new(
        provider,
        settings.model.clone(),
    ))))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = InsightConfig::default().with_env_llm()?;
    let classifier = build_classifier(&config)?;
    let engine = InsightEngine::new(config, classifier)?;

    match cli.command {
        Command::Resolve { company } => {
            let Some(validated) = engine.resolve_symbol(&company).await else {
                eprintln!("No verified symbol found for '{company}'");
                std::process::exit(1);
            };
            if cli.json {
                print_json(&validated)?;
            } else {
                output::print_resolution(&company, &validated);
            }
        }
        Command::Trend { symbol, years } => {
            let Some(report) = engine.price_trend(&symbol, years).await? else {
                eprintln!("No usable price history for '{symbol}'");
                std::process::exit(1);
            };
            if cli.json {
                print_json(&report)?;
            } else {
                output::print_trend(&report);
            }
        }
        Command::Sentiment { company } => {
            let insights = engine.product_sentiment(&company).await;
            if cli.json {
                print_json(&insights)?;
            } else if insights.is_empty() {
                println!("No product coverage found for '{company}'");
            } else {
                output::print_insights(&insights);
            }
        }
        Command::Research { company } => {
            let bundle = engine.company_research(&company).await;
            if cli.json {
                print_json(&bundle)?;
            } else {
                output::print_research(&bundle);
            }
        }
        Command::Events {
            company,
            month,
            year,
        } => {
            let hits = engine.monthly_events(&company, &month, year).await;
            if cli.json {
                print_json(&hits)?;
            } else {
                output::print_hits(&format!("{company} events, {month} {year}"), &hits);
            }
        }
    }

    Ok(())
}
