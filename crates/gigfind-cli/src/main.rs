use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gigfind_core::catalog::{Catalog, load_catalog};
use gigfind_core::models::{BudgetPreset, FilterPatch, SearchableRecord, SortOrder};
use gigfind_core::session::SearchSession;
use serde::Serialize;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gigfind", version, about = "Search the GigFind listing catalog")]
struct Cli {
    /// JSON catalog to search instead of the built-in listings
    #[arg(long, global = true, env = "GIGFIND_CATALOG")]
    catalog: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter listings by text and structured filters
    Search(SearchArgs),
    /// Show type-ahead suggestions for a partial query
    Suggest { text: String },
    /// List selectable categories, locations, budgets and popular searches
    Vocabulary,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(default_value = "")]
    text: String,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    #[arg(long)]
    min_rating: Option<f64>,
    /// Named price range; explicit --min-price/--max-price take precedence
    #[arg(long, value_parser = parse_budget)]
    budget: Option<BudgetPreset>,
    /// relevance, price-low, price-high or rating
    #[arg(long, default_value = "relevance")]
    sort: SortOrder,
}

impl SearchArgs {
    fn patch(&self) -> FilterPatch {
        let mut patch = self.budget.map(FilterPatch::budget).unwrap_or_default();
        if let Some(category) = &self.category {
            patch.category = FilterPatch::category_selection(category).category;
        }
        if let Some(location) = &self.location {
            patch.location = FilterPatch::location_selection(location).location;
        }
        patch.min_price = self.min_price.or(patch.min_price);
        patch.max_price = self.max_price.or(patch.max_price);
        patch.min_rating = self.min_rating;
        patch
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    count: usize,
    results: Vec<&'a SearchableRecord>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };
    let mut session = SearchSession::new(Arc::new(catalog), Handle::current());

    match &cli.command {
        Command::Search(args) => run_search(&mut session, args, cli.json).await,
        Command::Suggest { text } => run_suggest(&mut session, text, cli.json),
        Command::Vocabulary => run_vocabulary(session.catalog(), cli.json),
    }
}

async fn run_search(session: &mut SearchSession, args: &SearchArgs, json: bool) -> Result<()> {
    let filters = session.config().default_filters().merged(&args.patch());
    session.perform_search(args.text.clone(), filters);
    if session.is_searching() {
        tracing::debug!(query = %args.text, "searching");
        session.wait_until_idle().await;
    }

    let results = session.sorted_results(args.sort);
    if json {
        let output = SearchOutput {
            query: session.free_text(),
            count: results.count(),
            results: results.records,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!(
        "{} result{} ({} filter{} active, sorted by {})",
        results.count(),
        if results.count() == 1 { "" } else { "s" },
        session.active_filter_count(),
        if session.active_filter_count() == 1 { "" } else { "s" },
        args.sort.as_str(),
    );
    for record in results.iter() {
        println!(
            "  [{}] {}  {}  {:.0} ETB  ★{:.1}  {}",
            record.id, record.title, record.category, record.price, record.rating, record.location
        );
    }
    Ok(())
}

fn run_suggest(session: &mut SearchSession, text: &str, json: bool) -> Result<()> {
    session.set_free_text(text);
    let suggestions = session.suggestions();
    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        for suggestion in suggestions.as_slice() {
            println!("{suggestion}");
        }
    }
    Ok(())
}

fn run_vocabulary(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        let budgets: Vec<_> = BudgetPreset::ALL
            .into_iter()
            .map(|preset| {
                let (min_price, max_price) = preset.range();
                serde_json::json!({
                    "id": preset,
                    "label": preset.label(),
                    "min_price": min_price,
                    "max_price": max_price,
                })
            })
            .collect();
        let output = serde_json::json!({
            "categories": catalog.category_choices(),
            "locations": catalog.location_choices(),
            "popular_searches": catalog.popular_searches,
            "budgets": budgets,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Categories: {}", catalog.categories.join(", "));
    println!("Locations: {}", catalog.locations.join(", "));
    println!("Popular searches: {}", catalog.popular_searches.join(", "));
    println!("Budgets:");
    for preset in BudgetPreset::ALL {
        println!("  {}", preset.label());
    }
    Ok(())
}

fn parse_budget(value: &str) -> Result<BudgetPreset, String> {
    let normalized = value.trim().to_ascii_lowercase();
    BudgetPreset::ALL
        .into_iter()
        .find(|preset| {
            let (min_price, max_price) = preset.range();
            normalized == format!("{min_price}-{max_price}")
                || normalized == preset.label().to_ascii_lowercase()
        })
        .ok_or_else(|| {
            format!("unknown budget '{value}', expected a range such as 500-2000 or 'Any Budget'")
        })
}
