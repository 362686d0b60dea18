use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use prevo::app::{App, capability_for};
use prevo::catalog::LanguageCatalog;
use prevo::config::Config;
use prevo::dictionary::{DictionaryFilter, MemoryDictionary};
use prevo::error::{AppError, AppResult};
use prevo::logging;
use prevo::model::LanguageCode;
use prevo::search::{EngineOptions, FilterEngine};

#[derive(Debug, Parser)]
#[command(name = "prevo-search")]
#[command(about = "Search the PReVo dictionary from the terminal", long_about = None)]
struct Cli {
    /// Language to search in, e.g. `eo` or `en`.
    #[arg(short, long)]
    language: Option<String>,
    /// Text to seed the search field with.
    #[arg(short, long)]
    query: Option<String>,
    /// Dictionary JSON file. The built-in sample is used when absent.
    #[arg(short, long)]
    dictionary: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    logging::init(&config.log)?;

    let dictionary = match cli.dictionary.as_ref().or(config.dictionary.path.as_ref()) {
        Some(path) => MemoryDictionary::load_from_path(path)?,
        None => MemoryDictionary::sample()?,
    };
    let dictionary = Arc::new(dictionary.with_max_results(config.search.max_results));
    let language = resolve_language(cli.language.as_deref(), &config, dictionary.as_ref())?;
    tracing::info!(%language, "starting search");

    let capability = Arc::new(capability_for(config.ui.show_as_action));
    let filter = FilterEngine::new(
        Arc::clone(&dictionary) as Arc<dyn DictionaryFilter>,
        EngineOptions {
            cache_entries: config.search.cache_entries,
        },
    )?;

    let mut app = App::new(
        config,
        dictionary,
        Box::new(filter),
        capability,
        Some(language),
        cli.query.as_deref(),
    )?;
    app.run().await
}

fn resolve_language(
    requested: Option<&str>,
    config: &Config,
    catalog: &dyn LanguageCatalog,
) -> AppResult<LanguageCode> {
    let language = requested
        .map(|code| LanguageCode::new(code.trim()))
        .unwrap_or_else(|| config.default_language());
    if !catalog.languages().contains(&language) {
        return Err(AppError::invalid_argument(format!(
            "unknown search language '{language}'"
        )));
    }
    Ok(language)
}
