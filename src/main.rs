use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pokebase::api::http::format_api_error;
use pokebase::config::Config;
use pokebase::{ApiValue, NameOrId};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Browse the PokeAPI from the command line
#[derive(Parser, Debug)]
#[command(name = "pokebase", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// API root to fetch from
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Skip the on-disk response cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a resource and print it, or one of its fields
    Get {
        /// Category, e.g. berry
        category: String,
        /// Numeric id or name
        identifier: String,
        /// Field path to follow, e.g. `firmness name`
        path: Vec<String>,
    },
    /// List the names in a category
    List {
        category: String,
        /// Print urls instead of names
        #[arg(long)]
        urls: bool,
    },
    /// Convert between a name and an id
    Resolve { category: String, identifier: String },
    /// Manage the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Delete every cached response
    Clear,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    SetBaseUrl { url: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("pokebase started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("pokebase").join("pokebase.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".pokebase").join("pokebase.log");
    }
    PathBuf::from("pokebase.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let _log_guard = setup_logging(args.log_level);

    if let Err(e) = run(args).await {
        tracing::error!("{:#}", e);
        eprintln!("error: {}", describe_error(&e));
        std::process::exit(1);
    }
}

fn describe_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<pokebase::Error>() {
        Some(pokebase::Error::Transport(inner)) => format_api_error(inner),
        Some(other) => other.to_string(),
        None => format!("{:#}", error),
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();

    if let Command::Config { action } = &args.command {
        match action {
            ConfigAction::Show => println!("{}", serde_json::to_string_pretty(&config)?),
            ConfigAction::SetBaseUrl { url } => {
                url::Url::parse(url).with_context(|| format!("Invalid base URL '{}'", url))?;
                config.set_base_url(url)?;
                println!("base_url = {}", url);
            }
        }
        return Ok(());
    }

    let client = config
        .client_builder(args.base_url.as_deref(), args.no_cache)
        .build()?;

    match args.command {
        Command::Get {
            category,
            identifier,
            path,
        } => {
            let resource = client
                .lazy_resource(&category, NameOrId::parse(&identifier))
                .await?;
            let value = walk(ApiValue::Resource(resource), &path).await?;
            println!("{}", serde_json::to_string_pretty(&render(&value).await?)?);
        }
        Command::List { category, urls } => {
            let index = client.category(&category).await?;
            if urls {
                index.urls().for_each(|url| println!("{}", url));
            } else {
                index.names().for_each(|name| println!("{}", name));
            }
            if index.entries().len() < index.len() {
                eprintln!("({} of {} listed)", index.entries().len(), index.len());
            }
        }
        Command::Resolve {
            category,
            identifier,
        } => {
            let (name, id) = client.resolve(&category, NameOrId::parse(&identifier)).await?;
            println!("{} {}", name.as_deref().unwrap_or("-"), id);
        }
        Command::Cache {
            action: CacheAction::Clear,
        } => clear_cache(&config, args.no_cache).await?,
        Command::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Follow a field path from `start`, loading references along the way
async fn walk(start: ApiValue, path: &[String]) -> Result<ApiValue> {
    let mut current = start;

    for segment in path {
        let next = match &current {
            ApiValue::Resource(reference) => reference.get(segment).await?.clone(),
            ApiValue::Metadata(metadata) => metadata
                .get(segment)
                .cloned()
                .with_context(|| format!("no field '{}'", segment))?,
            ApiValue::List(items) => list_index(segment, items.len())
                .and_then(|i| items.get(i).cloned())
                .with_context(|| format!("no element '{}'", segment))?,
            ApiValue::Scalar(value) => {
                let inner = match value {
                    Value::Array(items) => list_index(segment, items.len()).and_then(|i| items.get(i)),
                    other => other.get(segment.as_str()),
                };
                ApiValue::Scalar(
                    inner
                        .cloned()
                        .with_context(|| format!("no field '{}'", segment))?,
                )
            }
        };
        current = next;
    }

    Ok(current)
}

fn list_index(segment: &str, len: usize) -> Option<usize> {
    segment.parse::<usize>().ok().filter(|&i| i < len)
}

/// JSON for printing. A reference at the end of the path is loaded.
async fn render(value: &ApiValue) -> Result<Value> {
    match value {
        ApiValue::Resource(reference) => {
            let fields = reference.loaded_fields().await?;
            Ok(Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ))
        }
        other => Ok(other.to_json()),
    }
}

async fn clear_cache(config: &Config, no_cache: bool) -> Result<()> {
    let Some(dir) = config.effective_cache_dir(no_cache) else {
        println!("disk cache disabled");
        return Ok(());
    };
    pokebase::api::cache::ResponseCache::with_dir(dir.clone()).clear().await?;
    println!("cleared {}", dir.display());
    Ok(())
}
