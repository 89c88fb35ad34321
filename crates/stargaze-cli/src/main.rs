use clap::Parser;
use stargaze_core::{
    providers::GitHubProvider, Config, FetchClient, Paginator, ResultStore, SortKey, SortOrder,
    NUMBERED_PAGES,
};
use stargaze_tui::{run_tui, App};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str =
    "stargaze_cli=info,stargaze_core=info,stargaze_api=info,stargaze_tui=info";

#[derive(Parser)]
#[command(name = "stargaze")]
#[command(version, about = "Search GitHub repositories from the terminal", long_about = None)]
struct Cli {
    /// GitHub token (raises the search rate limit)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Idle time in milliseconds before a typed query is searched
    #[arg(long)]
    debounce_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Interactive search (the default)
    Tui,
    /// Search once and print a single page of results
    Search {
        /// Search query
        query: String,
        /// Page to print (1-5)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// relevance, stars, name, owner or created
        #[arg(long)]
        sort: Option<SortKey>,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print where the config file lives
    Path,
    /// Print the effective configuration
    Show,
    /// Write a config file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the screen, so its logs go to a file
    init_logging(matches!(command, Commands::Tui))?;

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)?;
    if cli.token.is_some() {
        config.github.token = cli.token.clone();
    }
    if let Some(ms) = cli.debounce_ms {
        config.search.debounce_ms = ms;
    }

    match command {
        Commands::Tui => {
            tracing::info!("Starting TUI (debounce {}ms)", config.search.debounce_ms);
            let provider: Arc<dyn FetchClient> = Arc::new(GitHubProvider::from_config(&config.github)?);
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
            let app = App::new(provider, &config, tx);
            run_tui(app, rx).await?;
        }
        Commands::Search { query, page, sort } => {
            tracing::info!("Searching for: {}", query);
            run_search(&config, &query, page, sort.unwrap_or(config.ui.default_sort)).await?;
        }
        Commands::Config { action } => run_config(&action, &config, &config_path)?,
    }

    Ok(())
}

async fn run_search(config: &Config, query: &str, page: usize, sort: SortKey) -> anyhow::Result<()> {
    let mut pager = Paginator::new();
    if !pager.jump_to(page) {
        anyhow::bail!("--page must be between 1 and {}", NUMBERED_PAGES);
    }

    let provider = GitHubProvider::from_config(&config.github)?;
    let mut store = ResultStore::new();

    store.begin_search(1);
    if store.apply(1, provider.search(query).await).is_some() {
        anyhow::bail!(
            "Search failed: {}",
            store.error_message().unwrap_or("unknown error")
        );
    }
    store.sort(SortOrder::by(sort));

    let rows = pager.visible(store.results());
    if rows.is_empty() {
        println!("No repositories on page {} ({} results total)", page, store.len());
        return Ok(());
    }

    let window = pager.window();
    println!(
        "Showing {}-{} of {} for {:?}\n",
        window.start + 1,
        window.start + rows.len(),
        store.len(),
        query
    );
    for repo in rows {
        println!("  {}  ★{}", repo.full_name(), repo.stars);
        if let Some(desc) = &repo.description {
            println!("    {}", desc);
        }
        println!("    {}  created {}", repo.url, repo.timestamp.format("%Y-%m-%d"));
        println!();
    }

    Ok(())
}

fn run_config(action: &ConfigAction, config: &Config, path: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => {
            let mut shown = config.clone();
            if shown.github.token.is_some() {
                shown.github.token = Some("<redacted>".into());
            }
            print!("{}", shown.to_toml()?);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            Config::default().save_to(path)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

fn init_logging(to_file: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    if to_file {
        let path = log_path()?;
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn log_path() -> anyhow::Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find a data directory for logs"))?
        .join("stargaze");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("stargaze.log"))
}
