use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use collection_search::catalog::Catalog;
use collection_search::config::{find_config_file, load_config, Config, ConfigFile};
use collection_search::engine::QueryEngine;
use collection_search::models::{
    Category, DisplayMode, LibraryKind, PageState, Query, QueryOutcome,
};
use collection_search::ui;
use collection_search::utils::{is_terminal, terminal_width};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Collection Search - Browse library holdings by name, location, type and size
#[derive(Parser, Debug)]
#[command(name = "collection-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search, filter and rank library holdings records", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Holdings JSON document (overrides the configured path)
    #[arg(long, short, global = true)]
    data: Option<PathBuf>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text cards
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search libraries by name, city, state or country
    #[command(alias = "s")]
    Search {
        /// Search term (empty lists every library)
        #[arg(default_value = "")]
        term: String,

        /// Library type filter: all, us, academic, public, government, vendor, museums, special, other
        #[arg(long, short, default_value_t = Category::All)]
        kind: Category,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: usize,

        /// Records per page (default from config)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show the libraries with the largest holdings
    #[command(alias = "top")]
    Leaderboard {
        /// Category: all, us, academic, public, government (or any library type)
        #[arg(long, short, default_value_t = Category::All)]
        category: Category,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: usize,

        /// Rows per page (default: the whole leaderboard)
        #[arg(long)]
        page_size: Option<usize>,

        /// Number of libraries to rank (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a single library by identifier
    Show {
        /// Institution identifier
        id: String,
    },

    /// List the available categories
    Kinds,

    /// Write the effective configuration (defaults plus overrides) to a file
    InitConfig {
        /// Destination path
        #[arg(default_value = "collection-search.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format after resolving `auto` against the terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Json,
    Plain,
}

/// Machine-readable envelope for JSON output
#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a Query,
    mode: DisplayMode,
    page: PageState,
    #[serde(flatten)]
    outcome: &'a QueryOutcome<'a>,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Collection Search - Environment Variables");
    println!();
    println!("Data:");
    println!("  COLLECTION_SEARCH_DATA__PATH               Holdings JSON document (default: data.json)");
    println!();
    println!("Engine:");
    println!("  COLLECTION_SEARCH_ENGINE__PAGE_SIZE        Records per search page (default: 48)");
    println!("  COLLECTION_SEARCH_ENGINE__WINDOW_WIDTH     Page links in the pagination bar (default: 5)");
    println!("  COLLECTION_SEARCH_ENGINE__LEADERBOARD_SIZE Libraries kept by a leaderboard (default: 100)");
    println!();
    println!("Logging:");
    println!("  COLLECTION_SEARCH_LOGGING__LEVEL           Log level when no -v/-q flag is given (default: info)");
    println!("  RUST_LOG                                   Full tracing filter, overrides everything else");
    println!();
    println!("Environment overrides apply on top of the configuration file, if any.");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    let config_path = cli.config.clone().or_else(find_config_file);
    let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load config from environment".to_string(),
    })?;

    init_tracing(&cli, &config);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    match cli.command {
        Some(Commands::Search {
            ref term,
            kind,
            page,
            page_size,
        }) => {
            let catalog = load_catalog(&cli, &config)?;
            let query = Query::new(term.as_str()).category(kind);
            let page = PageState::new(page)
                .page_size(page_size.unwrap_or(config.engine.page_size))
                .window_width(config.engine.window_width);

            run_query(&cli, &config, &catalog, &query, page, DisplayMode::Search)?;
        }
        Some(Commands::Leaderboard {
            category,
            page,
            page_size,
            limit,
        }) => {
            let catalog = load_catalog(&cli, &config)?;
            let limit = limit.unwrap_or(config.engine.leaderboard_size);
            let mut config = config;
            config.engine.leaderboard_size = limit;

            let query = Query::default().category(category);
            let page = PageState::new(page)
                .page_size(page_size.unwrap_or(limit))
                .window_width(config.engine.window_width);

            run_query(&cli, &config, &catalog, &query, page, DisplayMode::Leaderboard)?;
        }
        Some(Commands::Show { ref id }) => {
            let catalog = load_catalog(&cli, &config)?;
            let record = catalog
                .find(id)
                .with_context(|| format!("No library with identifier '{}'", id))?;

            match resolve_format(cli.output) {
                Format::Json => println!("{}", serde_json::to_string_pretty(record)?),
                Format::Plain => println!("{}", ui::record_card(record)),
                Format::Table => ui::print_record_card(record),
            }
        }
        Some(Commands::Kinds) => {
            let categories: Vec<Category> = [Category::All, Category::UnitedStates]
                .into_iter()
                .chain(LibraryKind::ALL.into_iter().map(Category::Kind))
                .collect();

            if resolve_format(cli.output) == Format::Json {
                let kinds: Vec<_> = categories
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "id": c.slug(),
                            "label": c.label(),
                            "leaderboard": Category::LEADERBOARD.contains(c),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&kinds)?);
            } else {
                ui::print_section("Categories");
                for category in &categories {
                    let icon = match category {
                        Category::Kind(kind) => ui::kind_icon(*kind),
                        _ => " ",
                    };
                    println!("  {:<12} {} {}", category.slug(), icon, category.label());
                }
                let leaderboard: Vec<&str> =
                    Category::LEADERBOARD.iter().map(|c| c.slug()).collect();
                println!();
                println!("Leaderboard categories: {}", leaderboard.join(", "));
            }
        }
        Some(Commands::InitConfig { ref path, force }) => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            ConfigFile::from(config.clone()).save(path)?;
            if !cli.quiet {
                ui::print_status(
                    ui::Status::Success,
                    &format!("Wrote configuration to {}", path.display()),
                );
            }
        }
        None => {
            println!("Collection Search v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Use --help to see available commands");
            println!();
            println!("Quick start:");
            println!("  search <term>            - Search libraries by name or location");
            println!("  leaderboard -c us        - Top libraries by holdings");
            println!("  show <id>                - Show one library");
            println!("  kinds                    - List library types");
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("collection_search={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_catalog(cli: &Cli, config: &Config) -> Result<Catalog> {
    let path = cli.data.clone().unwrap_or_else(|| config.data.path.clone());
    let catalog = Catalog::load(&path)?;
    if catalog.skipped > 0 {
        tracing::warn!("Skipped {} malformed entries", catalog.skipped);
    }
    Ok(catalog)
}

fn run_query(
    cli: &Cli,
    config: &Config,
    catalog: &Catalog,
    query: &Query,
    page: PageState,
    mode: DisplayMode,
) -> Result<()> {
    let engine = QueryEngine::new().leaderboard_size(config.engine.leaderboard_size);

    let total_pages = engine.page_count(&catalog.records, query, page.page_size, mode);
    let clamped = page.clamped(total_pages);
    if clamped.current_page != page.current_page {
        tracing::warn!(
            "Page {} is out of range, showing page {} of {}",
            page.current_page,
            clamped.current_page,
            total_pages
        );
    }

    let outcome = engine.execute(&catalog.records, query, &clamped, mode);

    match resolve_format(cli.output) {
        Format::Json => {
            let output = JsonOutput {
                query,
                mode,
                page: clamped,
                outcome: &outcome,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Plain => {
            for (index, record) in outcome.visible.iter().enumerate() {
                if mode == DisplayMode::Leaderboard {
                    println!("#{} {}", outcome.rank_of(index), ui::record_card(record));
                } else {
                    println!("{}", ui::record_card(record));
                }
                println!();
            }
            if let Some(line) = ui::showing_line(&outcome, "libraries") {
                println!("{}", line);
            }
        }
        Format::Table => {
            if outcome.visible.is_empty() {
                ui::print_status(
                    ui::Status::Info,
                    "No libraries found matching your search criteria.",
                );
                return Ok(());
            }

            match mode {
                DisplayMode::Search => {
                    if !cli.quiet {
                        ui::print_search_header(
                            &query.search_term,
                            query.category,
                            outcome.total_matched,
                        );
                    }
                    println!("{}", ui::search_table(&outcome, terminal_width()));
                }
                DisplayMode::Leaderboard => {
                    if !cli.quiet {
                        ui::print_section(&format!(
                            "Top {} {} by Ukrainian holdings",
                            config.engine.leaderboard_size,
                            query.category.label()
                        ));
                    }
                    println!("{}", ui::leaderboard_table(&outcome));
                }
            }
            ui::print_pagination(&outcome, clamped.current_page, "libraries");
        }
    }

    Ok(())
}

fn resolve_format(format: OutputFormat) -> Format {
    match format {
        OutputFormat::Auto if is_terminal() => Format::Table,
        OutputFormat::Auto => Format::Json,
        OutputFormat::Table => Format::Table,
        OutputFormat::Json => Format::Json,
        OutputFormat::Plain => Format::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_version() {
        let version = env!("CARGO_PKG_VERSION");
        assert!(!version.is_empty());
        let parts: Vec<&str> = version.split('.').collect();
        assert!(parts.len() >= 2);
        assert!(parts[0].parse::<u32>().is_ok());
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["collection-search"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.data.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["collection-search", "-vv"]);
        assert_eq!(cli.verbose, 2);

        let cli = Cli::parse_from(["collection-search", "--verbose"]);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["collection-search", "-o", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(resolve_format(cli.output), Format::Json);

        let cli = Cli::parse_from(["collection-search", "--output", "plain"]);
        assert_eq!(cli.output, OutputFormat::Plain);
        assert_eq!(resolve_format(cli.output), Format::Plain);
        assert_eq!(resolve_format(OutputFormat::Table), Format::Table);
    }

    #[test]
    fn test_cli_search_command() {
        let cli = Cli::parse_from(["collection-search", "search", "kyiv"]);
        match &cli.command {
            Some(Commands::Search {
                term,
                kind,
                page,
                page_size,
            }) => {
                assert_eq!(term, "kyiv");
                assert_eq!(*kind, Category::All);
                assert_eq!(*page, 1);
                assert!(page_size.is_none());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_search_with_options() {
        let cli = Cli::parse_from([
            "collection-search",
            "search",
            "washington",
            "--kind",
            "public",
            "--page",
            "3",
            "--page-size",
            "10",
            "--data",
            "/srv/data.json",
        ]);
        match &cli.command {
            Some(Commands::Search {
                kind,
                page,
                page_size,
                ..
            }) => {
                assert_eq!(*kind, Category::Kind(LibraryKind::PublicSchool));
                assert_eq!(*page, 3);
                assert_eq!(*page_size, Some(10));
            }
            _ => panic!("Expected Search command"),
        }
        assert_eq!(cli.data, Some(PathBuf::from("/srv/data.json")));
    }

    #[test]
    fn test_cli_search_rejects_unknown_kind() {
        let result = Cli::try_parse_from(["collection-search", "search", "x", "--kind", "bookstore"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_leaderboard_command() {
        let cli = Cli::parse_from(["collection-search", "top", "-c", "us", "--limit", "10"]);
        match &cli.command {
            Some(Commands::Leaderboard {
                category, limit, ..
            }) => {
                assert_eq!(*category, Category::UnitedStates);
                assert_eq!(*limit, Some(10));
            }
            _ => panic!("Expected Leaderboard command"),
        }
    }

    #[test]
    fn test_cli_init_config_command() {
        let cli = Cli::parse_from(["collection-search", "init-config"]);
        match &cli.command {
            Some(Commands::InitConfig { path, force }) => {
                assert_eq!(path, &PathBuf::from("collection-search.toml"));
                assert!(!*force);
            }
            _ => panic!("Expected InitConfig command"),
        }
    }
}
