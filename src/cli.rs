// Command-line interface.
// Parses arguments, loads configuration and dispatches to the TUI or one-shot commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::SiteClient;
use crate::app::App;
use crate::config::{Config, ENV_BASE_URL};
use crate::error::{Result, SiteError};
use crate::logging::init_logging;
use crate::router::{Route, Router};
use crate::site::Site;
use crate::views;

#[derive(Parser, Debug)]
#[command(name = "sitefront")]
#[command(about = "Browse a static-JSON content site from the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL the data files are served from
    #[arg(long, global = true, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse the site interactively (default)
    Browse {
        /// Path to open first, e.g. /blog
        path: Option<String>,
    },

    /// Render one route as plain text
    Show {
        /// Site path, e.g. /blog/spring-update
        path: String,

        /// Bypass the cache
        #[arg(long)]
        refresh: bool,
    },

    /// Print a data file as pretty JSON
    Fetch {
        #[arg(value_enum)]
        resource: ResourceArg,

        /// Only this page (page-content only)
        #[arg(long)]
        page: Option<String>,
    },

    /// Print the route table
    Routes,
}

/// Data files `fetch` can print.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceArg {
    Articles,
    Featured,
    Cards,
    Carousel,
    Staff,
    PageContent,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;
        let command = self
            .command
            .clone()
            .unwrap_or(Commands::Browse { path: None });

        // The TUI owns the terminal, so its logs go to a file
        let log_file = match command {
            Commands::Browse { .. } => config.logging.file.clone().or_else(Config::default_log_path),
            _ => config.logging.file.clone(),
        };
        let _guard = init_logging(
            &config.logging.level,
            self.debug,
            self.verbose,
            log_file.as_deref(),
        )?;
        debug!("Using {} (base path {})", config.site.base_url, config.site.base_path);

        match command {
            Commands::Browse { path } => browse(&config, path).await,
            Commands::Show { path, refresh } => show(&config, &path, refresh).await,
            Commands::Fetch { resource, page } => fetch(&config, resource, page).await,
            Commands::Routes => {
                routes(&config);
                Ok(())
            }
        }
    }

    /// File (or defaults), then environment, then flags.
    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        config.apply_env_overrides();
        if let Some(url) = &self.base_url {
            config.site.base_url = url.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

async fn browse(config: &Config, path: Option<String>) -> Result<()> {
    let site = Site::from_config(config)?;
    let start = match path {
        Some(path) => site.router.resolve(&path)?,
        None => Route::Home,
    };

    let mut terminal = ratatui::init();
    let mut app = App::new(site, start);
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    result.map_err(SiteError::from)
}

async fn show(config: &Config, path: &str, refresh: bool) -> Result<()> {
    let mut site = Site::from_config(config)?;
    let (_, data) = site.load_path(path, refresh).await?;

    for error in site.errors() {
        warn!("{}", error);
    }
    println!("{}", views::to_plain(&views::render(&data, &site.router)));
    Ok(())
}

async fn fetch(config: &Config, resource: ResourceArg, page: Option<String>) -> Result<()> {
    let client = SiteClient::from_config(config)?;

    if page.is_some() && resource != ResourceArg::PageContent {
        return Err(SiteError::Other(
            "--page only applies to page-content".to_string(),
        ));
    }

    match resource {
        ResourceArg::Articles => print_json(&client.fetch_articles().await?),
        ResourceArg::Featured => print_json(&client.fetch_featured_articles().await?),
        ResourceArg::Cards => print_json(&client.fetch_cards().await?),
        ResourceArg::Carousel => print_json(&client.fetch_carousel_images().await?),
        ResourceArg::Staff => print_json(&client.fetch_staff().await?),
        ResourceArg::PageContent => match page {
            Some(page) => match client.fetch_page_content_by_name(&page).await? {
                Some(content) => print_json(&content),
                None => Err(SiteError::NotFound(format!("page '{}'", page))),
            },
            None => print_json(&client.fetch_page_content().await?),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn routes(config: &Config) {
    let router = Router::new(&config.site.base_path);
    println!("Base path: {}", router.base_path());
    for route in router.routes() {
        println!("  {:<16} {}", route.name, route.pattern);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::try_parse_from(["sitefront"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_show_and_fetch() {
        let cli = Cli::try_parse_from(["sitefront", "show", "/blog", "--refresh", "-d"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Show {
                path: "/blog".to_string(),
                refresh: true
            })
        );
        assert!(cli.debug);

        let cli =
            Cli::try_parse_from(["sitefront", "fetch", "page-content", "--page", "home"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Fetch {
                resource: ResourceArg::PageContent,
                page: Some("home".to_string())
            })
        );
    }

    #[test]
    fn test_unknown_resource_rejected() {
        assert!(Cli::try_parse_from(["sitefront", "fetch", "users"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.site.base_url = "http://files.example/".to_string();
        config.save(&path).unwrap();

        let cli = Cli::try_parse_from([
            "sitefront",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "https://cli.example/",
            "routes",
        ])
        .unwrap();
        let loaded = cli.load_config().unwrap();
        assert_eq!(loaded.site.base_url, "https://cli.example/");
    }

    #[test]
    fn test_base_url_flag_replaces_invalid_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[site]\nbase_url = \"ftp://files.example/\"\n").unwrap();
        let path = path.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "sitefront",
            "--config",
            path,
            "--base-url",
            "https://cli.example/",
            "routes",
        ])
        .unwrap();
        let loaded = cli.load_config().unwrap();
        assert_eq!(loaded.site.base_url, "https://cli.example/");

        let cli = Cli::try_parse_from(["sitefront", "--config", path, "--base-url", "", "routes"])
            .unwrap();
        assert!(matches!(cli.load_config(), Err(SiteError::InvalidUrl(_))));
    }
}
