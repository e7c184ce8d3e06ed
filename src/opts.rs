//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub fn parse() -> Opts {
    Opts::parse()
}

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(short, long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(long, default_value = "0", env = "GONE_PAGES_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommands,
}

#[derive(Subcommand)]
pub enum Subcommands {
    Web(WebOpts),
    Generate(GenerateOpts),
}

/// Runs the web application
#[derive(Args)]
pub struct WebOpts {
    #[command(flatten)]
    pub repository: RepositoryOpts,

    #[command(flatten)]
    pub site: SiteOpts,

    /// Web application bind host
    #[arg(long, default_value = "::", env = "GONE_PAGES_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8080", env = "GONE_PAGES_PORT")]
    pub port: u16,
}

/// Writes the complete HTTP response of a gone page to the standard output
#[derive(Args)]
pub struct GenerateOpts {
    #[command(flatten)]
    pub repository: RepositoryOpts,

    #[command(flatten)]
    pub site: SiteOpts,

    /// Host name the request is made to
    #[arg(long, default_value = "")]
    pub host: String,

    /// Requested path, such as `/en/removed-page`
    pub path: String,
}

#[derive(Args)]
pub struct RepositoryOpts {
    /// MongoDB URI, including the database name
    #[arg(long, env = "MONGODB_URI", required_unless_present = "pages", conflicts_with = "pages")]
    pub mongodb_uri: Option<String>,

    /// JSON file with the pages to serve from memory
    #[arg(long, env = "GONE_PAGES_PATH")]
    pub pages: Option<PathBuf>,
}

#[derive(Args, Clone, Default)]
pub struct SiteOpts {
    /// Prefix the page URLs with the root page language
    #[arg(long, env = "GONE_PAGES_ADD_LANGUAGE_TO_URL")]
    pub add_language_to_url: bool,

    /// Script name which may precede the page path, such as `index.php`
    #[arg(long, default_value = "", env = "GONE_PAGES_SCRIPT_NAME")]
    pub script_name: String,

    /// Value of the `preview` cookie which turns the preview mode on
    #[arg(long, env = "GONE_PAGES_PREVIEW_TOKEN")]
    pub preview_token: Option<String>,
}
