use crate::opts::Subcommands;
use crate::prelude::*;

mod database;
mod generate;
mod gone;
mod language;
mod opts;
mod pages;
mod prelude;
mod time;
mod tracing;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = opts::parse();
    let _sentry_guard = crate::tracing::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    let result = match opts.subcommand {
        Subcommands::Web(opts) => web::run(opts).await,
        Subcommands::Generate(opts) => generate::run(opts).await,
    };
    if let Err(error) = &result {
        error!("{:#}", error);
    }
    result
}
