use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, CookieJarManager, Tracing};
use poem::{get, Endpoint, EndpointExt, Response, Route, Server};

use crate::database;
use crate::opts::WebOpts;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SentryMiddleware, TimeItMiddleware};
use crate::web::site::Site;

mod middleware;
mod partials;
pub mod render;
pub mod site;
mod views;

pub async fn run(opts: WebOpts) -> Result {
    let repository = database::open(opts.repository).await?;
    let app = create_app(Site::new(repository, opts.site));
    info!(host = opts.host.as_str(), port = opts.port, "listening…");
    Server::new(TcpListener::bind((opts.host, opts.port)))
        .run(app)
        .await
        .context("the web server has failed")?;
    Ok(())
}

pub fn create_app(site: Site) -> impl Endpoint<Output = Response> {
    Route::new()
        .at("/health", get(views::api::get_health))
        .at("/", get(views::page::get))
        .at("/*path", get(views::page::get))
        .with(ErrorMiddleware)
        .with(TimeItMiddleware)
        .with(CookieJarManager::new())
        .data(site)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(SentryMiddleware)
}
