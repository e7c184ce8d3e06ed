use poem::error::NotFoundError;
use poem::http::header;
use poem::web::cookie::CookieJar;
use poem::web::Data;
use poem::{handler, Request, Response};

use crate::gone::RequestPath;
use crate::pages::FindOptions;
use crate::prelude::*;
use crate::web::render::{PageContext, PageRequest, PageTypeRenderer};
use crate::web::site::Site;

/// Serves any page of the tree, dispatching on the page type.
#[handler]
#[instrument(skip_all, level = "info", fields(uri = %request.uri()))]
pub async fn get(
    request: &Request,
    cookies: &CookieJar,
    site: Data<&Site>,
) -> poem::Result<Response> {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map_or("/", |path_and_query| path_and_query.as_str());
    let path = RequestPath::parse(path_and_query, &site.opts.script_name);
    let host = request
        .header(header::HOST)
        .map(strip_port)
        .unwrap_or_default();
    let preview = site.is_preview(cookies);

    let (root, page) = site
        .locate(host, &path, FindOptions::preview(preview))
        .await?
        .ok_or(NotFoundError)?;
    let renderer = site.registry.get(page.type_).ok_or(NotFoundError)?;
    let page_request = PageRequest {
        page,
        path,
        uri: request.uri().to_string(),
        preview,
    };
    renderer
        .get_response(&page_request, &mut PageContext::new(root))
        .await
}

fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|byte| byte.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}
