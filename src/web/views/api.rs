use poem::http::StatusCode;
use poem::web::Data;
use poem::{handler, IntoResponse, Response};

use crate::prelude::*;
use crate::web::site::Site;

const CACHE_CONTROL: &str = "no-cache";

/// Checks that the page repository answers.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_health(site: Data<&Site>) -> Result<impl IntoResponse> {
    site.repository
        .find_by_id(0)
        .await
        .context("the page repository is unavailable")?;
    Ok(Response::from(StatusCode::NO_CONTENT).with_header("Cache-Control", CACHE_CONTROL))
}
