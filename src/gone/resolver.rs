use std::sync::Arc;

use poem::http::{header, StatusCode};
use poem::{IntoResponse, Response};

use crate::gone::{GoneError, GoneRequest};
use crate::language;
use crate::pages::{FindOptions, Page, PageRepository};
use crate::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    /// Site-relative location, starting with a slash.
    pub location: String,

    /// `301` or `302`.
    pub status: StatusCode,
}

impl Redirect {
    pub fn new(location: impl Into<String>, status: StatusCode) -> Self {
        Self {
            location: location.into(),
            status,
        }
    }

    pub fn permanent(location: impl Into<String>) -> Self {
        Self::new(location, StatusCode::MOVED_PERMANENTLY)
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        Response::builder()
            .status(self.status)
            .header(header::LOCATION, self.location)
            .header(header::CACHE_CONTROL, "no-cache")
            .finish()
    }
}

#[derive(Debug)]
pub enum Resolution {
    /// Ends the request with a redirect.
    Redirect(Redirect),

    /// The 410 page to render.
    Gone(Page),
}

/// Decides what a request of a gone page ends up with.
pub struct GoneResolver {
    repository: Arc<dyn PageRepository>,
    add_language_to_url: bool,
}

impl GoneResolver {
    pub fn new(repository: Arc<dyn PageRepository>, add_language_to_url: bool) -> Self {
        Self {
            repository,
            add_language_to_url,
        }
    }

    pub fn repository(&self) -> &dyn PageRepository {
        self.repository.as_ref()
    }

    #[instrument(level = "debug", skip_all, fields(root_id = request.root.id, uri = request.uri))]
    pub async fn resolve(&self, request: &GoneRequest<'_>) -> Result<Resolution, GoneError> {
        if let Some(redirect) = self.enforce_language(request) {
            debug!(location = redirect.location.as_str(), "language fragment is missing");
            return Ok(Resolution::Redirect(redirect));
        }

        let page = self
            .repository
            .find_gone_page_under_root(request.root.id, FindOptions::preview(request.preview))
            .await?
            .ok_or_else(|| GoneError::PageNotFound(format!("Page not found: {}", request.uri)))?;
        debug!(page_id = page.id, "found the 410 page");

        match page.jump_to {
            Some(jump_to) if page.auto_forward => {
                let Some(target) = self.repository.find_published_by_id(jump_to).await? else {
                    error!(jump_to, "Forward page ID \"{}\" does not exist", jump_to);
                    return Err(GoneError::ForwardPageNotFound("Forward page not found".to_string()));
                };
                let target = self.repository.load_details(target).await?;
                let redirect = Redirect::new(
                    target.frontend_url(self.add_language_to_url),
                    page.redirect.status(),
                );
                debug!(jump_to, location = redirect.location.as_str(), "forwarding");
                Ok(Resolution::Redirect(redirect))
            }
            _ => Ok(Resolution::Gone(page)),
        }
    }

    /// Redirects to the language-prefixed URL when the request misses the language fragment.
    fn enforce_language(&self, request: &GoneRequest<'_>) -> Option<Redirect> {
        if !self.add_language_to_url {
            return None;
        }
        let path = request.path;
        let relative = path.relative.as_str();
        if relative.is_empty() || language::has_prefix(relative) {
            return None;
        }
        let query = path.query_suffix();
        let location = if language::is_bare(relative) {
            format!("/{}/{}", path.request, query)
        } else if relative == path.request {
            format!("/{}/{}{}", request.root.language, relative, query)
        } else {
            format!("/{}/{}/{}{}", path.script, request.root.language, relative, query)
        };
        Some(Redirect::permanent(location))
    }
}
