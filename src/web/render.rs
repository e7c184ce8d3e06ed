//! Page type renderers and their registry.

use std::sync::Arc;

use maud::Markup;
use poem::http::header;
use poem::web::Html;
use poem::{IntoResponse, Response};

pub use self::regular::RegularPage;
use crate::gone::RequestPath;
use crate::pages::{Page, PageType};
use crate::prelude::*;

mod regular;

/// Request-scoped rendering state.
pub struct PageContext {
    pub root: Page,

    /// Page being rendered.
    page: Option<Page>,
}

impl PageContext {
    pub const fn new(root: Page) -> Self {
        Self { root, page: None }
    }

    pub const fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = Some(page);
    }

    pub fn language(&self) -> &str {
        self.page
            .as_ref()
            .and_then(|page| page.root_language.as_deref())
            .unwrap_or(&self.root.language)
    }
}

/// Page matched by the router, with its details loaded.
pub struct PageRequest {
    pub page: Page,
    pub path: RequestPath,
    pub uri: String,
    pub preview: bool,
}

#[async_trait]
pub trait PageTypeRenderer: Send + Sync {
    /// Renders the current page of the context.
    fn render(&self, context: &PageContext) -> Result<Markup>;

    async fn get_response(
        &self,
        request: &PageRequest,
        context: &mut PageContext,
    ) -> poem::Result<Response>;

    fn build_response(&self, context: &PageContext) -> Result<Response> {
        let page = context
            .page()
            .ok_or_else(|| anyhow!("there is no page to render"))?;
        let markup = self.render(context)?;
        Ok(Html(markup.into_string())
            .with_header(header::CACHE_CONTROL, cache_control(page))
            .into_response())
    }
}

pub fn cache_control(page: &Page) -> String {
    match page.client_cache {
        0 => "no-cache".to_string(),
        max_age => format!("public, max-age={}", max_age),
    }
}

/// Maps page types onto their renderers.
#[derive(Default)]
pub struct Registry(AHashMap<PageType, Arc<dyn PageTypeRenderer>>);

impl Registry {
    #[must_use]
    pub fn with(mut self, type_: PageType, renderer: Arc<dyn PageTypeRenderer>) -> Self {
        self.0.insert(type_, renderer);
        self
    }

    pub fn get(&self, type_: PageType) -> Option<&Arc<dyn PageTypeRenderer>> {
        self.0.get(&type_)
    }
}
