use std::sync::Arc;

use poem::web::cookie::CookieJar;

use crate::gone::{GonePage, GoneResolver, RequestPath};
use crate::language;
use crate::opts::SiteOpts;
use crate::pages::{root, FindOptions, Page, PageRepository, PageType, INDEX_ALIAS};
use crate::prelude::*;
use crate::web::render::{PageTypeRenderer, RegularPage, Registry};

/// Web application global state.
#[derive(Clone)]
pub struct Site {
    pub repository: Arc<dyn PageRepository>,
    pub registry: Arc<Registry>,
    pub gone_page: Arc<GonePage>,
    pub opts: SiteOpts,
}

impl Site {
    pub const PREVIEW_COOKIE_NAME: &'static str = "preview";

    pub fn new(repository: Arc<dyn PageRepository>, opts: SiteOpts) -> Self {
        let regular: Arc<dyn PageTypeRenderer> = Arc::new(RegularPage);
        let resolver = GoneResolver::new(repository.clone(), opts.add_language_to_url);
        let gone_page = Arc::new(GonePage::new(resolver, regular.clone()));
        let registry = Registry::default()
            .with(PageType::Root, regular.clone())
            .with(PageType::Regular, regular)
            .with(PageType::Error410, gone_page.clone());
        Self {
            repository,
            registry: Arc::new(registry),
            gone_page,
            opts,
        }
    }

    /// Preview mode requires the cookie to match the configured token.
    pub fn is_preview(&self, cookies: &CookieJar) -> bool {
        match (&self.opts.preview_token, cookies.get(Self::PREVIEW_COOKIE_NAME)) {
            (Some(token), Some(cookie)) => cookie.value_str() == token,
            _ => false,
        }
    }

    /// Detects the root page and finds the requested page under it, with the details loaded.
    #[instrument(level = "debug", skip_all, fields(host = host, request = path.request.as_str()))]
    pub async fn locate(
        &self,
        host: &str,
        path: &RequestPath,
        options: FindOptions,
    ) -> Result<Option<(Page, Page)>> {
        let (language_code, alias) = if self.opts.add_language_to_url {
            language::split_prefix(&path.relative)
        } else {
            (None, path.relative.as_str())
        };
        let alias = match alias.trim_end_matches('/') {
            "" => INDEX_ALIAS,
            alias => alias,
        };

        let roots = self.repository.find_roots(host, options).await?;
        let Some(root) = root::select(roots, host, language_code) else {
            debug!("no root page");
            return Ok(None);
        };
        debug!(root_id = root.id, alias, "detected the root");

        for page in self.repository.find_published_by_alias(alias, options).await? {
            let page = self.repository.load_details(page).await?;
            if page.root_id == Some(root.id) {
                debug!(page_id = page.id, type_ = page.type_.to_str(), "found the page");
                return Ok(Some((root, page)));
            }
        }
        Ok(None)
    }
}
