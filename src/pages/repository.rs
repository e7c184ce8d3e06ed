use crate::pages::{Page, PageId};
use crate::prelude::*;

/// Guards the ancestor walk against cycles in a corrupted tree.
const MAX_DEPTH: usize = 64;

#[derive(Copy, Clone, Debug, Default)]
pub struct FindOptions {
    /// Bypasses the published flag and the active window.
    pub preview: bool,
}

impl FindOptions {
    pub const fn preview(preview: bool) -> Self {
        Self { preview }
    }
}

/// Read-only access to the page tree.
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Finds the 410 page directly under the root.
    /// The one with the lowest sorting wins when there are several.
    async fn find_gone_page_under_root(
        &self,
        root_id: PageId,
        options: FindOptions,
    ) -> Result<Option<Page>>;

    /// Finds a published page which is in its active window.
    async fn find_published_by_id(&self, id: PageId) -> Result<Option<Page>>;

    /// Finds a page regardless of its state.
    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>>;

    /// Finds the visible pages with the alias, across all the roots.
    async fn find_published_by_alias(&self, alias: &str, options: FindOptions)
        -> Result<Vec<Page>>;

    /// Finds the visible root pages which serve the host: bound to it, or to any host.
    async fn find_roots(&self, host: &str, options: FindOptions) -> Result<Vec<Page>>;

    /// Walks up the tree to fill in the root details and the inherited cache timeouts.
    #[instrument(level = "debug", skip_all, fields(page_id = page.id))]
    async fn load_details(&self, mut page: Page) -> Result<Page> {
        let mut root = page.is_root().then(|| (page.id, page.language.clone()));
        let mut inherited_cache = None;
        let mut parent_id = page.pid;
        let mut depth = 0;

        while root.is_none() && parent_id != 0 {
            depth += 1;
            if depth > MAX_DEPTH {
                return Err(anyhow!("page #{} is nested too deep", page.id));
            }
            let parent = self
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| anyhow!("parent page #{} does not exist", parent_id))?;
            if inherited_cache.is_none() && parent.include_cache {
                inherited_cache = Some((parent.cache, parent.client_cache));
            }
            if parent.is_root() {
                root = Some((parent.id, parent.language));
            }
            parent_id = parent.pid;
        }

        if !page.include_cache {
            if let Some((cache, client_cache)) = inherited_cache {
                page.cache = cache;
                page.client_cache = client_cache;
            }
        }
        if let Some((root_id, root_language)) = root {
            page.root_id = Some(root_id);
            page.root_language = Some(root_language);
        }
        debug!(root_id = ?page.root_id, cache = page.cache, client_cache = page.client_cache);
        Ok(page)
    }
}
