use std::path::Path;

use itertools::Itertools;

use crate::pages::{FindOptions, Page, PageId, PageRepository, PageType};
use crate::prelude::*;

/// Page tree held in memory, usually loaded from a JSON array of pages.
#[derive(Default)]
pub struct MemoryRepository {
    /// Ordered by sorting.
    pages: Vec<Page>,
}

impl MemoryRepository {
    pub fn new(pages: impl IntoIterator<Item = Page>) -> Self {
        let pages = pages
            .into_iter()
            .sorted_by_key(|page| page.sorting)
            .collect_vec();
        Self { pages }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let pages: Vec<Page> = serde_json::from_str(json).context("failed to parse the pages")?;
        Ok(Self::new(pages))
    }

    #[instrument(level = "info", skip_all, fields(path = ?path))]
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let this = Self::from_json(&json)?;
        info!(n_pages = this.pages.len(), "loaded");
        Ok(this)
    }

    fn find_visible(
        &self,
        options: FindOptions,
        predicate: impl Fn(&Page) -> bool,
    ) -> impl Iterator<Item = &Page> {
        let now = Utc::now();
        self.pages
            .iter()
            .filter(move |page| page.is_visible_at(now, options.preview))
            .filter(move |page| predicate(page))
    }
}

#[async_trait]
impl PageRepository for MemoryRepository {
    async fn find_gone_page_under_root(
        &self,
        root_id: PageId,
        options: FindOptions,
    ) -> Result<Option<Page>> {
        Ok(self
            .find_visible(options, |page| page.pid == root_id && page.type_ == PageType::Error410)
            .next()
            .cloned())
    }

    async fn find_published_by_id(&self, id: PageId) -> Result<Option<Page>> {
        Ok(self
            .find_visible(FindOptions::default(), |page| page.id == id)
            .next()
            .cloned())
    }

    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>> {
        Ok(self.pages.iter().find(|page| page.id == id).cloned())
    }

    async fn find_published_by_alias(
        &self,
        alias: &str,
        options: FindOptions,
    ) -> Result<Vec<Page>> {
        Ok(self
            .find_visible(options, |page| page.alias == alias)
            .cloned()
            .collect())
    }

    async fn find_roots(&self, host: &str, options: FindOptions) -> Result<Vec<Page>> {
        Ok(self
            .find_visible(options, |page| {
                page.is_root() && (page.dns.is_empty() || page.dns == host)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gone_page(id: PageId, sorting: i64) -> Page {
        let mut page = Page::new(id, 1, PageType::Error410);
        page.sorting = sorting;
        page
    }

    #[tokio::test]
    async fn find_gone_page_lowest_sorting_ok() -> Result {
        let repository = MemoryRepository::new([
            Page::new(1, 0, PageType::Root),
            gone_page(3, 256),
            gone_page(2, 128),
        ]);
        let page = repository
            .find_gone_page_under_root(1, FindOptions::default())
            .await?;
        assert_eq!(page.map(|page| page.id), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn find_gone_page_other_root_ok() -> Result {
        let repository = MemoryRepository::new([gone_page(2, 0)]);
        let page = repository
            .find_gone_page_under_root(42, FindOptions::default())
            .await?;
        assert!(page.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn find_gone_page_preview_ok() -> Result {
        let mut unpublished = gone_page(2, 0);
        unpublished.published = false;
        let mut expired = gone_page(3, 1);
        expired.stop = Some(Utc::now() - Duration::days(1));
        let repository = MemoryRepository::new([unpublished, expired]);

        let page = repository
            .find_gone_page_under_root(1, FindOptions::default())
            .await?;
        assert!(page.is_none());

        let page = repository
            .find_gone_page_under_root(1, FindOptions::preview(true))
            .await?;
        assert_eq!(page.map(|page| page.id), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn find_gone_page_not_started_ok() -> Result {
        let mut page = gone_page(2, 0);
        page.start = Some(Utc::now() + Duration::hours(1));
        let repository = MemoryRepository::new([page]);
        let page = repository
            .find_gone_page_under_root(1, FindOptions::default())
            .await?;
        assert!(page.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn find_published_by_id_ok() -> Result {
        let mut unpublished = Page::new(3, 1, PageType::Regular);
        unpublished.published = false;
        let repository = MemoryRepository::new([Page::new(2, 1, PageType::Regular), unpublished]);
        assert!(repository.find_published_by_id(2).await?.is_some());
        assert!(repository.find_published_by_id(3).await?.is_none());
        assert!(repository.find_by_id(3).await?.is_some());
        assert!(repository.find_published_by_id(4).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn find_roots_ok() -> Result {
        let mut any_host = Page::new(1, 0, PageType::Root);
        any_host.sorting = 1;
        let mut bound = Page::new(2, 0, PageType::Root);
        bound.dns = "example.org".to_string();
        let mut other = Page::new(3, 0, PageType::Root);
        other.dns = "example.com".to_string();
        let repository = MemoryRepository::new([any_host, bound, other]);

        let roots = repository
            .find_roots("example.org", FindOptions::default())
            .await?;
        assert_eq!(roots.iter().map(|page| page.id).collect_vec(), [2, 1]);
        Ok(())
    }

    #[tokio::test]
    async fn load_details_inherits_cache_ok() -> Result {
        let mut root = Page::new(1, 0, PageType::Root);
        root.language = "en".to_string();
        root.include_cache = true;
        root.cache = 86400;
        root.client_cache = 3600;
        let mut section = Page::new(2, 1, PageType::Regular);
        section.include_cache = true;
        section.cache = 600;
        section.client_cache = 60;
        let gone = Page::new(3, 2, PageType::Error410);
        let repository = MemoryRepository::new([root, section, gone.clone()]);

        let page = repository.load_details(gone).await?;
        assert_eq!(page.root_id, Some(1));
        assert_eq!(page.root_language.as_deref(), Some("en"));
        assert_eq!((page.cache, page.client_cache), (600, 60));
        Ok(())
    }

    #[tokio::test]
    async fn load_details_own_cache_ok() -> Result {
        let mut root = Page::new(1, 0, PageType::Root);
        root.include_cache = true;
        root.cache = 86400;
        let mut page = Page::new(2, 1, PageType::Regular);
        page.include_cache = true;
        page.cache = 5;
        let repository = MemoryRepository::new([root, page.clone()]);

        let page = repository.load_details(page).await?;
        assert_eq!(page.cache, 5);
        Ok(())
    }

    #[tokio::test]
    async fn load_details_missing_parent_fails() {
        let repository = MemoryRepository::default();
        let result = repository
            .load_details(Page::new(2, 1, PageType::Regular))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn from_json_ok() -> Result {
        let repository = MemoryRepository::from_json(
            // language=JSON
            r#"[{"id": 1, "type": "root", "language": "en"}, {"id": 2, "pid": 1, "type": "error_410"}]"#,
        )?;
        assert_eq!(repository.pages.len(), 2);
        Ok(())
    }
}
