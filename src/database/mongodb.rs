use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOneOptions, FindOptions as MongoFindOptions};
use mongodb::Database;

use crate::database::mongodb::models::{gone_pages_under_root, roots, visible};
use crate::database::mongodb::traits::{Indexes, TypedDocument};
use crate::pages::{FindOptions, Page, PageId, PageRepository};
use crate::prelude::*;

pub mod models;
pub mod traits;

#[instrument(level = "debug", skip_all)]
pub async fn open(uri: &str) -> Result<MongoRepository> {
    info!("connecting…");
    let client = mongodb::Client::with_uri_str(uri)
        .await
        .context("failed to parse the specified MongoDB URI")?;
    let database = client
        .default_database()
        .ok_or_else(|| anyhow!("MongoDB database name is not specified"))?;

    info!("ensuring indexes…");
    Page::ensure_indexes(&database).await?;

    info!("connected");
    Ok(MongoRepository(database))
}

/// Page repository over the `pages` collection.
pub struct MongoRepository(Database);

impl MongoRepository {
    fn sorted() -> MongoFindOptions {
        MongoFindOptions::builder().sort(doc! { "sorting": 1 }).build()
    }

    fn sorted_one() -> FindOneOptions {
        FindOneOptions::builder().sort(doc! { "sorting": 1 }).build()
    }
}

#[async_trait]
impl PageRepository for MongoRepository {
    #[instrument(level = "debug", skip_all, fields(root_id = root_id, preview = options.preview))]
    async fn find_gone_page_under_root(
        &self,
        root_id: PageId,
        options: FindOptions,
    ) -> Result<Option<Page>> {
        let filter = gone_pages_under_root(root_id, options, Utc::now());
        let start_instant = Instant::now();
        let page = Page::collection(&self.0)
            .find_one(filter, Self::sorted_one())
            .await
            .with_context(|| format!("failed to find the 410 page under #{}", root_id))?;
        debug!(elapsed = ?start_instant.elapsed(), found = page.is_some());
        Ok(page)
    }

    #[instrument(level = "debug", skip_all, fields(id = id))]
    async fn find_published_by_id(&self, id: PageId) -> Result<Option<Page>> {
        let filter = visible(doc! { "id": id }, FindOptions::default(), Utc::now());
        Page::collection(&self.0)
            .find_one(filter, None)
            .await
            .with_context(|| format!("failed to find the published page #{}", id))
    }

    #[instrument(level = "debug", skip_all, fields(id = id))]
    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>> {
        Page::collection(&self.0)
            .find_one(doc! { "id": id }, None)
            .await
            .with_context(|| format!("failed to find the page #{}", id))
    }

    #[instrument(level = "debug", skip_all, fields(alias = alias))]
    async fn find_published_by_alias(
        &self,
        alias: &str,
        options: FindOptions,
    ) -> Result<Vec<Page>> {
        let filter = visible(doc! { "alias": alias }, options, Utc::now());
        Page::collection(&self.0)
            .find(filter, Self::sorted())
            .await?
            .try_collect()
            .await
            .with_context(|| format!("failed to find the pages aliased `{}`", alias))
    }

    #[instrument(level = "debug", skip_all, fields(host = host))]
    async fn find_roots(&self, host: &str, options: FindOptions) -> Result<Vec<Page>> {
        let filter = roots(host, options, Utc::now());
        Page::collection(&self.0)
            .find(filter, Self::sorted())
            .await?
            .try_collect()
            .await
            .with_context(|| format!("failed to find the root pages for `{}`", host))
    }
}
