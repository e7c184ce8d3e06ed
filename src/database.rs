//! Page storage back-ends.

use std::sync::Arc;

use crate::opts::RepositoryOpts;
use crate::pages::{MemoryRepository, PageRepository};
use crate::prelude::*;

pub mod mongodb;

/// Opens the page repository chosen by the options.
pub async fn open(opts: RepositoryOpts) -> Result<Arc<dyn PageRepository>> {
    match (opts.mongodb_uri, opts.pages) {
        (Some(uri), _) => Ok(Arc::new(self::mongodb::open(&uri).await?)),
        (None, Some(path)) => Ok(Arc::new(MemoryRepository::load(&path).await?)),
        (None, None) => Err(anyhow!("either MongoDB URI or pages file must be specified")),
    }
}
