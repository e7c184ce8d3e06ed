use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;

use crate::database::mongodb::traits::{Indexes, TypedDocument};
use crate::pages::{FindOptions, Page, PageId, PageType};
use crate::prelude::*;
use crate::time::floor_to_minute;

impl TypedDocument for Page {
    const NAME: &'static str = "pages";
}

#[async_trait]
impl Indexes for Page {
    type I = [IndexModel; 3];

    fn indexes() -> Self::I {
        [
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "pid": 1, "type": 1, "sorting": 1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "alias": 1, "sorting": 1 })
                .build(),
        ]
    }
}

/// Matches any of the stored tags of the type.
pub fn of_type(type_: PageType) -> Document {
    doc! { "$in": type_.tags().to_vec() }
}

/// Visible 410 pages directly under the root.
pub fn gone_pages_under_root(root_id: PageId, options: FindOptions, now: DateTime) -> Document {
    visible(
        doc! { "pid": root_id, "type": of_type(PageType::Error410) },
        options,
        now,
    )
}

/// Visible root pages bound to the host or to any host.
pub fn roots(host: &str, options: FindOptions, now: DateTime) -> Document {
    visible(
        doc! { "type": of_type(PageType::Root), "dns": { "$in": ["", host] } },
        options,
        now,
    )
}

/// Narrows the filter down to the visible pages.
pub fn visible(mut filter: Document, options: FindOptions, now: DateTime) -> Document {
    if !options.preview {
        filter.extend(active(now));
    }
    filter
}

/// Matches the published pages within their active window, see [`Page::is_active_at`].
fn active(now: DateTime) -> Document {
    let time = floor_to_minute(now).timestamp();
    doc! {
        "published": true,
        "$and": [
            { "$or": [ { "start": null }, { "start": { "$lte": time } } ] },
            { "$or": [ { "stop": null }, { "stop": { "$gt": time + 60 } } ] },
        ],
    }
}
