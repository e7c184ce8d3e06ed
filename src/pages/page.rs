use poem::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_with::TimestampSeconds;

use crate::prelude::*;
use crate::time::floor_to_minute;

pub type PageId = i64;

/// Alias of the page answering the bare root URL.
pub const INDEX_ALIAS: &str = "index";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageType {
    #[serde(rename = "root")]
    Root,

    #[serde(rename = "regular")]
    Regular,

    /// Permanently removed content.
    #[serde(rename = "error_410", alias = "error410")]
    Error410,
}

impl PageType {
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Regular => "regular",
            Self::Error410 => "error_410",
        }
    }

    /// Stored tags of the type, including the legacy aliases accepted on read.
    pub const fn tags(self) -> &'static [&'static str] {
        match self {
            Self::Root => &["root"],
            Self::Regular => &["regular"],
            Self::Error410 => &["error_410", "error410"],
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectMode {
    Temporary,

    #[default]
    Permanent,
}

impl RedirectMode {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Temporary => StatusCode::FOUND,
            Self::Permanent => StatusCode::MOVED_PERMANENTLY,
        }
    }
}

/// Page tree node, as stored in the `pages` collection.
#[serde_with::serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,

    /// Parent page ID, `0` for root pages.
    #[serde(default)]
    pub pid: PageId,

    #[serde(rename = "type")]
    pub type_: PageType,

    #[serde(default)]
    pub alias: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub published: bool,

    /// Inclusive start of the active window.
    #[serde(default)]
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub start: Option<DateTime>,

    /// Exclusive end of the active window.
    #[serde(default)]
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub stop: Option<DateTime>,

    #[serde(default)]
    pub sorting: i64,

    /// Whether the page sets its own cache timeouts instead of inheriting them.
    #[serde(default)]
    pub include_cache: bool,

    /// Server-side cache timeout in seconds.
    #[serde(default)]
    pub cache: u32,

    /// `Cache-Control` max age in seconds.
    #[serde(default)]
    pub client_cache: u32,

    #[serde(default, rename = "autoforward")]
    pub auto_forward: bool,

    #[serde(default)]
    pub jump_to: Option<PageId>,

    #[serde(default)]
    pub redirect: RedirectMode,

    /// Language code, meaningful for root pages.
    #[serde(default)]
    pub language: String,

    /// Host name a root page is bound to, empty means any host.
    #[serde(default)]
    pub dns: String,

    /// Whether the root page is the default one for its host.
    #[serde(default)]
    pub fallback: bool,

    #[serde(default)]
    pub content: String,

    /// Filled in by [`super::PageRepository::load_details`].
    #[serde(skip)]
    pub root_id: Option<PageId>,

    /// Filled in by [`super::PageRepository::load_details`].
    #[serde(skip)]
    pub root_language: Option<String>,
}

impl Page {
    pub fn new(id: PageId, pid: PageId, type_: PageType) -> Self {
        Self {
            id,
            pid,
            type_,
            alias: String::new(),
            title: String::new(),
            published: true,
            start: None,
            stop: None,
            sorting: 0,
            include_cache: false,
            cache: 0,
            client_cache: 0,
            auto_forward: false,
            jump_to: None,
            redirect: RedirectMode::default(),
            language: String::new(),
            dns: String::new(),
            fallback: false,
            content: String::new(),
            root_id: None,
            root_language: None,
        }
    }

    pub const fn is_root(&self) -> bool {
        matches!(self.type_, PageType::Root)
    }

    /// Checks the published flag and the active window.
    ///
    /// The window is evaluated against the minute-floored time, and `stop` must
    /// lie more than a minute ahead, so that the result stays stable within a minute.
    pub fn is_active_at(&self, now: DateTime) -> bool {
        let now = floor_to_minute(now);
        self.published
            && self.start.map_or(true, |start| start <= now)
            && self.stop.map_or(true, |stop| stop > now + Duration::minutes(1))
    }

    /// Preview mode bypasses the published flag and the active window.
    pub fn is_visible_at(&self, now: DateTime, preview: bool) -> bool {
        preview || self.is_active_at(now)
    }

    /// Drops the cache timeouts unless the page sets its own.
    pub fn normalize_cache(&mut self) {
        if !self.include_cache {
            self.cache = 0;
            self.client_cache = 0;
        }
    }

    /// Builds the site-relative URL of the page.
    pub fn frontend_url(&self, add_language_to_url: bool) -> String {
        let alias = if self.alias == INDEX_ALIAS { "" } else { self.alias.as_str() };
        match (&self.root_language, add_language_to_url) {
            (Some(language), true) => format!("/{}/{}", language, alias),
            _ => format!("/{}", alias),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp(minute: u32, second: u32) -> DateTime {
        Utc.with_ymd_and_hms(2022, 11, 5, 12, minute, second).unwrap()
    }

    #[test]
    fn deserialize_ok() -> Result {
        let page: Page = serde_json::from_str(
            // language=JSON
            r#"{"id": 3, "pid": 1, "type": "error_410", "published": true, "includeCache": true, "clientCache": 60, "autoforward": true, "jumpTo": 7, "redirect": "temporary", "start": 1667651640}"#,
        )?;
        assert_eq!(page.type_, PageType::Error410);
        assert!(page.include_cache);
        assert_eq!(page.client_cache, 60);
        assert!(page.auto_forward);
        assert_eq!(page.jump_to, Some(7));
        assert_eq!(page.redirect, RedirectMode::Temporary);
        assert_eq!(page.start, Some(Utc.timestamp_opt(1667651640, 0).unwrap()));
        assert_eq!(page.stop, None);
        Ok(())
    }

    #[test]
    fn deserialize_type_alias_ok() -> Result {
        let page: Page = serde_json::from_str(r#"{"id": 3, "type": "error410"}"#)?;
        assert_eq!(page.type_, PageType::Error410);
        assert_eq!(page.redirect, RedirectMode::Permanent);
        assert!(!page.published);
        Ok(())
    }

    #[test]
    fn tags_deserialize_ok() -> Result {
        for type_ in [PageType::Root, PageType::Regular, PageType::Error410] {
            assert_eq!(type_.tags()[0], type_.to_str());
            for tag in type_.tags() {
                assert_eq!(serde_json::from_value::<PageType>(serde_json::json!(tag))?, type_);
            }
        }
        Ok(())
    }

    #[test]
    fn is_active_unpublished_ok() {
        let mut page = Page::new(1, 0, PageType::Regular);
        page.published = false;
        assert!(!page.is_active_at(timestamp(30, 0)));
        assert!(page.is_visible_at(timestamp(30, 0), true));
    }

    #[test]
    fn is_active_start_ok() {
        let mut page = Page::new(1, 0, PageType::Regular);
        page.start = Some(timestamp(30, 0));
        assert!(!page.is_active_at(timestamp(29, 59)));
        assert!(page.is_active_at(timestamp(30, 0)));
        assert!(page.is_active_at(timestamp(30, 59)));
    }

    #[test]
    fn is_active_stop_ok() {
        let mut page = Page::new(1, 0, PageType::Regular);
        page.stop = Some(timestamp(32, 0));
        assert!(page.is_active_at(timestamp(30, 59)));
        assert!(!page.is_active_at(timestamp(31, 0)));
        assert!(!page.is_active_at(timestamp(33, 0)));
    }

    #[test]
    fn normalize_cache_ok() {
        let mut page = Page::new(1, 0, PageType::Error410);
        page.cache = 3600;
        page.client_cache = 600;
        page.normalize_cache();
        assert_eq!((page.cache, page.client_cache), (0, 0));
    }

    #[test]
    fn normalize_cache_included_ok() {
        let mut page = Page::new(1, 0, PageType::Error410);
        page.include_cache = true;
        page.cache = 3600;
        page.client_cache = 600;
        page.normalize_cache();
        assert_eq!((page.cache, page.client_cache), (3600, 600));
    }

    #[test]
    fn frontend_url_ok() {
        let mut page = Page::new(5, 1, PageType::Regular);
        page.alias = "news".to_string();
        page.root_language = Some("de".to_string());
        assert_eq!(page.frontend_url(false), "/news");
        assert_eq!(page.frontend_url(true), "/de/news");
    }

    #[test]
    fn frontend_url_index_ok() {
        let mut page = Page::new(5, 1, PageType::Regular);
        page.alias = INDEX_ALIAS.to_string();
        page.root_language = Some("en".to_string());
        assert_eq!(page.frontend_url(true), "/en/");
        assert_eq!(page.frontend_url(false), "/");
    }
}
