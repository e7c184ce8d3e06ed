pub use std::time::Instant;

pub use anyhow::{anyhow, Context};
pub use async_trait::async_trait;
pub use chrono::{Duration, TimeZone, Utc};
pub use tracing::{debug, error, info, instrument, warn};

#[allow(dead_code)]
pub type AHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

pub type DateTime = chrono::DateTime<chrono::Utc>;
pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
