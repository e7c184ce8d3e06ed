//! Permanently removed pages: HTTP 410 with optional forwarding.

pub use self::error::*;
pub use self::handler::*;
pub use self::request::*;
pub use self::resolver::*;

mod error;
mod handler;
mod request;
mod resolver;
