pub mod api;
pub mod error;
pub mod page;
