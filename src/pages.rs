//! Page tree model and its repositories.

pub use self::memory::MemoryRepository;
pub use self::page::*;
pub use self::repository::*;

mod memory;
mod page;
mod repository;
pub mod root;
