pub mod library_store;
pub mod seed_source;

pub use library_store::LibraryStore;
pub use seed_source::{SeedBatch, SeedSource};
