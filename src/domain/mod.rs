pub mod book;
pub mod borrower;
pub mod errors;
pub mod events;
pub mod library;
pub mod snapshot;
pub mod value_objects;

pub use book::Book;
pub use borrower::Borrower;
pub use errors::*;
pub use events::*;
pub use library::{LendingRecord, Library};
pub use snapshot::{LibrarySnapshot, SNAPSHOT_VERSION};
pub use value_objects::*;
