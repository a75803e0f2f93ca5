mod errors;
mod library_service;

pub use errors::{LibraryApplicationError, Result};
pub use library_service::{
    LoadOrigin, LoadedLibrary, SeedReport, ServiceDependencies, bootstrap_library, load_library,
    save_library, seed_library,
};
