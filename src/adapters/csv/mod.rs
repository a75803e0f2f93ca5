pub mod seed_source;

pub use seed_source::SeedSource as CsvSeedSource;
