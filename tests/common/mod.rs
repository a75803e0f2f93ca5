#![allow(dead_code)]

use library_ledger::adapters::mock::{LibraryStore as MockLibraryStore, SeedSource as MockSeedSource};
use library_ledger::application::library::ServiceDependencies;
use library_ledger::domain::{Book, Borrower};
use std::sync::Arc;

/// テスト用の依存関係を組み立てる
pub fn deps_with(store: Arc<MockLibraryStore>, seeds: MockSeedSource) -> ServiceDependencies {
    ServiceDependencies {
        store,
        seeds: Arc::new(seeds),
    }
}

/// 初期データ：2タイトル・1利用者
pub fn sample_seeds() -> MockSeedSource {
    MockSeedSource::new(
        vec![
            Book::new("Dune", "Frank Herbert", "111", 2).unwrap(),
            Book::new("Foo", "Bar", "222", 1).unwrap(),
        ],
        vec![Borrower::new("Ann", "B1").unwrap()],
    )
}
