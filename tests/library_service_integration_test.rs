use chrono::Utc;
use library_ledger::adapters::mock::{LibraryStore as MockLibraryStore, SeedSource as MockSeedSource};
use library_ledger::application::library::{
    LibraryApplicationError, LoadOrigin, bootstrap_library, load_library, save_library,
};
use library_ledger::domain::{Book, Borrower, BuyBookError, Library, SellBookError};
use std::sync::Arc;

mod common;

// ============================================================================
// 起動処理（読込・初期データ）
// ============================================================================

#[tokio::test]
async fn test_first_start_imports_seeds() {
    let store = Arc::new(MockLibraryStore::new());
    let deps = common::deps_with(store, common::sample_seeds());

    let loaded = bootstrap_library(&deps).await;

    assert_eq!(loaded.origin, LoadOrigin::Fresh);
    assert_eq!(loaded.library.book_count(), 2);
    assert_eq!(loaded.library.borrower_count(), 1);
    let report = loaded.seed_report.unwrap();
    assert_eq!(report.books_imported, 2);
    assert_eq!(report.borrowers_imported, 1);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_missing_seed_files_still_start_empty() {
    let store = Arc::new(MockLibraryStore::new());
    let deps = common::deps_with(store, MockSeedSource::missing());

    let loaded = bootstrap_library(&deps).await;

    assert_eq!(loaded.origin, LoadOrigin::Fresh);
    assert_eq!(loaded.library.book_count(), 0);
    assert_eq!(loaded.seed_report.unwrap().errors.len(), 2);
}

#[tokio::test]
async fn test_saved_library_is_restored_without_seeding() {
    let mut library = Library::new();
    library.add_book(Book::new("Emma", "Austen", "333", 1).unwrap());
    let store = Arc::new(MockLibraryStore::with_snapshot(library.to_snapshot(Utc::now())));
    let deps = common::deps_with(store, common::sample_seeds());

    let loaded = bootstrap_library(&deps).await;

    assert_eq!(loaded.origin, LoadOrigin::Restored);
    assert!(loaded.seed_report.is_none());
    assert_eq!(loaded.library, library);
}

#[tokio::test]
async fn test_corrupt_store_fails_open_to_empty_library() {
    let store = Arc::new(MockLibraryStore::new());
    store.break_store();
    let deps = common::deps_with(store, common::sample_seeds());

    let loaded = bootstrap_library(&deps).await;

    assert!(matches!(loaded.origin, LoadOrigin::Recovered { .. }));
    assert!(loaded.seed_report.is_none());
    assert_eq!(loaded.library.book_count(), 0);
    assert_eq!(loaded.library.borrower_count(), 0);
    assert_eq!(loaded.library.lending_count(), 0);
}

#[tokio::test]
async fn test_invalid_snapshot_fails_open() {
    let mut library = Library::new();
    library.add_book(Book::new("Emma", "Austen", "333", 1).unwrap());
    let mut snapshot = library.to_snapshot(Utc::now());
    snapshot.version += 1;
    let store = Arc::new(MockLibraryStore::with_snapshot(snapshot));
    let deps = common::deps_with(store, MockSeedSource::default());

    let loaded = load_library(&deps).await;

    match loaded.origin {
        LoadOrigin::Recovered { reason } => assert!(reason.contains("Unsupported snapshot version")),
        other => panic!("Expected Recovered, got {:?}", other),
    }
    assert_eq!(loaded.library, Library::new());
}

// ============================================================================
// 保存
// ============================================================================

#[tokio::test]
async fn test_session_state_survives_save_and_reload() {
    let store = Arc::new(MockLibraryStore::new());
    let deps = common::deps_with(store.clone(), common::sample_seeds());

    let mut library = bootstrap_library(&deps).await.library;
    library.add_borrower(Borrower::new("Bob", "B2").unwrap());
    library.borrow_book("111", "B1", Utc::now()).unwrap();
    library.buy_book("222", "B2").unwrap();

    save_library(&deps, &library).await.unwrap();
    assert_eq!(store.save_count(), 1);

    let reloaded = load_library(&deps).await;
    assert_eq!(reloaded.origin, LoadOrigin::Restored);
    let mut reloaded = reloaded.library;
    assert_eq!(reloaded, library);
    assert_eq!(reloaded.lending_record("111").unwrap().borrower_id.as_str(), "B1");

    // 復元後も在庫の規則はそのまま
    let err = reloaded.buy_book("222", "B1").unwrap_err();
    assert_eq!(err, BuyBookError::Sell(SellBookError::OutOfStock));
    let returned = reloaded.return_book("111", Utc::now()).unwrap();
    assert_eq!(returned.remaining, 2);
}

#[tokio::test]
async fn test_save_failure_is_reported() {
    let store = Arc::new(MockLibraryStore::new());
    store.break_store();
    let deps = common::deps_with(store.clone(), MockSeedSource::default());

    let result = save_library(&deps, &Library::new()).await;

    assert!(matches!(result, Err(LibraryApplicationError::StoreError(_))));
    assert_eq!(store.save_count(), 0);
}

// ============================================================================
// シナリオ
// ============================================================================

#[tokio::test]
async fn test_borrow_and_return_scenario() {
    let mut library = Library::new();
    library.add_book(Book::new("Dune", "Herbert", "111", 2).unwrap());
    library.add_borrower(Borrower::new("Ann", "B1").unwrap());

    library.borrow_book("111", "B1", Utc::now()).unwrap();
    assert_eq!(library.book_by_isbn("111").unwrap().quantity(), 1);
    let record = library.lending_record("111").unwrap();
    assert_eq!(record.isbn.as_str(), "111");
    assert_eq!(record.borrower_id.as_str(), "B1");

    library.return_book("111", Utc::now()).unwrap();
    assert_eq!(library.book_by_isbn("111").unwrap().quantity(), 2);
    assert!(library.lending_record("111").is_none());
}

#[tokio::test]
async fn test_buy_scenario() {
    let mut library = Library::new();
    library.add_book(Book::new("Foo", "Bar", "222", 1).unwrap());
    library.add_borrower(Borrower::new("Ann", "B1").unwrap());

    library.buy_book("222", "B1").unwrap();
    let err = library.buy_book("222", "B1").unwrap_err();

    assert!(err.is_out_of_stock());
    let book = library.book_by_isbn("222").unwrap();
    assert_eq!(book.quantity(), 0);
    assert_eq!(book.sold(), 1);
}
