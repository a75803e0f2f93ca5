use crate::domain::Library;
use crate::ports::*;
use chrono::Utc;
use std::sync::Arc;

use super::errors::{LibraryApplicationError, Result};

/// サービスの依存関係
///
/// 振る舞いは持たず、各ユースケース関数に明示的に渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub store: Arc<dyn LibraryStore>,
    pub seeds: Arc<dyn SeedSource>,
}

/// 起動時に集約がどこから来たか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// 保存データから復元した
    Restored,
    /// 保存データがなかったので新規作成した
    Fresh,
    /// 保存データが読めなかったので空の集約で再開した
    Recovered { reason: String },
}

/// 初期データ取込の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub books_imported: usize,
    pub books_skipped: usize,
    pub borrowers_imported: usize,
    pub borrowers_skipped: usize,
    /// 読込自体に失敗したファイルのエラー
    pub errors: Vec<String>,
}

/// 起動時に用意された集約
#[derive(Debug)]
pub struct LoadedLibrary {
    pub library: Library,
    pub origin: LoadOrigin,
    /// 初期データを取り込んだ場合のみSome
    pub seed_report: Option<SeedReport>,
}

/// 保存データを読み込んで集約を復元するヘルパー関数
///
/// 保存データがない場合は`Ok(None)`。
async fn load_snapshot(store: &Arc<dyn LibraryStore>) -> Result<Option<Library>> {
    let snapshot = store
        .load()
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    snapshot
        .map(Library::from_snapshot)
        .transpose()
        .map_err(LibraryApplicationError::from)
}

/// 保存データから集約を読み込む（フェイルオープン）
///
/// ビジネスルール：
/// - 保存データがあれば復元する
/// - 保存データがなければ空の集約（Fresh）
/// - 読込・復元に失敗した場合も空の集約で続行し、原因を`Recovered`で報告する
///
/// この関数は失敗しない。
pub async fn load_library(deps: &ServiceDependencies) -> LoadedLibrary {
    let (library, origin) = match load_snapshot(&deps.store).await {
        Ok(Some(library)) => {
            tracing::info!(
                books = library.book_count(),
                borrowers = library.borrower_count(),
                lending = library.lending_count(),
                "Library restored from snapshot"
            );
            (library, LoadOrigin::Restored)
        }
        Ok(None) => {
            tracing::info!("No saved library found, starting fresh");
            (Library::new(), LoadOrigin::Fresh)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load library, starting with an empty one");
            (
                Library::new(),
                LoadOrigin::Recovered {
                    reason: e.to_string(),
                },
            )
        }
    };

    LoadedLibrary {
        library,
        origin,
        seed_report: None,
    }
}

/// 初期データを集約に取り込む
///
/// 蔵書・利用者のどちらかのファイルが読めなくても、もう一方は取り込む。
/// 読めなかったファイルはレポートの`errors`に記録する。
pub async fn seed_library(deps: &ServiceDependencies, library: &mut Library) -> SeedReport {
    let mut report = SeedReport::default();

    match deps.seeds.books().await {
        Ok(batch) => {
            report.books_imported = batch.items.len();
            report.books_skipped = batch.skipped;
            batch
                .items
                .into_iter()
                .for_each(|book| library.add_book(book));
        }
        Err(e) => {
            let err = LibraryApplicationError::SeedError(e);
            tracing::warn!(error = %err, "Error loading books from seed");
            report.errors.push(err.to_string());
        }
    }

    match deps.seeds.borrowers().await {
        Ok(batch) => {
            report.borrowers_imported = batch.items.len();
            report.borrowers_skipped = batch.skipped;
            batch
                .items
                .into_iter()
                .for_each(|borrower| library.add_borrower(borrower));
        }
        Err(e) => {
            let err = LibraryApplicationError::SeedError(e);
            tracing::warn!(error = %err, "Error loading borrowers from seed");
            report.errors.push(err.to_string());
        }
    }

    report
}

/// 起動処理
///
/// 保存データがない初回起動時のみ初期データを取り込む。
/// 保存データが壊れていた場合は取り込まずに空の集約で始める。
pub async fn bootstrap_library(deps: &ServiceDependencies) -> LoadedLibrary {
    let mut loaded = load_library(deps).await;

    if loaded.origin == LoadOrigin::Fresh {
        let report = seed_library(deps, &mut loaded.library).await;
        loaded.seed_report = Some(report);
    }

    loaded
}

/// 集約全体を保存する
///
/// # エラー
/// StoreError: 書き込み失敗
pub async fn save_library(deps: &ServiceDependencies, library: &Library) -> Result<()> {
    let snapshot = library.to_snapshot(Utc::now());

    deps.store
        .save(&snapshot)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    tracing::info!(
        books = snapshot.books.len(),
        borrowers = snapshot.borrowers.len(),
        lending = snapshot.lending_records.len(),
        "Library saved"
    );
    Ok(())
}
