use crate::domain::SnapshotError;
use thiserror::Error;

/// 蔵書管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 保存データの読み書きに失敗
    #[error("Library store error: {0}")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 保存データは読めたが内容が不正
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    /// 初期データの読込に失敗
    #[error("Seed import error: {0}")]
    SeedError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;
