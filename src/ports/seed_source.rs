use crate::domain::{Book, Borrower};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 初期データ読込の結果
///
/// 不正な行は取り込まずに件数だけ数える。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedBatch<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for SeedBatch<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }
}

/// 初期データ（蔵書・利用者）の供給元ポート
///
/// 保存データが存在しない初回起動時のみ使用される。
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn books(&self) -> Result<SeedBatch<Book>>;

    async fn borrowers(&self) -> Result<SeedBatch<Borrower>>;
}
