use crate::domain::{Book, Borrower};
use crate::ports::seed_source::{Result, SeedBatch, SeedSource as SeedSourceTrait};
use async_trait::async_trait;

/// SeedSourceのモック実装
///
/// 固定のデータを返す。`missing()`で生成した場合は読込に失敗する。
#[derive(Debug, Clone, Default)]
pub struct SeedSource {
    books: Vec<Book>,
    borrowers: Vec<Borrower>,
    missing: bool,
}

impl SeedSource {
    pub fn new(books: Vec<Book>, borrowers: Vec<Borrower>) -> Self {
        Self {
            books,
            borrowers,
            missing: false,
        }
    }

    /// ファイルが存在しない供給元
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl SeedSourceTrait for SeedSource {
    async fn books(&self) -> Result<SeedBatch<Book>> {
        if self.missing {
            return Err("mock seed: books file not found".into());
        }
        Ok(SeedBatch {
            items: self.books.clone(),
            skipped: 0,
        })
    }

    async fn borrowers(&self) -> Result<SeedBatch<Borrower>> {
        if self.missing {
            return Err("mock seed: borrowers file not found".into());
        }
        Ok(SeedBatch {
            items: self.borrowers.clone(),
            skipped: 0,
        })
    }
}
