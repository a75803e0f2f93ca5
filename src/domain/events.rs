use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, BorrowerId, Isbn};

/// イベント：書籍が貸出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLent {
    pub book_id: BookId,
    pub isbn: Isbn,
    pub borrower_id: BorrowerId,
    pub lent_at: DateTime<Utc>,
    pub remaining: u32,
    /// 同じ書籍の既存の貸出記録を上書きした場合、その利用者
    pub replaced: Option<BorrowerId>,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub book_id: BookId,
    pub isbn: Isbn,
    pub borrower_id: BorrowerId,
    pub returned_at: DateTime<Utc>,
    pub remaining: u32,
}

/// イベント：書籍が販売された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSold {
    pub book_id: BookId,
    pub isbn: Isbn,
    pub buyer_id: BorrowerId,
    pub remaining: u32,
    pub sold_total: u32,
}

/// イベント：在庫が補充された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRestocked {
    pub book_id: BookId,
    pub isbn: Isbn,
    pub added: u32,
    pub quantity: u32,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    BookLent(BookLent),
    BookReturned(BookReturned),
    BookSold(BookSold),
    BookRestocked(BookRestocked),
}
