use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Book, Borrower, LendingRecord, Library, SnapshotError};

/// スナップショット形式のバージョン
pub const SNAPSHOT_VERSION: u32 = 1;

/// Library 集約の完全なスナップショット
///
/// 蔵書・利用者・貸出記録の3つのコレクションをそのまま保持する。
/// 永続化形式（JSONなど）はアダプター側の関心事。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub books: Vec<Book>,
    pub borrowers: Vec<Borrower>,
    pub lending_records: Vec<LendingRecord>,
}

impl Library {
    /// 現在の状態をスナップショットに変換する
    pub fn to_snapshot(&self, saved_at: DateTime<Utc>) -> LibrarySnapshot {
        LibrarySnapshot {
            version: SNAPSHOT_VERSION,
            saved_at,
            books: self.list_books().cloned().collect(),
            borrowers: self.list_borrowers().cloned().collect(),
            lending_records: self.lending_records().cloned().collect(),
        }
    }

    /// スナップショットから集約を復元する
    ///
    /// # エラー
    /// - バージョン不一致
    /// - 空のフィールドを持つ書籍・利用者
    /// - 同じBookIdを持つ書籍
    /// - カタログにない書籍を指す、ISBNが食い違う、または重複した貸出記録
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut books_by_id = HashMap::with_capacity(snapshot.books.len());
        for book in &snapshot.books {
            book.validate().map_err(SnapshotError::InvalidBook)?;
            if books_by_id.insert(book.id(), book).is_some() {
                return Err(SnapshotError::DuplicateBookId(book.id().value().to_string()));
            }
        }
        for borrower in &snapshot.borrowers {
            borrower.validate().map_err(SnapshotError::InvalidBorrower)?;
        }

        let mut lending_records = HashMap::with_capacity(snapshot.lending_records.len());
        for record in snapshot.lending_records {
            let Some(book) = books_by_id.get(&record.book_id) else {
                return Err(SnapshotError::DanglingLendingRecord(
                    record.book_id.value().to_string(),
                ));
            };
            if book.isbn() != &record.isbn {
                return Err(SnapshotError::MismatchedLendingIsbn {
                    book_id: record.book_id.value().to_string(),
                    record_isbn: record.isbn.to_string(),
                    book_isbn: book.isbn().to_string(),
                });
            }
            let book_id = record.book_id;
            if lending_records.insert(book_id, record).is_some() {
                return Err(SnapshotError::DuplicateLendingRecord(
                    book_id.value().to_string(),
                ));
            }
        }

        Ok(Library::from_parts(
            snapshot.books,
            snapshot.borrowers,
            lending_records,
        ))
    }
}
