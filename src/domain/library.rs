use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Book, BookId, BookLent, BookRestocked, BookReturned, BookSold, Borrower, BorrowBookError,
    BorrowerId, BuyBookError, Isbn, RestockBookError, ReturnBookError, ValidationError,
};

/// 貸出記録 - 1冊の書籍と1人の利用者の有効な貸出
///
/// 不変条件：書籍1件（BookId）につき記録は最大1件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingRecord {
    pub book_id: BookId,
    pub isbn: Isbn,
    pub borrower_id: BorrowerId,
    pub lent_at: DateTime<Utc>,
}

/// Library 集約 - 蔵書・利用者・貸出記録を所有する
///
/// ビジネスルール：
/// - 在庫の変更はすべてこの集約のメソッドを経由する
/// - 失敗した操作は状態を一切変更しない
/// - ISBN・利用者IDの重複登録は許容し、検索は先に登録されたものを返す
///
/// 外部には`&Book` / `&Borrower`のみを公開し、可変参照は渡さない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Vec<Book>,
    borrowers: Vec<Borrower>,
    lending_records: HashMap<BookId, LendingRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // 蔵書
    // ========================================================================

    /// 書籍を登録する（ISBNの重複は検査しない）
    pub fn add_book(&mut self, book: Book) {
        self.books.push(book);
    }

    /// ISBNが一致する書籍をすべて削除する
    ///
    /// 該当なしはエラーではない。削除した件数を返す。
    /// 削除した書籍の貸出記録も破棄する。
    pub fn remove_book(&mut self, isbn: &str) -> usize {
        let before = self.books.len();
        let lending_records = &mut self.lending_records;
        self.books.retain(|book| {
            if book.isbn().as_str() == isbn {
                lending_records.remove(&book.id());
                false
            } else {
                true
            }
        });
        before - self.books.len()
    }

    /// タイトル・著者（大文字小文字を区別しない）またはISBN（完全一致）で検索する
    ///
    /// 最初に一致した書籍を返す。見つからない場合は`None`。
    pub fn find_book(&self, query: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.matches_query(query))
    }

    /// ISBN完全一致で最初の書籍を返す
    pub fn book_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn().as_str() == isbn)
    }

    /// 全書籍を登録順に返す（再度呼び出せば先頭から列挙し直せる）
    pub fn list_books(&self) -> impl Iterator<Item = &Book> + Clone + '_ {
        self.books.iter()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    // ========================================================================
    // 利用者
    // ========================================================================

    /// 利用者を登録する（IDの重複は検査しない）
    pub fn add_borrower(&mut self, borrower: Borrower) {
        self.borrowers.push(borrower);
    }

    /// IDが一致する利用者をすべて削除する
    ///
    /// 該当なしはエラーではない。既存の貸出記録はそのまま残す（本はまだ貸出中）。
    pub fn remove_borrower(&mut self, id: &str) -> usize {
        let before = self.borrowers.len();
        self.borrowers.retain(|borrower| borrower.id().as_str() != id);
        before - self.borrowers.len()
    }

    pub fn find_borrower(&self, id: &str) -> Option<&Borrower> {
        self.borrowers
            .iter()
            .find(|borrower| borrower.id().as_str() == id)
    }

    /// 全利用者を登録順に返す
    pub fn list_borrowers(&self) -> impl Iterator<Item = &Borrower> + Clone + '_ {
        self.borrowers.iter()
    }

    pub fn borrower_count(&self) -> usize {
        self.borrowers.len()
    }

    // ========================================================================
    // 貸出・返却・販売
    // ========================================================================

    /// 書籍を貸し出す
    ///
    /// ビジネスルール：
    /// - 書籍と利用者が存在すること
    /// - 在庫が1冊以上あること
    /// - 成功時は在庫を1減らし、貸出記録を作成する
    /// - 同じ書籍に既存の記録がある場合は上書きする（記録は書籍ごとに1件）
    pub fn borrow_book(
        &mut self,
        isbn: &str,
        borrower_id: &str,
        lent_at: DateTime<Utc>,
    ) -> Result<BookLent, BorrowBookError> {
        let borrower_id = self
            .find_borrower(borrower_id)
            .map(|borrower| borrower.id().clone())
            .ok_or_else(|| BorrowBookError::BorrowerNotFound(borrower_id.to_string()))?;

        let book = self
            .book_by_isbn_mut(isbn)
            .ok_or_else(|| BorrowBookError::BookNotFound(isbn.to_string()))?;

        book.lend_one()
            .ok_or_else(|| BorrowBookError::OutOfStock(isbn.to_string()))?;

        let book_id = book.id();
        let isbn = book.isbn().clone();
        let remaining = book.quantity();

        let replaced = self
            .lending_records
            .insert(
                book_id,
                LendingRecord {
                    book_id,
                    isbn: isbn.clone(),
                    borrower_id: borrower_id.clone(),
                    lent_at,
                },
            )
            .map(|previous| previous.borrower_id);

        Ok(BookLent {
            book_id,
            isbn,
            borrower_id,
            lent_at,
            remaining,
            replaced,
        })
    }

    /// 書籍を返却する
    ///
    /// ビジネスルール：
    /// - 書籍が存在し、貸出記録があること
    /// - 成功時は記録を削除し、在庫を1戻す
    /// - 在庫が上限に達していて戻せない場合は記録も残す
    pub fn return_book(
        &mut self,
        isbn: &str,
        returned_at: DateTime<Utc>,
    ) -> Result<BookReturned, ReturnBookError> {
        let book_id = self
            .book_by_isbn(isbn)
            .map(Book::id)
            .ok_or_else(|| ReturnBookError::BookNotFound(isbn.to_string()))?;

        if !self.lending_records.contains_key(&book_id) {
            return Err(ReturnBookError::NotBorrowed(isbn.to_string()));
        }

        let book = self
            .book_by_isbn_mut(isbn)
            .ok_or_else(|| ReturnBookError::BookNotFound(isbn.to_string()))?;
        let remaining = book
            .receive_return()
            .ok_or_else(|| ReturnBookError::QuantityOverflow(isbn.to_string()))?;

        let record = self
            .lending_records
            .remove(&book_id)
            .ok_or_else(|| ReturnBookError::NotBorrowed(isbn.to_string()))?;

        Ok(BookReturned {
            book_id,
            isbn: record.isbn,
            borrower_id: record.borrower_id,
            returned_at,
            remaining,
        })
    }

    /// 書籍を販売する
    ///
    /// 書籍と購入者（登録済み利用者）が存在すれば1冊販売する。
    /// 在庫切れは`BuyBookError::Sell(OutOfStock)`として返し、状態は変更しない。
    pub fn buy_book(&mut self, isbn: &str, borrower_id: &str) -> Result<BookSold, BuyBookError> {
        let buyer_id = self
            .find_borrower(borrower_id)
            .map(|borrower| borrower.id().clone())
            .ok_or_else(|| BuyBookError::BorrowerNotFound(borrower_id.to_string()))?;

        let book = self
            .book_by_isbn_mut(isbn)
            .ok_or_else(|| BuyBookError::BookNotFound(isbn.to_string()))?;

        book.sell_one()?;

        Ok(BookSold {
            book_id: book.id(),
            isbn: book.isbn().clone(),
            buyer_id,
            remaining: book.quantity(),
            sold_total: book.sold(),
        })
    }

    /// 在庫を補充する（管理操作）
    pub fn restock_book(
        &mut self,
        isbn: &str,
        copies: u32,
    ) -> Result<BookRestocked, RestockBookError> {
        if copies == 0 {
            return Err(ValidationError::NoCopiesToRestock.into());
        }

        let book = self
            .book_by_isbn_mut(isbn)
            .ok_or_else(|| RestockBookError::BookNotFound(isbn.to_string()))?;

        let quantity = book.restock(copies).ok_or_else(|| RestockBookError::Overflow {
            isbn: isbn.to_string(),
            copies,
        })?;

        Ok(BookRestocked {
            book_id: book.id(),
            isbn: book.isbn().clone(),
            added: copies,
            quantity,
        })
    }

    // ========================================================================
    // 貸出記録の参照
    // ========================================================================

    /// 有効な貸出記録を蔵書の登録順に返す
    pub fn lending_records(&self) -> impl Iterator<Item = &LendingRecord> + Clone + '_ {
        self.books
            .iter()
            .filter_map(|book| self.lending_records.get(&book.id()))
    }

    /// ISBNに対応する書籍（最初の一致）の貸出記録
    pub fn lending_record(&self, isbn: &str) -> Option<&LendingRecord> {
        self.book_by_isbn(isbn)
            .and_then(|book| self.lending_records.get(&book.id()))
    }

    pub fn lending_count(&self) -> usize {
        self.lending_records.len()
    }

    fn book_by_isbn_mut(&mut self, isbn: &str) -> Option<&mut Book> {
        self.books
            .iter_mut()
            .find(|book| book.isbn().as_str() == isbn)
    }

    /// スナップショット復元用（検証は`snapshot`モジュールで行う）
    pub(super) fn from_parts(
        books: Vec<Book>,
        borrowers: Vec<Borrower>,
        lending_records: HashMap<BookId, LendingRecord>,
    ) -> Self {
        Self {
            books,
            borrowers,
            lending_records,
        }
    }
}
