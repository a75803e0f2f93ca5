use serde::{Deserialize, Serialize};

use super::{BookId, Isbn, Quantity, SellBookError, ValidationError};

/// Book エンティティ - カタログ上の1タイトル
///
/// 不変条件：
/// - title, author, isbn は空でない
/// - quantity（貸出・販売可能な在庫）と sold（累計販売数）は負にならない
/// - sold は販売でのみ増加し、減ることはない
///
/// 在庫の変更は集約（`Library`）経由でのみ行われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    isbn: Isbn,
    quantity: Quantity,
    sold: u32,
}

impl Book {
    /// 新規登録
    ///
    /// # エラー
    /// - タイトル・著者・ISBNが空の場合
    /// - 在庫数が0以下の場合
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        quantity: i64,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let author = author.into();
        if author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        let isbn = Isbn::new(isbn)?;
        let quantity = Quantity::initial(quantity)?;

        Ok(Self {
            id: BookId::new(),
            title,
            author,
            isbn,
            quantity,
            sold: 0,
        })
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.value()
    }

    pub fn sold(&self) -> u32 {
        self.sold
    }

    /// 検索クエリに一致するか
    ///
    /// タイトル・著者は大文字小文字を区別せず、ISBNは完全一致。
    pub fn matches_query(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.title.to_lowercase() == lowered
            || self.author.to_lowercase() == lowered
            || self.isbn.as_str() == query
    }

    /// 1冊販売する
    ///
    /// 在庫を1減らし、累計販売数を1増やす。
    ///
    /// # エラー
    /// - 在庫が0の場合は`SellBookError::OutOfStock`
    /// - 累計販売数が上限の場合は`SellBookError::SoldCountOverflow`
    ///
    /// いずれも状態は変更しない。
    pub fn sell_one(&mut self) -> Result<(), SellBookError> {
        let remaining = self.quantity.decrement().ok_or(SellBookError::OutOfStock)?;
        let sold = self
            .sold
            .checked_add(1)
            .ok_or(SellBookError::SoldCountOverflow)?;
        self.quantity = remaining;
        self.sold = sold;
        Ok(())
    }

    /// 貸出により在庫を1減らす（在庫0ならNone、状態は変更しない）
    pub(crate) fn lend_one(&mut self) -> Option<()> {
        self.quantity = self.quantity.decrement()?;
        Some(())
    }

    /// 返却により在庫を1戻す（オーバーフロー時はNone、状態は変更しない）
    pub(crate) fn receive_return(&mut self) -> Option<u32> {
        self.quantity = self.quantity.add(1)?;
        Some(self.quantity.value())
    }

    /// 在庫補充（オーバーフロー時はNone、状態は変更しない）
    pub(crate) fn restock(&mut self, copies: u32) -> Option<u32> {
        self.quantity = self.quantity.add(copies)?;
        Some(self.quantity.value())
    }

    /// 永続化データの検証（生成時と同じ規則、在庫0は許容）
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        Ok(())
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, ISBN: {}, Quantity: {}, Sold: {}",
            self.title, self.author, self.isbn, self.quantity, self.sold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_starts_with_zero_sold() {
        let book = Book::new("Dune", "Herbert", "111", 2).unwrap();
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Herbert");
        assert_eq!(book.isbn().as_str(), "111");
        assert_eq!(book.quantity(), 2);
        assert_eq!(book.sold(), 0);
    }

    #[test]
    fn test_new_book_rejects_blank_fields() {
        assert_eq!(
            Book::new(" ", "Herbert", "111", 1),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            Book::new("Dune", "", "111", 1),
            Err(ValidationError::EmptyAuthor)
        );
        assert_eq!(
            Book::new("Dune", "Herbert", "\n", 1),
            Err(ValidationError::EmptyIsbn)
        );
    }

    #[test]
    fn test_new_book_rejects_non_positive_quantity() {
        assert_eq!(
            Book::new("Dune", "Herbert", "111", 0),
            Err(ValidationError::NonPositiveQuantity(0))
        );
        assert_eq!(
            Book::new("Dune", "Herbert", "111", -1),
            Err(ValidationError::NonPositiveQuantity(-1))
        );
    }

    #[test]
    fn test_each_book_gets_distinct_id() {
        let a = Book::new("Dune", "Herbert", "111", 1).unwrap();
        let b = Book::new("Dune", "Herbert", "111", 1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_sell_one_until_out_of_stock() {
        let mut book = Book::new("Foo", "Bar", "222", 1).unwrap();

        assert!(book.sell_one().is_ok());
        assert_eq!(book.quantity(), 0);
        assert_eq!(book.sold(), 1);

        assert_eq!(book.sell_one(), Err(SellBookError::OutOfStock));
        assert_eq!(book.quantity(), 0);
        assert_eq!(book.sold(), 1);
    }

    #[test]
    fn test_matches_query() {
        let book = Book::new("Dune", "Frank Herbert", "978-0", 1).unwrap();
        assert!(book.matches_query("dune"));
        assert!(book.matches_query("FRANK HERBERT"));
        assert!(book.matches_query("978-0"));
        assert!(!book.matches_query("Dun"));
    }

    #[test]
    fn test_lend_and_return_adjust_quantity() {
        let mut book = Book::new("Dune", "Herbert", "111", 1).unwrap();
        assert!(book.lend_one().is_some());
        assert_eq!(book.quantity(), 0);
        assert!(book.lend_one().is_none());
        assert_eq!(book.receive_return(), Some(1));
        assert_eq!(book.quantity(), 1);
    }

    #[test]
    fn test_receive_return_overflow_leaves_quantity() {
        let mut book = Book::new("Dune", "Herbert", "111", i64::from(u32::MAX)).unwrap();
        assert_eq!(book.receive_return(), None);
        assert_eq!(book.quantity(), u32::MAX);
    }

    #[test]
    fn test_sell_one_with_saturated_sold_count_changes_nothing() {
        let mut book = Book::new("Foo", "Bar", "222", 2).unwrap();
        // 保存データから読み込んだ極端な販売数
        book.sold = u32::MAX;

        assert_eq!(book.sell_one(), Err(SellBookError::SoldCountOverflow));
        assert_eq!(book.quantity(), 2);
        assert_eq!(book.sold(), u32::MAX);
    }

    #[test]
    fn test_display_matches_listing_format() {
        let book = Book::new("Dune", "Herbert", "111", 2).unwrap();
        assert_eq!(
            book.to_string(),
            "Title: Dune, Author: Herbert, ISBN: 111, Quantity: 2, Sold: 0"
        );
    }
}
