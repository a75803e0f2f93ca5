use thiserror::Error;

/// 入力値のエラー
///
/// 生成時に即座に返され、値の補正は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title cannot be empty.")]
    EmptyTitle,
    #[error("Author cannot be empty.")]
    EmptyAuthor,
    #[error("ISBN cannot be empty.")]
    EmptyIsbn,
    #[error("Quantity must be a positive integer (got {0}).")]
    NonPositiveQuantity(i64),
    #[error("Quantity {0} is too large.")]
    QuantityOutOfRange(i64),
    #[error("Name cannot be empty.")]
    EmptyName,
    #[error("ID cannot be empty.")]
    EmptyBorrowerId,
    /// 補充冊数が0
    #[error("Restock amount must be a positive integer.")]
    NoCopiesToRestock,
}

/// 販売のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SellBookError {
    /// 在庫なし
    #[error("Book is out of stock.")]
    OutOfStock,
    /// 累計販売数が上限に達している
    #[error("Sold count cannot be increased any further.")]
    SoldCountOverflow,
}

/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BorrowBookError {
    #[error("Book not found: {0}")]
    BookNotFound(String),
    #[error("Borrower not found: {0}")]
    BorrowerNotFound(String),
    /// 貸出可能な在庫がない
    #[error("Book is out of stock: {0}")]
    OutOfStock(String),
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnBookError {
    #[error("Book not found: {0}")]
    BookNotFound(String),
    /// 貸出記録がない
    #[error("Book is not currently borrowed: {0}")]
    NotBorrowed(String),
    /// 在庫数が上限のため戻せない
    #[error("Returning {0} would overflow the quantity")]
    QuantityOverflow(String),
}

/// 購入のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuyBookError {
    #[error("Book not found: {0}")]
    BookNotFound(String),
    #[error("Borrower not found: {0}")]
    BorrowerNotFound(String),
    #[error(transparent)]
    Sell(#[from] SellBookError),
}

impl BuyBookError {
    /// 在庫切れによる失敗か
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, BuyBookError::Sell(SellBookError::OutOfStock))
    }
}

/// 在庫補充のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestockBookError {
    #[error("Book not found: {0}")]
    BookNotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 在庫数が上限を超える
    #[error("Restocking {copies} copies of {isbn} would overflow the quantity")]
    Overflow { isbn: String, copies: u32 },
}

/// スナップショット復元のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("Invalid book in snapshot: {0}")]
    InvalidBook(#[source] ValidationError),
    #[error("Invalid borrower in snapshot: {0}")]
    InvalidBorrower(#[source] ValidationError),
    /// 貸出記録がカタログにない書籍を指している
    #[error("Lending record refers to unknown book {0}")]
    DanglingLendingRecord(String),
    #[error("Duplicate lending record for book {0}")]
    DuplicateLendingRecord(String),
    /// 同じBookIdを持つ書籍が複数ある
    #[error("Duplicate book id {0} in snapshot")]
    DuplicateBookId(String),
    /// 貸出記録のISBNが指している書籍のISBNと異なる
    #[error("Lending record for book {book_id} has ISBN {record_isbn}, but the book has {book_isbn}")]
    MismatchedLendingIsbn {
        book_id: String,
        record_isbn: String,
        book_isbn: String,
    },
}
