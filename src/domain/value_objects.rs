use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// 書籍ID - 蔵書1件（ISBNとは別）の同一性
///
/// ISBNの重複登録を許容するため、貸出記録はISBNではなくこのIDで紐付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

/// ISBN - カタログ上の書籍識別子
///
/// 不変条件：空文字・空白のみは不可
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyIsbn);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Isbn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 利用者ID - 利用者の一意な識別子
///
/// 不変条件：空文字・空白のみは不可
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BorrowerId(String);

impl BorrowerId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyBorrowerId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BorrowerId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BorrowerId> for String {
    fn from(id: BorrowerId) -> Self {
        id.0
    }
}

impl std::fmt::Display for BorrowerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 在庫数
///
/// 不変条件：負にならない（型で保証）。
/// 登録時のみ正の値を要求し、貸出・販売後の0は正当な状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    /// 登録時の在庫数（1以上）
    ///
    /// # エラー
    /// 0以下の場合は`ValidationError::NonPositiveQuantity`、
    /// u32に収まらない場合は`ValidationError::QuantityOutOfRange`を返す
    pub fn initial(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NonPositiveQuantity(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::QuantityOutOfRange(value))
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 1冊減らす（0の場合はNone）
    pub fn decrement(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// 指定冊数増やす（オーバーフロー時はNone）
    pub fn add(self, copies: u32) -> Option<Self> {
        self.0.checked_add(copies).map(Self)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
