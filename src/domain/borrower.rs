use serde::{Deserialize, Serialize};

use super::{BorrowerId, ValidationError};

/// Borrower エンティティ - 登録済みの利用者
///
/// 生成後は不変。同一性は`id`で判定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    name: String,
    id: BorrowerId,
}

impl Borrower {
    /// # エラー
    /// 名前またはIDが空の場合
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let id = BorrowerId::new(id)?;
        Ok(Self { name, id })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &BorrowerId {
        &self.id
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

impl std::fmt::Display for Borrower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name: {}, ID: {}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_borrower() {
        let borrower = Borrower::new("Alice", "B1").unwrap();
        assert_eq!(borrower.name(), "Alice");
        assert_eq!(borrower.id().as_str(), "B1");
        assert_eq!(borrower.to_string(), "Name: Alice, ID: B1");
    }

    #[test]
    fn test_new_borrower_rejects_blank_fields() {
        assert_eq!(Borrower::new("", "B1"), Err(ValidationError::EmptyName));
        assert_eq!(
            Borrower::new("Alice", "  "),
            Err(ValidationError::EmptyBorrowerId)
        );
    }
}
