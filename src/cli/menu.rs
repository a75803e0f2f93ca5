use std::str::FromStr;

/// メインメニューの見出しと選択肢
pub const MENU: &str = "\
--- Welcome to the Library Management System. Please choose a number between 1 and 11 ---
1. Add Book
2. Remove Book
3. Search Book
4. Add Borrower
5. Borrow Book
6. Return Book
7. Buy Book
8. Display All Books
9. Display All Borrowers
10. Save and Exit
11. Restock Book";

/// メニューの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    RemoveBook,
    SearchBook,
    AddBorrower,
    BorrowBook,
    ReturnBook,
    BuyBook,
    ListBooks,
    ListBorrowers,
    SaveAndExit,
    RestockBook,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddBook),
            "2" => Ok(MenuChoice::RemoveBook),
            "3" => Ok(MenuChoice::SearchBook),
            "4" => Ok(MenuChoice::AddBorrower),
            "5" => Ok(MenuChoice::BorrowBook),
            "6" => Ok(MenuChoice::ReturnBook),
            "7" => Ok(MenuChoice::BuyBook),
            "8" => Ok(MenuChoice::ListBooks),
            "9" => Ok(MenuChoice::ListBorrowers),
            "10" => Ok(MenuChoice::SaveAndExit),
            "11" => Ok(MenuChoice::RestockBook),
            other => Err(format!("Invalid choice: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_choices() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::AddBook));
        assert_eq!(" 10 \n".parse::<MenuChoice>(), Ok(MenuChoice::SaveAndExit));
        assert_eq!("11".parse::<MenuChoice>(), Ok(MenuChoice::RestockBook));
    }

    #[test]
    fn test_parse_invalid_choice() {
        assert!("0".parse::<MenuChoice>().is_err());
        assert!("twelve".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }
}
