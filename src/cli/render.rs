use crate::domain::{DomainEvent, Library};

/// ドメインイベントを利用者向けのメッセージに変換する
pub fn event_message(event: &DomainEvent) -> String {
    match event {
        DomainEvent::BookLent(e) => {
            let mut message = format!(
                "Book borrowed successfully! ({} -> {}, {} left)",
                e.isbn, e.borrower_id, e.remaining
            );
            if let Some(previous) = &e.replaced {
                message.push_str(&format!(
                    " Note: this replaces the loan record held by {}.",
                    previous
                ));
            }
            message
        }
        DomainEvent::BookReturned(e) => format!(
            "Book returned successfully! ({} from {}, {} available)",
            e.isbn, e.borrower_id, e.remaining
        ),
        DomainEvent::BookSold(e) => format!(
            "Book purchased successfully! ({} left, {} sold in total)",
            e.remaining, e.sold_total
        ),
        DomainEvent::BookRestocked(e) => format!(
            "Book restocked: {} now has {} copies available.",
            e.isbn, e.quantity
        ),
    }
}

/// 失敗した操作のメッセージ
pub fn failure(err: &dyn std::fmt::Display) -> String {
    format!("Error: {}", err)
}

/// 蔵書一覧（空の場合は案内文）
pub fn book_listing(library: &Library) -> Vec<String> {
    let lines: Vec<String> = library.list_books().map(ToString::to_string).collect();
    if lines.is_empty() {
        return vec!["No books available.".to_string()];
    }
    lines
}

/// 利用者一覧（空の場合は案内文）
pub fn borrower_listing(library: &Library) -> Vec<String> {
    let lines: Vec<String> = library
        .list_borrowers()
        .map(ToString::to_string)
        .collect();
    if lines.is_empty() {
        return vec!["No borrowers registered.".to_string()];
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Book, Borrower};
    use chrono::Utc;

    #[test]
    fn test_empty_listings() {
        let library = Library::new();
        assert_eq!(book_listing(&library), vec!["No books available."]);
        assert_eq!(borrower_listing(&library), vec!["No borrowers registered."]);
    }

    #[test]
    fn test_listings_use_entity_display() {
        let mut library = Library::new();
        library.add_book(Book::new("Dune", "Herbert", "111", 2).unwrap());
        library.add_borrower(Borrower::new("Ann", "B1").unwrap());

        assert_eq!(
            book_listing(&library),
            vec!["Title: Dune, Author: Herbert, ISBN: 111, Quantity: 2, Sold: 0"]
        );
        assert_eq!(borrower_listing(&library), vec!["Name: Ann, ID: B1"]);
    }

    #[test]
    fn test_replaced_loan_is_mentioned() {
        let mut library = Library::new();
        library.add_book(Book::new("Dune", "Herbert", "111", 2).unwrap());
        library.add_borrower(Borrower::new("Ann", "B1").unwrap());
        library.add_borrower(Borrower::new("Bob", "B2").unwrap());
        library.borrow_book("111", "B1", Utc::now()).unwrap();
        let event = library.borrow_book("111", "B2", Utc::now()).unwrap();

        let message = event_message(&DomainEvent::BookLent(event));
        assert!(message.starts_with("Book borrowed successfully!"));
        assert!(message.contains("held by B1"));
    }
}
