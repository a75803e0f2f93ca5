use crate::domain::{Book, Borrower};
use crate::ports::seed_source::{Result, SeedBatch, SeedSource as SeedSourceTrait};
use async_trait::async_trait;
use std::path::PathBuf;

/// Number of comma-separated fields on a book seed line
const BOOK_FIELDS: usize = 4;
/// Number of comma-separated fields on a borrower seed line
const BORROWER_FIELDS: usize = 2;

/// Comma-separated seed files read at first start-up
///
/// Book lines are `title,author,isbn,quantity`, borrower lines are `name,id`.
/// Fields are trimmed. There is no quoting, so values cannot contain commas.
#[derive(Debug, Clone)]
pub struct SeedSource {
    books_path: PathBuf,
    borrowers_path: PathBuf,
}

impl SeedSource {
    pub fn new(books_path: impl Into<PathBuf>, borrowers_path: impl Into<PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            borrowers_path: borrowers_path.into(),
        }
    }
}

#[async_trait]
impl SeedSourceTrait for SeedSource {
    async fn books(&self) -> Result<SeedBatch<Book>> {
        let content = tokio::fs::read_to_string(&self.books_path).await?;
        let batch = parse_books(&content);
        tracing::info!(
            path = %self.books_path.display(),
            imported = batch.items.len(),
            skipped = batch.skipped,
            "Books loaded from seed file"
        );
        Ok(batch)
    }

    async fn borrowers(&self) -> Result<SeedBatch<Borrower>> {
        let content = tokio::fs::read_to_string(&self.borrowers_path).await?;
        let batch = parse_borrowers(&content);
        tracing::info!(
            path = %self.borrowers_path.display(),
            imported = batch.items.len(),
            skipped = batch.skipped,
            "Borrowers loaded from seed file"
        );
        Ok(batch)
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Parse book seed lines
///
/// Lines with the wrong number of fields are skipped silently. Lines with the
/// right shape but an unparsable quantity or an invalid book are skipped with
/// a warning.
pub fn parse_books(content: &str) -> SeedBatch<Book> {
    let mut batch = SeedBatch::default();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let fields = split_fields(line);
        if fields.len() != BOOK_FIELDS {
            batch.skipped += 1;
            continue;
        }
        let (title, author, isbn, quantity) = (fields[0], fields[1], fields[2], fields[3]);

        let quantity = match quantity.parse::<i64>() {
            Ok(quantity) => quantity,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Skipping book line with invalid quantity");
                batch.skipped += 1;
                continue;
            }
        };

        match Book::new(title, author, isbn, quantity) {
            Ok(book) => batch.items.push(book),
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Skipping invalid book line");
                batch.skipped += 1;
            }
        }
    }

    batch
}

/// Parse borrower seed lines
pub fn parse_borrowers(content: &str) -> SeedBatch<Borrower> {
    let mut batch = SeedBatch::default();

    for (index, line) in content.lines().enumerate() {
        let fields = split_fields(line);
        if fields.len() != BORROWER_FIELDS {
            batch.skipped += 1;
            continue;
        }

        match Borrower::new(fields[0], fields[1]) {
            Ok(borrower) => batch.items.push(borrower),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping invalid borrower line");
                batch.skipped += 1;
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_books_trims_fields() {
        let batch = parse_books("Dune , Frank Herbert, 111 , 2\nEmma,Jane Austen,222,1\n");

        assert_eq!(batch.skipped, 0);
        assert_eq!(batch.items.len(), 2);
        let dune = &batch.items[0];
        assert_eq!(dune.title(), "Dune");
        assert_eq!(dune.author(), "Frank Herbert");
        assert_eq!(dune.isbn().as_str(), "111");
        assert_eq!(dune.quantity(), 2);
    }

    #[test]
    fn test_parse_books_skips_malformed_lines() {
        let content = "\
Dune,Herbert,111,2
only,three,fields
Emma,Austen,222,lots
Zero,Copies,333,0
,Nobody,444,1
Emma,Austen,222,1
";
        let batch = parse_books(content);

        let isbns: Vec<_> = batch.items.iter().map(|b| b.isbn().as_str()).collect();
        assert_eq!(isbns, vec!["111", "222"]);
        assert_eq!(batch.skipped, 4);
    }

    #[test]
    fn test_parse_borrowers() {
        let batch = parse_borrowers("Alice, B1\nBob,B2,extra\n\nCarol,  \nDan,B4\n");

        let ids: Vec<_> = batch.items.iter().map(|b| b.id().as_str()).collect();
        assert_eq!(ids, vec!["B1", "B4"]);
        assert_eq!(batch.skipped, 3);
    }

    #[test]
    fn test_empty_content_yields_empty_batch() {
        assert_eq!(parse_books("").items.len(), 0);
        assert_eq!(parse_borrowers("").skipped, 0);
    }
}
