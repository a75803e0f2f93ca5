use crate::domain::{Book, Borrower, DomainEvent, Library};
use chrono::Utc;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::menu::{MENU, MenuChoice};
use super::render;

/// 対話セッションの終わり方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// 「保存して終了」が選ばれた
    SaveAndExit,
    /// 入力が尽きた
    EndOfInput,
}

/// 1回のメニュー操作の後に続けるかどうか
enum Flow {
    Continue,
    Exit(SessionEnd),
}

/// コンソール対話ループ
///
/// 入出力を抽象化しているので、テストでは任意のバッファを渡せる。
/// 集約への操作はすべて`Library`のメソッドを呼ぶだけで、結果の表示のみを担う。
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// メニューを繰り返し表示し、選択された操作を実行する
    ///
    /// 保存は呼び出し側の責務。戻り値でセッションの終わり方を返す。
    pub async fn run(&mut self, library: &mut Library) -> io::Result<SessionEnd> {
        loop {
            self.say("").await?;
            self.say(MENU).await?;

            let Some(input) = self.ask("Enter your choice: ").await? else {
                return Ok(SessionEnd::EndOfInput);
            };

            let choice = match input.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    self.say("Invalid choice. Please try again.").await?;
                    continue;
                }
            };

            if let Flow::Exit(end) = self.dispatch(choice, library).await? {
                return Ok(end);
            }
        }
    }

    async fn dispatch(&mut self, choice: MenuChoice, library: &mut Library) -> io::Result<Flow> {
        match choice {
            MenuChoice::AddBook => self.add_book(library).await,
            MenuChoice::RemoveBook => self.remove_book(library).await,
            MenuChoice::SearchBook => self.search_book(library).await,
            MenuChoice::AddBorrower => self.add_borrower(library).await,
            MenuChoice::BorrowBook => self.borrow_book(library).await,
            MenuChoice::ReturnBook => self.return_book(library).await,
            MenuChoice::BuyBook => self.buy_book(library).await,
            MenuChoice::ListBooks => {
                self.say("\n--- All Books ---").await?;
                for line in render::book_listing(library) {
                    self.say(&line).await?;
                }
                Ok(Flow::Continue)
            }
            MenuChoice::ListBorrowers => {
                self.say("\n--- All Borrowers ---").await?;
                for line in render::borrower_listing(library) {
                    self.say(&line).await?;
                }
                Ok(Flow::Continue)
            }
            MenuChoice::SaveAndExit => Ok(Flow::Exit(SessionEnd::SaveAndExit)),
            MenuChoice::RestockBook => self.restock_book(library).await,
        }
    }

    // ========================================================================
    // 各メニュー操作
    // ========================================================================

    async fn add_book(&mut self, library: &mut Library) -> io::Result<Flow> {
        let Some(title) = self.ask("Enter book title: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };
        let Some(author) = self.ask("Enter book author: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };
        let Some(isbn) = self.ask("Enter book ISBN: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };
        let Some(quantity) = self.ask("Enter book quantity: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };

        let quantity = match quantity.trim().parse::<i64>() {
            Ok(quantity) => quantity,
            Err(_) => {
                self.say("Invalid quantity. Please enter a whole number.")
                    .await?;
                return Ok(Flow::Continue);
            }
        };

        match Book::new(title, author, isbn, quantity) {
            Ok(book) => {
                tracing::info!(isbn = %book.isbn(), quantity = book.quantity(), "Book added");
                library.add_book(book);
                self.say("Book added successfully!").await?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected new book");
                self.say(&render::failure(&e)).await?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn remove_book(&mut self, library: &mut Library) -> io::Result<Flow> {
        let Some(isbn) = self.ask("Enter ISBN of the book to remove: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };

        let removed = library.remove_book(&isbn);
        tracing::info!(isbn = %isbn, removed, "Remove book");
        if removed == 0 {
            self.say("No book with that ISBN.").await?;
        } else {
            self.say(&format!("Removed {} book(s).", removed)).await?;
        }
        Ok(Flow::Continue)
    }

    async fn search_book(&mut self, library: &mut Library) -> io::Result<Flow> {
        let Some(query) = self
            .ask("Enter title, author, or ISBN to search: ")
            .await?
        else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };

        match library.find_book(&query) {
            Some(book) => self.say(&format!("Book found: {}", book)).await?,
            None => self.say("Book not found.").await?,
        }
        Ok(Flow::Continue)
    }

    async fn add_borrower(&mut self, library: &mut Library) -> io::Result<Flow> {
        let Some(name) = self.ask("Enter borrower name: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };
        let Some(id) = self.ask("Enter borrower ID: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };

        match Borrower::new(name, id) {
            Ok(borrower) => {
                tracing::info!(borrower_id = %borrower.id(), "Borrower added");
                library.add_borrower(borrower);
                self.say("Borrower added successfully!").await?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected new borrower");
                self.say(&render::failure(&e)).await?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn borrow_book(&mut self, library: &mut Library) -> io::Result<Flow> {
        let Some(isbn) = self.ask("Enter ISBN of the book to borrow: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };
        let Some(borrower_id) = self.ask("Enter borrower ID: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };

        let message = match library.borrow_book(&isbn, &borrower_id, Utc::now()) {
            Ok(event) => {
                tracing::info!(
                    isbn = %event.isbn,
                    borrower_id = %event.borrower_id,
                    remaining = event.remaining,
                    "Book lent"
                );
                if let Some(previous) = &event.replaced {
                    tracing::warn!(isbn = %event.isbn, previous = %previous, "Lending record replaced");
                }
                render::event_message(&DomainEvent::BookLent(event))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Borrow rejected");
                render::failure(&e)
            }
        };
        self.say(&message).await?;
        Ok(Flow::Continue)
    }

    async fn return_book(&mut self, library: &mut Library) -> io::Result<Flow> {
        let Some(isbn) = self.ask("Enter ISBN of the book to return: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };

        let message = match library.return_book(&isbn, Utc::now()) {
            Ok(event) => {
                tracing::info!(isbn = %event.isbn, borrower_id = %event.borrower_id, "Book returned");
                render::event_message(&DomainEvent::BookReturned(event))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Return rejected");
                render::failure(&e)
            }
        };
        self.say(&message).await?;
        Ok(Flow::Continue)
    }

    async fn buy_book(&mut self, library: &mut Library) -> io::Result<Flow> {
        let Some(isbn) = self.ask("Enter ISBN of the book to buy: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };
        let Some(borrower_id) = self.ask("Enter borrower ID: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };

        let message = match library.buy_book(&isbn, &borrower_id) {
            Ok(event) => {
                tracing::info!(isbn = %event.isbn, buyer_id = %event.buyer_id, "Book sold");
                render::event_message(&DomainEvent::BookSold(event))
            }
            Err(e) => {
                tracing::warn!(error = %e, out_of_stock = e.is_out_of_stock(), "Purchase rejected");
                render::failure(&e)
            }
        };
        self.say(&message).await?;
        Ok(Flow::Continue)
    }

    async fn restock_book(&mut self, library: &mut Library) -> io::Result<Flow> {
        let Some(isbn) = self.ask("Enter ISBN of the book to restock: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };
        let Some(copies) = self.ask("Enter number of copies to add: ").await? else {
            return Ok(Flow::Exit(SessionEnd::EndOfInput));
        };

        let copies = match copies.trim().parse::<u32>() {
            Ok(copies) => copies,
            Err(_) => {
                self.say("Invalid number of copies. Please enter a whole number.")
                    .await?;
                return Ok(Flow::Continue);
            }
        };

        let message = match library.restock_book(&isbn, copies) {
            Ok(event) => {
                tracing::info!(isbn = %event.isbn, added = event.added, quantity = event.quantity, "Book restocked");
                render::event_message(&DomainEvent::BookRestocked(event))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Restock rejected");
                render::failure(&e)
            }
        };
        self.say(&message).await?;
        Ok(Flow::Continue)
    }

    // ========================================================================
    // 入出力
    // ========================================================================

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// プロンプトを表示して1行読む（入力終端ならNone）
    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
