//! Title-keyed lending catalog.
//!
//! Loans here are not tied to a member: a book is either on the shelf or out.
//! See [`crate::library`] for the member-tracking variant.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::render::{ListId, Notice, NullRenderer, Renderer};

/// A lendable book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Title, used as the lookup key.
    pub title: String,
    /// Author name.
    pub author: String,
    /// ISBN as entered.
    pub isbn: String,
    /// Whether the book is on the shelf.
    pub is_available: bool,
}

impl Book {
    /// Create a book that is on the shelf.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            is_available: true,
        }
    }

    /// Flip between available and lent out.
    pub fn update_status(&mut self) {
        self.is_available = !self.is_available;
    }

    fn describe(&self) -> String {
        format!(
            "Book Title: {}, Author {}, ISBN: {}",
            self.title, self.author, self.isbn
        )
    }
}

/// A catalog of books lent by title.
#[derive(Debug, Default, Serialize)]
pub struct Library<R: Renderer = NullRenderer> {
    books: Vec<Book>,
    #[serde(skip)]
    renderer: R,
}

impl<R: Renderer> Library<R> {
    /// Create an empty catalog rendering through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            books: Vec::new(),
            renderer,
        }
    }

    /// All books in insertion order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// The renderer this catalog draws into.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Add a book and re-render the catalog.
    pub fn add_book(&mut self, book: Book) {
        debug!("Adding book {} ({})", book.title, book.isbn);
        self.books.push(book);
        self.display_books();
    }

    /// First book whose title matches exactly.
    #[must_use]
    pub fn find_book(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title == title)
    }

    fn find_book_mut(&mut self, title: &str) -> Result<&mut Book> {
        self.books
            .iter_mut()
            .find(|book| book.title == title)
            .ok_or_else(|| Error::book_not_found(title))
    }

    /// Lend out the book with this title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookNotFound`] for an unknown title and
    /// [`Error::BookUnavailable`] if the book is already out. Neither changes
    /// any state.
    pub fn borrow_book(&mut self, title: &str) -> Result<Notice> {
        let book = self.find_book_mut(title)?;
        if !book.is_available {
            warn!("{} is already borrowed", title);
            return Err(Error::book_unavailable(&book.title));
        }
        book.update_status();

        let notice = Notice::Borrowed {
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            borrower: None,
        };
        self.renderer.notify(&notice);
        self.display_books();
        Ok(notice)
    }

    /// Put the book with this title back on the shelf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookNotFound`] for an unknown title and
    /// [`Error::BookNotBorrowed`] if the book was never lent out.
    pub fn return_book(&mut self, title: &str) -> Result<Notice> {
        let book = self.find_book_mut(title)?;
        if book.is_available {
            warn!("{} was not borrowed", title);
            return Err(Error::book_not_borrowed(&book.title));
        }
        book.update_status();

        let notice = Notice::Returned {
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            borrower: None,
        };
        self.renderer.notify(&notice);
        self.display_books();
        Ok(notice)
    }

    /// Render the whole catalog.
    pub fn display_books(&mut self) {
        let items: Vec<String> = self.books.iter().map(Book::describe).collect();
        self.renderer.render_list(ListId::LmsBooks, &items);
    }
}
