//! Member-tracking library.
//!
//! Books and members live in separate lists. A member's loans are recorded by
//! ISBN, so each book's availability has a single owner: the library's list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::render::{ListId, Notice, NullRenderer, Renderer};

/// A book on the library's shelves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// ISBN, used as the lookup key.
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

    fn describe(&self) -> String {
        let status = if self.is_available {
            "Available"
        } else {
            "Borrowed"
        };
        format!(
            "{} by {} (ISBN: {}) - {}",
            self.title, self.author, self.isbn, status
        )
    }
}

/// A library member and the ISBNs they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Display name.
    pub name: String,
    /// Member ID, used as the lookup key.
    pub member_id: String,
    /// ISBNs currently on loan to this member, in borrow order.
    pub borrowed_books: Vec<String>,
}

impl Member {
    /// Create a member with no loans.
    #[must_use]
    pub fn new(name: impl Into<String>, member_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member_id: member_id.into(),
            borrowed_books: Vec::new(),
        }
    }

    /// Take `book` off the shelf if it is available.
    ///
    /// Returns `false` and changes nothing when the book is already out.
    pub fn borrow_book(&mut self, book: &mut Book) -> bool {
        if !book.is_available {
            return false;
        }
        book.is_available = false;
        self.borrowed_books.push(book.isbn.clone());
        true
    }

    /// Put `book` back on the shelf and drop it from this member's loans.
    pub fn return_book(&mut self, book: &mut Book) {
        book.is_available = true;
        self.borrowed_books.retain(|isbn| *isbn != book.isbn);
    }

    /// Whether this member holds a book with this ISBN.
    #[must_use]
    pub fn holds(&self, isbn: &str) -> bool {
        self.borrowed_books.iter().any(|held| held == isbn)
    }

    fn describe(&self) -> String {
        format!("{} (ID: {})", self.name, self.member_id)
    }
}

/// Books, members, and the loans between them.
#[derive(Debug, Default, Serialize)]
pub struct Library<R: Renderer = NullRenderer> {
    books: Vec<Book>,
    members: Vec<Member>,
    #[serde(skip)]
    renderer: R,
}

impl<R: Renderer> Library<R> {
    /// Create an empty library rendering through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            books: Vec::new(),
            members: Vec::new(),
            renderer,
        }
    }

    /// All books in insertion order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The renderer this library draws into.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Add a book and re-render the book list.
    pub fn add_book(&mut self, book: Book) {
        debug!("Adding book {} ({})", book.title, book.isbn);
        self.books.push(book);
        self.display_books();
    }

    /// Add a member and re-render the member list.
    pub fn add_member(&mut self, member: Member) {
        debug!("Adding member {} ({})", member.name, member.member_id);
        self.members.push(member);
        self.display_members();
    }

    /// First book with this exact ISBN.
    #[must_use]
    pub fn find_book_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn == isbn)
    }

    /// First member with this exact ID.
    #[must_use]
    pub fn find_member_by_id(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.member_id == member_id)
    }

    /// Books currently on loan to a member, in borrow order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MemberNotFound`] when the member is unknown.
    pub fn borrowed_books(&self, member_id: &str) -> Result<Vec<&Book>> {
        let member = self
            .find_member_by_id(member_id)
            .ok_or_else(|| Error::member_not_found(member_id))?;
        Ok(member
            .borrowed_books
            .iter()
            .filter_map(|isbn| self.find_book_by_isbn(isbn))
            .collect())
    }

    /// Resolve both sides of a loan request to list indices.
    fn loan_parties(&self, member_id: &str, isbn: &str) -> Result<(usize, usize)> {
        let member = self
            .members
            .iter()
            .position(|member| member.member_id == member_id);
        let book = self.books.iter().position(|book| book.isbn == isbn);
        match (member, book) {
            (Some(member), Some(book)) => Ok((member, book)),
            _ => {
                warn!("Invalid loan request: member {} / isbn {}", member_id, isbn);
                Err(Error::invalid_borrow_request(member_id, isbn))
            }
        }
    }

    /// Lend the book with `isbn` to the member with `member_id`.
    ///
    /// The book list is re-rendered whenever both lookups succeed, even if the
    /// book turns out to be unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBorrowRequest`] if either lookup misses and
    /// [`Error::BookUnavailable`] if the book is already out.
    pub fn borrow_book(&mut self, member_id: &str, isbn: &str) -> Result<Notice> {
        let (m, b) = self.loan_parties(member_id, isbn)?;
        let member = &mut self.members[m];
        let book = &mut self.books[b];

        let result = if member.borrow_book(book) {
            info!("{} borrowed {}", member.name, book.title);
            let notice = Notice::Borrowed {
                title: book.title.clone(),
                isbn: book.isbn.clone(),
                borrower: Some(member.name.clone()),
            };
            self.renderer.notify(&notice);
            Ok(notice)
        } else {
            warn!("{} is currently not available", book.title);
            Err(Error::book_unavailable(&book.title))
        };

        self.display_books();
        result
    }

    /// Take back the book with `isbn` from the member with `member_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBorrowRequest`] if either lookup misses and
    /// [`Error::BookNotBorrowed`] if the member does not hold the book.
    pub fn return_book(&mut self, member_id: &str, isbn: &str) -> Result<Notice> {
        let (m, b) = self.loan_parties(member_id, isbn)?;
        let member = &mut self.members[m];
        let book = &mut self.books[b];

        if !member.holds(isbn) {
            warn!("{} does not hold {}", member.name, book.title);
            return Err(Error::book_not_borrowed(&book.title));
        }
        member.return_book(book);
        info!("{} returned {}", member.name, book.title);

        let notice = Notice::Returned {
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            borrower: Some(member.name.clone()),
        };
        self.renderer.notify(&notice);
        self.display_books();
        Ok(notice)
    }

    /// Render every book with its availability.
    pub fn display_books(&mut self) {
        let items: Vec<String> = self.books.iter().map(Book::describe).collect();
        self.renderer.render_list(ListId::Books, &items);
    }

    /// Render every member.
    pub fn display_members(&mut self) {
        let items: Vec<String> = self.members.iter().map(Member::describe).collect();
        self.renderer.render_list(ListId::Members, &items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use pretty_assertions::assert_eq;

    const DUNE: &str = "978-0441013593";
    const EMMA: &str = "978-0141439587";

    fn library() -> Library<RecordingRenderer> {
        crate::logging::init_test_logging();
        let mut library = Library::new(RecordingRenderer::new());
        library.add_book(Book::new("Dune", "Frank Herbert", DUNE));
        library.add_book(Book::new("Emma", "Jane Austen", EMMA));
        library.add_member(Member::new("Ada", "M-1"));
        library.add_member(Member::new("Grace", "M-2"));
        library
    }

    #[test]
    fn test_member_borrow_and_return() {
        let mut member = Member::new("Ada", "M-1");
        let mut book = Book::new("Dune", "Frank Herbert", DUNE);

        assert!(member.borrow_book(&mut book));
        assert!(!book.is_available);
        assert_eq!(member.borrowed_books, vec![DUNE.to_string()]);

        assert!(!member.borrow_book(&mut book));
        assert_eq!(member.borrowed_books.len(), 1);

        member.return_book(&mut book);
        assert!(book.is_available);
        assert!(member.borrowed_books.is_empty());
    }

    #[test]
    fn test_renders_on_add() {
        let library = library();
        assert_eq!(
            library.renderer().list(ListId::Books).unwrap(),
            &[
                format!("Dune by Frank Herbert (ISBN: {DUNE}) - Available"),
                format!("Emma by Jane Austen (ISBN: {EMMA}) - Available"),
            ]
        );
        assert_eq!(
            library.renderer().list(ListId::Members).unwrap(),
            &["Ada (ID: M-1)".to_string(), "Grace (ID: M-2)".to_string()]
        );
    }

    #[test]
    fn test_borrow_book() {
        let mut library = library();
        let notice = library.borrow_book("M-1", DUNE).unwrap();

        assert_eq!(notice.to_string(), "Ada successfully borrowed Dune.");
        assert!(!library.find_book_by_isbn(DUNE).unwrap().is_available);
        assert!(library.find_member_by_id("M-1").unwrap().holds(DUNE));
        assert_eq!(
            library.renderer().list(ListId::Books).unwrap()[0],
            format!("Dune by Frank Herbert (ISBN: {DUNE}) - Borrowed")
        );
    }

    #[test]
    fn test_borrow_twice_fails_without_change() {
        let mut library = library();
        library.borrow_book("M-1", DUNE).unwrap();

        let err = library.borrow_book("M-2", DUNE).unwrap_err();
        assert!(matches!(err, Error::BookUnavailable { .. }));
        assert_eq!(err.to_string(), "Dune is currently not available");
        assert!(library.find_member_by_id("M-2").unwrap().borrowed_books.is_empty());
        assert_eq!(
            library.find_member_by_id("M-1").unwrap().borrowed_books,
            vec![DUNE.to_string()]
        );
        assert_eq!(library.renderer().notices().len(), 1);
    }

    #[test]
    fn test_borrow_with_unknown_keys() {
        let mut library = library();
        let renders = library.renderer().render_count();

        assert!(matches!(
            library.borrow_book("M-9", DUNE),
            Err(Error::InvalidBorrowRequest { .. })
        ));
        assert!(matches!(
            library.borrow_book("M-1", "000"),
            Err(Error::InvalidBorrowRequest { .. })
        ));
        assert_eq!(library.renderer().render_count(), renders);
    }

    #[test]
    fn test_return_book() {
        let mut library = library();
        library.borrow_book("M-1", DUNE).unwrap();
        library.borrow_book("M-1", EMMA).unwrap();

        let notice = library.return_book("M-1", DUNE).unwrap();
        assert_eq!(notice.to_string(), "Ada returned Dune.");
        assert!(library.find_book_by_isbn(DUNE).unwrap().is_available);
        assert_eq!(
            library.find_member_by_id("M-1").unwrap().borrowed_books,
            vec![EMMA.to_string()]
        );
    }

    #[test]
    fn test_return_book_not_held() {
        let mut library = library();
        library.borrow_book("M-1", DUNE).unwrap();

        let err = library.return_book("M-2", DUNE).unwrap_err();
        assert!(matches!(err, Error::BookNotBorrowed { .. }));
        assert!(!library.find_book_by_isbn(DUNE).unwrap().is_available);
    }

    #[test]
    fn test_borrowed_books() {
        let mut library = library();
        library.borrow_book("M-2", EMMA).unwrap();

        let titles: Vec<&str> = library
            .borrowed_books("M-2")
            .unwrap()
            .into_iter()
            .map(|book| book.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Emma"]);

        let err = library.borrowed_books("M-9").unwrap_err();
        assert!(matches!(err, Error::MemberNotFound { ref member_id } if member_id == "M-9"));
    }
}
