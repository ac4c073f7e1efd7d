//! Error types for recordkeep.
//!
//! Every manager reports a miss or a refused mutation through this enum instead
//! of a blocking alert. Callers decide how to surface it.

use thiserror::Error;

/// The main error type for recordkeep operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Event Errors ===
    /// No event carries the given title.
    #[error("event not found: {title}")]
    EventNotFound {
        /// Title that was looked up.
        title: String,
    },

    // === Book Errors ===
    /// No book matches the given key (title or ISBN, depending on the catalog).
    #[error("book not found: {key}")]
    BookNotFound {
        /// Title or ISBN that was looked up.
        key: String,
    },

    /// The book is already out on loan.
    #[error("{title} is currently not available")]
    BookUnavailable {
        /// Title of the requested book.
        title: String,
    },

    /// The book is not on loan, so it cannot be returned.
    #[error("{title} is not currently borrowed")]
    BookNotBorrowed {
        /// Title of the book.
        title: String,
    },

    /// No library member with this ID.
    #[error("member not found: {member_id}")]
    MemberNotFound {
        /// Member ID that was looked up.
        member_id: String,
    },

    /// Either the member or the book of a loan request is unknown.
    #[error("invalid member ID or book ISBN (member: {member_id}, isbn: {isbn})")]
    InvalidBorrowRequest {
        /// Member ID from the request.
        member_id: String,
        /// ISBN from the request.
        isbn: String,
    },

    // === Inventory Errors ===
    /// No product carries the given name.
    #[error("product not found: {name}")]
    ProductNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// Merging two stock counts would overflow.
    #[error("quantity overflow for {name}: {current} + {added}")]
    QuantityOverflow {
        /// Product name.
        name: String,
        /// Quantity on hand.
        current: u32,
        /// Quantity being added.
        added: u32,
    },

    /// A quantity field did not hold a non-negative integer.
    #[error("invalid quantity: {value:?}")]
    InvalidQuantity {
        /// The raw field value.
        value: String,
    },

    // === Student Errors ===
    /// No student matches the given key (name or ID, depending on the manager).
    #[error("student not found: {key}")]
    StudentNotFound {
        /// Name or ID that was looked up.
        key: String,
    },

    /// No course carries the given code.
    #[error("course not found: {code}")]
    CourseNotFound {
        /// Code that was looked up.
        code: String,
    },

    // === Form Errors ===
    /// A numeric form field did not hold a non-negative integer.
    #[error("invalid {field}: {value:?}")]
    InvalidNumber {
        /// Name of the form field.
        field: &'static str,
        /// The raw field value.
        value: String,
    },

    /// A form submission could not be decoded.
    #[error("invalid form on line {line}: {source}")]
    InvalidForm {
        /// One-based line number within the replayed stream.
        line: usize,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or stream operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for recordkeep operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an event-not-found error.
    #[must_use]
    pub fn event_not_found(title: impl Into<String>) -> Self {
        Self::EventNotFound {
            title: title.into(),
        }
    }

    /// Create a book-not-found error.
    #[must_use]
    pub fn book_not_found(key: impl Into<String>) -> Self {
        Self::BookNotFound { key: key.into() }
    }

    /// Create a book-unavailable error.
    #[must_use]
    pub fn book_unavailable(title: impl Into<String>) -> Self {
        Self::BookUnavailable {
            title: title.into(),
        }
    }

    /// Create a book-not-borrowed error.
    #[must_use]
    pub fn book_not_borrowed(title: impl Into<String>) -> Self {
        Self::BookNotBorrowed {
            title: title.into(),
        }
    }

    /// Create a member-not-found error.
    #[must_use]
    pub fn member_not_found(member_id: impl Into<String>) -> Self {
        Self::MemberNotFound {
            member_id: member_id.into(),
        }
    }

    /// Create an invalid loan request error.
    #[must_use]
    pub fn invalid_borrow_request(member_id: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self::InvalidBorrowRequest {
            member_id: member_id.into(),
            isbn: isbn.into(),
        }
    }

    /// Create a product-not-found error.
    #[must_use]
    pub fn product_not_found(name: impl Into<String>) -> Self {
        Self::ProductNotFound { name: name.into() }
    }

    /// Create an invalid quantity error.
    #[must_use]
    pub fn invalid_quantity(value: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            value: value.into(),
        }
    }

    /// Create a student-not-found error.
    #[must_use]
    pub fn student_not_found(key: impl ToString) -> Self {
        Self::StudentNotFound {
            key: key.to_string(),
        }
    }

    /// Create a course-not-found error.
    #[must_use]
    pub fn course_not_found(code: impl Into<String>) -> Self {
        Self::CourseNotFound { code: code.into() }
    }

    /// Create an invalid numeric field error.
    #[must_use]
    pub fn invalid_number(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field,
            value: value.into(),
        }
    }

    /// Check if this error is a lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound { .. }
                | Self::BookNotFound { .. }
                | Self::MemberNotFound { .. }
                | Self::InvalidBorrowRequest { .. }
                | Self::ProductNotFound { .. }
                | Self::StudentNotFound { .. }
                | Self::CourseNotFound { .. }
        )
    }

    /// Check if this error was caused by bad input rather than manager state.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuantity { .. } | Self::InvalidNumber { .. } | Self::InvalidForm { .. }
        )
    }
}
