//! Typed form submissions.
//!
//! Each module gets one enum of the forms a user can submit against it. A
//! submission is a JSON object tagged by `form`, for example
//! `{"form": "add-product", "name": "Pen", "quantity": "5"}`. Numeric fields
//! accept either a JSON number or the raw text a form field would hold.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::events::{Event, EventManager};
use crate::inventory::{parse_quantity, Inventory, Product};
use crate::library::{self, Member};
use crate::lms;
use crate::registration::{self, Course};
use crate::render::Renderer;
use crate::roster::{self, StudentUpdate};

/// A submission that knows how to apply itself to its manager.
pub trait Form<R: Renderer>: DeserializeOwned {
    /// The manager this form mutates.
    type Target;

    /// Apply the submission.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying manager operation rejects, or an input
    /// error for unparseable numeric fields.
    fn apply(self, target: &mut Self::Target) -> Result<()>;
}

/// A numeric field as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    /// Already a number.
    Number(u32),
    /// Raw field text.
    Text(String),
}

impl NumberField {
    /// Resolve to a number, reporting `field` on failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumber`] if the text is not a non-negative integer.
    pub fn resolve(&self, field: &'static str) -> Result<u32> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::invalid_number(field, raw.clone())),
        }
    }

    fn resolve_quantity(&self) -> Result<u32> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(raw) => parse_quantity(raw),
        }
    }
}

/// Forms for [`EventManager`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum EventForm {
    /// Create an event.
    AddEvent {
        /// Event ID.
        id: NumberField,
        /// Title.
        title: String,
        /// Date text.
        date: String,
        /// Description.
        desc: String,
        /// Initial attendees.
        #[serde(default)]
        attendees: Vec<String>,
    },
    /// Add an attendee to an event.
    RegisterAttendee {
        /// Event title.
        title: String,
        /// Attendee name.
        attendee: String,
    },
    /// Mark an event completed.
    MarkCompleted {
        /// Event title.
        title: String,
    },
    /// Remove an event.
    RemoveEvent {
        /// Event title.
        title: String,
    },
}

impl<R: Renderer> Form<R> for EventForm {
    type Target = EventManager<R>;

    fn apply(self, events: &mut Self::Target) -> Result<()> {
        match self {
            Self::AddEvent {
                id,
                title,
                date,
                desc,
                attendees,
            } => {
                let event =
                    Event::new(id.resolve("id")?, title, date, desc).with_attendees(attendees);
                events.add_event(event);
                events.display_events();
            }
            Self::RegisterAttendee { title, attendee } => {
                events.register_attendee(&title, attendee)?;
            }
            Self::MarkCompleted { title } => events.mark_completed(&title)?,
            Self::RemoveEvent { title } => {
                events.remove_event(&title)?;
            }
        }
        Ok(())
    }
}

/// Forms for the title-keyed [`lms::Library`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum LmsForm {
    /// Add a book.
    AddBook {
        /// Title.
        title: String,
        /// Author.
        author: String,
        /// ISBN.
        isbn: String,
    },
    /// Lend a book by title.
    BorrowBook {
        /// Title.
        title: String,
    },
    /// Return a book by title.
    ReturnBook {
        /// Title.
        title: String,
    },
}

impl<R: Renderer> Form<R> for LmsForm {
    type Target = lms::Library<R>;

    fn apply(self, library: &mut Self::Target) -> Result<()> {
        match self {
            Self::AddBook {
                title,
                author,
                isbn,
            } => library.add_book(lms::Book::new(title, author, isbn)),
            Self::BorrowBook { title } => {
                library.borrow_book(&title)?;
            }
            Self::ReturnBook { title } => {
                library.return_book(&title)?;
            }
        }
        Ok(())
    }
}

/// Forms for the member-tracking [`library::Library`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum LibraryForm {
    /// Add a book.
    AddBook {
        /// Title.
        title: String,
        /// Author.
        author: String,
        /// ISBN.
        isbn: String,
    },
    /// Add a member.
    AddMember {
        /// Member name.
        name: String,
        /// Member ID.
        member_id: String,
    },
    /// Lend a book to a member.
    BorrowBook {
        /// Member ID.
        member_id: String,
        /// ISBN.
        isbn: String,
    },
    /// Take a book back from a member.
    ReturnBook {
        /// Member ID.
        member_id: String,
        /// ISBN.
        isbn: String,
    },
}

impl<R: Renderer> Form<R> for LibraryForm {
    type Target = library::Library<R>;

    fn apply(self, library: &mut Self::Target) -> Result<()> {
        match self {
            Self::AddBook {
                title,
                author,
                isbn,
            } => library.add_book(library::Book::new(title, author, isbn)),
            Self::AddMember { name, member_id } => library.add_member(Member::new(name, member_id)),
            Self::BorrowBook { member_id, isbn } => {
                library.borrow_book(&member_id, &isbn)?;
            }
            Self::ReturnBook { member_id, isbn } => {
                library.return_book(&member_id, &isbn)?;
            }
        }
        Ok(())
    }
}

/// Forms for [`Inventory`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum InventoryForm {
    /// Add stock, merging into an existing product of the same name.
    AddProduct {
        /// Product name.
        name: String,
        /// Units to add.
        quantity: NumberField,
    },
    /// Overwrite the stock of an existing product.
    UpdateProduct {
        /// Product name.
        name: String,
        /// New unit count.
        quantity: NumberField,
    },
}

impl<R: Renderer> Form<R> for InventoryForm {
    type Target = Inventory<R>;

    fn apply(self, inventory: &mut Self::Target) -> Result<()> {
        match self {
            Self::AddProduct { name, quantity } => {
                inventory.add_product(Product::new(name, quantity.resolve_quantity()?))
            }
            Self::UpdateProduct { name, quantity } => {
                inventory.update_product_quantity(&name, quantity.resolve_quantity()?)
            }
        }
    }
}

/// Forms for the grade-tracking [`roster::StudentManager`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum RosterForm {
    /// Add a student.
    AddStudent {
        /// Name.
        name: String,
        /// Age.
        age: NumberField,
        /// Grade.
        grade: String,
    },
    /// Update a student found by name.
    UpdateStudent {
        /// Current name.
        name: String,
        /// Replacement name.
        #[serde(default)]
        new_name: Option<String>,
        /// Replacement age; `0` keeps the current one.
        #[serde(default)]
        new_age: Option<NumberField>,
        /// Replacement grade.
        #[serde(default)]
        new_grade: Option<String>,
    },
}

impl<R: Renderer> Form<R> for RosterForm {
    type Target = roster::StudentManager<R>;

    fn apply(self, roster: &mut Self::Target) -> Result<()> {
        match self {
            Self::AddStudent { name, age, grade } => {
                roster.add_student(roster::Student::new(name, age.resolve("age")?, grade));
                Ok(())
            }
            Self::UpdateStudent {
                name,
                new_name,
                new_age,
                new_grade,
            } => {
                let update = StudentUpdate {
                    new_name,
                    new_age: new_age.map(|age| age.resolve("age")).transpose()?,
                    new_grade,
                };
                roster.update_student(&name, update)
            }
        }
    }
}

/// Forms for the course-registration [`registration::StudentManager`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum RegistrationForm {
    /// Register a student.
    AddStudent {
        /// Student ID.
        id: NumberField,
        /// Name.
        name: String,
    },
    /// Add a course to the catalog.
    AddCourse {
        /// Course name.
        name: String,
        /// Course code.
        code: String,
    },
    /// Enroll a student in a course.
    Enroll {
        /// Student ID.
        id: NumberField,
        /// Course code.
        code: String,
    },
}

impl<R: Renderer> Form<R> for RegistrationForm {
    type Target = registration::StudentManager<R>;

    fn apply(self, registry: &mut Self::Target) -> Result<()> {
        match self {
            Self::AddStudent { id, name } => {
                registry.add_student(registration::Student::new(id.resolve("id")?, name));
            }
            Self::AddCourse { name, code } => registry.add_course(Course::new(name, code)),
            Self::Enroll { id, code } => registry.enroll_course(id.resolve("id")?, &code)?,
        }
        registry.display_students();
        Ok(())
    }
}
