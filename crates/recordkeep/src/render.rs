//! Rendering seam between managers and whatever displays them.
//!
//! Managers never look up output targets themselves. Each one owns a
//! [`Renderer`] and hands it the full contents of a named list after every
//! mutation, plus a [`Notice`] for successful loans and returns.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use tracing::warn;

/// A list a manager can render into.
///
/// The string forms are the ids of the page elements each list renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListId {
    /// Pending events.
    Events,
    /// The LMS book catalog.
    LmsBooks,
    /// The library's books with availability.
    Books,
    /// The library's members.
    Members,
    /// Products on hand.
    Inventory,
    /// Students with their ages and grades.
    Roster,
    /// Students with their enrollment counts.
    Students,
}

impl ListId {
    /// The element id this list renders into.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events-list",
            Self::LmsBooks => "lms-books",
            Self::Books => "books-list",
            Self::Members => "members-list",
            Self::Inventory => "inventory-list",
            Self::Roster => "display-container",
            Self::Students => "students-list",
        }
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing message about a successful operation.
///
/// Failures travel as [`crate::Error`]; notices only ever report success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A book went out on loan.
    Borrowed {
        /// Title of the book.
        title: String,
        /// ISBN of the book.
        isbn: String,
        /// Member name, when the loan is tied to a member.
        #[serde(skip_serializing_if = "Option::is_none")]
        borrower: Option<String>,
    },
    /// A book came back.
    Returned {
        /// Title of the book.
        title: String,
        /// ISBN of the book.
        isbn: String,
        /// Member name, when the loan is tied to a member.
        #[serde(skip_serializing_if = "Option::is_none")]
        borrower: Option<String>,
    },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Borrowed {
                title,
                borrower: Some(name),
                ..
            } => write!(f, "{name} successfully borrowed {title}."),
            Self::Borrowed {
                title,
                isbn,
                borrower: None,
            } => write!(
                f,
                "A book named {title} with the ISBN of {isbn} is being borrowed out"
            ),
            Self::Returned {
                title,
                borrower: Some(name),
                ..
            } => write!(f, "{name} returned {title}."),
            Self::Returned {
                title,
                isbn,
                borrower: None,
            } => write!(
                f,
                "A book named {title} with the ISBN of {isbn} has been returned"
            ),
        }
    }
}

/// Receives list renderings and notices from a manager.
pub trait Renderer {
    /// Replace the contents of `list` with `items`.
    fn render_list(&mut self, list: ListId, items: &[String]);

    /// Surface a notice. Ignored by default.
    fn notify(&mut self, notice: &Notice) {
        let _ = notice;
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render_list(&mut self, list: ListId, items: &[String]) {
        (**self).render_list(list, items);
    }

    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice);
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render_list(&mut self, list: ListId, items: &[String]) {
        (**self).render_list(list, items);
    }

    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_list(&mut self, _list: ListId, _items: &[String]) {}
}

/// Keeps the latest rendering of each list and every notice, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    lists: BTreeMap<ListId, Vec<String>>,
    notices: Vec<Notice>,
    renders: usize,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest rendering of `list`, or `None` if it was never rendered.
    #[must_use]
    pub fn list(&self, list: ListId) -> Option<&[String]> {
        self.lists.get(&list).map(Vec::as_slice)
    }

    /// Every notice received so far.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// How many times any list was rendered.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl Renderer for RecordingRenderer {
    fn render_list(&mut self, list: ListId, items: &[String]) {
        self.renders += 1;
        self.lists.insert(list, items.to_vec());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Prints renderings and notices to a writer.
///
/// Each rendering is a `[list-id]` header followed by one marked line per item.
/// Write failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct WriterRenderer<W: Write> {
    out: W,
    marker: String,
}

impl<W: Write> WriterRenderer<W> {
    /// Create a renderer that prefixes every item with `marker`.
    pub fn new(out: W, marker: impl Into<String>) -> Self {
        Self {
            out,
            marker: marker.into(),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_list(&mut self, list: ListId, items: &[String]) -> std::io::Result<()> {
        writeln!(self.out, "[{list}]")?;
        if items.is_empty() {
            writeln!(self.out, "(empty)")?;
        }
        for item in items {
            writeln!(self.out, "{}{item}", self.marker)?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for WriterRenderer<W> {
    fn render_list(&mut self, list: ListId, items: &[String]) {
        if let Err(e) = self.write_list(list, items) {
            warn!("Failed to render {}: {}", list, e);
        }
    }

    fn notify(&mut self, notice: &Notice) {
        if let Err(e) = writeln!(self.out, "! {notice}") {
            warn!("Failed to print notice: {}", e);
        }
    }
}
