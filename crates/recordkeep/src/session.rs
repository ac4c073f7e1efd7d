//! Demo sessions: one manager, its sample data, and a stream of forms.

use std::io::BufRead;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::{Event, EventManager};
use crate::forms::{
    EventForm, Form, InventoryForm, LibraryForm, LmsForm, RegistrationForm, RosterForm,
};
use crate::inventory::Inventory;
use crate::library;
use crate::lms;
use crate::registration::{self, Course};
use crate::render::Renderer;
use crate::roster;

/// The available demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Demo {
    /// Event tracking.
    Events,
    /// Title-keyed lending catalog.
    Lms,
    /// Member-tracking library.
    Library,
    /// Stock counts.
    Inventory,
    /// Students with grades.
    Roster,
    /// Course registration.
    Registration,
}

impl Demo {
    /// Every demo, in display order.
    pub const ALL: [Demo; 6] = [
        Self::Events,
        Self::Lms,
        Self::Library,
        Self::Inventory,
        Self::Roster,
        Self::Registration,
    ];
}

impl std::fmt::Display for Demo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Events => write!(f, "events"),
            Self::Lms => write!(f, "lms"),
            Self::Library => write!(f, "library"),
            Self::Inventory => write!(f, "inventory"),
            Self::Roster => write!(f, "roster"),
            Self::Registration => write!(f, "registration"),
        }
    }
}

/// A form that could not be applied during a replay.
#[derive(Debug)]
pub struct Rejected {
    /// One-based line number.
    pub line: usize,
    /// Why it was rejected.
    pub error: Error,
}

/// Outcome of [`Workspace::replay`].
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// Forms applied successfully.
    pub applied: usize,
    /// Forms rejected, in stream order.
    pub rejected: Vec<Rejected>,
    /// Whether the replay stopped at the first rejection.
    pub stopped_early: bool,
}

impl ReplayReport {
    /// Whether every form was applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// The manager of one demo.
#[derive(Debug)]
pub enum Workspace<R: Renderer> {
    /// Event tracking.
    Events(EventManager<R>),
    /// Title-keyed lending catalog.
    Lms(lms::Library<R>),
    /// Member-tracking library.
    Library(library::Library<R>),
    /// Stock counts.
    Inventory(Inventory<R>),
    /// Students with grades.
    Roster(roster::StudentManager<R>),
    /// Course registration.
    Registration(registration::StudentManager<R>),
}

fn apply_form<R, F>(target: &mut F::Target, line: usize, text: &str) -> Result<()>
where
    R: Renderer,
    F: Form<R>,
{
    let form: F = serde_json::from_str(text).map_err(|source| Error::InvalidForm { line, source })?;
    form.apply(target)
}

impl<R: Renderer> Workspace<R> {
    /// Create an empty workspace for `demo`.
    pub fn new(demo: Demo, renderer: R) -> Self {
        match demo {
            Demo::Events => Self::Events(EventManager::new(renderer)),
            Demo::Lms => Self::Lms(lms::Library::new(renderer)),
            Demo::Library => Self::Library(library::Library::new(renderer)),
            Demo::Inventory => Self::Inventory(Inventory::new(renderer)),
            Demo::Roster => Self::Roster(roster::StudentManager::new(renderer)),
            Demo::Registration => Self::Registration(registration::StudentManager::new(renderer)),
        }
    }

    /// Which demo this workspace runs.
    #[must_use]
    pub fn demo(&self) -> Demo {
        match self {
            Self::Events(_) => Demo::Events,
            Self::Lms(_) => Demo::Lms,
            Self::Library(_) => Demo::Library,
            Self::Inventory(_) => Demo::Inventory,
            Self::Roster(_) => Demo::Roster,
            Self::Registration(_) => Demo::Registration,
        }
    }

    /// Load the sample records the demo starts with.
    ///
    /// The catalog, library and inventory demos start empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if a sample record is rejected by its manager.
    pub fn seed(&mut self) -> Result<()> {
        debug!("Seeding {} demo", self.demo());
        match self {
            Self::Events(events) => {
                let mut birthday =
                    Event::new(1, "CHIDERAS DAY", "May 24", "A day to remember a queen")
                        .with_attendees(["Babatuday", "Yenka"]);
                birthday.register_attendee("Tudka");
                birthday.mark_as_completed();
                events.add_event(birthday);
            }
            Self::Roster(roster) => {
                roster.add_student(roster::Student::new("damian", 30, "3"));
            }
            Self::Registration(registry) => {
                registry.add_student(registration::Student::new(234, "Okpala"));
                registry.add_student(registration::Student::new(651, "Chibuike"));
                registry.add_course(Course::new("Chemistry", "CHM101"));
                registry.add_course(Course::new("Biology", "BIO101"));
                registry.enroll_course(234, "CHM101")?;
                registry.enroll_course(234, "BIO101")?;
                registry.enroll_course(651, "BIO101")?;
            }
            Self::Lms(_) | Self::Library(_) | Self::Inventory(_) => {}
        }
        Ok(())
    }

    /// Decode one JSON form and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidForm`] if the text is not a form of this demo,
    /// otherwise whatever the manager rejects.
    pub fn apply_line(&mut self, line: usize, text: &str) -> Result<()> {
        match self {
            Self::Events(m) => apply_form::<R, EventForm>(m, line, text),
            Self::Lms(m) => apply_form::<R, LmsForm>(m, line, text),
            Self::Library(m) => apply_form::<R, LibraryForm>(m, line, text),
            Self::Inventory(m) => apply_form::<R, InventoryForm>(m, line, text),
            Self::Roster(m) => apply_form::<R, RosterForm>(m, line, text),
            Self::Registration(m) => apply_form::<R, RegistrationForm>(m, line, text),
        }
    }

    /// Apply a JSON-lines stream of forms.
    ///
    /// Blank lines and lines starting with `#` are skipped. A rejected form
    /// is recorded and the replay moves on, unless `stop_on_error` is set.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading the stream fails.
    pub fn replay(&mut self, reader: impl BufRead, stop_on_error: bool) -> Result<ReplayReport> {
        let mut report = ReplayReport::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let line_no = index + 1;
            match self.apply_line(line_no, text) {
                Ok(()) => report.applied += 1,
                Err(error) => {
                    warn!("Rejected form on line {}: {}", line_no, error);
                    report.rejected.push(Rejected {
                        line: line_no,
                        error,
                    });
                    if stop_on_error {
                        report.stopped_early = true;
                        break;
                    }
                }
            }
        }

        info!(
            "Replayed {} forms into {} ({} rejected)",
            report.applied,
            self.demo(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Render every list the demo owns.
    pub fn display(&mut self) {
        match self {
            Self::Events(m) => m.display_events(),
            Self::Lms(m) => m.display_books(),
            Self::Library(m) => {
                m.display_books();
                m.display_members();
            }
            Self::Inventory(m) => m.display_products(),
            Self::Roster(m) => m.display_students(),
            Self::Registration(m) => m.display_students(),
        }
    }

    /// The manager's records as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn snapshot(&self) -> Result<serde_json::Value> {
        let value = match self {
            Self::Events(m) => serde_json::to_value(m)?,
            Self::Lms(m) => serde_json::to_value(m)?,
            Self::Library(m) => serde_json::to_value(m)?,
            Self::Inventory(m) => serde_json::to_value(m)?,
            Self::Roster(m) => serde_json::to_value(m)?,
            Self::Registration(m) => serde_json::to_value(m)?,
        };
        Ok(value)
    }
}
