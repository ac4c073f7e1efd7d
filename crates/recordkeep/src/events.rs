//! Event tracking.
//!
//! Events are kept in insertion order. Completed events stay in the list but
//! are never displayed.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::render::{ListId, NullRenderer, Renderer};

/// A scheduled event and who is coming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Caller-assigned identifier. Not required to be unique.
    pub id: u32,
    /// Title, used as the lookup key.
    pub title: String,
    /// Free-form date text, e.g. "May 24".
    pub date: String,
    /// What the event is about.
    pub desc: String,
    /// Attendee names in registration order.
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Whether the event has taken place.
    #[serde(default)]
    pub is_complete: bool,
}

impl Event {
    /// Create a pending event with no attendees.
    #[must_use]
    pub fn new(
        id: u32,
        title: impl Into<String>,
        date: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            date: date.into(),
            desc: desc.into(),
            attendees: Vec::new(),
            is_complete: false,
        }
    }

    /// Builder-style attendee list.
    #[must_use]
    pub fn with_attendees<I, S>(mut self, attendees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendees = attendees.into_iter().map(Into::into).collect();
        self
    }

    /// Add an attendee. Duplicates are allowed.
    pub fn register_attendee(&mut self, attendee: impl Into<String>) {
        self.attendees.push(attendee.into());
    }

    /// Mark the event as having taken place.
    pub fn mark_as_completed(&mut self) {
        self.is_complete = true;
    }

    /// The line shown for this event in the events list.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "This is an event named {} with an id of {}, happening on {}. The event is about {}",
            self.title, self.id, self.date, self.desc
        )
    }
}

/// Holds events and renders the pending ones.
#[derive(Debug, Default, Serialize)]
pub struct EventManager<R: Renderer = NullRenderer> {
    events: Vec<Event>,
    #[serde(skip)]
    renderer: R,
}

impl<R: Renderer> EventManager<R> {
    /// Create an empty manager rendering through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            events: Vec::new(),
            renderer,
        }
    }

    /// All events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events that have already taken place.
    pub fn completed_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|event| event.is_complete)
    }

    /// The renderer this manager draws into.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Append an event. No duplicate check on id or title.
    pub fn add_event(&mut self, event: Event) {
        debug!("Adding event {} ({})", event.title, event.id);
        self.events.push(event);
    }

    /// First event whose title matches exactly.
    #[must_use]
    pub fn find_event_by_title(&self, title: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.title == title)
    }

    /// Mutable form of [`Self::find_event_by_title`].
    pub fn find_event_by_title_mut(&mut self, title: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|event| event.title == title)
    }

    /// Remove and return the first event with this title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EventNotFound`] if no event has this title.
    pub fn remove_event(&mut self, title: &str) -> Result<Event> {
        let Some(index) = self.events.iter().position(|event| event.title == title) else {
            warn!("Cannot remove unknown event {}", title);
            return Err(Error::event_not_found(title));
        };
        let event = self.events.remove(index);
        debug!("Removed event {} ({})", event.title, event.id);
        self.display_events();
        Ok(event)
    }

    /// Register an attendee on the event with this title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EventNotFound`] if no event has this title.
    pub fn register_attendee(&mut self, title: &str, attendee: impl Into<String>) -> Result<()> {
        let event = self
            .find_event_by_title_mut(title)
            .ok_or_else(|| Error::event_not_found(title))?;
        event.register_attendee(attendee);
        debug!("{} now has {} attendees", title, event.attendees.len());
        Ok(())
    }

    /// Mark the event with this title as completed and drop it from the display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EventNotFound`] if no event has this title.
    pub fn mark_completed(&mut self, title: &str) -> Result<()> {
        let event = self
            .find_event_by_title_mut(title)
            .ok_or_else(|| Error::event_not_found(title))?;
        event.mark_as_completed();
        debug!("Marked event {} completed", title);
        self.display_events();
        Ok(())
    }

    /// Render every pending event. Completed events are skipped.
    pub fn display_events(&mut self) {
        let items: Vec<String> = self
            .events
            .iter()
            .filter(|event| !event.is_complete)
            .map(Event::describe)
            .collect();
        self.renderer.render_list(ListId::Events, &items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use pretty_assertions::assert_eq;

    fn birthday() -> Event {
        Event::new(1, "CHIDERAS DAY", "May 24", "A day to remember a queen")
            .with_attendees(["Babatuday", "Yenka"])
    }

    fn manager() -> EventManager<RecordingRenderer> {
        crate::logging::init_test_logging();
        EventManager::new(RecordingRenderer::new())
    }

    #[test]
    fn test_register_attendee_appends() {
        let mut event = birthday();
        event.register_attendee("Tudka");
        assert_eq!(event.attendees, vec!["Babatuday", "Yenka", "Tudka"]);
    }

    #[test]
    fn test_mark_as_completed_is_idempotent() {
        let mut event = birthday();
        event.mark_as_completed();
        event.mark_as_completed();
        assert!(event.is_complete);
    }

    #[test]
    fn test_find_event_by_title() {
        let mut events = manager();
        events.add_event(birthday());

        assert_eq!(events.find_event_by_title("CHIDERAS DAY").unwrap().id, 1);
        assert!(events.find_event_by_title("chideras day").is_none());
        assert!(events.find_event_by_title("Missing").is_none());
    }

    #[test]
    fn test_add_event_allows_duplicates() {
        let mut events = manager();
        events.add_event(birthday());
        events.add_event(birthday());
        assert_eq!(events.events().len(), 2);
    }

    #[test]
    fn test_remove_event() {
        let mut events = manager();
        events.add_event(birthday());
        events.add_event(Event::new(2, "Launch", "June 1", "Ship it"));

        let removed = events.remove_event("CHIDERAS DAY").unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(events.events().len(), 1);
        assert!(events.find_event_by_title("CHIDERAS DAY").is_none());
    }

    #[test]
    fn test_remove_missing_event() {
        let mut events = manager();
        events.add_event(birthday());

        let err = events.remove_event("Missing").unwrap_err();
        assert!(matches!(err, Error::EventNotFound { .. }));
        assert_eq!(events.events().len(), 1);
    }

    #[test]
    fn test_display_events_skips_completed() {
        let mut events = manager();
        events.add_event(birthday());
        events.add_event(Event::new(2, "Launch", "June 1", "Ship it"));

        events.display_events();
        assert_eq!(events.renderer().list(ListId::Events).unwrap().len(), 2);

        events.mark_completed("CHIDERAS DAY").unwrap();
        let rendered = events.renderer().list(ListId::Events).unwrap();
        assert_eq!(
            rendered,
            &["This is an event named Launch with an id of 2, happening on June 1. \
               The event is about Ship it"
                .to_string()]
        );
        assert_eq!(events.completed_events().count(), 1);
    }

    #[test]
    fn test_completed_event_never_displayed_again() {
        let mut events = manager();
        events.add_event(birthday());
        events.mark_completed("CHIDERAS DAY").unwrap();
        events.register_attendee("CHIDERAS DAY", "Tudka").unwrap();
        events.display_events();

        assert!(events.renderer().list(ListId::Events).unwrap().is_empty());
    }

    #[test]
    fn test_manager_level_operations_on_missing_event() {
        let mut events = manager();
        assert!(events
            .register_attendee("Missing", "Tudka")
            .unwrap_err()
            .is_not_found());
        assert!(events.mark_completed("Missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_event_deserialize_defaults() {
        let json = r#"{"id": 7, "title": "Retro", "date": "Fri", "desc": "Look back"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.attendees.is_empty());
        assert!(!event.is_complete);
    }
}
