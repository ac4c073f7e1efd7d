//! Students with ages and grades, keyed by name.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::render::{ListId, NullRenderer, Renderer};

/// A student on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Name, used as the lookup key.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Grade as entered, e.g. "3" or "B+".
    pub grade: String,
}

/// Replacement values for [`Student::update_details`].
///
/// A field only takes effect when it is present and non-empty (non-zero for
/// `age`). Anything else keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentUpdate {
    /// New name.
    pub new_name: Option<String>,
    /// New age.
    pub new_age: Option<u32>,
    /// New grade.
    pub new_grade: Option<String>,
}

impl Student {
    /// Create a roster entry.
    #[must_use]
    pub fn new(name: impl Into<String>, age: u32, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            grade: grade.into(),
        }
    }

    /// Apply every meaningful field of `update`.
    pub fn update_details(&mut self, update: StudentUpdate) {
        if let Some(name) = update.new_name.filter(|name| !name.is_empty()) {
            self.name = name;
        }
        if let Some(age) = update.new_age.filter(|age| *age != 0) {
            self.age = age;
        }
        if let Some(grade) = update.new_grade.filter(|grade| !grade.is_empty()) {
            self.grade = grade;
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} is {} years old, with a grade {}",
            self.name, self.age, self.grade
        )
    }
}

/// The roster and its display.
#[derive(Debug, Default, Serialize)]
pub struct StudentManager<R: Renderer = NullRenderer> {
    students: Vec<Student>,
    #[serde(skip)]
    renderer: R,
}

impl<R: Renderer> StudentManager<R> {
    /// Create an empty roster rendering through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            students: Vec::new(),
            renderer,
        }
    }

    /// All students in insertion order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// The renderer this roster draws into.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Add a student and re-render the roster.
    pub fn add_student(&mut self, student: Student) {
        debug!("Adding student {}", student.name);
        self.students.push(student);
        self.display_students();
    }

    /// Update the first student with this name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] if no student has this name.
    pub fn update_student(&mut self, name: &str, update: StudentUpdate) -> Result<()> {
        let Some(student) = self.students.iter_mut().find(|student| student.name == name) else {
            warn!("Student not found: {}", name);
            return Err(Error::student_not_found(name));
        };
        student.update_details(update);
        debug!("Updated student {} (now {})", name, student.name);
        self.display_students();
        Ok(())
    }

    /// First student with this exact name.
    #[must_use]
    pub fn find_student_by_name(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|student| student.name == name)
    }

    /// Render the whole roster, replacing the previous rendering.
    pub fn display_students(&mut self) {
        let items: Vec<String> = self.students.iter().map(Student::describe).collect();
        self.renderer.render_list(ListId::Roster, &items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use pretty_assertions::assert_eq;

    fn roster() -> StudentManager<RecordingRenderer> {
        let mut roster = StudentManager::new(RecordingRenderer::new());
        roster.add_student(Student::new("damian", 30, "3"));
        roster
    }

    #[test]
    fn test_update_details_only_truthy_fields() {
        let mut student = Student::new("damian", 30, "3");
        student.update_details(StudentUpdate {
            new_name: Some(String::new()),
            new_age: Some(0),
            new_grade: Some("A".to_string()),
        });
        assert_eq!(student, Student::new("damian", 30, "A"));

        student.update_details(StudentUpdate::default());
        assert_eq!(student, Student::new("damian", 30, "A"));
    }

    #[test]
    fn test_update_student_renames() {
        let mut roster = roster();
        roster
            .update_student(
                "damian",
                StudentUpdate {
                    new_name: Some("Damian".to_string()),
                    ..StudentUpdate::default()
                },
            )
            .unwrap();

        assert!(roster.find_student_by_name("damian").is_none());
        assert_eq!(roster.find_student_by_name("Damian").unwrap().age, 30);
    }

    #[test]
    fn test_update_missing_student() {
        let mut roster = roster();
        let err = roster
            .update_student("age", StudentUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::StudentNotFound { .. }));
    }

    #[test]
    fn test_display_replaces_previous_rendering() {
        let mut roster = roster();
        roster.add_student(Student::new("Ife", 21, "B"));
        roster.display_students();

        assert_eq!(
            roster.renderer().list(ListId::Roster).unwrap(),
            &[
                "damian is 30 years old, with a grade 3".to_string(),
                "Ife is 21 years old, with a grade B".to_string(),
            ]
        );
    }

    #[test]
    fn test_student_update_deserialize_partial() {
        let update: StudentUpdate = serde_json::from_str(r#"{"new_age": 31}"#).unwrap();
        assert_eq!(update.new_age, Some(31));
        assert!(update.new_name.is_none());
    }
}
