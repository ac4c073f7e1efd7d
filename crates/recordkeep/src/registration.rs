//! Course registration.
//!
//! Students are keyed by numeric ID and courses by code. Enrollment copies the
//! course into the student's list; enrolling twice lists the course twice.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::render::{ListId, NullRenderer, Renderer};

/// A course students can enroll in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course name, e.g. "Chemistry".
    pub name: String,
    /// Course code, used as the lookup key.
    pub code: String,
}

impl Course {
    /// Create a course.
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// A registered student and the courses they are enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student ID, used as the lookup key.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Enrolled courses in enrollment order.
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Student {
    /// Create a student with no enrollments.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            courses: Vec::new(),
        }
    }

    fn describe(&self) -> String {
        format!(
            "Student: name - {}, id - {}, courses enrolled - {}",
            self.name,
            self.id,
            self.courses.len()
        )
    }
}

/// Students, the course catalog, and enrollments.
#[derive(Debug, Default, Serialize)]
pub struct StudentManager<R: Renderer = NullRenderer> {
    students: Vec<Student>,
    courses: Vec<Course>,
    #[serde(skip)]
    renderer: R,
}

impl<R: Renderer> StudentManager<R> {
    /// Create an empty registry rendering through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            students: Vec::new(),
            courses: Vec::new(),
            renderer,
        }
    }

    /// All students in insertion order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// The course catalog in insertion order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// The renderer this registry draws into.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Register a student.
    pub fn add_student(&mut self, student: Student) {
        debug!("Adding student {} ({})", student.name, student.id);
        self.students.push(student);
    }

    /// Add a course to the catalog.
    pub fn add_course(&mut self, course: Course) {
        debug!("Adding course {} ({})", course.name, course.code);
        self.courses.push(course);
    }

    /// First student with this ID.
    #[must_use]
    pub fn check_student(&self, id: u32) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    /// First course with this exact code.
    #[must_use]
    pub fn check_course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.code == code)
    }

    /// Enroll student `id` in course `code`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CourseNotFound`] or [`Error::StudentNotFound`] when a
    /// lookup misses. Nothing is changed in that case.
    pub fn enroll_course(&mut self, id: u32, code: &str) -> Result<()> {
        let Some(course) = self.check_course(code).cloned() else {
            warn!("Course not found: {}", code);
            return Err(Error::course_not_found(code));
        };
        let Some(student) = self.students.iter_mut().find(|student| student.id == id) else {
            warn!("Student not found: {}", id);
            return Err(Error::student_not_found(id));
        };
        debug!("Enrolling {} in {}", student.name, course.code);
        student.courses.push(course);
        Ok(())
    }

    /// Render every student with their enrollment count.
    pub fn display_students(&mut self) {
        let items: Vec<String> = self.students.iter().map(Student::describe).collect();
        self.renderer.render_list(ListId::Students, &items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use pretty_assertions::assert_eq;

    fn registry() -> StudentManager<RecordingRenderer> {
        let mut registry = StudentManager::new(RecordingRenderer::new());
        registry.add_student(Student::new(234, "Okpala"));
        registry.add_student(Student::new(651, "Chibuike"));
        registry.add_course(Course::new("Chemistry", "CHM101"));
        registry.add_course(Course::new("Biology", "BIO101"));
        registry
    }

    #[test]
    fn test_enroll_keeps_order() {
        let mut registry = registry();
        registry.enroll_course(234, "CHM101").unwrap();
        registry.enroll_course(234, "BIO101").unwrap();

        let codes: Vec<&str> = registry
            .check_student(234)
            .unwrap()
            .courses
            .iter()
            .map(|course| course.code.as_str())
            .collect();
        assert_eq!(codes, vec!["CHM101", "BIO101"]);
        assert!(registry.check_student(651).unwrap().courses.is_empty());
    }

    #[test]
    fn test_enroll_twice_duplicates() {
        let mut registry = registry();
        registry.enroll_course(651, "BIO101").unwrap();
        registry.enroll_course(651, "BIO101").unwrap();
        assert_eq!(registry.check_student(651).unwrap().courses.len(), 2);
    }

    #[test]
    fn test_enroll_unknown_student() {
        let mut registry = registry();
        let err = registry.enroll_course(999, "CHM101").unwrap_err();
        assert_eq!(err.to_string(), "student not found: 999");
    }

    #[test]
    fn test_enroll_unknown_course() {
        let mut registry = registry();
        let err = registry.enroll_course(234, "PHY101").unwrap_err();
        assert!(matches!(err, Error::CourseNotFound { .. }));
        assert!(registry.check_student(234).unwrap().courses.is_empty());
    }

    #[test]
    fn test_display_students_counts_courses() {
        let mut registry = registry();
        registry.enroll_course(234, "CHM101").unwrap();
        registry.enroll_course(234, "BIO101").unwrap();
        registry.display_students();

        assert_eq!(
            registry.renderer().list(ListId::Students).unwrap(),
            &[
                "Student: name - Okpala, id - 234, courses enrolled - 2".to_string(),
                "Student: name - Chibuike, id - 651, courses enrolled - 0".to_string(),
            ]
        );
    }

    #[test]
    fn test_serialize_skips_renderer() {
        let mut registry = registry();
        registry.enroll_course(234, "CHM101").unwrap();

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["students"][0]["courses"][0]["code"], "CHM101");
        assert_eq!(json["courses"].as_array().unwrap().len(), 2);
        assert!(json.get("renderer").is_none());
    }
}
