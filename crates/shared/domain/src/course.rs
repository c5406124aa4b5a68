//! Curriculum and course entities scraped from the course system.

use serde::{Deserialize, Serialize};

/// One academic term a student has courses in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Curriculum {
    /// Academic year, e.g. "114"
    pub year: String,
    /// Semester within the year, e.g. "1"
    pub semester: String,
}

impl Curriculum {
    pub fn new(year: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            semester: semester.into(),
        }
    }
}

/// Day of the week a course meets on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Days in the order the course table lists them
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];
}

/// Time slots a course occupies on one weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CoursePeriod {
    pub weekday: Weekday,
    /// Slot labels as printed by the portal, e.g. ["2", "3", "4"]
    pub slots: Vec<String>,
}

/// Normalized course entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CourseInfo {
    pub id: String,
    pub name: String,
    pub stage: String,
    pub credit: String,
    pub hours: String,
    /// Requirement marker (required, elective, ...)
    pub category: String,
    pub teachers: Vec<String>,
    pub classes: Vec<String>,
    pub periods: Vec<CoursePeriod>,
    pub classrooms: Vec<String>,
    pub enrolled: String,
    pub withdrawn: String,
    pub language: String,
    pub remark: String,
}

/// Parameters of a curriculum or course lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    /// Student whose credentials open the session
    pub student_id: String,
    /// Student whose data is looked up; empty means self
    pub target_student_id: String,
    pub year: Option<String>,
    pub semester: Option<String>,
}

impl CourseQuery {
    /// Create a self lookup without a term selector
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            ..Default::default()
        }
    }

    /// Look up another student
    pub fn with_target(mut self, target_student_id: impl Into<String>) -> Self {
        self.target_student_id = target_student_id.into();
        self
    }

    /// Restrict the lookup to one term
    pub fn with_term(mut self, year: impl Into<String>, semester: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self.semester = Some(semester.into());
        self
    }

    /// Student the lookup is about. Falls back to the requester.
    pub fn target(&self) -> &str {
        if self.target_student_id.is_empty() {
            &self.student_id
        } else {
            &self.target_student_id
        }
    }

    pub fn year(&self) -> &str {
        self.year.as_deref().unwrap_or_default()
    }

    pub fn semester(&self) -> &str {
        self.semester.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults_to_self() {
        let query = CourseQuery::new("A123");
        assert_eq!(query.target(), "A123");
    }

    #[test]
    fn test_target_uses_explicit_student() {
        let query = CourseQuery::new("A123").with_target("B456");
        assert_eq!(query.target(), "B456");
    }

    #[test]
    fn test_term_accessors() {
        let query = CourseQuery::new("A123");
        assert_eq!(query.year(), "");
        assert_eq!(query.semester(), "");

        let query = query.with_term("114", "1");
        assert_eq!(query.year(), "114");
        assert_eq!(query.semester(), "1");
    }

    #[test]
    fn test_weekday_serializes_lowercase() {
        let json = serde_json::to_string(&Weekday::Wednesday).unwrap();
        assert_eq!(json, "\"wednesday\"");
    }
}
