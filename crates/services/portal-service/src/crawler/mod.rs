//! Crawler layer: fetching course system pages and parsing them.
//!
//! Fetching and parsing are separate capabilities so each side can be
//! swapped independently. Fetchers talk to the network; parsers are pure.

mod course;
mod curriculum;

use async_trait::async_trait;

use common::AppResult;
use domain::{CourseInfo, Curriculum};

pub use course::{extract_rows, CourseTableParser};
pub use curriculum::CurriculumParser;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Raw HTML of a student's curriculum listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumDocument(pub String);

impl CurriculumDocument {
    pub fn html(&self) -> &str {
        &self.0
    }
}

/// One row of the course table, cell texts in column order.
///
/// Multi-valued cells keep one value per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoRow {
    pub cells: Vec<String>,
}

impl InfoRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell text at `index`, empty when the row is shorter
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// Retrieves the curriculum listing of a student.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_document(&self, target: &str) -> AppResult<CurriculumDocument>;
}

/// Turns a curriculum listing into the terms it names.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait EntryParser: Send + Sync {
    fn parse_entries(&self, document: &CurriculumDocument) -> Vec<Curriculum>;
}

/// Retrieves the course table rows of a student for one term.
///
/// Empty `year`/`semester` select the current term.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RowFetcher: Send + Sync {
    async fn fetch_rows(&self, target: &str, year: &str, semester: &str)
        -> AppResult<Vec<InfoRow>>;
}

/// Turns course table rows into course entries.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait CourseParser: Send + Sync {
    fn parse_courses(&self, rows: &[InfoRow]) -> Vec<CourseInfo>;
}
