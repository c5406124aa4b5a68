//! Domain layer - Portal results and curriculum entities.
//!
//! This crate contains pure data types with no infrastructure dependencies.
//! Everything the portal scraper produces ends up in one of these types.

pub mod constants;
pub mod course;
pub mod result;

pub use constants::*;
pub use course::{CourseInfo, CoursePeriod, CourseQuery, Curriculum, Weekday};
pub use result::PortalResult;
