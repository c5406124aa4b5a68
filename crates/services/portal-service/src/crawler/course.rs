//! Course table: fetch, row extraction and course parsing.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use common::AppResult;
use domain::{CourseInfo, CoursePeriod, Weekday};

use super::{CourseParser, InfoRow, RowFetcher};
use crate::client::PortalSession;

/// Course system page format showing one term's course table
const COURSE_TABLE_FORMAT: &str = "-2";

/// Rows shorter than this are headers, subtotals or layout
const MIN_COURSE_CELLS: usize = 16;

// Column layout of the course table
const COL_ID: usize = 0;
const COL_NAME: usize = 1;
const COL_STAGE: usize = 2;
const COL_CREDIT: usize = 3;
const COL_HOURS: usize = 4;
const COL_CATEGORY: usize = 5;
const COL_TEACHERS: usize = 6;
const COL_CLASSES: usize = 7;
const COL_FIRST_DAY: usize = 8;
const COL_CLASSROOMS: usize = 15;
const COL_ENROLLED: usize = 16;
const COL_WITHDRAWN: usize = 17;
const COL_LANGUAGE: usize = 18;
const COL_REMARK: usize = 20;

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid row selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid cell selector"));

#[async_trait]
impl RowFetcher for PortalSession {
    async fn fetch_rows(
        &self,
        target: &str,
        year: &str,
        semester: &str,
    ) -> AppResult<Vec<InfoRow>> {
        let mut query = vec![("format", COURSE_TABLE_FORMAT), ("code", target)];
        if !year.is_empty() {
            query.push(("year", year));
        }
        if !semester.is_empty() {
            query.push(("sem", semester));
        }

        let html = self.get_page(&self.config().course_url, &query).await?;
        let rows = extract_rows(&html);

        debug!(student = target, year, semester, rows = rows.len(), "Fetched course table");
        Ok(rows)
    }
}

/// Extract course rows from a course table page.
///
/// Keeps rows whose first cell is a course id and which carry the full
/// column set.
pub fn extract_rows(html: &str) -> Vec<InfoRow> {
    let document = Html::parse_document(html);

    document
        .select(&ROW)
        .map(|row| row.select(&CELL).map(cell_text).collect::<Vec<_>>())
        .filter(|cells| cells.len() >= MIN_COURSE_CELLS && is_course_id(&cells[COL_ID]))
        .map(InfoRow::new)
        .collect()
}

/// Text nodes of a cell, trimmed, one per line
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_course_id(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Maps course table rows onto `CourseInfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseTableParser;

impl CourseParser for CourseTableParser {
    fn parse_courses(&self, rows: &[InfoRow]) -> Vec<CourseInfo> {
        rows.iter().map(parse_course).collect()
    }
}

fn parse_course(row: &InfoRow) -> CourseInfo {
    let periods = Weekday::ALL
        .iter()
        .enumerate()
        .filter_map(|(offset, weekday)| {
            let slots: Vec<String> = row
                .cell(COL_FIRST_DAY + offset)
                .split_whitespace()
                .map(String::from)
                .collect();
            (!slots.is_empty()).then(|| CoursePeriod {
                weekday: *weekday,
                slots,
            })
        })
        .collect();

    CourseInfo {
        id: row.cell(COL_ID).to_string(),
        name: single_line(row.cell(COL_NAME)),
        stage: row.cell(COL_STAGE).to_string(),
        credit: row.cell(COL_CREDIT).to_string(),
        hours: row.cell(COL_HOURS).to_string(),
        category: row.cell(COL_CATEGORY).to_string(),
        teachers: lines(row.cell(COL_TEACHERS)),
        classes: lines(row.cell(COL_CLASSES)),
        periods,
        classrooms: lines(row.cell(COL_CLASSROOMS)),
        enrolled: row.cell(COL_ENROLLED).to_string(),
        withdrawn: row.cell(COL_WITHDRAWN).to_string(),
        language: row.cell(COL_LANGUAGE).to_string(),
        remark: single_line(row.cell(COL_REMARK)),
    }
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
