//! Curriculum listing: fetch and parse.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use common::AppResult;
use domain::Curriculum;

use super::{CurriculumDocument, DocumentFetcher, EntryParser};
use crate::client::PortalSession;

/// Course system page format listing the terms of a student
const CURRICULUM_FORMAT: &str = "-3";

static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid link selector"));
static TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]year=(\d+)&(?:amp;)?sem=(\d+)").expect("valid term pattern"));

#[async_trait]
impl DocumentFetcher for PortalSession {
    async fn fetch_document(&self, target: &str) -> AppResult<CurriculumDocument> {
        let query = [("format", CURRICULUM_FORMAT), ("code", target)];
        let html = self.get_page(&self.config().course_url, &query).await?;

        debug!(student = target, bytes = html.len(), "Fetched curriculum listing");
        Ok(CurriculumDocument(html))
    }
}

/// Reads terms from the course table links of a curriculum listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurriculumParser;

impl EntryParser for CurriculumParser {
    fn parse_entries(&self, document: &CurriculumDocument) -> Vec<Curriculum> {
        let html = Html::parse_document(document.html());
        let mut entries: Vec<Curriculum> = Vec::new();

        for href in html.select(&LINK).filter_map(|a| a.value().attr("href")) {
            let Some(caps) = TERM.captures(href) else {
                continue;
            };
            let entry = Curriculum::new(&caps[1], &caps[2]);
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }

        entries
    }
}
