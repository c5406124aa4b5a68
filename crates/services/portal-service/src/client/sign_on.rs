//! Course system sign-on form extraction.

use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Selector};

use common::{AppError, AppResult};

static FORM: Lazy<Selector> = Lazy::new(|| Selector::parse("form").expect("valid form selector"));
static INPUT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("input[name]").expect("valid input selector"));

/// Self-submitting form the portal hands out to enter the course system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOnForm {
    /// Absolute URL the form posts to
    pub action: String,
    /// Input name/value pairs, in document order
    pub fields: Vec<(String, String)>,
}

impl SignOnForm {
    /// Extract the first form of `html`, resolving its action against `page_url`.
    pub fn parse(html: &str, page_url: &str) -> AppResult<Self> {
        let document = Html::parse_document(html);
        let form = document
            .select(&FORM)
            .next()
            .ok_or_else(|| AppError::fetch("course system sign-on form not found"))?;

        let raw_action = form.value().attr("action").unwrap_or_default();
        let action = Url::parse(page_url)
            .and_then(|base| base.join(raw_action))
            .map_err(|e| {
                AppError::fetch(format!("invalid sign-on form action {:?}: {}", raw_action, e))
            })?;

        let fields = form
            .select(&INPUT)
            .filter(|input| {
                let kind = input.value().attr("type").unwrap_or("text");
                !matches!(kind.to_ascii_lowercase().as_str(), "submit" | "button" | "image")
            })
            .filter_map(|input| {
                let name = input.value().attr("name")?;
                let value = input.value().attr("value").unwrap_or_default();
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        Ok(Self {
            action: action.to_string(),
            fields,
        })
    }
}
