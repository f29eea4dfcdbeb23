//! Mentor directory backed by a spreadsheet-as-API sheet.
//!
//! The sheet returns a JSON array of loosely-typed rows keyed by the
//! human-readable column headers, fetched once at startup. Rows are searched
//! with the same case-insensitive substring pattern as the company list, but
//! across industry OR topics.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MentorRow {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Industry", default)]
    pub industry: String,

    #[serde(rename = "Topics / Expertise", default)]
    pub topics: String,

    #[serde(rename = "Contact", default)]
    pub contact: String,
}

/// One-shot fetch of the full sheet. No retry; the caller decides what a
/// failure degrades to.
pub async fn fetch_mentors(url: &str) -> Result<Vec<MentorRow>, AppError> {
    let rows = reqwest::get(url)
        .await?
        .error_for_status()?
        .json::<Vec<MentorRow>>()
        .await?;

    Ok(rows)
}

pub fn filter_mentors<'a>(rows: &'a [MentorRow], query: &str) -> Vec<&'a MentorRow> {
    let query = query.trim().to_lowercase();

    rows.iter()
        .filter(|row| {
            query.is_empty()
                || row.industry.to_lowercase().contains(&query)
                || row.topics.to_lowercase().contains(&query)
        })
        .collect()
}

/// Turns whatever was typed into the contact column into something a client
/// can open: URLs and mailto links pass through, addresses get `mailto:`,
/// anything else is assumed to be a bare domain.
pub fn normalize_contact(contact: &str) -> String {
    if contact.is_empty() {
        return "#".to_string();
    }

    if contact.starts_with("http://")
        || contact.starts_with("https://")
        || contact.starts_with("mailto:")
    {
        return contact.to_string();
    }

    if contact.contains('@') {
        return format!("mailto:{contact}");
    }

    format!("https://{contact}")
}
