//! # Company Directory
//!
//! The in-memory company list, its vote mutations, and the ranking/search
//! logic layered over it.
//!
//! ## Data
//!
//! - One record per company: name, apply link, positive/negative vote counts
//! - Names are unique case-insensitively; the lower-cased name is the
//!   identity used for duplicate checks and vote targeting
//! - Friendliness percentage is derived on demand from the counts, never
//!   stored
//!
//! ## Ordering
//!
//! The list is re-ranked after every mutation, before it is persisted, so
//! the saved snapshot and the displayed order never diverge and a fresh
//! load needs no re-sort. The sort is stable on purpose: a list full of
//! zero-vote ties must not reshuffle between votes.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub apply_link: String,
    #[serde(default)]
    pub positive_votes: u32,
    #[serde(default)]
    pub negative_votes: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Positive,
    Negative,
}

/// Lower-cased name used for uniqueness and lookup comparisons.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// Share of positive votes, rounded to a whole percent. Zero when unvoted.
pub fn percentage(record: &CompanyRecord) -> u32 {
    let total = record.positive_votes + record.negative_votes;
    if total == 0 {
        return 0;
    }

    (100.0 * f64::from(record.positive_votes) / f64::from(total)).round() as u32
}

/// Orders by descending friendliness percentage. Stable: ties keep their
/// prior relative order.
pub fn rank(records: &mut [CompanyRecord]) {
    records.sort_by(|a, b| percentage(b).cmp(&percentage(a)));
}

/// Case-insensitive substring match on the company name. An empty query is
/// the identity; the underlying order is never touched.
pub fn filter<'a>(records: &'a [CompanyRecord], query: &str) -> Vec<&'a CompanyRecord> {
    let query = normalize(query.trim());

    records
        .iter()
        .filter(|record| query.is_empty() || normalize(&record.name).contains(&query))
        .collect()
}

pub struct Directory {
    records: Vec<CompanyRecord>,
}

impl Directory {
    /// Loads the persisted snapshot verbatim when one exists, otherwise
    /// starts from the seed list. Runs once per session.
    pub fn initialize(snapshot: Option<Vec<CompanyRecord>>) -> Self {
        Self {
            records: snapshot.unwrap_or_else(seed),
        }
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn add(&mut self, name: &str, apply_link: &str) -> Result<CompanyRecord, AppError> {
        let name = name.trim();
        let apply_link = apply_link.trim();

        if name.is_empty() || apply_link.is_empty() {
            return Err(AppError::Validation);
        }

        let normalized = normalize(name);
        if self
            .records
            .iter()
            .any(|record| normalize(&record.name) == normalized)
        {
            return Err(AppError::Duplicate(name.to_string()));
        }

        let record = CompanyRecord {
            name: name.to_string(),
            apply_link: apply_link.to_string(),
            positive_votes: 0,
            negative_votes: 0,
        };

        self.records.push(record.clone());
        rank(&mut self.records);

        Ok(record)
    }

    pub fn vote(
        &mut self,
        target_name: &str,
        direction: VoteDirection,
    ) -> Result<CompanyRecord, AppError> {
        let normalized = normalize(target_name.trim());

        let record = self
            .records
            .iter_mut()
            .find(|record| normalize(&record.name) == normalized)
            .ok_or_else(|| AppError::NotFound(target_name.to_string()))?;

        match direction {
            VoteDirection::Positive => record.positive_votes += 1,
            VoteDirection::Negative => record.negative_votes += 1,
        }

        let updated = record.clone();
        rank(&mut self.records);

        Ok(updated)
    }
}

/// Hardcoded initial list used when no snapshot has ever been persisted.
pub fn seed() -> Vec<CompanyRecord> {
    [
        ("Accenture", "https://www.accenture.com/us-en/careers"),
        ("Apple", "https://www.apple.com/careers/"),
        ("Google", "https://careers.google.com/"),
        ("IBM", "https://www.ibm.com/employment/"),
    ]
    .into_iter()
    .map(|(name, apply_link)| CompanyRecord {
        name: name.to_string(),
        apply_link: apply_link.to_string(),
        positive_votes: 0,
        negative_votes: 0,
    })
    .collect()
}
