//! Static scholarship listings plus the per-session "applying" tracker.
//!
//! The listings never change at runtime; only the id -> applying flag map
//! mutates, and it is persisted independently of the company list. The next
//! deadline is derived as the minimum deadline among flagged entries.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;

pub type ApplicationFlags = HashMap<String, bool>;

#[derive(Clone, Serialize)]
pub struct Scholarship {
    pub id: &'static str,
    pub name: &'static str,
    pub link: &'static str,
    pub deadline: NaiveDate,
}

pub struct ScholarshipTracker {
    listings: Vec<Scholarship>,
    flags: ApplicationFlags,
}

impl ScholarshipTracker {
    pub fn new(flags: Option<ApplicationFlags>) -> Self {
        Self {
            listings: listings(),
            flags: flags.unwrap_or_default(),
        }
    }

    pub fn listings(&self) -> &[Scholarship] {
        &self.listings
    }

    pub fn flags(&self) -> &ApplicationFlags {
        &self.flags
    }

    pub fn is_applying(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    pub fn set_applying(&mut self, id: &str, applying: bool) -> Result<(), AppError> {
        if !self.listings.iter().any(|s| s.id == id) {
            return Err(AppError::NotFound(id.to_string()));
        }

        self.flags.insert(id.to_string(), applying);

        Ok(())
    }

    /// Earliest deadline among the scholarships flagged as "applying".
    pub fn next_deadline(&self) -> Option<NaiveDate> {
        self.listings
            .iter()
            .filter(|s| self.is_applying(s.id))
            .map(|s| s.deadline)
            .min()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Listing deadline misconfigured!")
}

pub fn listings() -> Vec<Scholarship> {
    vec![
        Scholarship {
            id: "point-foundation",
            name: "Point Foundation Scholarship",
            link: "https://pointfoundation.org/point-apply/apply-now/",
            deadline: date(2027, 1, 27),
        },
        Scholarship {
            id: "pflag-national",
            name: "PFLAG National Scholarship",
            link: "https://pflag.org/scholarships/",
            deadline: date(2027, 4, 30),
        },
        Scholarship {
            id: "gamma-mu",
            name: "Gamma Mu Foundation Scholarship",
            link: "https://gammamufoundation.org/scholarships/",
            deadline: date(2027, 3, 31),
        },
        Scholarship {
            id: "live-out-loud",
            name: "Live Out Loud Educational Scholarship",
            link: "https://www.liveoutloud.info/scholarship",
            deadline: date(2027, 2, 28),
        },
        Scholarship {
            id: "league-foundation",
            name: "LEAGUE Foundation Scholarship",
            link: "https://leaguefoundation.org/scholarships/",
            deadline: date(2027, 4, 15),
        },
    ]
}
