//! Per-state LGBTQ+ legal-protection levels for the safety map.
//!
//! A static table keyed by the whitespace-stripped state name, the same
//! identifier the map's geography data produces. States without an entry
//! render as "coming soon" on the client.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    High,
    Medium,
    Low,
}

#[derive(Clone, Serialize)]
pub struct StateSafety {
    pub name: &'static str,
    pub level: SafetyLevel,
    pub rights: &'static [&'static str],
}

pub const STATE_SAFETY: &[(&str, StateSafety)] = &[
    (
        "California",
        StateSafety {
            name: "California",
            level: SafetyLevel::High,
            rights: &[
                "Statewide nondiscrimination protections for sexual orientation and gender identity",
                "Legal gender marker changes on state IDs",
                "Ban on conversion therapy for minors",
                "Trans-inclusive healthcare protections",
            ],
        },
    ),
    (
        "NewYork",
        StateSafety {
            name: "New York",
            level: SafetyLevel::High,
            rights: &[
                "Comprehensive LGBTQ+ nondiscrimination laws",
                "Gender identity protections in employment and housing",
                "Legal recognition of nonbinary identities",
            ],
        },
    ),
    (
        "Colorado",
        StateSafety {
            name: "Colorado",
            level: SafetyLevel::High,
            rights: &[
                "Strong nondiscrimination laws for sexual orientation and gender identity",
                "Broad access to LGBTQ+ affirming healthcare",
                "Consistent pro-LGBTQ+ legislation and leadership",
            ],
        },
    ),
    (
        "Florida",
        StateSafety {
            name: "Florida",
            level: SafetyLevel::Medium,
            rights: &[
                "No statewide nondiscrimination protections",
                "Restrictions on classroom discussion of LGBTQ+ topics",
                "Local protections may exist depending on city",
            ],
        },
    ),
    (
        "Texas",
        StateSafety {
            name: "Texas",
            level: SafetyLevel::Low,
            rights: &[
                "No statewide LGBTQ+ nondiscrimination protections",
                "Restrictions impacting gender-affirming care",
                "Legal challenges ongoing, rights may change",
            ],
        },
    ),
];

pub fn lookup(state: &str) -> Option<&'static StateSafety> {
    STATE_SAFETY
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(state))
        .map(|(_, entry)| entry)
}
