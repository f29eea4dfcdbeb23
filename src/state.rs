use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info, warn};

use crate::{
    config::Config,
    directory::Directory,
    mentors::{fetch_mentors, MentorRow},
    scholarships::ScholarshipTracker,
    storage::{Storage, COMPANIES_KEY, SCHOLARSHIPS_KEY},
};

/// Mentor rows are fetched once at startup and read-only afterwards. A
/// failed fetch leaves the directory empty and flags it so clients can show
/// the error state instead of "no mentors match".
pub struct MentorDirectory {
    pub rows: Vec<MentorRow>,
    pub fetch_failed: bool,
}

pub struct State {
    pub config: Config,
    pub storage: Storage,
    pub directory: RwLock<Directory>,
    pub scholarships: RwLock<ScholarshipTracker>,
    pub mentors: MentorDirectory,
}

impl State {
    pub async fn new() -> Arc<Self> {
        Self::init(Config::load()).await
    }

    pub async fn init(config: Config) -> Arc<Self> {
        let storage = Storage::open(&config.data_dir).expect("Data directory misconfigured!");

        // A corrupt snapshot degrades to the seed, same as an absent one,
        // but the two cases stay distinguishable in the logs.
        let companies = storage.load(COMPANIES_KEY).unwrap_or_else(|e| {
            warn!("{e}, starting from the seed list");
            None
        });
        let directory = Directory::initialize(companies);

        let flags = storage.load(SCHOLARSHIPS_KEY).unwrap_or_else(|e| {
            warn!("{e}, starting with no application flags");
            None
        });
        let scholarships = ScholarshipTracker::new(flags);

        let mentors = match fetch_mentors(&config.mentor_url).await {
            Ok(rows) => {
                info!("Loaded {} mentor rows", rows.len());
                MentorDirectory {
                    rows,
                    fetch_failed: false,
                }
            }
            Err(e) => {
                error!("Failed to fetch mentors: {e}");
                MentorDirectory {
                    rows: Vec::new(),
                    fetch_failed: true,
                }
            }
        };

        Arc::new(Self {
            config,
            storage,
            directory: RwLock::new(directory),
            scholarships: RwLock::new(scholarships),
            mentors,
        })
    }
}
