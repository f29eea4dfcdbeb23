use std::sync::Arc;

use axum::{
    extract::{Path, Query, State as AppState},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    directory::{filter, percentage, CompanyRecord, VoteDirection},
    error::AppError,
    mentors::{filter_mentors, normalize_contact, MentorRow},
    safety::{lookup, StateSafety, STATE_SAFETY},
    scholarships::{Scholarship, ScholarshipTracker},
    state::State,
    storage::{COMPANIES_KEY, SCHOLARSHIPS_KEY},
};

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct CompanyView {
    pub name: String,
    pub apply_link: String,
    pub positive_votes: u32,
    pub negative_votes: u32,
    pub percentage: u32,
}

impl From<&CompanyRecord> for CompanyView {
    fn from(record: &CompanyRecord) -> Self {
        Self {
            name: record.name.clone(),
            apply_link: record.apply_link.clone(),
            positive_votes: record.positive_votes,
            negative_votes: record.negative_votes,
            percentage: percentage(record),
        }
    }
}

pub async fn companies_handler(
    AppState(state): AppState<Arc<State>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<CompanyView>> {
    let directory = state.directory.read();
    let views = filter(directory.records(), &params.q)
        .into_iter()
        .map(CompanyView::from)
        .collect();

    Json(views)
}

#[derive(Deserialize)]
pub struct AddCompany {
    pub name: String,
    pub apply_link: String,
}

pub async fn add_company_handler(
    AppState(state): AppState<Arc<State>>,
    Json(payload): Json<AddCompany>,
) -> Result<impl IntoResponse, AppError> {
    let mut directory = state.directory.write();
    let record = directory.add(&payload.name, &payload.apply_link)?;

    state.storage.save(COMPANIES_KEY, &directory.records())?;

    Ok((StatusCode::CREATED, Json(CompanyView::from(&record))))
}

#[derive(Deserialize)]
pub struct VotePayload {
    pub name: String,
    pub direction: VoteDirection,
}

pub async fn votes_handler(
    AppState(state): AppState<Arc<State>>,
    Json(payload): Json<VotePayload>,
) -> Result<Json<CompanyView>, AppError> {
    let mut directory = state.directory.write();
    let record = directory.vote(&payload.name, payload.direction)?;

    state.storage.save(COMPANIES_KEY, &directory.records())?;

    Ok(Json(CompanyView::from(&record)))
}

#[derive(Serialize)]
pub struct ScholarshipView {
    #[serde(flatten)]
    pub scholarship: Scholarship,
    pub applying: bool,
}

#[derive(Serialize)]
pub struct ScholarshipsView {
    pub scholarships: Vec<ScholarshipView>,
    pub next_deadline: Option<NaiveDate>,
}

fn scholarships_view(tracker: &ScholarshipTracker) -> ScholarshipsView {
    let scholarships = tracker
        .listings()
        .iter()
        .map(|s| ScholarshipView {
            scholarship: s.clone(),
            applying: tracker.is_applying(s.id),
        })
        .collect();

    ScholarshipsView {
        scholarships,
        next_deadline: tracker.next_deadline(),
    }
}

pub async fn scholarships_handler(
    AppState(state): AppState<Arc<State>>,
) -> Json<ScholarshipsView> {
    let tracker = state.scholarships.read();

    Json(scholarships_view(&tracker))
}

#[derive(Deserialize)]
pub struct ApplyingPayload {
    pub id: String,
    pub applying: bool,
}

pub async fn applying_handler(
    AppState(state): AppState<Arc<State>>,
    Json(payload): Json<ApplyingPayload>,
) -> Result<Json<ScholarshipsView>, AppError> {
    let mut tracker = state.scholarships.write();
    tracker.set_applying(&payload.id, payload.applying)?;

    state.storage.save(SCHOLARSHIPS_KEY, tracker.flags())?;

    Ok(Json(scholarships_view(&tracker)))
}

#[derive(Serialize)]
pub struct MentorCard {
    pub name: String,
    pub industry: String,
    pub topics: String,
    pub contact_link: String,
}

impl From<&MentorRow> for MentorCard {
    fn from(row: &MentorRow) -> Self {
        Self {
            name: row.name.clone(),
            industry: row.industry.clone(),
            topics: row.topics.clone(),
            contact_link: normalize_contact(&row.contact),
        }
    }
}

#[derive(Serialize)]
pub struct MentorsView {
    pub mentors: Vec<MentorCard>,
    pub fetch_failed: bool,
}

pub async fn mentors_handler(
    AppState(state): AppState<Arc<State>>,
    Query(params): Query<SearchParams>,
) -> Json<MentorsView> {
    let mentors = filter_mentors(&state.mentors.rows, &params.q)
        .into_iter()
        .map(MentorCard::from)
        .collect();

    Json(MentorsView {
        mentors,
        fetch_failed: state.mentors.fetch_failed,
    })
}

#[derive(Serialize)]
pub struct SafetyMapEntry {
    pub state: &'static str,
    #[serde(flatten)]
    pub entry: StateSafety,
}

pub async fn safety_map_handler() -> Json<Vec<SafetyMapEntry>> {
    let entries = STATE_SAFETY
        .iter()
        .map(|(key, entry)| SafetyMapEntry {
            state: key,
            entry: entry.clone(),
        })
        .collect();

    Json(entries)
}

#[derive(Serialize)]
pub struct SafetyStateView {
    pub state: String,
    pub entry: Option<StateSafety>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub async fn safety_state_handler(Path(state): Path<String>) -> Json<SafetyStateView> {
    let entry = lookup(&state).cloned();
    let message = entry
        .is_none()
        .then_some("Information for this state is coming soon.");

    Json(SafetyStateView {
        state,
        entry,
        message,
    })
}

pub async fn resume_feedback_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Upload your resume for feedback."
    }))
}
