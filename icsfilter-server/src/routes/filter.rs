//! Filtered calendar endpoints
//!
//! Two equivalent request shapes:
//! - `GET /?ics=<url>&exclude=<title>&exclude=<title>`
//! - `GET /<base64url(url)>/<base64url(title,title)>` (second segment optional)

use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use icsfilter_core::{ExclusionSet, FetchError, filter_and_serialize};
use tracing::{info, warn};

use crate::routes::AppError;
use crate::state::AppState;

/// URL-safe base64, with or without padding
const SEGMENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(filter_by_query))
        .route("/{ics}", get(filter_by_source_segment))
        .route("/{ics}/{exclude}", get(filter_by_segments))
}

/// GET /?ics=...&exclude=...
async fn filter_by_query(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let ics = params
        .iter()
        .find(|(key, _)| key == "ics")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();
    let exclusions: ExclusionSet = params
        .iter()
        .filter(|(key, _)| key == "exclude")
        .map(|(_, value)| value)
        .collect();

    filtered_calendar(&state, ics, &exclusions).await
}

/// GET /:ics
async fn filter_by_source_segment(
    State(state): State<AppState>,
    Path(ics): Path<String>,
) -> Result<Response, AppError> {
    let ics = decode_segment(&ics).ok_or(AppError::Fetch(FetchError::InvalidAddress))?;
    filtered_calendar(&state, &ics, &ExclusionSet::default()).await
}

/// GET /:ics/:exclude
async fn filter_by_segments(
    State(state): State<AppState>,
    Path((ics, exclude)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let ics = decode_segment(&ics).ok_or(AppError::Fetch(FetchError::InvalidAddress))?;
    let exclude = decode_segment(&exclude).ok_or(AppError::InvalidExclusions)?;
    let exclusions: ExclusionSet = exclude.split(',').filter(|t| !t.is_empty()).collect();

    filtered_calendar(&state, &ics, &exclusions).await
}

fn decode_segment(segment: &str) -> Option<String> {
    let bytes = SEGMENT.decode(segment).ok()?;
    String::from_utf8(bytes).ok()
}

/// Fetch `ics`, drop excluded events and render the calendar
async fn filtered_calendar(
    state: &AppState,
    ics: &str,
    exclusions: &ExclusionSet,
) -> Result<Response, AppError> {
    if ics.is_empty() {
        return Err(AppError::MissingSource);
    }

    let document = state
        .fetcher
        .fetch(ics)
        .await
        .inspect_err(|err| warn!(error = %err, "could not load calendar"))?;

    info!(
        events = document.events().count(),
        exclusions = exclusions.len(),
        "serving filtered calendar"
    );

    let body = filter_and_serialize(document, exclusions);
    Ok(([(header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE)], body).into_response())
}
