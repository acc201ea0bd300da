//! Public event calendar.

use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use supperclub_core::{EventId, EventStatus, LiveEvent};
use supperclub_web::{AppError, WebResult};

/// Query parameters for [`list_events`].
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    /// Keep events that have already finished
    #[serde(default)]
    pub include_past: bool,
}

/// Event as shown on the website.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// Event ID
    pub id: EventId,
    /// Headline
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Start time
    pub starts_at: DateTime<Utc>,
    /// End time, explicit or derived from the default duration
    pub ends_at: DateTime<Utc>,
    /// `scheduled`, `live` or `past`
    pub status: EventStatus,
}

impl EventResponse {
    fn new(event: LiveEvent, status: EventStatus, default_duration: chrono::Duration) -> Self {
        Self {
            id: event.id,
            ends_at: event.effective_end(default_duration),
            title: event.title,
            description: event.description,
            starts_at: event.starts_at,
            status,
        }
    }
}

/// List the business's published events in start order.
///
/// Past events are left out unless `include_past=true`. An unknown business
/// yields an empty list.
///
/// # Example
///
/// ```bash
/// curl 'http://localhost:8080/api/events?include_past=true'
/// ```
///
/// # Errors
///
/// Returns 500 if the calendar cannot be read.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> WebResult<Json<Vec<EventResponse>>> {
    let Some(business_id) = state.businesses.resolve(None).await else {
        return Ok(Json(Vec::new()));
    };

    let events = state.events.list_published(business_id).await.map_err(|e| {
        AppError::internal("Failed to load events").with_source(anyhow::Error::new(e))
    })?;

    let now = state.clock.now();
    let default_duration = state.event_default_duration;

    let events = events
        .into_iter()
        .filter_map(|event| {
            let status = event.status_at(now, default_duration);
            let visible = match status {
                EventStatus::Draft => false,
                EventStatus::Past => query.include_past,
                EventStatus::Scheduled | EventStatus::Live => true,
            };
            visible.then(|| EventResponse::new(event, status, default_duration))
        })
        .collect();

    Ok(Json(events))
}
