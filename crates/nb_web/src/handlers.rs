use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nb_core::{is_valid_url, ContactInfo, ContactRecord};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use crate::AppState;

pub enum ApiError {
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactKey {
    pub name: String,
    pub company: String,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub record: ContactRecord,
    pub log: Vec<String>,
    pub report: String,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_error: Option<String>,
}

pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ContactRecord>> {
    let contacts = match params.search.as_deref() {
        Some(term) => state.storage().search(term).await,
        None => state.storage().load().await,
    };
    Json(contacts)
}

pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Json(key): Json<ContactKey>,
) -> Result<StatusCode, ApiError> {
    match state.storage().delete(&key.name, &key.company).await {
        Ok(true) => {
            info!("🗑️ Deleted {} from {}", key.name, key.company);
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(ApiError::NotFound(format!(
            "No contact named {} at {}",
            key.name, key.company
        ))),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

pub fn validate_contact(info: &ContactInfo) -> Result<(), ApiError> {
    if !info.has_required_fields() {
        return Err(ApiError::Validation(
            "Name and Company are required fields.".to_string(),
        ));
    }
    for (label, value) in [("LinkedIn", &info.linkedin), ("Website", &info.website)] {
        if !value.trim().is_empty() && !is_valid_url(value) {
            return Err(ApiError::Validation(format!("{} must be a valid http(s) URL.", label)));
        }
    }
    Ok(())
}

pub async fn research_contact(
    State(state): State<Arc<AppState>>,
    Json(info): Json<ContactInfo>,
) -> Result<(StatusCode, Json<ResearchResponse>), ApiError> {
    validate_contact(&info)?;

    let mut task = state.manager.spawn(info);
    let mut log = Vec::new();
    while let Some(event) = task.events.recv().await {
        log.push(event.to_string());
    }
    let outcome = task
        .finish()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let report = outcome.report();
    let (status, saved, save_error) = match &outcome.saved {
        Ok(_) => (StatusCode::OK, true, None),
        Err(e) => {
            error!("❌ Failed to save contact: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, false, Some(e.to_string()))
        }
    };

    Ok((
        status,
        Json(ResearchResponse {
            record: outcome.record,
            log,
            report,
            saved,
            save_error,
        }),
    ))
}
