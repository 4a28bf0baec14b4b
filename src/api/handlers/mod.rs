use axum::{extract::State, response::IntoResponse, response::Response, Json};
use uuid::Uuid;

use super::extract::ValidJson;
use super::relay::{self, RelayRequest};
use super::state::AppState;
use crate::catalog;
use crate::error::ApiError;
use crate::models::*;

// ============================================================
// Fallbacks
// ============================================================

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Ask
// ============================================================

/// Relay a question to the provider and stream the answer back as SSE.
///
/// Everything that can be checked synchronously is checked before the
/// response starts; provider failures after that abort the stream.
pub async fn ask(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<AskBody>,
) -> Result<Response, ApiError> {
    let (database, provider) = state.resolve(body.database.as_deref())?;

    let directives = body.selected_directives();
    if let Some((a, b)) = catalog::conflicting_directives(directives.as_slice()).first() {
        tracing::debug!("Conflicting directives selected: {} and {}", a.id, b.id);
        return Err(ApiError::ConflictingSettings);
    }

    let options = ProviderOptions::from(&body);
    let id = Uuid::new_v4();
    tracing::info!(
        request_id = %id,
        database = database.id,
        rules = ?options.rules,
        filter = ?options.search.filter,
        "Relaying question"
    );

    let frames = relay::frames(
        provider,
        RelayRequest {
            id,
            table: database.lookup_table,
            question: body.question,
            options,
        },
    );
    Ok(relay::into_response(frames))
}

// ============================================================
// Docs
// ============================================================

/// Look up the documentation pages an answer was based on.
pub async fn docs_get(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<DocsGetBody>,
) -> Result<Json<Vec<DocRecord>>, ApiError> {
    if body.ids.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let (database, provider) = state.resolve(body.database.as_deref())?;
    let records = provider
        .get_records(database.lookup_table, &body.ids)
        .await?;
    Ok(Json(records))
}

// ============================================================
// Catalog
// ============================================================

/// Databases (with page counts), documentation sections and directives.
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let mut databases = Vec::new();
    for database in catalog::databases() {
        let record_count = match state.provider(database.id) {
            Some(provider) => match provider.count_records(database.lookup_table).await {
                Ok(count) => Some(count),
                Err(e) => {
                    tracing::warn!("Failed to count records in {}: {}", database.id, e);
                    None
                }
            },
            None => None,
        };
        databases.push(DatabaseSummary {
            database: database.clone(),
            record_count,
        });
    }

    Json(CatalogResponse {
        databases,
        doc_sections: catalog::categories(),
        directives: catalog::directives(),
    })
}
