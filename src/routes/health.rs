use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let catalogue = state.search_service.catalogue();
    let body = json!({
        "status": "ok",
        "catalogue": {
            "categories": catalogue.categories().len(),
            "salaryBands": catalogue.salary_bands().len(),
        },
    });
    (StatusCode::OK, Json(body))
}
