use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::search_dto::{CatalogueResponse, JobSearchQuery, SearchResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/public/jobs/search",
    params(
        ("q" = Option<String>, Query, description = "Free text over title, description and skills"),
        ("category" = Option<String>, Query, description = "Category ID"),
        ("city" = Option<String>, Query, description = "City (alias: location)"),
        ("district" = Option<String>, Query, description = "District within the city"),
        ("employmentType" = Option<String>, Query, description = "Employment type code"),
        ("salaryMin" = Option<i64>, Query, description = "Lower salary bound"),
        ("salaryMax" = Option<i64>, Query, description = "Upper salary bound"),
        ("salaryBand" = Option<String>, Query, description = "Salary band ID"),
        ("negotiable" = Option<bool>, Query, description = "Include negotiable salaries"),
        ("experience" = Option<String>, Query, description = "Experience level code"),
        ("education" = Option<String>, Query, description = "Education level code"),
        ("skills" = Option<String>, Query, description = "Comma-separated skills, all required"),
        ("page" = Option<i64>, Query, description = "Page number, 1-based")
    ),
    responses(
        (status = 200, description = "Matching jobs with facets", body = Json<SearchResponse>),
        (status = 503, description = "Job store unavailable"),
        (status = 504, description = "Search timed out")
    )
)]
#[axum::debug_handler]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let query: JobSearchQuery = pairs.into_iter().collect();
    let criteria = state.search_service.criteria_from_query(&query);
    let result = state.search_service.search(&criteria).await?;
    Ok(Json(SearchResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/public/catalogue",
    responses(
        (status = 200, description = "Reference vocabularies for search filters", body = Json<CatalogueResponse>)
    )
)]
#[axum::debug_handler]
pub async fn get_catalogue(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(CatalogueResponse::from(
        state.search_service.catalogue(),
    )))
}
