use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
}

/// Per-company match count computed alongside a search. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmployerFacet {
    pub company_id: Uuid,
    pub name: String,
    pub logo_ref: Option<String>,
    pub matching_job_count: i64,
}
