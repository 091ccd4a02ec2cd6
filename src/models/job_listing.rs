use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PUBLISHED: &str = "published";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub company_id: Uuid,
    pub category_id: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub negotiable: bool,
    pub employment_type: Option<String>,
    pub city: String,
    pub district: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl JobListing {
    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }

    /// True when the listing states at least one salary bound.
    pub fn has_stated_salary(&self) -> bool {
        self.salary_min.is_some() || self.salary_max.is_some()
    }
}
