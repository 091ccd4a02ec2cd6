use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::catalogue::{CategoryRef, ReferenceCatalogue, SalaryBand, VocabularyEntry, VocabularyKind};
use crate::models::company::EmployerFacet;
use crate::models::job_listing::JobListing;
use crate::services::pagination::Pagination;
use crate::services::search_service::SearchResult;

/// Raw query-string input. Every key is optional and kept as text so that a
/// malformed value can be dropped by the normalizer instead of rejecting the
/// whole request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobSearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub salary_band: Option<String>,
    pub negotiable: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub page: Option<String>,
}

impl FromIterator<(String, String)> for JobSearchQuery {
    /// Builds the query from raw key/value pairs. Unknown keys are ignored and
    /// a repeated key keeps its last value.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut query.q,
                "category" => &mut query.category,
                "location" => &mut query.location,
                "city" => &mut query.city,
                "district" => &mut query.district,
                "employmentType" => &mut query.employment_type,
                "salaryMin" => &mut query.salary_min,
                "salaryMax" => &mut query.salary_max,
                "salaryBand" => &mut query.salary_band,
                "negotiable" => &mut query.negotiable,
                "experience" => &mut query.experience,
                "education" => &mut query.education,
                "skills" => &mut query.skills,
                "page" => &mut query.page,
                _ => continue,
            };
            *slot = Some(value);
        }
        query
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobLocation {
    pub city: String,
    pub district: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListingResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub company_id: Uuid,
    pub category_id: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub negotiable: bool,
    pub employment_type: Option<String>,
    pub location: JobLocation,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerFacetResponse {
    pub company_id: Uuid,
    pub name: String,
    pub logo_ref: Option<String>,
    pub matching_job_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveFilterResponse {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub jobs: Vec<JobListingResponse>,
    pub companies: Vec<EmployerFacetResponse>,
    pub categories: Vec<CategoryRef>,
    pub pagination: PaginationResponse,
    pub filters: BTreeMap<String, ActiveFilterResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueResponse {
    pub categories: Vec<CategoryRef>,
    pub employment_types: Vec<VocabularyEntry>,
    pub experience_levels: Vec<VocabularyEntry>,
    pub education_levels: Vec<VocabularyEntry>,
    pub salary_bands: Vec<SalaryBand>,
}

impl From<JobListing> for JobListingResponse {
    fn from(value: JobListing) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            company_id: value.company_id,
            category_id: value.category_id,
            salary_min: value.salary_min,
            salary_max: value.salary_max,
            negotiable: value.negotiable,
            employment_type: value.employment_type,
            location: JobLocation {
                city: value.city,
                district: value.district,
            },
            experience: value.experience,
            education: value.education,
            skills: value.skills,
            created_at: value.created_at,
        }
    }
}

impl From<EmployerFacet> for EmployerFacetResponse {
    fn from(value: EmployerFacet) -> Self {
        Self {
            company_id: value.company_id,
            name: value.name,
            logo_ref: value.logo_ref,
            matching_job_count: value.matching_job_count,
        }
    }
}

impl From<Pagination> for PaginationResponse {
    fn from(value: Pagination) -> Self {
        Self {
            page: value.page,
            limit: value.page_size,
            total: value.total,
            total_pages: value.total_pages,
        }
    }
}

impl From<SearchResult> for SearchResponse {
    fn from(value: SearchResult) -> Self {
        let filters = value
            .active_filters
            .into_iter()
            .map(|filter| {
                (
                    filter.field.as_str().to_string(),
                    ActiveFilterResponse {
                        value: filter.value,
                        label: filter.label,
                    },
                )
            })
            .collect();

        Self {
            jobs: value.jobs.into_iter().map(Into::into).collect(),
            companies: value.employers.into_iter().map(Into::into).collect(),
            categories: value.categories,
            pagination: value.pagination.into(),
            filters,
        }
    }
}

impl From<&ReferenceCatalogue> for CatalogueResponse {
    fn from(value: &ReferenceCatalogue) -> Self {
        let vocabulary = |kind| value.vocabulary(kind).cloned().collect::<Vec<_>>();
        Self {
            categories: value.categories().to_vec(),
            employment_types: vocabulary(VocabularyKind::EmploymentType),
            experience_levels: vocabulary(VocabularyKind::Experience),
            education_levels: vocabulary(VocabularyKind::Education),
            salary_bands: value.salary_bands().to_vec(),
        }
    }
}
