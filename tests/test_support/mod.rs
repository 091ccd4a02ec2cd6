#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use job_search_backend::{
    config::SearchSettings,
    error::{Error, Result},
    models::{
        catalogue::{CategoryRef, ReferenceCatalogue, SalaryBand, VocabularyEntry, VocabularyKind},
        company::{Company, EmployerFacet},
        job_listing::JobListing,
    },
    services::{
        job_store::{JobStore, MemoryJobStore},
        predicate::JobPredicate,
    },
    AppState,
};

pub fn company(n: u128, name: &str) -> Company {
    Company {
        id: Uuid::from_u128(10_000 + n),
        name: name.to_string(),
        logo: Some(format!("logos/{}.svg", n)),
    }
}

pub fn listing(n: u128, company: &Company) -> JobListing {
    JobListing {
        id: Uuid::from_u128(n),
        title: format!("Vacancy {}", n),
        description: Some("Day-to-day work with the team".to_string()),
        company_id: company.id,
        category_id: Some("sales".to_string()),
        salary_min: None,
        salary_max: None,
        negotiable: false,
        employment_type: Some("full_time".to_string()),
        city: "Dushanbe".to_string(),
        district: None,
        experience: None,
        education: None,
        skills: None,
        status: "published".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + Duration::hours(n as i64),
    }
}

pub fn catalogue() -> ReferenceCatalogue {
    ReferenceCatalogue::new(
        vec![
            CategoryRef {
                id: "sales".into(),
                name: "Sales".into(),
            },
            CategoryRef {
                id: "C1".into(),
                name: "Software development".into(),
            },
        ],
        vec![
            VocabularyEntry {
                kind: VocabularyKind::EmploymentType,
                code: "full_time".into(),
                label: "Full time".into(),
            },
            VocabularyEntry {
                kind: VocabularyKind::Experience,
                code: "junior".into(),
                label: "Up to 2 years".into(),
            },
        ],
        vec![SalaryBand {
            id: "entry".into(),
            label: "Up to 3 000".into(),
            min_amount: None,
            max_amount: Some(3_000),
        }],
    )
}

/// Twenty-five published vacancies (three in category C1), job A with a
/// 40 000 - 60 000 salary and job B with React/Node.js skills.
pub fn marketplace() -> MemoryJobStore {
    let companies = vec![
        company(1, "Alif Bank"),
        company(2, "Somon Air"),
        company(3, "Tcell"),
    ];
    let mut jobs: Vec<JobListing> = (1..=25)
        .map(|n| listing(n, &companies[(n % 3) as usize]))
        .collect();
    for n in [4usize, 11, 19] {
        jobs[n - 1].category_id = Some("C1".into());
    }
    jobs[0].title = "Job A".into();
    jobs[0].salary_min = Some(40_000);
    jobs[0].salary_max = Some(60_000);
    jobs[1].title = "Job B".into();
    jobs[1].skills = Some("React, Node.js".into());
    jobs[2].city = "Khujand".into();
    jobs[2].district = Some("Panjshanbe".into());

    let mut draft = listing(99, &companies[0]);
    draft.status = "draft".into();
    jobs.push(draft);

    MemoryJobStore::new(jobs, companies)
}

pub fn settings() -> SearchSettings {
    SearchSettings::default()
}

pub fn app_with(store: Arc<dyn JobStore>) -> Router {
    job_search_backend::app(AppState::with_store(store, catalogue(), settings()))
}

pub fn app() -> Router {
    app_with(Arc::new(marketplace()))
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

pub fn titles(body: &JsonValue) -> Vec<String> {
    body["jobs"]
        .as_array()
        .map(|jobs| {
            jobs.iter()
                .filter_map(|job| job["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Store whose count read always fails.
pub struct BrokenStore;

#[async_trait]
impl JobStore for BrokenStore {
    async fn fetch_page(&self, _: &JobPredicate, _: i64, _: i64) -> Result<Vec<JobListing>> {
        Ok(Vec::new())
    }

    async fn count(&self, _: &JobPredicate) -> Result<i64> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }

    async fn employer_facets(&self, _: &JobPredicate, _: i64) -> Result<Vec<EmployerFacet>> {
        Ok(Vec::new())
    }
}
