//! Read access to published job listings.
//!
//! The search engine issues three independent reads per request through
//! [`JobStore`]; implementations must be safe to call concurrently.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::company::{Company, EmployerFacet};
use crate::models::job_listing::JobListing;
use crate::services::predicate::JobPredicate;

const LISTING_COLUMNS: &str = "j.id, j.title, j.description, j.company_id, j.category_id, \
     j.salary_min, j.salary_max, j.negotiable, j.employment_type, j.city, j.district, \
     j.experience, j.education, j.skills, j.status, j.created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Matching listings, newest first, starting at `offset`.
    async fn fetch_page(
        &self,
        predicate: &JobPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<JobListing>>;

    /// Number of matching listings, ignoring pagination.
    async fn count(&self, predicate: &JobPredicate) -> Result<i64>;

    /// Companies owning matching listings, by match count desc then name asc.
    async fn employer_facets(&self, predicate: &JobPredicate, limit: i64)
        -> Result<Vec<EmployerFacet>>;
}

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn fetch_page(
        &self,
        predicate: &JobPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<JobListing>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM job_listings j",
            LISTING_COLUMNS
        ));
        predicate.push_where(&mut builder);
        builder.push(" ORDER BY j.created_at DESC, j.id DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let items = builder
            .build_query_as::<JobListing>()
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn count(&self, predicate: &JobPredicate) -> Result<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM job_listings j");
        predicate.push_where(&mut builder);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn employer_facets(
        &self,
        predicate: &JobPredicate,
        limit: i64,
    ) -> Result<Vec<EmployerFacet>> {
        let facets = facets_query(predicate, limit)
            .build_query_as::<EmployerFacet>()
            .fetch_all(&self.pool)
            .await?;
        Ok(facets)
    }
}

/// Names tie-break in byte order so Postgres ranks the same way as
/// [`MemoryJobStore`].
fn facets_query(predicate: &JobPredicate, limit: i64) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(
        "SELECT c.id AS company_id, c.name, c.logo AS logo_ref, COUNT(*) AS matching_job_count
         FROM job_listings j
         JOIN companies c ON c.id = j.company_id",
    );
    predicate.push_where(&mut builder);
    builder.push(
        r#" GROUP BY c.id, c.name, c.logo
          ORDER BY matching_job_count DESC, c.name COLLATE "C" ASC, c.id ASC
          LIMIT "#,
    );
    builder.push_bind(limit);
    builder
}

/// Immutable in-memory snapshot of listings and companies.
#[derive(Debug, Clone, Default)]
pub struct MemoryJobStore {
    jobs: Arc<Vec<JobListing>>,
    companies: Arc<HashMap<Uuid, Company>>,
}

impl MemoryJobStore {
    pub fn new(mut jobs: Vec<JobListing>, companies: Vec<Company>) -> Self {
        jobs.sort_by_key(|job| Reverse((job.created_at, job.id)));
        let companies = companies
            .into_iter()
            .map(|company| (company.id, company))
            .collect();

        Self {
            jobs: Arc::new(jobs),
            companies: Arc::new(companies),
        }
    }

    fn matching<'a>(
        &'a self,
        predicate: &'a JobPredicate,
    ) -> impl Iterator<Item = &'a JobListing> + 'a {
        self.jobs.iter().filter(move |job| predicate.matches(job))
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn fetch_page(
        &self,
        predicate: &JobPredicate,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<JobListing>> {
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(self
            .matching(predicate)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count(&self, predicate: &JobPredicate) -> Result<i64> {
        Ok(self.matching(predicate).count() as i64)
    }

    async fn employer_facets(
        &self,
        predicate: &JobPredicate,
        limit: i64,
    ) -> Result<Vec<EmployerFacet>> {
        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for job in self.matching(predicate) {
            if self.companies.contains_key(&job.company_id) {
                *counts.entry(job.company_id).or_insert(0) += 1;
            }
        }

        let mut facets: Vec<EmployerFacet> = counts
            .into_iter()
            .filter_map(|(company_id, matching_job_count)| {
                self.companies.get(&company_id).map(|company| EmployerFacet {
                    company_id,
                    name: company.name.clone(),
                    logo_ref: company.logo.clone(),
                    matching_job_count,
                })
            })
            .collect();
        facets.sort_by(|a, b| {
            b.matching_job_count
                .cmp(&a.matching_job_count)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.company_id.cmp(&b.company_id))
        });
        facets.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(facets)
    }
}
