use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::config::SearchSettings;
use crate::dto::search_dto::JobSearchQuery;
use crate::error::{Error, Result};
use crate::models::catalogue::ReferenceCatalogue;
use crate::services::criteria::SearchCriteria;
use crate::services::job_store::JobStore;
use crate::services::pagination::Pagination;
use crate::services::predicate::JobPredicate;
use crate::services::result_assembler::ResultAssembler;

pub use crate::services::result_assembler::{ActiveFilter, SearchResult};

/// Stateless search pipeline. Cloning is cheap; every request gets its own
/// reads and nothing is retained between calls.
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn JobStore>,
    catalogue: Arc<ReferenceCatalogue>,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(
        store: Arc<dyn JobStore>,
        catalogue: Arc<ReferenceCatalogue>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            store,
            catalogue,
            settings,
        }
    }

    pub fn catalogue(&self) -> &ReferenceCatalogue {
        &self.catalogue
    }

    pub fn criteria_from_query(&self, query: &JobSearchQuery) -> SearchCriteria {
        SearchCriteria::normalize(query, &self.catalogue, self.settings.page_size)
    }

    /// Runs one search under the configured deadline. Dropping the returned
    /// future abandons every read still in flight.
    #[instrument(skip(self, criteria), fields(page = criteria.page, active = criteria.active_fields().len()))]
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        match tokio::time::timeout(self.settings.timeout(), self.execute(criteria)).await {
            Ok(result) => result,
            Err(_) => {
                error!(timeout_ms = self.settings.timeout_ms, "job search deadline exceeded");
                Err(Error::Timeout(self.settings.timeout_ms))
            }
        }
    }

    async fn execute(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        let predicate = JobPredicate::from_criteria(criteria);
        let page_size = criteria.page_size;

        let (jobs, total, employers) = tokio::try_join!(
            self.store.fetch_page(&predicate, criteria.offset(), page_size),
            self.store.count(&predicate),
            self.store
                .employer_facets(&predicate, self.settings.facet_limit),
        )
        .map_err(store_unavailable)?;

        let pagination = Pagination::compute(criteria.page, page_size, total);
        let jobs = if pagination.was_clamped_from(criteria.page) {
            debug!(
                requested = criteria.page,
                clamped = pagination.page,
                "requested page past the end, re-reading last page"
            );
            self.store
                .fetch_page(&predicate, pagination.offset(), page_size)
                .await
                .map_err(store_unavailable)?
        } else {
            jobs
        };

        debug!(total, returned = jobs.len(), "job search completed");
        Ok(ResultAssembler::new(&self.catalogue).assemble(criteria, jobs, employers, pagination))
    }
}

fn store_unavailable(err: Error) -> Error {
    match err {
        Error::StoreUnavailable(_) => err,
        other => {
            error!(error = ?other, "job store read failed");
            Error::StoreUnavailable(other.to_string())
        }
    }
}
