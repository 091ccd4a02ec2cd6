//! Merges the executor's reads into one [`SearchResult`] and labels active
//! filters from the reference catalogue. Labelling fails soft: a reference
//! that no longer resolves is shown as its raw value.

use crate::models::catalogue::{CategoryRef, ReferenceCatalogue, VocabularyKind};
use crate::models::company::EmployerFacet;
use crate::models::job_listing::JobListing;
use crate::services::criteria::{CriterionField, SearchCriteria};
use crate::services::pagination::Pagination;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub field: CriterionField,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub jobs: Vec<JobListing>,
    pub employers: Vec<EmployerFacet>,
    pub categories: Vec<CategoryRef>,
    pub pagination: Pagination,
    pub active_filters: Vec<ActiveFilter>,
}

impl SearchResult {
    pub fn active_fields(&self) -> Vec<CriterionField> {
        self.active_filters.iter().map(|filter| filter.field).collect()
    }
}

pub struct ResultAssembler<'a> {
    catalogue: &'a ReferenceCatalogue,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(catalogue: &'a ReferenceCatalogue) -> Self {
        Self { catalogue }
    }

    pub fn assemble(
        &self,
        criteria: &SearchCriteria,
        jobs: Vec<JobListing>,
        employers: Vec<EmployerFacet>,
        pagination: Pagination,
    ) -> SearchResult {
        let active_filters = criteria
            .active_filters()
            .into_iter()
            .map(|(field, value)| ActiveFilter {
                label: self.label(field, &value),
                field,
                value,
            })
            .collect();

        SearchResult {
            jobs,
            employers,
            categories: self.catalogue.categories().to_vec(),
            pagination,
            active_filters,
        }
    }

    fn label(&self, field: CriterionField, value: &str) -> String {
        let resolved = match field {
            CriterionField::Category => self.catalogue.category_name(value),
            CriterionField::EmploymentType => {
                self.catalogue.label_for(VocabularyKind::EmploymentType, value)
            }
            CriterionField::Experience => self.catalogue.label_for(VocabularyKind::Experience, value),
            CriterionField::Education => self.catalogue.label_for(VocabularyKind::Education, value),
            CriterionField::SalaryBand => self
                .catalogue
                .salary_band(value)
                .map(|band| band.label.as_str()),
            _ => return value.to_string(),
        };

        match resolved {
            Some(label) => label.to_string(),
            None => {
                tracing::debug!(
                    field = field.as_str(),
                    value,
                    "reference no longer resolves, showing raw value"
                );
                value.to_string()
            }
        }
    }
}
