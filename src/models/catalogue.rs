//! Static reference data used to validate enumerated filters and to label
//! active filters. Loaded once and shared read-only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyKind {
    EmploymentType,
    Experience,
    Education,
}

impl VocabularyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyKind::EmploymentType => "employment_type",
            VocabularyKind::Experience => "experience",
            VocabularyKind::Education => "education",
        }
    }
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VocabularyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employment_type" => Ok(VocabularyKind::EmploymentType),
            "experience" => Ok(VocabularyKind::Experience),
            "education" => Ok(VocabularyKind::Education),
            other => Err(format!("unknown vocabulary kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryRef {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct VocabularyEntry {
    pub kind: VocabularyKind,
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBand {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(range(min = 0))]
    pub min_amount: Option<i64>,
    #[validate(range(min = 0))]
    pub max_amount: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalogue {
    categories: Vec<CategoryRef>,
    vocabularies: Vec<VocabularyEntry>,
    salary_bands: Vec<SalaryBand>,
}

impl ReferenceCatalogue {
    pub fn new(
        categories: Vec<CategoryRef>,
        vocabularies: Vec<VocabularyEntry>,
        salary_bands: Vec<SalaryBand>,
    ) -> Self {
        Self {
            categories,
            vocabularies,
            salary_bands,
        }
    }

    pub fn categories(&self) -> &[CategoryRef] {
        &self.categories
    }

    pub fn salary_bands(&self) -> &[SalaryBand] {
        &self.salary_bands
    }

    pub fn vocabulary(&self, kind: VocabularyKind) -> impl Iterator<Item = &VocabularyEntry> {
        self.vocabularies.iter().filter(move |entry| entry.kind == kind)
    }

    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_str())
    }

    /// Case-insensitive lookup returning the catalogue's canonical entry.
    pub fn find_code(&self, kind: VocabularyKind, code: &str) -> Option<&VocabularyEntry> {
        self.vocabulary(kind)
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
    }

    pub fn label_for(&self, kind: VocabularyKind, code: &str) -> Option<&str> {
        self.find_code(kind, code).map(|entry| entry.label.as_str())
    }

    pub fn salary_band(&self, id: &str) -> Option<&SalaryBand> {
        self.salary_bands.iter().find(|band| band.id == id)
    }
}
