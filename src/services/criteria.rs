//! Turns loosely-typed query input into a validated [`SearchCriteria`].
//!
//! Normalization never fails: a value that cannot be understood is treated as
//! if the client had not sent it.

use serde::Serialize;

use crate::dto::search_dto::JobSearchQuery;
use crate::models::catalogue::{ReferenceCatalogue, VocabularyKind};

/// Filter names as reported back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CriterionField {
    FreeText,
    Category,
    City,
    District,
    EmploymentType,
    SalaryMin,
    SalaryMax,
    SalaryBand,
    Negotiable,
    Experience,
    Education,
    Skills,
}

impl CriterionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionField::FreeText => "q",
            CriterionField::Category => "category",
            CriterionField::City => "city",
            CriterionField::District => "district",
            CriterionField::EmploymentType => "employmentType",
            CriterionField::SalaryMin => "salaryMin",
            CriterionField::SalaryMax => "salaryMax",
            CriterionField::SalaryBand => "salaryBand",
            CriterionField::Negotiable => "negotiable",
            CriterionField::Experience => "experience",
            CriterionField::Education => "education",
            CriterionField::Skills => "skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub free_text: Option<String>,
    pub category_id: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_band: Option<String>,
    pub negotiable_only: bool,
    pub experience_level: Option<String>,
    pub education_level: Option<String>,
    pub skill_keywords: Vec<String>,
    pub page: i64,
    pub page_size: i64,
}

impl SearchCriteria {
    /// Criteria with nothing active, positioned on the first page.
    pub fn unfiltered(page_size: i64) -> Self {
        Self {
            free_text: None,
            category_id: None,
            city: None,
            district: None,
            employment_type: None,
            salary_min: None,
            salary_max: None,
            salary_band: None,
            negotiable_only: false,
            experience_level: None,
            education_level: None,
            skill_keywords: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn normalize(
        query: &JobSearchQuery,
        catalogue: &ReferenceCatalogue,
        page_size: i64,
    ) -> Self {
        let mut criteria = Self::unfiltered(page_size);

        criteria.free_text = clean_text(query.q.as_deref());
        criteria.category_id = clean_text(query.category.as_deref());
        criteria.city = clean_text(query.city.as_deref())
            .or_else(|| clean_text(query.location.as_deref()));
        // District only narrows a city; without one it is dropped.
        criteria.district = criteria
            .city
            .as_ref()
            .and_then(|_| clean_text(query.district.as_deref()));

        criteria.employment_type = known_code(
            catalogue,
            VocabularyKind::EmploymentType,
            query.employment_type.as_deref(),
        );
        criteria.experience_level =
            known_code(catalogue, VocabularyKind::Experience, query.experience.as_deref());
        criteria.education_level =
            known_code(catalogue, VocabularyKind::Education, query.education.as_deref());

        criteria.salary_min = parse_non_negative(query.salary_min.as_deref());
        criteria.salary_max = parse_non_negative(query.salary_max.as_deref());
        if let Some(band) = clean_text(query.salary_band.as_deref())
            .and_then(|id| catalogue.salary_band(&id))
        {
            criteria.salary_band = Some(band.id.clone());
            criteria.salary_min = criteria.salary_min.or(band.min_amount);
            criteria.salary_max = criteria.salary_max.or(band.max_amount);
        }
        if let (Some(min), Some(max)) = (criteria.salary_min, criteria.salary_max) {
            if min > max {
                criteria.salary_min = Some(max);
                criteria.salary_max = Some(min);
            }
        }

        criteria.negotiable_only = query
            .negotiable
            .as_deref()
            .map(|raw| {
                let raw = raw.trim();
                raw.eq_ignore_ascii_case("true") || raw == "1"
            })
            .unwrap_or(false);

        criteria.skill_keywords = split_skills(query.skills.as_deref());
        criteria.page = query
            .page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1);

        criteria
    }

    /// Zero-based row offset of the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn has_salary_range(&self) -> bool {
        self.salary_min.is_some() || self.salary_max.is_some()
    }

    /// Every active criterion paired with its display value, in a stable order.
    pub fn active_filters(&self) -> Vec<(CriterionField, String)> {
        let mut active = Vec::new();
        let mut push = |field: CriterionField, value: Option<String>| {
            if let Some(value) = value {
                active.push((field, value));
            }
        };

        push(CriterionField::FreeText, self.free_text.clone());
        push(CriterionField::Category, self.category_id.clone());
        push(CriterionField::City, self.city.clone());
        push(CriterionField::District, self.district.clone());
        push(CriterionField::EmploymentType, self.employment_type.clone());
        push(CriterionField::SalaryMin, self.salary_min.map(|v| v.to_string()));
        push(CriterionField::SalaryMax, self.salary_max.map(|v| v.to_string()));
        push(CriterionField::SalaryBand, self.salary_band.clone());
        push(
            CriterionField::Negotiable,
            self.negotiable_only.then(|| "true".to_string()),
        );
        push(CriterionField::Experience, self.experience_level.clone());
        push(CriterionField::Education, self.education_level.clone());
        push(
            CriterionField::Skills,
            (!self.skill_keywords.is_empty()).then(|| self.skill_keywords.join(",")),
        );

        active
    }

    pub fn active_fields(&self) -> Vec<CriterionField> {
        self.active_filters()
            .into_iter()
            .map(|(field, _)| field)
            .collect()
    }
}

fn clean_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_non_negative(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value >= 0)
}

fn known_code(
    catalogue: &ReferenceCatalogue,
    kind: VocabularyKind,
    raw: Option<&str>,
) -> Option<String> {
    let code = clean_text(raw)?;
    match catalogue.find_code(kind, &code) {
        Some(entry) => Some(entry.code.clone()),
        None => {
            tracing::debug!(%kind, code = %code, "ignoring value missing from catalogue");
            None
        }
    }
}

fn split_skills(raw: Option<&str>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in raw.unwrap_or_default().split(',') {
        let token = token.trim().to_lowercase();
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}
