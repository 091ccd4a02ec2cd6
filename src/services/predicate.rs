//! Conjunction of independent filters built from [`SearchCriteria`].
//!
//! The same predicate is rendered two ways: evaluated directly against a
//! [`JobListing`] and pushed into a Postgres `WHERE` clause. Both renderings
//! must select the same listings.

use sqlx::{Postgres, QueryBuilder};

use crate::models::job_listing::{JobListing, STATUS_PUBLISHED};
use crate::services::criteria::SearchCriteria;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFilter {
    /// Case-insensitive substring over title, description and skills.
    FreeText(String),
    Category(String),
    /// Lowercased city, compared against the folded listing city.
    City(String),
    District(String),
    EmploymentType(String),
    Experience(String),
    Education(String),
    /// Range overlap, optionally widened by negotiable listings.
    Salary {
        min: Option<i64>,
        max: Option<i64>,
        include_negotiable: bool,
    },
    /// Every token must appear in the skills text.
    Skills(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPredicate {
    filters: Vec<JobFilter>,
}

impl JobPredicate {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let mut filters = Vec::new();

        if let Some(text) = &criteria.free_text {
            filters.push(JobFilter::FreeText(text.to_lowercase()));
        }
        if let Some(category) = &criteria.category_id {
            filters.push(JobFilter::Category(category.clone()));
        }
        if let Some(city) = &criteria.city {
            filters.push(JobFilter::City(city.to_lowercase()));
            if let Some(district) = &criteria.district {
                filters.push(JobFilter::District(district.to_lowercase()));
            }
        }
        if let Some(kind) = &criteria.employment_type {
            filters.push(JobFilter::EmploymentType(kind.clone()));
        }
        if criteria.has_salary_range() || criteria.negotiable_only {
            filters.push(JobFilter::Salary {
                min: criteria.salary_min,
                max: criteria.salary_max,
                include_negotiable: criteria.negotiable_only,
            });
        }
        if let Some(level) = &criteria.experience_level {
            filters.push(JobFilter::Experience(level.clone()));
        }
        if let Some(level) = &criteria.education_level {
            filters.push(JobFilter::Education(level.clone()));
        }
        if !criteria.skill_keywords.is_empty() {
            filters.push(JobFilter::Skills(criteria.skill_keywords.clone()));
        }

        Self { filters }
    }

    /// True when only the published-status restriction applies.
    pub fn matches_all_published(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn matches(&self, job: &JobListing) -> bool {
        job.is_published() && self.filters.iter().all(|filter| filter.matches(job))
    }

    /// Appends `WHERE ...` for listings aliased as `j`.
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE j.status = ");
        builder.push_bind(STATUS_PUBLISHED);
        for filter in &self.filters {
            builder.push(" AND ");
            filter.push_sql(builder);
        }
    }
}

impl JobFilter {
    fn matches(&self, job: &JobListing) -> bool {
        match self {
            JobFilter::FreeText(needle) => {
                contains_folded(Some(&job.title), needle)
                    || contains_folded(job.description.as_deref(), needle)
                    || contains_folded(job.skills.as_deref(), needle)
            }
            JobFilter::Category(id) => job.category_id.as_deref() == Some(id.as_str()),
            JobFilter::City(city) => job.city.to_lowercase() == *city,
            JobFilter::District(district) => job
                .district
                .as_deref()
                .is_some_and(|value| value.to_lowercase() == *district),
            JobFilter::EmploymentType(code) => job.employment_type.as_deref() == Some(code.as_str()),
            JobFilter::Experience(code) => job.experience.as_deref() == Some(code.as_str()),
            JobFilter::Education(code) => job.education.as_deref() == Some(code.as_str()),
            JobFilter::Salary {
                min,
                max,
                include_negotiable,
            } => {
                if *include_negotiable && job.negotiable {
                    return true;
                }
                if min.is_none() && max.is_none() {
                    // Negotiable requested on its own.
                    return false;
                }
                job.has_stated_salary()
                    && min.map_or(true, |floor| job.salary_max.map_or(true, |top| top >= floor))
                    && max.map_or(true, |ceiling| job.salary_min.map_or(true, |bottom| bottom <= ceiling))
            }
            JobFilter::Skills(tokens) => tokens
                .iter()
                .all(|token| contains_folded(job.skills.as_deref(), token)),
        }
    }

    fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            JobFilter::FreeText(needle) => {
                let pattern = like_pattern(needle);
                builder.push("(j.title ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(" OR j.description ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(" OR j.skills ILIKE ");
                builder.push_bind(pattern);
                builder.push(")");
            }
            JobFilter::Category(id) => {
                builder.push("j.category_id = ");
                builder.push_bind(id.clone());
            }
            JobFilter::City(city) => {
                builder.push("LOWER(j.city) = LOWER(");
                builder.push_bind(city.clone());
                builder.push(")");
            }
            JobFilter::District(district) => {
                builder.push("LOWER(j.district) = LOWER(");
                builder.push_bind(district.clone());
                builder.push(")");
            }
            JobFilter::EmploymentType(code) => {
                builder.push("j.employment_type = ");
                builder.push_bind(code.clone());
            }
            JobFilter::Experience(code) => {
                builder.push("j.experience = ");
                builder.push_bind(code.clone());
            }
            JobFilter::Education(code) => {
                builder.push("j.education = ");
                builder.push_bind(code.clone());
            }
            JobFilter::Salary {
                min,
                max,
                include_negotiable,
            } => {
                builder.push("(");
                if *include_negotiable {
                    builder.push("j.negotiable");
                    if min.is_none() && max.is_none() {
                        builder.push(")");
                        return;
                    }
                    builder.push(" OR ");
                }
                builder.push("((j.salary_min IS NOT NULL OR j.salary_max IS NOT NULL)");
                if let Some(floor) = min {
                    builder.push(" AND (j.salary_max IS NULL OR j.salary_max >= ");
                    builder.push_bind(*floor);
                    builder.push(")");
                }
                if let Some(ceiling) = max {
                    builder.push(" AND (j.salary_min IS NULL OR j.salary_min <= ");
                    builder.push_bind(*ceiling);
                    builder.push(")");
                }
                builder.push("))");
            }
            JobFilter::Skills(tokens) => {
                builder.push("(TRUE");
                for token in tokens {
                    builder.push(" AND j.skills ILIKE ");
                    builder.push_bind(like_pattern(token));
                }
                builder.push(")");
            }
        }
    }
}

fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(needle))
}

/// `%needle%` with LIKE metacharacters escaped (Postgres' default escape is `\`).
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{job, company_id};

    fn criteria() -> SearchCriteria {
        SearchCriteria::unfiltered(20)
    }

    fn salaried(min: Option<i64>, max: Option<i64>, negotiable: bool) -> JobListing {
        let mut listing = job(1, company_id(1));
        listing.salary_min = min;
        listing.salary_max = max;
        listing.negotiable = negotiable;
        listing
    }

    #[test]
    fn no_active_fields_matches_every_published_job() {
        let predicate = JobPredicate::from_criteria(&criteria());
        assert!(predicate.matches_all_published());
        assert!(predicate.matches(&job(1, company_id(1))));

        let mut draft = job(2, company_id(1));
        draft.status = "draft".into();
        assert!(!predicate.matches(&draft));
    }

    #[test]
    fn free_text_searches_title_description_and_skills() {
        let predicate = JobPredicate::from_criteria(&SearchCriteria {
            free_text: Some("KUBERNETES".into()),
            ..criteria()
        });

        let mut in_title = job(1, company_id(1));
        in_title.title = "Kubernetes operator".into();
        let mut in_description = job(2, company_id(1));
        in_description.description = Some("You will run kubernetes clusters".into());
        let mut in_skills = job(3, company_id(1));
        in_skills.skills = Some("Docker, Kubernetes".into());
        let elsewhere = job(4, company_id(1));

        assert!(predicate.matches(&in_title));
        assert!(predicate.matches(&in_description));
        assert!(predicate.matches(&in_skills));
        assert!(!predicate.matches(&elsewhere));
    }

    #[test]
    fn salary_ranges_match_on_overlap() {
        let listing = salaried(Some(40_000), Some(60_000), false);

        let overlapping = JobPredicate::from_criteria(&SearchCriteria {
            salary_min: Some(50_000),
            salary_max: Some(70_000),
            ..criteria()
        });
        let disjoint = JobPredicate::from_criteria(&SearchCriteria {
            salary_min: Some(70_000),
            salary_max: Some(90_000),
            ..criteria()
        });

        assert!(overlapping.matches(&listing));
        assert!(!disjoint.matches(&listing));
    }

    #[test]
    fn open_ended_bounds_extend_to_infinity() {
        let floor_only = JobPredicate::from_criteria(&SearchCriteria {
            salary_min: Some(100_000),
            ..criteria()
        });
        assert!(floor_only.matches(&salaried(Some(80_000), None, false)));
        assert!(!floor_only.matches(&salaried(Some(20_000), Some(30_000), false)));

        let ceiling_only = JobPredicate::from_criteria(&SearchCriteria {
            salary_max: Some(10_000),
            ..criteria()
        });
        assert!(ceiling_only.matches(&salaried(None, Some(50_000), false)));
        assert!(!ceiling_only.matches(&salaried(Some(20_000), None, false)));
    }

    #[test]
    fn listings_without_salary_only_match_through_negotiable() {
        let unstated = salaried(None, None, true);
        let range = SearchCriteria {
            salary_min: Some(1),
            salary_max: Some(2),
            ..criteria()
        };

        assert!(!JobPredicate::from_criteria(&range).matches(&unstated));
        assert!(JobPredicate::from_criteria(&SearchCriteria {
            negotiable_only: true,
            ..range
        })
        .matches(&unstated));
    }

    #[test]
    fn negotiable_without_range_selects_negotiable_listings() {
        let predicate = JobPredicate::from_criteria(&SearchCriteria {
            negotiable_only: true,
            ..criteria()
        });
        assert!(predicate.matches(&salaried(Some(10), Some(20), true)));
        assert!(!predicate.matches(&salaried(Some(10), Some(20), false)));
    }

    #[test]
    fn every_skill_token_must_be_present() {
        let mut listing = job(1, company_id(1));
        listing.skills = Some("React, Node.js".into());

        let react = JobPredicate::from_criteria(&SearchCriteria {
            skill_keywords: vec!["react".into()],
            ..criteria()
        });
        let react_vue = JobPredicate::from_criteria(&SearchCriteria {
            skill_keywords: vec!["react".into(), "vue".into()],
            ..criteria()
        });

        assert!(react.matches(&listing));
        assert!(!react_vue.matches(&listing));
    }

    #[test]
    fn district_narrows_city() {
        let mut listing = job(1, company_id(1));
        listing.city = "Dushanbe".into();
        listing.district = Some("Sino".into());

        let same = JobPredicate::from_criteria(&SearchCriteria {
            city: Some("dushanbe".into()),
            district: Some("sino".into()),
            ..criteria()
        });
        let other_district = JobPredicate::from_criteria(&SearchCriteria {
            city: Some("Dushanbe".into()),
            district: Some("Firdavsi".into()),
            ..criteria()
        });

        assert!(same.matches(&listing));
        assert!(!other_district.matches(&listing));
    }

    #[test]
    fn city_and_district_fold_non_ascii_case() {
        let mut listing = job(1, company_id(1));
        listing.city = "Душанбе".into();
        listing.district = Some("Сино".into());

        let lower = JobPredicate::from_criteria(&SearchCriteria {
            city: Some("душанбе".into()),
            district: Some("сино".into()),
            ..criteria()
        });
        let upper = JobPredicate::from_criteria(&SearchCriteria {
            city: Some("ДУШАНБЕ".into()),
            district: Some("СИНО".into()),
            ..criteria()
        });
        let other = JobPredicate::from_criteria(&SearchCriteria {
            city: Some("Хуҷанд".into()),
            ..criteria()
        });

        assert!(lower.matches(&listing));
        assert!(upper.matches(&listing));
        assert!(!other.matches(&listing));
    }

    #[test]
    fn district_is_ignored_without_city() {
        let predicate = JobPredicate::from_criteria(&SearchCriteria {
            district: Some("Sino".into()),
            ..criteria()
        });
        assert!(predicate.matches_all_published());
    }

    #[test]
    fn sql_binds_every_value() {
        let predicate = JobPredicate::from_criteria(&SearchCriteria {
            free_text: Some("50%_off".into()),
            category_id: Some("C1".into()),
            salary_min: Some(50_000),
            negotiable_only: true,
            skill_keywords: vec!["rust".into(), "sql".into()],
            ..criteria()
        });
        let mut builder = QueryBuilder::<Postgres>::new("SELECT j.id FROM job_listings j");
        predicate.push_where(&mut builder);
        let sql = builder.sql();

        assert!(sql.starts_with("SELECT j.id FROM job_listings j WHERE j.status = $1"));
        assert!(sql.contains("(j.title ILIKE $2 OR j.description ILIKE $3 OR j.skills ILIKE $4)"));
        assert!(sql.contains("j.category_id = $5"));
        assert!(sql.contains("(j.negotiable OR ((j.salary_min IS NOT NULL OR j.salary_max IS NOT NULL) AND (j.salary_max IS NULL OR j.salary_max >= $6)))"));
        assert!(sql.contains("(TRUE AND j.skills ILIKE $7 AND j.skills ILIKE $8)"));
        assert!(!sql.contains("50%"));
    }

    #[test]
    fn city_sql_folds_both_sides() {
        let predicate = JobPredicate::from_criteria(&SearchCriteria {
            city: Some("Душанбе".into()),
            district: Some("Сино".into()),
            ..criteria()
        });
        assert_eq!(
            predicate,
            JobPredicate {
                filters: vec![
                    JobFilter::City("душанбе".into()),
                    JobFilter::District("сино".into()),
                ],
            }
        );

        let mut builder = QueryBuilder::<Postgres>::new("SELECT j.id FROM job_listings j");
        predicate.push_where(&mut builder);
        let sql = builder.sql();
        assert!(sql.contains("LOWER(j.city) = LOWER($2)"));
        assert!(sql.contains("LOWER(j.district) = LOWER($3)"));
    }

    #[test]
    fn like_patterns_escape_metacharacters() {
        assert_eq!(like_pattern("c++"), "%c++%");
        assert_eq!(like_pattern("100%_sure\\"), "%100\\%\\_sure\\\\%");
    }
}
