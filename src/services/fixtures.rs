use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::models::catalogue::{
    CategoryRef, ReferenceCatalogue, SalaryBand, VocabularyEntry, VocabularyKind,
};
use crate::models::company::Company;
use crate::models::job_listing::{JobListing, STATUS_PUBLISHED};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
}

pub fn company_id(n: u128) -> Uuid {
    Uuid::from_u128(1_000 + n)
}

pub fn company(n: u128, name: &str) -> Company {
    Company {
        id: company_id(n),
        name: name.to_string(),
        logo: Some(format!("logos/{}.png", n)),
    }
}

/// Published listing `n`; larger `n` means more recently created.
pub fn job(n: u128, company_id: Uuid) -> JobListing {
    JobListing {
        id: Uuid::from_u128(n),
        title: format!("Position {}", n),
        description: Some("General duties".to_string()),
        company_id,
        category_id: Some("C0".to_string()),
        salary_min: None,
        salary_max: None,
        negotiable: false,
        employment_type: Some("full_time".to_string()),
        city: "Dushanbe".to_string(),
        district: None,
        experience: None,
        education: None,
        skills: None,
        status: STATUS_PUBLISHED.to_string(),
        created_at: epoch() + Duration::minutes(n as i64),
    }
}

pub fn catalogue() -> ReferenceCatalogue {
    ReferenceCatalogue::new(
        vec![
            CategoryRef {
                id: "C0".into(),
                name: "General".into(),
            },
            CategoryRef {
                id: "C1".into(),
                name: "Engineering".into(),
            },
        ],
        vec![
            VocabularyEntry {
                kind: VocabularyKind::EmploymentType,
                code: "full_time".into(),
                label: "Full time".into(),
            },
            VocabularyEntry {
                kind: VocabularyKind::EmploymentType,
                code: "part_time".into(),
                label: "Part time".into(),
            },
            VocabularyEntry {
                kind: VocabularyKind::Experience,
                code: "senior".into(),
                label: "5+ years".into(),
            },
            VocabularyEntry {
                kind: VocabularyKind::Education,
                code: "bachelor".into(),
                label: "Bachelor's degree".into(),
            },
        ],
        vec![SalaryBand {
            id: "mid".into(),
            label: "40 000 - 60 000".into(),
            min_amount: Some(40_000),
            max_amount: Some(60_000),
        }],
    )
}
