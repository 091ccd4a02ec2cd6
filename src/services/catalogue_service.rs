use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::error::Result;
use crate::models::catalogue::{
    CategoryRef, ReferenceCatalogue, SalaryBand, VocabularyEntry, VocabularyKind,
};

#[derive(sqlx::FromRow)]
struct VocabularyRow {
    kind: String,
    code: String,
    label: String,
}

pub struct CatalogueService {
    pool: PgPool,
}

impl CatalogueService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reads the reference tables once. Rows that fail validation are skipped
    /// so a bad entry never takes search down.
    pub async fn load(&self) -> Result<ReferenceCatalogue> {
        let categories = sqlx::query_as::<_, (String, String)>(
            "SELECT id, name FROM job_categories ORDER BY sort_order, name",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(id, name)| CategoryRef { id, name })
        .filter(|category| keep_valid("category", &category.id, category))
        .collect::<Vec<_>>();

        let vocabularies = sqlx::query_as::<_, VocabularyRow>(
            "SELECT kind, code, label FROM reference_vocabularies ORDER BY kind, sort_order, code",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .filter_map(|row| match row.kind.parse::<VocabularyKind>() {
            Ok(kind) => Some(VocabularyEntry {
                kind,
                code: row.code,
                label: row.label,
            }),
            Err(e) => {
                warn!(code = %row.code, error = %e, "skipping vocabulary row");
                None
            }
        })
        .filter(|entry| keep_valid("vocabulary", &entry.code, entry))
        .collect::<Vec<_>>();

        let salary_bands = sqlx::query_as::<_, (String, String, Option<i64>, Option<i64>)>(
            "SELECT id, label, min_amount, max_amount FROM salary_bands ORDER BY sort_order, id",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(id, label, min_amount, max_amount)| SalaryBand {
            id,
            label,
            min_amount,
            max_amount,
        })
        .filter(|band| keep_valid("salary band", &band.id, band))
        .collect::<Vec<_>>();

        info!(
            categories = categories.len(),
            vocabulary_entries = vocabularies.len(),
            salary_bands = salary_bands.len(),
            "reference catalogue loaded"
        );
        Ok(ReferenceCatalogue::new(categories, vocabularies, salary_bands))
    }
}

fn keep_valid<T: Validate>(what: &str, key: &str, value: &T) -> bool {
    match value.validate() {
        Ok(()) => true,
        Err(e) => {
            warn!(what, key, error = %e, "skipping invalid catalogue entry");
            false
        }
    }
}
