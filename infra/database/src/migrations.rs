use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

const LEDGER: &str = "DEFINE TABLE IF NOT EXISTS migration SCHEMALESS;";

/// One schema script owned by a feature slice.
///
/// Scripts must be idempotent (`DEFINE ... IF NOT EXISTS`); the ledger only guarantees that a
/// version runs once and is never edited after it has been applied.
#[derive(Debug, Clone)]
pub struct Migration {
    pub slice: &'static str,
    pub version: &'static str,
    pub script: &'static str,
    checksum: String,
}

impl Migration {
    #[must_use]
    pub fn new(slice: &'static str, version: &'static str, script: &'static str) -> Self {
        let checksum = hex::encode(Sha256::digest(script.trim().as_bytes()));
        Self { slice, version, script, checksum }
    }

    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    fn key(&self) -> String {
        format!("{}:{}", self.slice, self.version)
    }
}

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AppliedMigration {
    slice: String,
    version: String,
    checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> MigrationRunner<'a> {
    pub(crate) const fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        ensure_unique(migrations)?;

        let mut report = MigrationReport::default();
        let applied = self.applied().await?;

        for migration in migrations {
            if let Some(existing) = applied.get(&migration.key()) {
                ensure_checksum_match(migration, &existing.checksum)?;
                report.skipped.push(migration.key());
                continue;
            }

            self.apply(migration).await?;
            report.applied.push(migration.key());
        }

        Ok(report)
    }

    async fn applied(&self) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query(LEDGER)
            .query("SELECT slice, version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(1)
            .context("Parsing migration ledger")?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.slice, entry.version), entry))
            .collect())
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE type::thing('migration', [$slice, $version]) CONTENT {{
                slice: $slice,
                version: $version,
                checksum: $checksum,
                appliedAt: time::now()
            }} RETURN NONE;
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(query)
            .bind(("slice", migration.slice))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum.clone()))
            .await
            .and_then(surrealdb::Response::check)
            .context(format!("SQL execution failed at {}", migration.key()))?;

        Ok(())
    }
}

fn ensure_unique(migrations: &[Migration]) -> Result<(), DatabaseError> {
    let mut seen = FxHashSet::default();
    for migration in migrations {
        if !seen.insert(migration.key()) {
            return Err(DatabaseError::Migration {
                message: format!("Duplicate migration {}", migration.key()).into(),
                context: None,
            });
        }
    }
    Ok(())
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    if existing != migration.checksum {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (recorded {}, found {})",
                migration.key(),
                existing,
                migration.checksum
            )
            .into(),
            context: Some("Migration already applied with different content".into()),
        });
    }
    Ok(())
}
