use std::path::Path;

use sea_orm_migration::prelude::*;

use crate::{
    DEFAULT_FIXTURE_FILE, FixtureSource,
    fixture::{FixtureSeeder, SeedPolicy},
};

/// One-time bootstrap of the Safe tables from an on-disk fixture file.
///
/// Applying with a missing fixture file is a no-op; any other failure is
/// suppressed best-effort so environment provisioning never blocks on the
/// fixture. Rolling back empties all six seeded tables unconditionally,
/// dependents first.
#[derive(DeriveMigrationName)]
pub struct Migration(pub(crate) FixtureSource);

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let path = match self.0 {
            FixtureSource::NoData => return Ok(()),
            FixtureSource::DefaultFile => Path::new(DEFAULT_FIXTURE_FILE),
        };

        match FixtureSeeder::new(SeedPolicy::BestEffort)
            .seed(manager.get_connection(), path)
            .await
        {
            Ok(report) if report.skipped => {
                tracing::debug!(path = %path.display(), "no fixture file present, nothing to seed");
            }
            Ok(report) => {
                tracing::info!(
                    path = %path.display(),
                    inserted = report.inserted,
                    suppressed = report.errors.len(),
                    "loaded initial Safe data"
                );
            }
            Err(error) => {
                tracing::warn!(%error, "initial Safe data load failed");
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if self.0 == FixtureSource::NoData {
            return Ok(());
        }

        match FixtureSeeder::new(SeedPolicy::BestEffort)
            .wipe(manager.get_connection())
            .await
        {
            Ok(report) => match &report.error {
                None => {
                    tracing::info!(deleted = report.deleted(), "wiped seeded Safe data");
                }
                Some(error) => {
                    tracing::warn!(
                        deleted = report.deleted(),
                        %error,
                        "seeded Safe data only partially wiped"
                    );
                }
            },
            Err(error) => {
                tracing::warn!(%error, "wipe of seeded Safe data failed");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Database, Statement};

    use crate::{Migrator, MigratorTrait};

    #[tokio::test]
    async fn test_migration_applies_and_reverts_without_fixture_file() -> anyhow::Result<()> {
        let db = Database::connect("sqlite::memory:").await?;

        // The default fixture path does not exist in a test environment, so
        // applying must be a silent no-op and reverting must leave the
        // empty tables empty.
        Migrator::<1>::up(&db, None).await?;

        let backend = db.get_database_backend();
        let row = db
            .query_one(Statement::from_string(
                backend,
                "SELECT COUNT(*) AS cnt FROM chain".to_string(),
            ))
            .await?
            .expect("count query should return a row");
        let count: i64 = row.try_get("", "cnt")?;
        assert_eq!(count, 0);

        Migrator::<1>::down(&db, None).await?;
        Ok(())
    }
}
