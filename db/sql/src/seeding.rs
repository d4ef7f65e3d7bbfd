//! Fixture seeding operations on the database handle.
//!
//! Thin surface over [`migration::fixture::FixtureSeeder`]: the handle owns
//! the connection, the caller picks the fixture path and the failure
//! policy. The six target tables are fixed; nothing is looked up
//! dynamically.

use std::path::Path;

use async_trait::async_trait;

pub use migration::fixture::{FixtureSeeder, SeedPolicy, SeedReport, WipeReport};

use crate::{db::SafeliDb, errors::Result};

#[async_trait]
pub trait SafeliDbSeedOperations {
    /// Seed the chain, master copy, proxy factory and contract tables from
    /// a fixture file. A missing file yields a skipped report, not an
    /// error.
    async fn seed_from_fixture(&self, path: &Path, policy: SeedPolicy) -> Result<SeedReport>;

    /// Delete ALL rows from the six seedable tables, dependents first.
    ///
    /// This empties the tables regardless of how the rows got there, so a
    /// rollback in an environment that accumulated data after seeding
    /// loses that data too.
    async fn wipe_seeded_data(&self, policy: SeedPolicy) -> Result<WipeReport>;
}

#[async_trait]
impl SafeliDbSeedOperations for SafeliDb {
    async fn seed_from_fixture(&self, path: &Path, policy: SeedPolicy) -> Result<SeedReport> {
        let report = FixtureSeeder::new(policy).seed(self.conn(), path).await?;

        if report.skipped {
            tracing::debug!(path = %path.display(), "fixture file absent, nothing seeded");
        } else {
            tracing::info!(
                path = %path.display(),
                inserted = report.inserted,
                suppressed = report.errors.len(),
                "fixture seeding finished"
            );
        }

        Ok(report)
    }

    async fn wipe_seeded_data(&self, policy: SeedPolicy) -> Result<WipeReport> {
        let report = FixtureSeeder::new(policy).wipe(self.conn()).await?;

        tracing::info!(
            deleted = report.deleted(),
            completed = report.completed(),
            "seeded data wipe finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use safeli_db_entity::prelude::*;
    use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

    use crate::{
        db::SafeliDb,
        seeding::{SafeliDbSeedOperations, SeedPolicy},
    };

    /// Seven records across the six seedable tables.
    fn sample_fixture() -> String {
        serde_json::json!([
            {"model": "history.chain", "pk": 1, "fields": {"name": "Ethereum Mainnet"}},
            {"model": "history.chain", "pk": 100, "fields": {"name": "Gnosis Chain"}},
            {"model": "history.safemastercopy", "pk": 1, "fields": {
                "address": "0xd9Db270c1B5E3Bd161E8c8503c55cEABeE709552",
                "version": "1.3.0",
                "initial_block_number": 12504126,
                "l2": false,
                "chain_id": 1
            }},
            {"model": "history.proxyfactory", "pk": 1, "fields": {
                "address": "0xa6B71E26C5e0845f74c812102Ca7114b6a896AB2",
                "version": "1.3.0",
                "initial_block_number": 12504124,
                "chain_id": 1
            }},
            {"model": "contracts.contractabi", "pk": 7, "fields": {
                "abi": [{"type": "function", "name": "multiSend"}],
                "description": "MultiSend",
                "relevance": 50
            }},
            {"model": "contracts.contract", "pk": "0x40A2aCCbd92BCA938b02010E17A5b8929b49130D", "fields": {
                "name": "MultiSend",
                "display_name": "Multi Send",
                "contract_abi": 7,
                "trusted_for_delegate_call": true
            }},
            {"model": "history.safecontract", "pk": "0x655A9e6b044d6B62F393f9990ec3eA877e966e18", "fields": {
                "created_block_number": 13000000,
                "master_copy": "0xd9Db270c1B5E3Bd161E8c8503c55cEABeE709552"
            }}
        ])
        .to_string()
    }

    fn write_fixture(dir: &tempfile::TempDir, contents: &str) -> anyhow::Result<PathBuf> {
        let path = dir.path().join("safe_full_data.json");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    async fn all_table_counts(db: &SafeliDb) -> anyhow::Result<[u64; 6]> {
        Ok([
            Chain::find().count(db.conn()).await?,
            SafeMasterCopy::find().count(db.conn()).await?,
            ProxyFactory::find().count(db.conn()).await?,
            ContractAbi::find().count(db.conn()).await?,
            Contract::find().count(db.conn()).await?,
            SafeContract::find().count(db.conn()).await?,
        ])
    }

    #[tokio::test]
    async fn test_missing_fixture_seeds_nothing() -> anyhow::Result<()> {
        let db = SafeliDb::new_in_memory().await?;
        let dir = tempfile::tempdir()?;

        let report = db
            .seed_from_fixture(&dir.path().join("absent.json"), SeedPolicy::BestEffort)
            .await?;

        assert!(report.skipped);
        assert_eq!(report.inserted, 0);
        assert_eq!(all_table_counts(&db).await?, [0; 6]);
        Ok(())
    }

    #[tokio::test]
    async fn test_well_formed_fixture_seeds_all_records() -> anyhow::Result<()> {
        let db = SafeliDb::new_in_memory().await?;
        let dir = tempfile::tempdir()?;
        let path = write_fixture(&dir, &sample_fixture())?;

        let report = db.seed_from_fixture(&path, SeedPolicy::BestEffort).await?;

        assert!(!report.skipped);
        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.inserted, 7);
        assert_eq!(all_table_counts(&db).await?, [2, 1, 1, 1, 1, 1]);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_fixture_is_suppressed() -> anyhow::Result<()> {
        let db = SafeliDb::new_in_memory().await?;
        let dir = tempfile::tempdir()?;
        let path = write_fixture(&dir, "{ not json at all")?;

        let report = db.seed_from_fixture(&path, SeedPolicy::BestEffort).await?;

        assert!(!report.skipped);
        assert_eq!(report.inserted, 0);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(all_table_counts(&db).await?, [0; 6]);
        Ok(())
    }

    #[tokio::test]
    async fn test_wipe_empties_all_tables() -> anyhow::Result<()> {
        let db = SafeliDb::new_in_memory().await?;
        let dir = tempfile::tempdir()?;
        let path = write_fixture(&dir, &sample_fixture())?;
        db.seed_from_fixture(&path, SeedPolicy::BestEffort).await?;

        let report = db.wipe_seeded_data(SeedPolicy::BestEffort).await?;

        assert!(report.completed());
        assert_eq!(report.deleted(), 7);
        assert_eq!(all_table_counts(&db).await?, [0; 6]);
        Ok(())
    }

    #[tokio::test]
    async fn test_wipe_failure_abandons_rest_of_sequence() -> anyhow::Result<()> {
        let db = SafeliDb::new_in_memory().await?;
        let dir = tempfile::tempdir()?;
        let path = write_fixture(&dir, &sample_fixture())?;
        db.seed_from_fixture(&path, SeedPolicy::BestEffort).await?;

        // Make the fourth delete of the sequence fail.
        db.conn().execute_unprepared("DROP TABLE safe_master_copy").await?;

        let report = db.wipe_seeded_data(SeedPolicy::BestEffort).await?;

        assert!(!report.completed());
        // The tables ahead of the failure were processed...
        assert_eq!(report.deleted_per_table.get("safe_contract"), Some(&1));
        assert_eq!(report.deleted_per_table.get("contract"), Some(&1));
        assert_eq!(report.deleted_per_table.get("contract_abi"), Some(&1));
        // ...while the ones behind it were left alone.
        assert_eq!(ProxyFactory::find().count(db.conn()).await?, 1);
        assert_eq!(Chain::find().count(db.conn()).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_double_seed_suppresses_duplicate_keys() -> anyhow::Result<()> {
        let db = SafeliDb::new_in_memory().await?;
        let dir = tempfile::tempdir()?;
        let path = write_fixture(&dir, &sample_fixture())?;

        db.seed_from_fixture(&path, SeedPolicy::BestEffort).await?;
        let second = db.seed_from_fixture(&path, SeedPolicy::BestEffort).await?;

        assert_eq!(second.inserted, 0);
        assert_eq!(second.errors.len(), 7);
        assert_eq!(all_table_counts(&db).await?, [2, 1, 1, 1, 1, 1]);
        Ok(())
    }

    #[tokio::test]
    async fn test_double_seed_fail_fast_errors() -> anyhow::Result<()> {
        let db = SafeliDb::new_in_memory().await?;
        let dir = tempfile::tempdir()?;
        let path = write_fixture(&dir, &sample_fixture())?;

        db.seed_from_fixture(&path, SeedPolicy::BestEffort).await?;
        let res = db.seed_from_fixture(&path, SeedPolicy::FailFast).await;

        assert!(res.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_double_wipe_is_a_noop() -> anyhow::Result<()> {
        let db = SafeliDb::new_in_memory().await?;
        let dir = tempfile::tempdir()?;
        let path = write_fixture(&dir, &sample_fixture())?;
        db.seed_from_fixture(&path, SeedPolicy::BestEffort).await?;

        db.wipe_seeded_data(SeedPolicy::BestEffort).await?;
        let second = db.wipe_seeded_data(SeedPolicy::BestEffort).await?;

        assert!(second.completed());
        assert_eq!(second.deleted(), 0);
        Ok(())
    }
}
