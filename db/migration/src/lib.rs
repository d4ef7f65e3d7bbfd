use sea_orm_migration::async_trait;
pub use sea_orm_migration::{MigrationTrait, MigratorTrait};

pub mod fixture;

mod m001_create_chain_tables;
mod m002_create_contract_tables;
mod m003_load_initial_safe_data;

/// Fixed path the deployment drops the Safe bootstrap fixture at.
///
/// The migration step only reads this path; every other entry point takes
/// the fixture path as an explicit argument.
pub const DEFAULT_FIXTURE_FILE: &str = "/app/migration/fixtures/safe_full_data.json";

/// Where the initial Safe data migration takes its fixture from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureSource {
    /// Skip seeding entirely.
    NoData,
    /// Seed from [`DEFAULT_FIXTURE_FILE`] if it exists on disk.
    DefaultFile,
}

impl From<u8> for FixtureSource {
    fn from(value: u8) -> Self {
        match value {
            0 => FixtureSource::NoData,
            _ => FixtureSource::DefaultFile,
        }
    }
}

/// Migrator for the safeli database.
///
/// `SEED_FIXTURE` selects the [`FixtureSource`] of the initial Safe data
/// migration (0 = no seeding), so test setups and the CLI can run the
/// schema migrations without touching the fixture path.
pub struct Migrator<const SEED_FIXTURE: u8 = 0>;

#[async_trait::async_trait]
impl<const SEED_FIXTURE: u8> MigratorTrait for Migrator<SEED_FIXTURE> {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_chain_tables::Migration),
            Box::new(m002_create_contract_tables::Migration),
            Box::new(m003_load_initial_safe_data::Migration(SEED_FIXTURE.into())),
        ]
    }
}
