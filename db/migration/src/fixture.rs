//! Fixture-file seeding for the Safe bootstrap data.
//!
//! The fixture is a JSON array of `{"model": "<app>.<model>", "pk": ...,
//! "fields": {...}}` records covering the six seedable tables. [`FixtureSeeder`]
//! turns such a file into bulk inserts (`seed`) and offers the matching
//! rollback that empties the same tables (`wipe`). Both directions report
//! what happened through [`SeedReport`] / [`WipeReport`] instead of failing,
//! unless the caller opts into [`SeedPolicy::FailFast`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use sea_orm::sea_query::{DynIden, InsertStatement, IntoIden, Query, Value};
use sea_orm::{ConnectionTrait, DbErr, DeriveIden};

/// Error raised while seeding or wiping fixture data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read fixture file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse fixture file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown model label in fixture: {0}")]
    UnknownModel(String),

    #[error("invalid record for {model} (pk {pk}): {reason}")]
    InvalidRecord {
        model: String,
        pk: String,
        reason: String,
    },

    #[error("failed to insert into {table}: {source}")]
    Insert {
        table: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("failed to delete from {table}: {source}")]
    Delete {
        table: &'static str,
        #[source]
        source: DbErr,
    },
}

/// How the seeder reacts to individual failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Record failures in the report and keep the operation observably
    /// successful. Matches the one-time-bootstrap setting where a missing
    /// or partially loadable fixture must not block provisioning.
    #[default]
    BestEffort,
    /// Surface the first failure to the caller.
    FailFast,
}

/// One record of a fixture file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FixtureRecord {
    pub model: String,
    pub pk: serde_json::Value,
    pub fields: serde_json::Value,
}

/// The six tables fixture data may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Chain,
    SafeMasterCopy,
    ProxyFactory,
    ContractAbi,
    Contract,
    SafeContract,
}

impl Collection {
    /// Insert order: referents before dependents, so foreign keys inside a
    /// well-formed fixture resolve regardless of record order in the file.
    pub const SEED_ORDER: [Collection; 6] = [
        Collection::Chain,
        Collection::SafeMasterCopy,
        Collection::ProxyFactory,
        Collection::ContractAbi,
        Collection::Contract,
        Collection::SafeContract,
    ];

    /// Delete order: dependents before the rows they may reference.
    pub const WIPE_ORDER: [Collection; 6] = [
        Collection::SafeContract,
        Collection::Contract,
        Collection::ContractAbi,
        Collection::SafeMasterCopy,
        Collection::ProxyFactory,
        Collection::Chain,
    ];

    /// Resolve a fixture model label (`"history.chain"` etc.),
    /// case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "history.chain" => Some(Collection::Chain),
            "history.safemastercopy" => Some(Collection::SafeMasterCopy),
            "history.proxyfactory" => Some(Collection::ProxyFactory),
            "contracts.contract" => Some(Collection::Contract),
            "contracts.contractabi" => Some(Collection::ContractAbi),
            "history.safecontract" => Some(Collection::SafeContract),
            _ => None,
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Chain => "chain",
            Collection::SafeMasterCopy => "safe_master_copy",
            Collection::ProxyFactory => "proxy_factory",
            Collection::ContractAbi => "contract_abi",
            Collection::Contract => "contract",
            Collection::SafeContract => "safe_contract",
        }
    }

    fn table_iden(&self) -> DynIden {
        match self {
            Collection::Chain => Chain::Table.into_iden(),
            Collection::SafeMasterCopy => SafeMasterCopy::Table.into_iden(),
            Collection::ProxyFactory => ProxyFactory::Table.into_iden(),
            Collection::ContractAbi => ContractAbi::Table.into_iden(),
            Collection::Contract => Contract::Table.into_iden(),
            Collection::SafeContract => SafeContract::Table.into_iden(),
        }
    }
}

/// Outcome of a seeding run.
#[derive(Debug, Default)]
pub struct SeedReport {
    /// The fixture file was absent; nothing was touched.
    pub skipped: bool,
    /// Total rows inserted.
    pub inserted: u64,
    /// Rows inserted per table.
    pub inserted_per_table: BTreeMap<&'static str, u64>,
    /// Failures suppressed under [`SeedPolicy::BestEffort`].
    pub errors: Vec<SeedError>,
}

impl SeedReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of a wipe run.
#[derive(Debug, Default)]
pub struct WipeReport {
    /// Rows deleted per table. Tables past a failed delete are absent.
    pub deleted_per_table: BTreeMap<&'static str, u64>,
    /// The failure that abandoned the sequence, if any.
    pub error: Option<SeedError>,
}

impl WipeReport {
    pub fn completed(&self) -> bool {
        self.error.is_none()
    }

    pub fn deleted(&self) -> u64 {
        self.deleted_per_table.values().sum()
    }
}

/// Loads a Safe bootstrap fixture into the six seedable tables, or empties
/// them again. The connection is supplied per call, so the seeder itself
/// carries only the failure policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSeeder {
    policy: SeedPolicy,
}

impl FixtureSeeder {
    pub fn new(policy: SeedPolicy) -> Self {
        Self { policy }
    }

    /// Seed the database from the fixture file at `path`.
    ///
    /// A missing file is not an error: the report comes back with
    /// `skipped` set and no rows touched. Under [`SeedPolicy::BestEffort`]
    /// every other failure (unreadable file, malformed JSON, rejected
    /// record) lands in the report and the run keeps going where possible.
    pub async fn seed<C: ConnectionTrait>(&self, conn: &C, path: &Path) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();

        if !path.exists() {
            report.skipped = true;
            return Ok(report);
        }

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) => {
                self.suppress(&mut report, error.into())?;
                return Ok(report);
            }
        };

        let records: Vec<FixtureRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(error) => {
                self.suppress(&mut report, error.into())?;
                return Ok(report);
            }
        };

        let mut groups: HashMap<Collection, Vec<FixtureRecord>> = HashMap::new();
        for record in records {
            match Collection::from_label(&record.model) {
                Some(collection) => groups.entry(collection).or_default().push(record),
                None => self.suppress(&mut report, SeedError::UnknownModel(record.model))?,
            }
        }

        let backend = conn.get_database_backend();
        for collection in Collection::SEED_ORDER {
            let Some(records) = groups.remove(&collection) else {
                continue;
            };
            for record in records {
                let stmt = match build_insert(collection, &record) {
                    Ok(stmt) => stmt,
                    Err(error) => {
                        self.suppress(&mut report, error)?;
                        continue;
                    }
                };
                match conn.execute(backend.build(&stmt)).await {
                    Ok(_) => {
                        report.inserted += 1;
                        *report.inserted_per_table.entry(collection.table_name()).or_default() += 1;
                    }
                    Err(source) => self.suppress(
                        &mut report,
                        SeedError::Insert {
                            table: collection.table_name(),
                            source,
                        },
                    )?,
                }
            }
        }

        Ok(report)
    }

    /// Delete ALL rows from the six tables, dependents first.
    ///
    /// The wipe is deliberately not scoped to previously seeded rows and no
    /// transaction spans the sequence. Under [`SeedPolicy::BestEffort`] a
    /// failed delete abandons the rest of the sequence; tables already
    /// wiped stay wiped and the failure is recorded in the report.
    pub async fn wipe<C: ConnectionTrait>(&self, conn: &C) -> Result<WipeReport, SeedError> {
        let mut report = WipeReport::default();
        let backend = conn.get_database_backend();

        for collection in Collection::WIPE_ORDER {
            let stmt = Query::delete().from_table(collection.table_iden()).to_owned();
            match conn.execute(backend.build(&stmt)).await {
                Ok(res) => {
                    report
                        .deleted_per_table
                        .insert(collection.table_name(), res.rows_affected());
                }
                Err(source) => {
                    let error = SeedError::Delete {
                        table: collection.table_name(),
                        source,
                    };
                    match self.policy {
                        SeedPolicy::BestEffort => {
                            tracing::debug!(%error, "suppressed wipe failure");
                            report.error = Some(error);
                            break;
                        }
                        SeedPolicy::FailFast => return Err(error),
                    }
                }
            }
        }

        Ok(report)
    }

    fn suppress(&self, report: &mut SeedReport, error: SeedError) -> Result<(), SeedError> {
        match self.policy {
            SeedPolicy::BestEffort => {
                tracing::debug!(%error, "suppressed fixture seeding failure");
                report.errors.push(error);
                Ok(())
            }
            SeedPolicy::FailFast => Err(error),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChainFields {
    name: String,
}

#[derive(Debug, serde::Deserialize)]
struct SafeMasterCopyFields {
    address: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    initial_block_number: i64,
    #[serde(default)]
    tx_block_number: Option<i64>,
    #[serde(default)]
    deployer: Option<String>,
    #[serde(default)]
    l2: bool,
    chain_id: i64,
}

#[derive(Debug, serde::Deserialize)]
struct ProxyFactoryFields {
    address: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    initial_block_number: i64,
    #[serde(default)]
    tx_block_number: Option<i64>,
    chain_id: i64,
}

#[derive(Debug, serde::Deserialize)]
struct ContractAbiFields {
    abi: serde_json::Value,
    #[serde(default)]
    description: String,
    #[serde(default)]
    relevance: i32,
}

#[derive(Debug, serde::Deserialize)]
struct ContractFields {
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    contract_abi: Option<i64>,
    #[serde(default)]
    trusted_for_delegate_call: bool,
}

#[derive(Debug, serde::Deserialize)]
struct SafeContractFields {
    #[serde(default)]
    created_block_number: i64,
    #[serde(default)]
    master_copy: Option<String>,
}

fn build_insert(collection: Collection, record: &FixtureRecord) -> Result<InsertStatement, SeedError> {
    match collection {
        Collection::Chain => {
            let chain_id = pk_i64(record)?;
            let fields: ChainFields = parse_fields(record)?;
            Ok(Query::insert()
                .into_table(Chain::Table)
                .columns([Chain::ChainId, Chain::Name])
                .values_panic([Value::from(chain_id).into(), Value::from(fields.name).into()])
                .to_owned())
        }
        Collection::SafeMasterCopy => {
            let id = pk_i64(record)?;
            let fields: SafeMasterCopyFields = parse_fields(record)?;
            Ok(Query::insert()
                .into_table(SafeMasterCopy::Table)
                .columns([
                    SafeMasterCopy::Id,
                    SafeMasterCopy::Address,
                    SafeMasterCopy::Version,
                    SafeMasterCopy::InitialBlockNumber,
                    SafeMasterCopy::TxBlockNumber,
                    SafeMasterCopy::Deployer,
                    SafeMasterCopy::L2,
                    SafeMasterCopy::ChainId,
                ])
                .values_panic([
                    Value::from(id).into(),
                    Value::from(fields.address).into(),
                    Value::from(fields.version).into(),
                    Value::from(fields.initial_block_number).into(),
                    Value::from(fields.tx_block_number).into(),
                    Value::from(fields.deployer).into(),
                    Value::from(fields.l2).into(),
                    Value::from(fields.chain_id).into(),
                ])
                .to_owned())
        }
        Collection::ProxyFactory => {
            let id = pk_i64(record)?;
            let fields: ProxyFactoryFields = parse_fields(record)?;
            Ok(Query::insert()
                .into_table(ProxyFactory::Table)
                .columns([
                    ProxyFactory::Id,
                    ProxyFactory::Address,
                    ProxyFactory::Version,
                    ProxyFactory::InitialBlockNumber,
                    ProxyFactory::TxBlockNumber,
                    ProxyFactory::ChainId,
                ])
                .values_panic([
                    Value::from(id).into(),
                    Value::from(fields.address).into(),
                    Value::from(fields.version).into(),
                    Value::from(fields.initial_block_number).into(),
                    Value::from(fields.tx_block_number).into(),
                    Value::from(fields.chain_id).into(),
                ])
                .to_owned())
        }
        Collection::ContractAbi => {
            let id = pk_i64(record)?;
            let fields: ContractAbiFields = parse_fields(record)?;
            // Fixtures carry the ABI as a JSON structure; store its
            // serialized form, or the string verbatim if already one.
            let abi = match fields.abi {
                serde_json::Value::String(raw) => raw,
                other => other.to_string(),
            };
            Ok(Query::insert()
                .into_table(ContractAbi::Table)
                .columns([
                    ContractAbi::Id,
                    ContractAbi::Abi,
                    ContractAbi::Description,
                    ContractAbi::Relevance,
                ])
                .values_panic([
                    Value::from(id).into(),
                    Value::from(abi).into(),
                    Value::from(fields.description).into(),
                    Value::from(fields.relevance).into(),
                ])
                .to_owned())
        }
        Collection::Contract => {
            let address = pk_string(record)?;
            let fields: ContractFields = parse_fields(record)?;
            Ok(Query::insert()
                .into_table(Contract::Table)
                .columns([
                    Contract::Address,
                    Contract::Name,
                    Contract::DisplayName,
                    Contract::ContractAbiId,
                    Contract::TrustedForDelegateCall,
                ])
                .values_panic([
                    Value::from(address).into(),
                    Value::from(fields.name).into(),
                    Value::from(fields.display_name).into(),
                    Value::from(fields.contract_abi).into(),
                    Value::from(fields.trusted_for_delegate_call).into(),
                ])
                .to_owned())
        }
        Collection::SafeContract => {
            let address = pk_string(record)?;
            let fields: SafeContractFields = parse_fields(record)?;
            Ok(Query::insert()
                .into_table(SafeContract::Table)
                .columns([
                    SafeContract::Address,
                    SafeContract::CreatedBlockNumber,
                    SafeContract::MasterCopy,
                ])
                .values_panic([
                    Value::from(address).into(),
                    Value::from(fields.created_block_number).into(),
                    Value::from(fields.master_copy).into(),
                ])
                .to_owned())
        }
    }
}

fn parse_fields<T: serde::de::DeserializeOwned>(record: &FixtureRecord) -> Result<T, SeedError> {
    serde_json::from_value(record.fields.clone()).map_err(|e| SeedError::InvalidRecord {
        model: record.model.clone(),
        pk: record.pk.to_string(),
        reason: e.to_string(),
    })
}

fn pk_i64(record: &FixtureRecord) -> Result<i64, SeedError> {
    record.pk.as_i64().ok_or_else(|| SeedError::InvalidRecord {
        model: record.model.clone(),
        pk: record.pk.to_string(),
        reason: "primary key is not an integer".to_string(),
    })
}

fn pk_string(record: &FixtureRecord) -> Result<String, SeedError> {
    record
        .pk
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SeedError::InvalidRecord {
            model: record.model.clone(),
            pk: record.pk.to_string(),
            reason: "primary key is not a string".to_string(),
        })
}

#[derive(DeriveIden)]
enum Chain {
    Table,
    ChainId,
    Name,
}

#[derive(DeriveIden)]
enum SafeMasterCopy {
    Table,
    Id,
    Address,
    Version,
    InitialBlockNumber,
    TxBlockNumber,
    Deployer,
    L2,
    ChainId,
}

#[derive(DeriveIden)]
enum ProxyFactory {
    Table,
    Id,
    Address,
    Version,
    InitialBlockNumber,
    TxBlockNumber,
    ChainId,
}

#[derive(DeriveIden)]
enum ContractAbi {
    Table,
    Id,
    Abi,
    Description,
    Relevance,
}

#[derive(DeriveIden)]
enum Contract {
    Table,
    Address,
    Name,
    DisplayName,
    ContractAbiId,
    TrustedForDelegateCall,
}

#[derive(DeriveIden)]
enum SafeContract {
    Table,
    Address,
    CreatedBlockNumber,
    MasterCopy,
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;

    use super::*;
    use crate::MigratorTrait;

    #[test]
    fn test_label_resolution_is_case_insensitive() {
        assert_eq!(Collection::from_label("history.Chain"), Some(Collection::Chain));
        assert_eq!(
            Collection::from_label("HISTORY.SAFEMASTERCOPY"),
            Some(Collection::SafeMasterCopy)
        );
        assert_eq!(
            Collection::from_label("contracts.contractabi"),
            Some(Collection::ContractAbi)
        );
        assert_eq!(Collection::from_label("history.internaltx"), None);
    }

    #[test]
    fn test_fixture_record_parsing() -> anyhow::Result<()> {
        let raw = r#"[
            {"model": "history.chain", "pk": 1, "fields": {"name": "Ethereum Mainnet"}},
            {"model": "history.safecontract", "pk": "0x0000000000000000000000000000000000001111",
             "fields": {"created_block_number": 12, "master_copy": null}}
        ]"#;
        let records: Vec<FixtureRecord> = serde_json::from_str(raw)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].model, "history.chain");
        assert_eq!(records[0].pk, serde_json::json!(1));
        Ok(())
    }

    #[test]
    fn test_build_insert_rejects_bad_pk_type() {
        let record = FixtureRecord {
            model: "history.chain".to_string(),
            pk: serde_json::json!("not-a-number"),
            fields: serde_json::json!({"name": "Ethereum Mainnet"}),
        };
        let err = build_insert(Collection::Chain, &record).unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { .. }));
    }

    #[tokio::test]
    async fn test_seed_missing_file_is_a_noop() -> anyhow::Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        crate::Migrator::<0>::up(&db, None).await?;

        let dir = tempfile::tempdir()?;
        let report = FixtureSeeder::default()
            .seed(&db, &dir.path().join("absent.json"))
            .await?;
        assert!(report.skipped);
        assert_eq!(report.inserted, 0);
        assert!(report.is_clean());
        Ok(())
    }

    #[tokio::test]
    async fn test_fail_fast_surfaces_unknown_model() -> anyhow::Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        crate::Migrator::<0>::up(&db, None).await?;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("fixture.json");
        std::fs::write(
            &path,
            r#"[{"model": "history.internaltx", "pk": 1, "fields": {}}]"#,
        )?;

        let err = FixtureSeeder::new(SeedPolicy::FailFast)
            .seed(&db, &path)
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::UnknownModel(_)));
        Ok(())
    }
}
