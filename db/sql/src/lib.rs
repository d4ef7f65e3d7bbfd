//! Crate for accessing the safeli database.
//!
//! [`SafeliDb`] wraps a SeaORM connection (SQLite or PostgreSQL), applies
//! the schema migrations on startup and exposes the per-concern operation
//! traits: chain bookkeeping, contract registry lookups and fixture
//! seeding/wiping of the Safe bootstrap data.

pub mod chains;
pub mod contracts;
pub mod db;
pub mod errors;
pub mod seeding;

pub use db::{SafeliDb, SafeliDbConfig};
pub use errors::{DbSqlError, Result};
pub use sea_orm::DatabaseConnection;

use crate::{
    chains::SafeliDbChainOperations, contracts::SafeliDbContractOperations,
    seeding::SafeliDbSeedOperations,
};

/// Convenience umbrella over all operation traits of [`SafeliDb`].
pub trait SafeliDbAllOperations:
    SafeliDbChainOperations + SafeliDbContractOperations + SafeliDbSeedOperations
{
}
