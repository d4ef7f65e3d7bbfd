//! Deployed Safe proxy instances.

use sea_orm::entity::prelude::*;

/// A specific deployed Safe proxy, keyed by address.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "safe_contract")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub address: String,
    pub created_block_number: i64,
    /// Address of the master copy this proxy delegates to, when known.
    pub master_copy: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
