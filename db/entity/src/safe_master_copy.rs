//! Deployed Safe master copy (singleton) contract versions.

use sea_orm::entity::prelude::*;

/// A deployed master contract template version, scoped to a chain.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "safe_master_copy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Checksummed 0x-prefixed deployment address, unique per chain setup.
    #[sea_orm(unique)]
    pub address: String,
    pub version: String,
    pub initial_block_number: i64,
    pub tx_block_number: Option<i64>,
    pub deployer: Option<String>,
    /// Whether this master copy speaks the L2 event-emitting variant.
    pub l2: bool,
    pub chain_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chain::Entity",
        from = "Column::ChainId",
        to = "super::chain::Column::ChainId"
    )]
    Chain,
}

impl Related<super::chain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
