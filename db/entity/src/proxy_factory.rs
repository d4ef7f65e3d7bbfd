//! Deployed Safe proxy factory contracts.

use sea_orm::entity::prelude::*;

/// A deployed factory contract that spawns Safe proxies, scoped to a chain.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "proxy_factory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub address: String,
    pub version: String,
    pub initial_block_number: i64,
    pub tx_block_number: Option<i64>,
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
