//! Blockchain network identifiers.

use sea_orm::entity::prelude::*;

/// A blockchain network the indexed contracts are deployed on.
///
/// The primary key is the EIP-155 chain id itself, so it is never
/// auto-generated.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "chain")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub chain_id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::safe_master_copy::Entity")]
    SafeMasterCopy,
    #[sea_orm(has_many = "super::proxy_factory::Entity")]
    ProxyFactory,
}

impl Related<super::safe_master_copy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SafeMasterCopy.def()
    }
}

impl Related<super::proxy_factory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProxyFactory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
