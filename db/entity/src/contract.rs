//! Generic on-chain contract records.

use sea_orm::entity::prelude::*;

/// An on-chain contract known to the service, keyed by address.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "contract")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub address: String,
    pub name: String,
    pub display_name: String,
    pub contract_abi_id: Option<i64>,
    pub trusted_for_delegate_call: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contract_abi::Entity",
        from = "Column::ContractAbiId",
        to = "super::contract_abi::Column::Id"
    )]
    ContractAbi,
}

impl Related<super::contract_abi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContractAbi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
