//! Contract ABI definition blobs.

use sea_orm::entity::prelude::*;

/// An application-binary-interface definition shared by contract records.
///
/// The id is assigned by the fixture/importer rather than the database, so
/// references from `contract` rows stay stable across environments.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "contract_abi")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// JSON-serialized ABI.
    #[sea_orm(column_type = "Text")]
    pub abi: String,
    pub description: String,
    pub relevance: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contract::Entity")]
    Contract,
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
