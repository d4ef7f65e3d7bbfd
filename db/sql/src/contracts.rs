use async_trait::async_trait;
use safeli_db_entity::{contract, contract_abi, prelude::*, safe_contract, safe_master_copy};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::{db::SafeliDb, errors::Result};

#[async_trait]
pub trait SafeliDbContractOperations {
    /// Look up a contract record by its on-chain address.
    async fn find_contract(&self, address: &str) -> Result<Option<contract::Model>>;

    /// ABI definition referenced by a contract, if the contract is known
    /// and carries one.
    async fn contract_abi_for(&self, address: &str) -> Result<Option<contract_abi::Model>>;

    /// Look up a deployed Safe proxy by address.
    async fn find_safe_contract(&self, address: &str) -> Result<Option<safe_contract::Model>>;

    /// All master copy versions deployed on a chain, newest deployment
    /// first.
    async fn master_copies_for_chain(&self, chain_id: i64) -> Result<Vec<safe_master_copy::Model>>;

    async fn safe_contract_count(&self) -> Result<u64>;
}

#[async_trait]
impl SafeliDbContractOperations for SafeliDb {
    async fn find_contract(&self, address: &str) -> Result<Option<contract::Model>> {
        Ok(Contract::find_by_id(address.to_string()).one(self.conn()).await?)
    }

    async fn contract_abi_for(&self, address: &str) -> Result<Option<contract_abi::Model>> {
        let Some(contract) = self.find_contract(address).await? else {
            return Ok(None);
        };
        Ok(contract.find_related(ContractAbi).one(self.conn()).await?)
    }

    async fn find_safe_contract(&self, address: &str) -> Result<Option<safe_contract::Model>> {
        Ok(SafeContract::find_by_id(address.to_string()).one(self.conn()).await?)
    }

    async fn master_copies_for_chain(&self, chain_id: i64) -> Result<Vec<safe_master_copy::Model>> {
        Ok(SafeMasterCopy::find()
            .filter(safe_master_copy::Column::ChainId.eq(chain_id))
            .order_by_desc(safe_master_copy::Column::InitialBlockNumber)
            .all(self.conn())
            .await?)
    }

    async fn safe_contract_count(&self) -> Result<u64> {
        Ok(SafeContract::find().count(self.conn()).await?)
    }
}
