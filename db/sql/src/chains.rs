use async_trait::async_trait;
use safeli_db_entity::{chain, prelude::*};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, PaginatorTrait};

use crate::{db::SafeliDb, errors::Result};

#[async_trait]
pub trait SafeliDbChainOperations {
    /// Insert or update a chain entry.
    ///
    /// # Idempotency
    /// Uses check-then-insert logic on the chain id; an existing row only
    /// gets its name updated when it differs.
    async fn upsert_chain(&self, chain_id: i64, name: &str) -> Result<i64>;

    /// Name of a chain, if known.
    async fn chain_name(&self, chain_id: i64) -> Result<Option<String>>;

    async fn chain_count(&self) -> Result<u64>;
}

#[async_trait]
impl SafeliDbChainOperations for SafeliDb {
    async fn upsert_chain(&self, chain_id: i64, name: &str) -> Result<i64> {
        if let Some(existing) = Chain::find_by_id(chain_id).one(self.conn()).await? {
            if existing.name != name {
                let mut active: chain::ActiveModel = existing.into();
                active.name = Set(name.to_string());
                active.update(self.conn()).await?;
            }
            return Ok(chain_id);
        }

        let model = chain::ActiveModel {
            chain_id: Set(chain_id),
            name: Set(name.to_string()),
        };
        Chain::insert(model).exec(self.conn()).await?;

        Ok(chain_id)
    }

    async fn chain_name(&self, chain_id: i64) -> Result<Option<String>> {
        Ok(Chain::find_by_id(chain_id)
            .one(self.conn())
            .await?
            .map(|chain| chain.name))
    }

    async fn chain_count(&self) -> Result<u64> {
        Ok(Chain::find().count(self.conn()).await?)
    }
}
