//! SeaORM entity definitions for the safeli database.
//!
//! The entities mirror the tables created by the `migration` crate: chains,
//! Safe master copies, proxy factories and the contract registry. Higher
//! level query logic lives in `safeli-db-sql`.

pub mod chain;
pub mod contract;
pub mod contract_abi;
pub mod proxy_factory;
pub mod safe_contract;
pub mod safe_master_copy;

pub mod prelude {
    pub use super::{
        chain::Entity as Chain, contract::Entity as Contract, contract_abi::Entity as ContractAbi,
        proxy_factory::Entity as ProxyFactory, safe_contract::Entity as SafeContract,
        safe_master_copy::Entity as SafeMasterCopy,
    };
}
