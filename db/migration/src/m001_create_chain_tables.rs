use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Chain table. The EIP-155 chain id is the primary key.
        manager
            .create_table(
                Table::create()
                    .table(Chain::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chain::ChainId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Chain::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create SafeMasterCopy table
        manager
            .create_table(
                Table::create()
                    .table(SafeMasterCopy::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SafeMasterCopy::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SafeMasterCopy::Address)
                            .string_len(42)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SafeMasterCopy::Version).string().not_null())
                    .col(
                        ColumnDef::new(SafeMasterCopy::InitialBlockNumber)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SafeMasterCopy::TxBlockNumber).big_integer())
                    .col(ColumnDef::new(SafeMasterCopy::Deployer).string())
                    .col(
                        ColumnDef::new(SafeMasterCopy::L2)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(SafeMasterCopy::ChainId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_safe_master_copy_chain")
                            .from(SafeMasterCopy::Table, SafeMasterCopy::ChainId)
                            .to(Chain::Table, Chain::ChainId),
                    )
                    .to_owned(),
            )
            .await?;

        // Create ProxyFactory table
        manager
            .create_table(
                Table::create()
                    .table(ProxyFactory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProxyFactory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProxyFactory::Address)
                            .string_len(42)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ProxyFactory::Version).string().not_null())
                    .col(
                        ColumnDef::new(ProxyFactory::InitialBlockNumber)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ProxyFactory::TxBlockNumber).big_integer())
                    .col(ColumnDef::new(ProxyFactory::ChainId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_proxy_factory_chain")
                            .from(ProxyFactory::Table, ProxyFactory::ChainId)
                            .to(Chain::Table, Chain::ChainId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_safe_master_copy_chain_id")
                    .table(SafeMasterCopy::Table)
                    .col(SafeMasterCopy::ChainId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_proxy_factory_chain_id")
                    .table(ProxyFactory::Table)
                    .col(ProxyFactory::ChainId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProxyFactory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SafeMasterCopy::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Chain::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Chain {
    Table,
    ChainId,
    Name,
}

#[derive(DeriveIden)]
enum SafeMasterCopy {
    Table,
    Id,
    Address,
    Version,
    InitialBlockNumber,
    TxBlockNumber,
    Deployer,
    L2,
    ChainId,
}

#[derive(DeriveIden)]
enum ProxyFactory {
    Table,
    Id,
    Address,
    Version,
    InitialBlockNumber,
    TxBlockNumber,
    ChainId,
}
