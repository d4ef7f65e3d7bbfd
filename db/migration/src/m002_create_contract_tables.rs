use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create ContractAbi table. Ids are importer-assigned, not generated,
        // so contract rows can reference them stably across environments.
        manager
            .create_table(
                Table::create()
                    .table(ContractAbi::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContractAbi::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContractAbi::Abi).text().not_null())
                    .col(
                        ColumnDef::new(ContractAbi::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ContractAbi::Relevance)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Create Contract table
        manager
            .create_table(
                Table::create()
                    .table(Contract::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contract::Address)
                            .string_len(42)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contract::Name).string().not_null())
                    .col(
                        ColumnDef::new(Contract::DisplayName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Contract::ContractAbiId).big_integer())
                    .col(
                        ColumnDef::new(Contract::TrustedForDelegateCall)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_contract_abi")
                            .from(Contract::Table, Contract::ContractAbiId)
                            .to(ContractAbi::Table, ContractAbi::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create SafeContract table
        manager
            .create_table(
                Table::create()
                    .table(SafeContract::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SafeContract::Address)
                            .string_len(42)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SafeContract::CreatedBlockNumber)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SafeContract::MasterCopy).string_len(42))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contract_contract_abi_id")
                    .table(Contract::Table)
                    .col(Contract::ContractAbiId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_safe_contract_master_copy")
                    .table(SafeContract::Table)
                    .col(SafeContract::MasterCopy)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SafeContract::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contract::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContractAbi::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContractAbi {
    Table,
    Id,
    Abi,
    Description,
    Relevance,
}

#[derive(DeriveIden)]
enum Contract {
    Table,
    Address,
    Name,
    DisplayName,
    ContractAbiId,
    TrustedForDelegateCall,
}

#[derive(DeriveIden)]
enum SafeContract {
    Table,
    Address,
    CreatedBlockNumber,
    MasterCopy,
}
