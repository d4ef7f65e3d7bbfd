#[derive(Debug, thiserror::Error)]
pub enum DbSqlError {
    #[error("failed to construct database: {0}")]
    Construction(String),

    #[error(transparent)]
    BackendError(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Seed(#[from] migration::fixture::SeedError),
}

pub type Result<T> = std::result::Result<T, DbSqlError>;
