use std::ops::{Deref, DerefMut};

use error_stack::ResultExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{car::*, payment::*, rental::*};

mod car;
mod payment;
mod rental;

static POSTGRES_URL: &str = "POSTGRES_URL";
static POSTGRES_MAX_CONNECTIONS: &str = "POSTGRES_MAX_CONNECTIONS";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let max_connections = env(POSTGRES_MAX_CONNECTIONS)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await
            .convert_error()?;
        tracing::debug!(max_connections, "Postgres pool connected");
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .change_context(KernelError::Internal)
            .attach_printable("Failed to run migrations")
    }
}

/// One open database transaction. Dropping it without committing rolls back.
pub struct PostgresConnection(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(PostgresConnection(con))
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}
