//! Persistence and schedule computations for the matchday backend.
//!
//! - **models**: rows and the fixture document stored with each schedule
//! - **dto**: request/response payloads shared with the web crate
//! - **repository**: Postgres access, one repository per aggregate
//! - **services**: pure computations over fetched schedules (standings,
//!   matchweek windows, recent matches)

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::Result;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
