use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::competition::{CreateCompetitionRequest, UpdateCompetitionRequest};
use crate::error::{Result, StorageError};
use crate::models::{Club, Competition};

const COMPETITION_COLUMNS: &str = "competition_id, full_name, short_name, country, kind, logo_url, created_at";

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all competitions
    pub async fn list(&self) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {} FROM competitions ORDER BY created_at DESC",
            COMPETITION_COLUMNS
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// Get a competition by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Competition> {
        sqlx::query_as::<_, Competition>(&format!(
            "SELECT {} FROM competitions WHERE competition_id = $1",
            COMPETITION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Fetch several competitions at once; unknown ids are ignored
    pub async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {} FROM competitions WHERE competition_id = ANY($1)",
            COMPETITION_COLUMNS
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// Clubs taking part in a competition
    pub async fn clubs(&self, competition_id: Uuid) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(
            r#"
            SELECT c.club_id, c.full_name, c.common_name, c.short_name, c.country,
                   c.logo_url, c.stadium, c.created_at, c.updated_at
            FROM clubs c
            INNER JOIN competition_clubs cc ON cc.club_id = c.club_id
            WHERE cc.competition_id = $1
            ORDER BY c.common_name
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(clubs)
    }

    /// Create a new competition together with its club memberships
    pub async fn create(&self, req: &CreateCompetitionRequest) -> Result<Competition> {
        let mut tx = self.pool.begin().await?;

        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            INSERT INTO competitions (full_name, short_name, country, kind, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COMPETITION_COLUMNS
        ))
        .bind(&req.full_name)
        .bind(&req.short_name)
        .bind(&req.country)
        .bind(&req.kind)
        .bind(&req.logo_url)
        .fetch_one(&mut *tx)
        .await?;

        replace_clubs(&mut tx, competition.competition_id, &req.clubs).await?;

        tx.commit().await?;

        Ok(competition)
    }

    /// Update an existing competition; club memberships are replaced when given
    pub async fn update(
        &self,
        existing: &Competition,
        req: &UpdateCompetitionRequest,
    ) -> Result<Competition> {
        let mut tx = self.pool.begin().await?;

        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            UPDATE competitions
            SET full_name = $2,
                short_name = $3,
                country = $4,
                kind = $5,
                logo_url = $6
            WHERE competition_id = $1
            RETURNING {}
            "#,
            COMPETITION_COLUMNS
        ))
        .bind(existing.competition_id)
        .bind(req.full_name.as_ref().unwrap_or(&existing.full_name))
        .bind(req.short_name.as_ref().unwrap_or(&existing.short_name))
        .bind(req.country.as_ref().unwrap_or(&existing.country))
        .bind(req.kind.as_ref().unwrap_or(&existing.kind))
        .bind(req.logo_url.as_ref().or(existing.logo_url.as_ref()))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if let Some(ref clubs) = req.clubs {
            replace_clubs(&mut tx, competition.competition_id, clubs).await?;
        }

        tx.commit().await?;

        Ok(competition)
    }

    /// Delete a competition by ID; its schedules go with it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM competitions WHERE competition_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

async fn replace_clubs(
    tx: &mut Transaction<'_, Postgres>,
    competition_id: Uuid,
    clubs: &[Uuid],
) -> Result<()> {
    sqlx::query("DELETE FROM competition_clubs WHERE competition_id = $1")
        .bind(competition_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO competition_clubs (competition_id, club_id)
        SELECT $1, club_id FROM UNNEST($2::uuid[]) AS club_id
        "#,
    )
    .bind(competition_id)
    .bind(clubs)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        let err = StorageError::from(e);
        if err.is_foreign_key_violation() {
            StorageError::ConstraintViolation("Unknown club id in competition".to_string())
        } else {
            err
        }
    })?;

    Ok(())
}
