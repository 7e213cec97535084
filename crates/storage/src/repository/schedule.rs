use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::schedule::{CreateScheduleRequest, ScheduleFilter, UpdateScheduleRequest};
use crate::error::{Result, StorageError};
use crate::models::Schedule;

const SCHEDULE_COLUMNS: &str = "s.schedule_id, s.competition_id, s.season, s.fixture, s.created_at";

/// Repository for Schedule database operations
pub struct ScheduleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScheduleRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List schedules with filtering, sorting and pagination
    pub async fn list(&self, filter: &ScheduleFilter) -> Result<(Vec<Schedule>, i64)> {
        let pagination = filter.pagination();

        let mut count = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COUNT(*)
            FROM schedules s
            INNER JOIN competitions c ON c.competition_id = s.competition_id
            WHERE 1=1
            "#,
        );
        push_filters(&mut count, filter);
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            r#"
            SELECT {}
            FROM schedules s
            INNER JOIN competitions c ON c.competition_id = s.competition_id
            WHERE 1=1
            "#,
            SCHEDULE_COLUMNS
        ));
        push_filters(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(filter.sort_by.as_column());
        query.push(" ");
        query.push(filter.order.as_sql());
        query.push(", s.schedule_id LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let schedules = query.build_query_as::<Schedule>().fetch_all(self.pool).await?;

        Ok((schedules, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Schedule> {
        sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules s WHERE s.schedule_id = $1",
            SCHEDULE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// The schedule of one competition for one season, if it has been authored
    pub async fn find_by_competition_and_season(
        &self,
        competition_id: Uuid,
        season: &str,
    ) -> Result<Option<Schedule>> {
        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules s WHERE s.competition_id = $1 AND s.season = $2",
            SCHEDULE_COLUMNS
        ))
        .bind(competition_id)
        .bind(season)
        .fetch_optional(self.pool)
        .await?;

        Ok(schedule)
    }

    /// All schedules of a season, oldest first
    pub async fn list_by_season(&self, season: &str) -> Result<Vec<Schedule>> {
        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules s WHERE s.season = $1 ORDER BY s.created_at, s.schedule_id",
            SCHEDULE_COLUMNS
        ))
        .bind(season)
        .fetch_all(self.pool)
        .await?;

        Ok(schedules)
    }

    /// Schedules of every competition the club is registered in
    pub async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<Schedule>> {
        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            SELECT {}
            FROM schedules s
            INNER JOIN competition_clubs cc ON cc.competition_id = s.competition_id
            WHERE cc.club_id = $1
            ORDER BY s.season DESC, s.created_at DESC
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(club_id)
        .fetch_all(self.pool)
        .await?;

        Ok(schedules)
    }

    pub async fn create(&self, req: &CreateScheduleRequest) -> Result<Schedule> {
        sqlx::query_as::<_, Schedule>(&format!(
            r#"
            INSERT INTO schedules AS s (competition_id, season, fixture)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(req.competition_id)
        .bind(&req.season)
        .bind(Json(&req.fixture))
        .fetch_one(self.pool)
        .await
        .map_err(map_write_error)
    }

    pub async fn update(&self, existing: &Schedule, req: &UpdateScheduleRequest) -> Result<Schedule> {
        let fixture = req.fixture.as_ref().unwrap_or(&existing.fixture.0);

        sqlx::query_as::<_, Schedule>(&format!(
            r#"
            UPDATE schedules AS s
            SET competition_id = $2,
                season = $3,
                fixture = $4
            WHERE s.schedule_id = $1
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(existing.schedule_id)
        .bind(req.competition_id.unwrap_or(existing.competition_id))
        .bind(req.season.as_ref().unwrap_or(&existing.season))
        .bind(Json(fixture))
        .fetch_optional(self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM schedules WHERE schedule_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ScheduleFilter) {
    if let Some(competition_id) = filter.competition_id {
        query.push(" AND s.competition_id = ");
        query.push_bind(competition_id);
    }

    if let Some(ref country) = filter.country {
        query.push(" AND c.country = ");
        query.push_bind(country.clone());
    }

    if let Some(ref season) = filter.season {
        query.push(" AND s.season = ");
        query.push_bind(season.clone());
    }

    if let Some(date_from) = filter.date_from {
        query.push(" AND s.created_at::date >= ");
        query.push_bind(date_from);
    }

    if let Some(date_to) = filter.date_to {
        query.push(" AND s.created_at::date <= ");
        query.push_bind(date_to);
    }
}

fn map_write_error(e: sqlx::Error) -> StorageError {
    let err = StorageError::from(e);
    if err.is_unique_violation() {
        StorageError::ConstraintViolation(
            "A schedule already exists for this competition and season".to_string(),
        )
    } else if err.is_foreign_key_violation() {
        StorageError::ConstraintViolation("Unknown competition".to_string())
    } else {
        err
    }
}
