use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::club::{ClubFilter, CreateClubRequest, UpdateClubRequest};
use crate::error::{Result, StorageError};
use crate::models::Club;

const CLUB_COLUMNS: &str = "club_id, full_name, common_name, short_name, country, logo_url, stadium, created_at, updated_at";

/// Repository for Club database operations
pub struct ClubRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClubRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List clubs matching the filter, with the total count for pagination
    pub async fn list(&self, filter: &ClubFilter) -> Result<(Vec<Club>, i64)> {
        let pagination = filter.pagination();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM clubs WHERE 1=1");
        push_filters(&mut count, filter);
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM clubs WHERE 1=1", CLUB_COLUMNS));
        push_filters(&mut query, filter);
        query.push(" ORDER BY common_name LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let clubs = query.build_query_as::<Club>().fetch_all(self.pool).await?;

        Ok((clubs, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Club> {
        sqlx::query_as::<_, Club>(&format!(
            "SELECT {} FROM clubs WHERE club_id = $1",
            CLUB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Fetch several clubs at once; unknown ids are ignored
    pub async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(&format!(
            "SELECT {} FROM clubs WHERE club_id = ANY($1) ORDER BY common_name",
            CLUB_COLUMNS
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(clubs)
    }

    pub async fn create(&self, req: &CreateClubRequest) -> Result<Club> {
        let club = sqlx::query_as::<_, Club>(&format!(
            r#"
            INSERT INTO clubs (full_name, common_name, short_name, country, logo_url, stadium)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CLUB_COLUMNS
        ))
        .bind(&req.full_name)
        .bind(&req.common_name)
        .bind(&req.short_name)
        .bind(&req.country)
        .bind(&req.logo_url)
        .bind(&req.stadium)
        .fetch_one(self.pool)
        .await?;

        Ok(club)
    }

    pub async fn update(&self, existing: &Club, req: &UpdateClubRequest) -> Result<Club> {
        let club = sqlx::query_as::<_, Club>(&format!(
            r#"
            UPDATE clubs
            SET full_name = $2,
                common_name = $3,
                short_name = $4,
                country = $5,
                logo_url = $6,
                stadium = $7,
                updated_at = NOW()
            WHERE club_id = $1
            RETURNING {}
            "#,
            CLUB_COLUMNS
        ))
        .bind(existing.club_id)
        .bind(req.full_name.as_ref().unwrap_or(&existing.full_name))
        .bind(req.common_name.as_ref().unwrap_or(&existing.common_name))
        .bind(req.short_name.as_ref().unwrap_or(&existing.short_name))
        .bind(req.country.as_ref().unwrap_or(&existing.country))
        .bind(req.logo_url.as_ref().or(existing.logo_url.as_ref()))
        .bind(req.stadium.as_ref().or(existing.stadium.as_ref()))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(club)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM clubs WHERE club_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_foreign_key_violation() {
                    StorageError::ConstraintViolation(
                        "Club is still referenced by a competition".to_string(),
                    )
                } else {
                    err
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ClubFilter) {
    if let Some(ref country) = filter.country {
        query.push(" AND country = ");
        query.push_bind(country.clone());
    }
}
