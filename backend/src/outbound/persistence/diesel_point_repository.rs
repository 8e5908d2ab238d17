//! PostgreSQL-backed `PointRepository` implementation using Diesel ORM.
//!
//! Update and delete statements filter on both `id` and `owner_id`, so the
//! ownership check and the mutation happen atomically.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PointRepository, PointRepositoryError};
use crate::domain::{Point, PointDraft, PointId, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPointRow, PointChangeset, PointRow};
use super::pool::{DbPool, PoolError};
use super::schema::points;

/// Diesel-backed implementation of the [`PointRepository`] port.
#[derive(Clone)]
pub struct DieselPointRepository {
    pool: DbPool,
}

impl DieselPointRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PointRepositoryError {
    map_basic_pool_error(error, PointRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PointRepositoryError {
    map_basic_diesel_error(
        error,
        PointRepositoryError::query,
        PointRepositoryError::connection,
    )
}

fn into_point(row: PointRow) -> Result<Point, PointRepositoryError> {
    row.into_domain().map_err(PointRepositoryError::query)
}

#[async_trait]
impl PointRepository for DieselPointRepository {
    async fn list_all(&self) -> Result<Vec<Point>, PointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PointRow> = points::table
            .select(PointRow::as_select())
            .order_by(points::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(into_point).collect()
    }

    async fn find_by_id(&self, id: PointId) -> Result<Option<Point>, PointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = points::table
            .filter(points::id.eq(id.value()))
            .select(PointRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(into_point).transpose()
    }

    async fn insert(
        &self,
        owner: UserId,
        draft: &PointDraft,
    ) -> Result<Point, PointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(points::table)
            .values(&NewPointRow::from_draft(owner, draft))
            .returning(PointRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_point(row)
    }

    async fn update_owned(
        &self,
        id: PointId,
        owner: UserId,
        draft: &PointDraft,
    ) -> Result<Option<Point>, PointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = PointChangeset::from_draft(draft, Utc::now());
        let row = diesel::update(
            points::table
                .filter(points::id.eq(id.value()))
                .filter(points::owner_id.eq(owner.value())),
        )
        .set(&changeset)
        .returning(PointRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(into_point).transpose()
    }

    async fn delete_owned(&self, id: PointId, owner: UserId) -> Result<bool, PointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            points::table
                .filter(points::id.eq(id.value()))
                .filter(points::owner_id.eq(owner.value())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
