//! Port abstraction for point persistence adapters and their errors.
//!
//! Mutations take the acting user's id and apply the ownership filter in the
//! same statement, so a concurrent change of ownership or a racing delete can
//! never turn into an unauthorised write.

use async_trait::async_trait;

use crate::domain::{Point, PointDraft, PointId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by point repository adapters.
    pub enum PointRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "point repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "point repository query failed: {message}",
    }
}

/// Storage for user-owned map markers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointRepository: Send + Sync {
    /// Every stored point, ordered by id.
    async fn list_all(&self) -> Result<Vec<Point>, PointRepositoryError>;

    /// Fetch a single point.
    async fn find_by_id(&self, id: PointId) -> Result<Option<Point>, PointRepositoryError>;

    /// Store a new point owned by `owner`.
    async fn insert(&self, owner: UserId, draft: &PointDraft)
    -> Result<Point, PointRepositoryError>;

    /// Overwrite a point when `owner` owns it, refreshing `updated_at`.
    ///
    /// Returns `None` when no point matches both the id and the owner.
    async fn update_owned(
        &self,
        id: PointId,
        owner: UserId,
        draft: &PointDraft,
    ) -> Result<Option<Point>, PointRepositoryError>;

    /// Remove a point when `owner` owns it. Returns whether a row was deleted.
    async fn delete_owned(&self, id: PointId, owner: UserId) -> Result<bool, PointRepositoryError>;
}
