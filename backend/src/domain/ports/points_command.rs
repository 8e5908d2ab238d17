//! Driving port for point mutations.
//!
//! Callers must already hold an authenticated [`UserId`]; the command enforces
//! existence and ownership.

use async_trait::async_trait;

use crate::domain::{Error, Point, PointDraft, PointId, UserId};

/// Request to create (`target` is `None`) or update a point.
#[derive(Debug, Clone, PartialEq)]
pub struct SavePointRequest {
    /// The authenticated user performing the change.
    pub actor: UserId,
    /// Point to overwrite; `None` creates a new point.
    pub target: Option<PointId>,
    /// Validated coordinates and description.
    pub draft: PointDraft,
}

/// Request to delete a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePointRequest {
    /// The authenticated user performing the change.
    pub actor: UserId,
    /// Point to remove.
    pub target: PointId,
}

/// Write-side port for points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsCommand: Send + Sync {
    /// Create or update a point.
    ///
    /// # Errors
    ///
    /// - `not_found` when `target` does not exist.
    /// - `forbidden` when `actor` does not own `target`.
    async fn save_point(&self, request: SavePointRequest) -> Result<Point, Error>;

    /// Delete a point owned by the actor.
    ///
    /// # Errors
    ///
    /// - `not_found` when `target` does not exist.
    /// - `forbidden` when `actor` does not own `target`.
    async fn delete_point(&self, request: DeletePointRequest) -> Result<(), Error>;
}
