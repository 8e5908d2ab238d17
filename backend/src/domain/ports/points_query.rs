//! Driving port for reading map points.

use async_trait::async_trait;

use crate::domain::{Error, Point, PointId};

/// Read-side port for points. Listing needs no authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsQuery: Send + Sync {
    /// Every point, ordered by id.
    async fn list_points(&self) -> Result<Vec<Point>, Error>;

    /// A single point; `not_found` when no point has this id.
    async fn find_point(&self, id: PointId) -> Result<Point, Error>;
}
