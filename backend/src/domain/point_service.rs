//! Point domain service.
//!
//! Implements [`PointsQuery`] and [`PointsCommand`]. Existence is checked
//! before ownership so callers can tell a missing point from someone else's.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    DeletePointRequest, PointRepository, PointRepositoryError, PointsCommand, PointsQuery,
    SavePointRequest,
};
use crate::domain::{Error, Point, PointId};

pub(crate) const NOT_FOUND_MESSAGE: &str = "point not found";
pub(crate) const EDIT_FORBIDDEN_MESSAGE: &str = "you can only edit your own points";
pub(crate) const DELETE_FORBIDDEN_MESSAGE: &str = "you cannot delete other users' points";

/// Point service implementing the point driving ports.
pub struct PointService<P: ?Sized> {
    points: Arc<P>,
}

impl<P: ?Sized> Clone for PointService<P> {
    fn clone(&self) -> Self {
        Self {
            points: Arc::clone(&self.points),
        }
    }
}

impl<P: ?Sized> PointService<P> {
    /// Create a new service backed by `points`.
    pub fn new(points: Arc<P>) -> Self {
        Self { points }
    }
}

fn map_point_error(error: PointRepositoryError) -> Error {
    match error {
        PointRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("point repository unavailable: {message}"))
        }
        PointRepositoryError::Query { message } => {
            Error::internal(format!("point repository error: {message}"))
        }
    }
}

fn not_found() -> Error {
    Error::not_found(NOT_FOUND_MESSAGE)
}

impl<P> PointService<P>
where
    P: PointRepository + ?Sized,
{
    async fn existing(&self, id: PointId) -> Result<Point, Error> {
        self.points
            .find_by_id(id)
            .await
            .map_err(map_point_error)?
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl<P> PointsQuery for PointService<P>
where
    P: PointRepository + ?Sized,
{
    async fn list_points(&self) -> Result<Vec<Point>, Error> {
        self.points.list_all().await.map_err(map_point_error)
    }

    async fn find_point(&self, id: PointId) -> Result<Point, Error> {
        self.existing(id).await
    }
}

#[async_trait]
impl<P> PointsCommand for PointService<P>
where
    P: PointRepository + ?Sized,
{
    async fn save_point(&self, request: SavePointRequest) -> Result<Point, Error> {
        let SavePointRequest {
            actor,
            target,
            draft,
        } = request;

        let Some(id) = target else {
            return self
                .points
                .insert(actor, &draft)
                .await
                .map_err(map_point_error);
        };

        let current = self.existing(id).await?;
        if !current.is_owned_by(actor) {
            return Err(Error::forbidden(EDIT_FORBIDDEN_MESSAGE));
        }

        // The owner filter is applied again by the store; `None` means the
        // point disappeared after the lookup.
        self.points
            .update_owned(id, actor, &draft)
            .await
            .map_err(map_point_error)?
            .ok_or_else(not_found)
    }

    async fn delete_point(&self, request: DeletePointRequest) -> Result<(), Error> {
        let DeletePointRequest { actor, target } = request;

        let current = self.existing(target).await?;
        if !current.is_owned_by(actor) {
            return Err(Error::forbidden(DELETE_FORBIDDEN_MESSAGE));
        }

        let deleted = self
            .points
            .delete_owned(target, actor)
            .await
            .map_err(map_point_error)?;
        if deleted { Ok(()) } else { Err(not_found()) }
    }
}

#[cfg(test)]
#[path = "point_service_tests.rs"]
mod tests;
