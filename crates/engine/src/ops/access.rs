//! Lookups that resolve ids to rows and walk parent chains
//! (accommodation/route -> trip point -> trip).

use sea_orm::{Condition, DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, accommodations, expenses, places, routes, trip_points, trips,
};

use super::Engine;

/// Generates a `require_*` method returning the row or `NotFound`.
macro_rules! impl_require {
    ($fn_name:ident, $entity:path, $model:ty, $kind:literal) => {
        pub(super) async fn $fn_name(
            &self,
            db: &DatabaseTransaction,
            id: Uuid,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| EngineError::not_found($kind, id))
        }
    };
}

impl Engine {
    impl_require!(require_trip, trips::Entity, trips::Model, "trip");
    impl_require!(
        require_trip_point,
        trip_points::Entity,
        trip_points::Model,
        "trip point"
    );
    impl_require!(require_route, routes::Entity, routes::Model, "route");
    impl_require!(
        require_accommodation,
        accommodations::Entity,
        accommodations::Model,
        "accommodation"
    );
    impl_require!(
        require_expense,
        expenses::Entity,
        expenses::Model,
        "expense"
    );
    impl_require!(require_place, places::Entity, places::Model, "place");

    /// Resolve the trip owning a trip point.
    ///
    /// The point is expected to exist; a dangling point is an `InvalidState`.
    pub(super) async fn owning_trip_of_point(
        &self,
        db: &DatabaseTransaction,
        point_id: Uuid,
    ) -> ResultEngine<Uuid> {
        trip_points::Entity::find_by_id(point_id)
            .one(db)
            .await?
            .map(|point| point.trip_id)
            .ok_or_else(|| {
                EngineError::InvalidState(format!("trip point {point_id} vanished"))
            })
    }

    /// Ids of every trip point of a trip.
    pub(super) async fn trip_point_ids(
        &self,
        db: &DatabaseTransaction,
        trip_id: Uuid,
    ) -> ResultEngine<Vec<Uuid>> {
        let points = trip_points::Entity::find()
            .filter(trip_points::Column::TripId.eq(trip_id))
            .all(db)
            .await?;
        Ok(points.into_iter().map(|p| p.id).collect())
    }

    /// Every route touching any of `point_ids` at either end, without duplicates.
    pub(super) async fn routes_touching(
        &self,
        db: &DatabaseTransaction,
        point_ids: &[Uuid],
    ) -> ResultEngine<Vec<routes::Model>> {
        if point_ids.is_empty() {
            return Ok(Vec::new());
        }
        routes::Entity::find()
            .filter(
                Condition::any()
                    .add(routes::Column::FromPointId.is_in(point_ids.iter().copied()))
                    .add(routes::Column::ToPointId.is_in(point_ids.iter().copied())),
            )
            .all(db)
            .await
            .map_err(Into::into)
    }
}
