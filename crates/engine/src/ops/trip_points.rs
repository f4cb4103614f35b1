use chrono::Utc;
use sea_orm::{Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Accommodation, PlaceToVisit, ResultEngine, Route, TripPoint, TripPointCmd, TripPointDetail,
    accommodations, places, routes, trip_points,
};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Add a trip point to a trip.
    pub async fn new_trip_point(
        &self,
        trip_id: Uuid,
        cmd: TripPointCmd,
    ) -> ResultEngine<TripPoint> {
        let name = normalize_required_name(&cmd.name, "trip point")?;
        with_tx!(self, |db_tx| {
            self.require_trip(&db_tx, trip_id).await?;
            let now = Utc::now();
            let point = TripPoint {
                id: Uuid::new_v4(),
                trip_id,
                name,
                order: cmd.order,
                arrival_date: cmd.arrival_date,
                departure_date: cmd.departure_date,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                created_at: now,
                updated_at: now,
            };
            let model = trip_points::ActiveModel::from(&point).insert(&db_tx).await?;
            Ok(TripPoint::from(model))
        })
    }

    /// Return a trip point.
    pub async fn trip_point(&self, point_id: Uuid) -> ResultEngine<TripPoint> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip_point(&db_tx, point_id).await?;
            Ok(TripPoint::from(model))
        })
    }

    /// Return the points of a trip in trip order.
    pub async fn trip_points(&self, trip_id: Uuid) -> ResultEngine<Vec<TripPoint>> {
        with_tx!(self, |db_tx| {
            self.require_trip(&db_tx, trip_id).await?;
            let points = trip_points::Entity::find()
                .filter(trip_points::Column::TripId.eq(trip_id))
                .order_by_asc(trip_points::Column::OrderIndex)
                .order_by_asc(trip_points::Column::ArrivalDate)
                .all(&db_tx)
                .await?;
            Ok(points.into_iter().map(TripPoint::from).collect())
        })
    }

    /// Return a trip point with its accommodations, routes and places.
    pub async fn trip_point_detail(&self, point_id: Uuid) -> ResultEngine<TripPointDetail> {
        with_tx!(self, |db_tx| {
            let point = TripPoint::from(self.require_trip_point(&db_tx, point_id).await?);

            let accommodations = accommodations::Entity::find()
                .filter(accommodations::Column::TripPointId.eq(point_id))
                .order_by_asc(accommodations::Column::CheckIn)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Accommodation::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;

            let touching = routes::Entity::find()
                .filter(
                    Condition::any()
                        .add(routes::Column::FromPointId.eq(point_id))
                        .add(routes::Column::ToPointId.eq(point_id)),
                )
                .order_by_asc(routes::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Route::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            let (outgoing_routes, incoming_routes): (Vec<Route>, Vec<Route>) = touching
                .into_iter()
                .partition(|route| route.from_point_id == point_id);

            let places = places::Entity::find()
                .filter(places::Column::TripPointId.eq(point_id))
                .order_by_asc(places::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(PlaceToVisit::from)
                .collect();

            Ok(TripPointDetail {
                point,
                accommodations,
                outgoing_routes,
                incoming_routes,
                places,
            })
        })
    }

    /// Replace every mutable field of a trip point.
    pub async fn update_trip_point(
        &self,
        point_id: Uuid,
        cmd: TripPointCmd,
    ) -> ResultEngine<TripPoint> {
        let name = normalize_required_name(&cmd.name, "trip point")?;
        with_tx!(self, |db_tx| {
            let current = TripPoint::from(self.require_trip_point(&db_tx, point_id).await?);
            let updated = TripPoint {
                name,
                order: cmd.order,
                arrival_date: cmd.arrival_date,
                departure_date: cmd.departure_date,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                updated_at: Utc::now(),
                ..current
            };
            let model = trip_points::ActiveModel::from(&updated)
                .update(&db_tx)
                .await?;
            Ok(TripPoint::from(model))
        })
    }

    /// Delete a trip point.
    ///
    /// Every route using the point at either end is deleted first (routes
    /// are not cascaded by the store). Accommodations and places go with the
    /// store's cascade. The owning trip's total is then recomputed, since the
    /// point's accommodations and routes no longer count.
    pub async fn delete_trip_point(&self, point_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let point = self.require_trip_point(&db_tx, point_id).await?;

            let removed_routes = routes::Entity::delete_many()
                .filter(
                    Condition::any()
                        .add(routes::Column::FromPointId.eq(point_id))
                        .add(routes::Column::ToPointId.eq(point_id)),
                )
                .exec(&db_tx)
                .await?
                .rows_affected;

            trip_points::Entity::delete_by_id(point_id).exec(&db_tx).await?;

            self.recalculate_in_tx(&db_tx, point.trip_id).await?;
            tracing::info!(
                %point_id,
                trip_id = %point.trip_id,
                removed_routes,
                "trip point deleted"
            );
            Ok(())
        })
    }
}
