use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    Expense, ResultEngine, Trip, TripCmd, TripDetail, TripPoint, expenses, routes, trip_points,
    trips::{self, validate_budget},
};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Create a new trip.
    ///
    /// If the trip is flagged default, the previous default trip (if any) is
    /// cleared in the same DB transaction.
    pub async fn new_trip(&self, cmd: TripCmd) -> ResultEngine<Trip> {
        let name = normalize_required_name(&cmd.name, "trip")?;
        validate_budget(cmd.planned_cost)?;
        let mut trip = Trip::new(name, cmd.start_date, cmd.currency);
        trip.end_date = cmd.end_date;
        trip.is_completed = cmd.is_completed;
        trip.is_default = cmd.is_default;
        trip.description = normalize_optional_text(cmd.description.as_deref());
        trip.planned_cost = cmd.planned_cost;

        with_tx!(self, |db_tx| {
            if trip.is_default {
                self.clear_other_defaults(&db_tx, trip.id).await?;
            }
            let model = trips::ActiveModel::from(&trip).insert(&db_tx).await?;
            Trip::try_from(model)
        })
    }

    /// Return a trip.
    pub async fn trip(&self, trip_id: Uuid) -> ResultEngine<Trip> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            Trip::try_from(model)
        })
    }

    /// Return every trip: the default trip first, then by ascending start date.
    pub async fn trips(&self) -> ResultEngine<Vec<Trip>> {
        with_tx!(self, |db_tx| {
            trips::Entity::find()
                .order_by_desc(trips::Column::IsDefault)
                .order_by_asc(trips::Column::StartDate)
                .order_by_asc(trips::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Trip::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Return the current default trip, if any.
    pub async fn default_trip(&self) -> ResultEngine<Option<Trip>> {
        with_tx!(self, |db_tx| {
            trips::Entity::find()
                .filter(trips::Column::IsDefault.eq(true))
                .one(&db_tx)
                .await?
                .map(Trip::try_from)
                .transpose()
        })
    }

    /// Return a trip with its ordered points and its expenses.
    pub async fn trip_detail(&self, trip_id: Uuid) -> ResultEngine<TripDetail> {
        with_tx!(self, |db_tx| {
            let trip = Trip::try_from(self.require_trip(&db_tx, trip_id).await?)?;
            let points = trip_points::Entity::find()
                .filter(trip_points::Column::TripId.eq(trip_id))
                .order_by_asc(trip_points::Column::OrderIndex)
                .order_by_asc(trip_points::Column::ArrivalDate)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(TripPoint::from)
                .collect();
            let expenses = expenses::Entity::find()
                .filter(expenses::Column::TripId.eq(trip_id))
                .order_by_desc(expenses::Column::ExpenseDate)
                .order_by_desc(expenses::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Expense::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            Ok(TripDetail {
                trip,
                points,
                expenses,
            })
        })
    }

    /// Replace every mutable field of a trip.
    ///
    /// `total_cost` is not an input: it stays whatever the aggregator last
    /// computed.
    pub async fn update_trip(&self, trip_id: Uuid, cmd: TripCmd) -> ResultEngine<Trip> {
        let name = normalize_required_name(&cmd.name, "trip")?;
        validate_budget(cmd.planned_cost)?;
        let description = normalize_optional_text(cmd.description.as_deref());
        with_tx!(self, |db_tx| {
            let current = Trip::try_from(self.require_trip(&db_tx, trip_id).await?)?;
            if cmd.is_default && !current.is_default {
                self.clear_other_defaults(&db_tx, trip_id).await?;
                tracing::info!(%trip_id, "trip becomes the default trip");
            }

            let updated = Trip {
                name,
                start_date: cmd.start_date,
                end_date: cmd.end_date,
                is_completed: cmd.is_completed,
                is_default: cmd.is_default,
                description,
                planned_cost: cmd.planned_cost,
                currency: cmd.currency,
                updated_at: Utc::now(),
                ..current
            };
            let model = trips::ActiveModel::from(&updated).update(&db_tx).await?;
            Trip::try_from(model)
        })
    }

    /// Make `trip_id` the single default trip.
    ///
    /// The previous default is cleared before the new one is set, inside one
    /// DB transaction, so no reader can observe two default trips.
    pub async fn set_default_trip(&self, trip_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_trip(&db_tx, trip_id).await?;
            let cleared = self.clear_other_defaults(&db_tx, trip_id).await?;

            let trip_model = trips::ActiveModel {
                id: ActiveValue::Set(trip_id),
                is_default: ActiveValue::Set(true),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            trip_model.update(&db_tx).await?;

            tracing::info!(%trip_id, cleared, "default trip switched");
            Ok(())
        })
    }

    /// Mark a trip as completed (or not).
    pub async fn set_trip_completed(
        &self,
        trip_id: Uuid,
        is_completed: bool,
    ) -> ResultEngine<Trip> {
        with_tx!(self, |db_tx| {
            self.require_trip(&db_tx, trip_id).await?;
            let trip_model = trips::ActiveModel {
                id: ActiveValue::Set(trip_id),
                is_completed: ActiveValue::Set(is_completed),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let model = trip_model.update(&db_tx).await?;
            Trip::try_from(model)
        })
    }

    /// Delete a trip and everything below it.
    ///
    /// Routes are removed explicitly first: the store refuses to delete a
    /// trip point that is still referenced by a route. Trip points, their
    /// accommodations and places, and the trip's expenses go with the
    /// store's cascade.
    ///
    /// Returns `false` if the trip does not exist.
    pub async fn delete_trip(&self, trip_id: Uuid) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            if trips::Entity::find_by_id(trip_id).one(&db_tx).await?.is_none() {
                return Ok(false);
            }

            let point_ids = self.trip_point_ids(&db_tx, trip_id).await?;
            let route_ids: Vec<Uuid> = self
                .routes_touching(&db_tx, &point_ids)
                .await?
                .into_iter()
                .map(|route| route.id)
                .collect();
            if !route_ids.is_empty() {
                routes::Entity::delete_many()
                    .filter(routes::Column::Id.is_in(route_ids.iter().copied()))
                    .exec(&db_tx)
                    .await?;
            }

            trips::Entity::delete_by_id(trip_id).exec(&db_tx).await?;
            tracing::info!(
                %trip_id,
                points = point_ids.len(),
                routes = route_ids.len(),
                "trip deleted"
            );
            Ok(true)
        })
    }

    /// Clear the default flag on every trip other than `keep`. Returns how
    /// many trips were cleared.
    async fn clear_other_defaults(
        &self,
        db: &DatabaseTransaction,
        keep: Uuid,
    ) -> ResultEngine<u64> {
        let result = trips::Entity::update_many()
            .col_expr(trips::Column::IsDefault, Expr::value(false))
            .col_expr(trips::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(trips::Column::IsDefault.eq(true))
            .filter(trips::Column::Id.ne(keep))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
