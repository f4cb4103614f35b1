use chrono::Utc;
use sea_orm::{
    DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Route, RouteCmd,
    routes::{self, validate_route},
};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Create a route between two trip points.
    ///
    /// Both endpoints must exist and belong to the same trip, and a route
    /// cannot loop back to its own starting point. The owning trip's total
    /// is recomputed in the same DB transaction.
    pub async fn new_route(
        &self,
        from_point_id: Uuid,
        to_point_id: Uuid,
        cmd: RouteCmd,
    ) -> ResultEngine<Route> {
        let name = normalize_required_name(&cmd.name, "route")?;
        validate_route(cmd.cost, cmd.duration_minutes)?;
        with_tx!(self, |db_tx| {
            let from = self.require_trip_point(&db_tx, from_point_id).await?;
            let to = self.require_trip_point(&db_tx, to_point_id).await?;
            if from.trip_id != to.trip_id {
                return Err(EngineError::InvalidArgument(format!(
                    "route endpoints {from_point_id} and {to_point_id} belong to different trips"
                )));
            }
            if from_point_id == to_point_id {
                return Err(EngineError::InvalidArgument(format!(
                    "route cannot start and end at trip point {from_point_id}"
                )));
            }

            let now = Utc::now();
            let route = Route {
                id: Uuid::new_v4(),
                from_point_id,
                to_point_id,
                name,
                transportation: cmd.transportation,
                carrier: normalize_optional_text(cmd.carrier.as_deref()),
                departure_at: cmd.departure_at,
                arrival_at: cmd.arrival_at,
                duration_minutes: cmd.duration_minutes,
                cost: cmd.cost,
                is_selected: cmd.is_selected,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                created_at: now,
                updated_at: now,
            };
            let model = routes::ActiveModel::from(&route).insert(&db_tx).await?;
            self.recalculate_in_tx(&db_tx, from.trip_id).await?;
            Route::try_from(model)
        })
    }

    /// Return a route.
    pub async fn route(&self, route_id: Uuid) -> ResultEngine<Route> {
        with_tx!(self, |db_tx| {
            let model = self.require_route(&db_tx, route_id).await?;
            Route::try_from(model)
        })
    }

    /// Return every route of a trip, ordered by departure then creation.
    pub async fn routes_for_trip(&self, trip_id: Uuid) -> ResultEngine<Vec<Route>> {
        with_tx!(self, |db_tx| {
            self.require_trip(&db_tx, trip_id).await?;
            let point_ids = self.trip_point_ids(&db_tx, trip_id).await?;
            if point_ids.is_empty() {
                return Ok(Vec::new());
            }
            routes::Entity::find()
                .filter(routes::Column::FromPointId.is_in(point_ids))
                .order_by_asc(routes::Column::DepartureAt)
                .order_by_asc(routes::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Route::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Return the alternatives for one leg (`from` -> `to`).
    pub async fn routes_between(
        &self,
        from_point_id: Uuid,
        to_point_id: Uuid,
    ) -> ResultEngine<Vec<Route>> {
        with_tx!(self, |db_tx| {
            self.require_trip_point(&db_tx, from_point_id).await?;
            self.require_trip_point(&db_tx, to_point_id).await?;
            routes::Entity::find()
                .filter(routes::Column::FromPointId.eq(from_point_id))
                .filter(routes::Column::ToPointId.eq(to_point_id))
                .order_by_asc(routes::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Route::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Replace every mutable field of a route. Endpoints are kept.
    pub async fn update_route(&self, route_id: Uuid, cmd: RouteCmd) -> ResultEngine<Route> {
        let name = normalize_required_name(&cmd.name, "route")?;
        validate_route(cmd.cost, cmd.duration_minutes)?;
        with_tx!(self, |db_tx| {
            let current = Route::try_from(self.require_route(&db_tx, route_id).await?)?;
            let trip_id = self
                .owning_trip_of_point(&db_tx, current.from_point_id)
                .await?;

            let updated = Route {
                name,
                transportation: cmd.transportation,
                carrier: normalize_optional_text(cmd.carrier.as_deref()),
                departure_at: cmd.departure_at,
                arrival_at: cmd.arrival_at,
                duration_minutes: cmd.duration_minutes,
                cost: cmd.cost,
                is_selected: cmd.is_selected,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                updated_at: Utc::now(),
                ..current
            };
            let model = routes::ActiveModel::from(&updated).update(&db_tx).await?;
            self.recalculate_in_tx(&db_tx, trip_id).await?;
            Route::try_from(model)
        })
    }

    /// Mark a route as the chosen alternative for its leg.
    ///
    /// Every other route on the same `from` -> `to` leg is deselected.
    pub async fn select_route(&self, route_id: Uuid) -> ResultEngine<Route> {
        with_tx!(self, |db_tx| {
            let current = self.require_route(&db_tx, route_id).await?;
            let trip_id = self
                .owning_trip_of_point(&db_tx, current.from_point_id)
                .await?;

            let deselected = self.set_leg_selection(&db_tx, &current, false).await?;
            routes::Entity::update_many()
                .col_expr(routes::Column::IsSelected, Expr::value(true))
                .col_expr(routes::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(routes::Column::Id.eq(route_id))
                .exec(&db_tx)
                .await?;

            self.recalculate_in_tx(&db_tx, trip_id).await?;
            tracing::info!(%route_id, %trip_id, deselected, "route selected");

            let model = routes::Entity::find_by_id(route_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::InvalidState(format!("route {route_id} vanished")))?;
            Route::try_from(model)
        })
    }

    /// Delete a route.
    ///
    /// Returns `false` if the route does not exist. The owning trip is
    /// resolved before the row goes away, then its total is recomputed.
    pub async fn delete_route(&self, route_id: Uuid) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let Some(route) = routes::Entity::find_by_id(route_id).one(&db_tx).await? else {
                return Ok(false);
            };
            let trip_id = self
                .owning_trip_of_point(&db_tx, route.from_point_id)
                .await?;

            routes::Entity::delete_by_id(route_id).exec(&db_tx).await?;
            self.recalculate_in_tx(&db_tx, trip_id).await?;
            tracing::info!(%route_id, %trip_id, "route deleted");
            Ok(true)
        })
    }

    /// Set `is_selected` on every sibling of `route` (same leg, other id).
    async fn set_leg_selection(
        &self,
        db: &DatabaseTransaction,
        route: &routes::Model,
        is_selected: bool,
    ) -> ResultEngine<u64> {
        let result = routes::Entity::update_many()
            .col_expr(routes::Column::IsSelected, Expr::value(is_selected))
            .col_expr(routes::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(routes::Column::FromPointId.eq(route.from_point_id))
            .filter(routes::Column::ToPointId.eq(route.to_point_id))
            .filter(routes::Column::Id.ne(route.id))
            .filter(routes::Column::IsSelected.ne(is_selected))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
