use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Accommodation, AccommodationStatus, EngineError, Expense, MoneyCents, ResultEngine, Route,
    accommodations, expenses, routes, trips,
};

use super::{Engine, with_tx};

impl Engine {
    /// Recomputes the stored total cost of a trip from its children.
    ///
    /// The total is always rebuilt from scratch, never adjusted by a delta:
    ///
    /// - every expense of the trip;
    /// - accommodations of the trip's points that are `Confirmed` or `Paid`;
    /// - selected routes leaving one of the trip's points that have a cost.
    ///
    /// Amounts are summed raw, without currency conversion. Returns the new
    /// total, which is also persisted together with a fresh `updated_at`.
    pub async fn recalculate_trip_total_cost(&self, trip_id: Uuid) -> ResultEngine<MoneyCents> {
        with_tx!(self, |db_tx| {
            self.recalculate_in_tx(&db_tx, trip_id).await
        })
    }

    /// Recomputes the total of every trip. Returns `(trip_id, total)` pairs
    /// ordered by trip start date.
    pub async fn recompute_all_totals(&self) -> ResultEngine<Vec<(Uuid, MoneyCents)>> {
        with_tx!(self, |db_tx| {
            let trip_ids: Vec<Uuid> = trips::Entity::find()
                .order_by_asc(trips::Column::StartDate)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|trip| trip.id)
                .collect();

            let mut totals = Vec::with_capacity(trip_ids.len());
            for trip_id in trip_ids {
                let total = self.recalculate_in_tx(&db_tx, trip_id).await?;
                totals.push((trip_id, total));
            }
            Ok(totals)
        })
    }

    pub(super) async fn recalculate_in_tx(
        &self,
        db: &DatabaseTransaction,
        trip_id: Uuid,
    ) -> ResultEngine<MoneyCents> {
        self.require_trip(db, trip_id).await?;
        let point_ids = self.trip_point_ids(db, trip_id).await?;

        let expenses = expenses::Entity::find()
            .filter(expenses::Column::TripId.eq(trip_id))
            .all(db)
            .await?
            .into_iter()
            .map(|model| Expense::try_from(model).map(|e| e.amount))
            .collect::<ResultEngine<Vec<_>>>()?;

        let (stays, legs) = if point_ids.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let counted_statuses = AccommodationStatus::ALL
                .iter()
                .filter(|status| status.counts_toward_cost())
                .map(|status| status.as_str());
            let stays: Vec<MoneyCents> = accommodations::Entity::find()
                .filter(
                    accommodations::Column::TripPointId.is_in(point_ids.iter().copied()),
                )
                .filter(accommodations::Column::Status.is_in(counted_statuses))
                .all(db)
                .await?
                .into_iter()
                .map(Accommodation::try_from)
                .collect::<ResultEngine<Vec<_>>>()?
                .iter()
                .map(Accommodation::cost_contribution)
                .collect();

            let legs: Vec<MoneyCents> = routes::Entity::find()
                .filter(routes::Column::FromPointId.is_in(point_ids.iter().copied()))
                .filter(routes::Column::IsSelected.eq(true))
                .filter(routes::Column::CostMinor.is_not_null())
                .all(db)
                .await?
                .into_iter()
                .map(Route::try_from)
                .collect::<ResultEngine<Vec<_>>>()?
                .iter()
                .map(Route::cost_contribution)
                .collect();

            (stays, legs)
        };

        let total = MoneyCents::checked_sum(expenses.into_iter().chain(stays).chain(legs))
            .ok_or_else(|| {
                EngineError::InvalidState(format!("total cost of trip {trip_id} overflows"))
            })?;

        let trip_model = trips::ActiveModel {
            id: ActiveValue::Set(trip_id),
            total_cost_minor: ActiveValue::Set(total.cents()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        trip_model.update(db).await?;

        tracing::debug!(%trip_id, total = %total, "recomputed trip total cost");
        Ok(total)
    }
}
