use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Accommodation, AccommodationCmd, ResultEngine, accommodations, accommodations::validate_stay,
};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Add an accommodation to a trip point and recompute the trip total.
    pub async fn new_accommodation(
        &self,
        point_id: Uuid,
        cmd: AccommodationCmd,
    ) -> ResultEngine<Accommodation> {
        validate_stay(cmd.check_in, cmd.check_out, cmd.cost)?;
        let name = normalize_required_name(&cmd.name, "accommodation")?;
        with_tx!(self, |db_tx| {
            let point = self.require_trip_point(&db_tx, point_id).await?;
            let now = Utc::now();
            let accommodation = Accommodation {
                id: Uuid::new_v4(),
                trip_point_id: point_id,
                name,
                kind: cmd.kind,
                address: normalize_optional_text(cmd.address.as_deref()),
                check_in: cmd.check_in,
                check_out: cmd.check_out,
                website: normalize_optional_text(cmd.website.as_deref()),
                cost: cmd.cost,
                status: cmd.status,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                created_at: now,
                updated_at: now,
            };
            let model = accommodations::ActiveModel::from(&accommodation)
                .insert(&db_tx)
                .await?;
            self.recalculate_in_tx(&db_tx, point.trip_id).await?;
            Accommodation::try_from(model)
        })
    }

    /// Return an accommodation.
    pub async fn accommodation(&self, accommodation_id: Uuid) -> ResultEngine<Accommodation> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_accommodation(&db_tx, accommodation_id)
                .await?;
            Accommodation::try_from(model)
        })
    }

    /// Return the accommodations of a trip point ordered by check-in.
    pub async fn accommodations(&self, point_id: Uuid) -> ResultEngine<Vec<Accommodation>> {
        with_tx!(self, |db_tx| {
            self.require_trip_point(&db_tx, point_id).await?;
            accommodations::Entity::find()
                .filter(accommodations::Column::TripPointId.eq(point_id))
                .order_by_asc(accommodations::Column::CheckIn)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Accommodation::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Replace every mutable field of an accommodation and recompute the trip total.
    pub async fn update_accommodation(
        &self,
        accommodation_id: Uuid,
        cmd: AccommodationCmd,
    ) -> ResultEngine<Accommodation> {
        validate_stay(cmd.check_in, cmd.check_out, cmd.cost)?;
        let name = normalize_required_name(&cmd.name, "accommodation")?;
        with_tx!(self, |db_tx| {
            let current = Accommodation::try_from(
                self.require_accommodation(&db_tx, accommodation_id)
                    .await?,
            )?;
            let trip_id = self
                .owning_trip_of_point(&db_tx, current.trip_point_id)
                .await?;

            let updated = Accommodation {
                name,
                kind: cmd.kind,
                address: normalize_optional_text(cmd.address.as_deref()),
                check_in: cmd.check_in,
                check_out: cmd.check_out,
                website: normalize_optional_text(cmd.website.as_deref()),
                cost: cmd.cost,
                status: cmd.status,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                updated_at: Utc::now(),
                ..current
            };
            let model = accommodations::ActiveModel::from(&updated)
                .update(&db_tx)
                .await?;
            self.recalculate_in_tx(&db_tx, trip_id).await?;
            Accommodation::try_from(model)
        })
    }

    /// Delete an accommodation. Returns `false` if it does not exist.
    pub async fn delete_accommodation(&self, accommodation_id: Uuid) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let Some(accommodation) = accommodations::Entity::find_by_id(accommodation_id)
                .one(&db_tx)
                .await?
            else {
                return Ok(false);
            };
            let trip_id = self
                .owning_trip_of_point(&db_tx, accommodation.trip_point_id)
                .await?;

            accommodations::Entity::delete_by_id(accommodation_id)
                .exec(&db_tx)
                .await?;
            self.recalculate_in_tx(&db_tx, trip_id).await?;
            Ok(true)
        })
    }
}
