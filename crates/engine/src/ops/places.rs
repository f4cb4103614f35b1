use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, PlaceCmd, PlaceToVisit, ResultEngine, places};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Add a place to visit near a trip point.
    ///
    /// Places never touch the trip total.
    pub async fn new_place(&self, point_id: Uuid, cmd: PlaceCmd) -> ResultEngine<PlaceToVisit> {
        let name = normalize_required_name(&cmd.name, "place")?;
        check_price(&cmd)?;
        with_tx!(self, |db_tx| {
            self.require_trip_point(&db_tx, point_id).await?;
            let now = Utc::now();
            let place = PlaceToVisit {
                id: Uuid::new_v4(),
                trip_point_id: point_id,
                name,
                description: normalize_optional_text(cmd.description.as_deref()),
                address: normalize_optional_text(cmd.address.as_deref()),
                website: normalize_optional_text(cmd.website.as_deref()),
                price: cmd.price,
                visit_date: cmd.visit_date,
                visited: cmd.visited,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                created_at: now,
                updated_at: now,
            };
            let model = places::ActiveModel::from(&place).insert(&db_tx).await?;
            Ok(PlaceToVisit::from(model))
        })
    }

    /// Return a place to visit.
    pub async fn place(&self, place_id: Uuid) -> ResultEngine<PlaceToVisit> {
        with_tx!(self, |db_tx| {
            let model = self.require_place(&db_tx, place_id).await?;
            Ok(PlaceToVisit::from(model))
        })
    }

    /// Return the places of a trip point: unvisited first, then by visit date.
    pub async fn places(&self, point_id: Uuid) -> ResultEngine<Vec<PlaceToVisit>> {
        with_tx!(self, |db_tx| {
            self.require_trip_point(&db_tx, point_id).await?;
            let places = places::Entity::find()
                .filter(places::Column::TripPointId.eq(point_id))
                .order_by_asc(places::Column::Visited)
                .order_by_asc(places::Column::VisitDate)
                .order_by_asc(places::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            Ok(places.into_iter().map(PlaceToVisit::from).collect())
        })
    }

    /// Replace every mutable field of a place.
    pub async fn update_place(&self, place_id: Uuid, cmd: PlaceCmd) -> ResultEngine<PlaceToVisit> {
        let name = normalize_required_name(&cmd.name, "place")?;
        check_price(&cmd)?;
        with_tx!(self, |db_tx| {
            let current = PlaceToVisit::from(self.require_place(&db_tx, place_id).await?);
            let updated = PlaceToVisit {
                name,
                description: normalize_optional_text(cmd.description.as_deref()),
                address: normalize_optional_text(cmd.address.as_deref()),
                website: normalize_optional_text(cmd.website.as_deref()),
                price: cmd.price,
                visit_date: cmd.visit_date,
                visited: cmd.visited,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                updated_at: Utc::now(),
                ..current
            };
            let model = places::ActiveModel::from(&updated).update(&db_tx).await?;
            Ok(PlaceToVisit::from(model))
        })
    }

    /// Delete a place. Returns `false` if it does not exist.
    pub async fn delete_place(&self, place_id: Uuid) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let result = places::Entity::delete_by_id(place_id).exec(&db_tx).await?;
            Ok(result.rows_affected > 0)
        })
    }
}

fn check_price(cmd: &PlaceCmd) -> ResultEngine<()> {
    match cmd.price {
        Some(price) if price.is_negative() => Err(EngineError::InvalidArgument(
            "place price must be >= 0".to_string(),
        )),
        _ => Ok(()),
    }
}
