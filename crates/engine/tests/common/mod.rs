#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, MoneyCents, Trip, TripCmd, TripPoint, TripPointCmd};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();
    (engine, db)
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

pub fn at(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, d, hour, 0, 0).unwrap()
}

pub fn eur(units: i64) -> MoneyCents {
    MoneyCents::new(units * 100)
}

pub async fn trip(engine: &Engine, name: &str) -> Trip {
    engine
        .new_trip(TripCmd::new(name, day(1)).end_date(day(20)))
        .await
        .unwrap()
}

pub async fn point(engine: &Engine, trip: &Trip, name: &str, order: i32) -> TripPoint {
    let arrival = day(1 + order as u32 * 3);
    engine
        .new_trip_point(
            trip.id,
            TripPointCmd::new(name, order, arrival, arrival + chrono::Days::new(2)),
        )
        .await
        .unwrap()
}
