//! Initial schema: trips and everything hanging off them.
//!
//! - `trips`: top-level plans, with the derived `total_cost_minor`
//! - `trip_points`: ordered waypoints of a trip
//! - `accommodations`: lodging at a trip point
//! - `routes`: legs between two trip points of the same trip
//! - `expenses`: spending recorded against a trip
//! - `places_to_visit`: sights near a trip point
//!
//! Deleting a trip cascades to its points and expenses, deleting a point
//! cascades to its accommodations and places. Routes restrict: the engine
//! removes them before it removes an endpoint.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Trips {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    IsCompleted,
    IsDefault,
    Description,
    PlannedCostMinor,
    TotalCostMinor,
    Currency,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TripPoints {
    Table,
    Id,
    TripId,
    Name,
    OrderIndex,
    ArrivalDate,
    DepartureDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Accommodations {
    Table,
    Id,
    TripPointId,
    Name,
    Kind,
    Address,
    CheckIn,
    CheckOut,
    Website,
    CostMinor,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Routes {
    Table,
    Id,
    FromPointId,
    ToPointId,
    Name,
    Transportation,
    Carrier,
    DepartureAt,
    ArrivalAt,
    DurationMinutes,
    CostMinor,
    IsSelected,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    TripId,
    Description,
    Category,
    AmountMinor,
    ExpenseDate,
    PaymentMethod,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlacesToVisit {
    Table,
    Id,
    TripPointId,
    Name,
    Description,
    Address,
    Website,
    PriceMinor,
    VisitDate,
    Visited,
    Notes,
    CreatedAt,
    UpdatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Trips
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trips::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Trips::Name).string().not_null())
                    .col(ColumnDef::new(Trips::StartDate).date().not_null())
                    .col(ColumnDef::new(Trips::EndDate).date())
                    .col(
                        ColumnDef::new(Trips::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Trips::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Trips::Description).string())
                    .col(ColumnDef::new(Trips::PlannedCostMinor).big_integer())
                    .col(
                        ColumnDef::new(Trips::TotalCostMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Trips::Currency)
                            .string()
                            .not_null()
                            .default("EUR"),
                    )
                    .col(ColumnDef::new(Trips::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Trips::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // At most one default trip. sea-query has no partial index builder.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS \"idx-trips-single_default\" \
                 ON trips (is_default) WHERE is_default = 1",
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Trip points
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(TripPoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TripPoints::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TripPoints::TripId).uuid().not_null())
                    .col(ColumnDef::new(TripPoints::Name).string().not_null())
                    .col(
                        ColumnDef::new(TripPoints::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(TripPoints::ArrivalDate).date().not_null())
                    .col(ColumnDef::new(TripPoints::DepartureDate).date().not_null())
                    .col(ColumnDef::new(TripPoints::Notes).string())
                    .col(ColumnDef::new(TripPoints::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(TripPoints::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trip_points-trip_id")
                            .from(TripPoints::Table, TripPoints::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trip_points-trip_id-order_index")
                    .table(TripPoints::Table)
                    .col(TripPoints::TripId)
                    .col(TripPoints::OrderIndex)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Accommodations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accommodations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accommodations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accommodations::TripPointId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accommodations::Name).string().not_null())
                    .col(ColumnDef::new(Accommodations::Kind).string().not_null())
                    .col(ColumnDef::new(Accommodations::Address).string())
                    .col(
                        ColumnDef::new(Accommodations::CheckIn)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accommodations::CheckOut)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accommodations::Website).string())
                    .col(
                        ColumnDef::new(Accommodations::CostMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accommodations::Status)
                            .string()
                            .not_null()
                            .default("planned"),
                    )
                    .col(ColumnDef::new(Accommodations::Notes).string())
                    .col(
                        ColumnDef::new(Accommodations::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accommodations::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accommodations-trip_point_id")
                            .from(Accommodations::Table, Accommodations::TripPointId)
                            .to(TripPoints::Table, TripPoints::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accommodations-trip_point_id")
                    .table(Accommodations::Table)
                    .col(Accommodations::TripPointId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Routes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Routes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Routes::FromPointId).uuid().not_null())
                    .col(ColumnDef::new(Routes::ToPointId).uuid().not_null())
                    .col(ColumnDef::new(Routes::Name).string().not_null())
                    .col(ColumnDef::new(Routes::Transportation).string().not_null())
                    .col(ColumnDef::new(Routes::Carrier).string())
                    .col(ColumnDef::new(Routes::DepartureAt).timestamp())
                    .col(ColumnDef::new(Routes::ArrivalAt).timestamp())
                    .col(ColumnDef::new(Routes::DurationMinutes).integer())
                    .col(ColumnDef::new(Routes::CostMinor).big_integer())
                    .col(
                        ColumnDef::new(Routes::IsSelected)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Routes::Notes).string())
                    .col(ColumnDef::new(Routes::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Routes::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-routes-from_point_id")
                            .from(Routes::Table, Routes::FromPointId)
                            .to(TripPoints::Table, TripPoints::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-routes-to_point_id")
                            .from(Routes::Table, Routes::ToPointId)
                            .to(TripPoints::Table, TripPoints::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-routes-from_point_id-to_point_id")
                    .table(Routes::Table)
                    .col(Routes::FromPointId)
                    .col(Routes::ToPointId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-routes-to_point_id")
                    .table(Routes::Table)
                    .col(Routes::ToPointId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::TripId).uuid().not_null())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::ExpenseDate).date().not_null())
                    .col(
                        ColumnDef::new(Expenses::PaymentMethod)
                            .string()
                            .not_null()
                            .default("credit_card"),
                    )
                    .col(ColumnDef::new(Expenses::Notes).string())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-trip_id")
                            .from(Expenses::Table, Expenses::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-trip_id-expense_date")
                    .table(Expenses::Table)
                    .col(Expenses::TripId)
                    .col(Expenses::ExpenseDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Places to visit
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PlacesToVisit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlacesToVisit::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlacesToVisit::TripPointId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlacesToVisit::Name).string().not_null())
                    .col(ColumnDef::new(PlacesToVisit::Description).string())
                    .col(ColumnDef::new(PlacesToVisit::Address).string())
                    .col(ColumnDef::new(PlacesToVisit::Website).string())
                    .col(ColumnDef::new(PlacesToVisit::PriceMinor).big_integer())
                    .col(ColumnDef::new(PlacesToVisit::VisitDate).date())
                    .col(
                        ColumnDef::new(PlacesToVisit::Visited)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PlacesToVisit::Notes).string())
                    .col(
                        ColumnDef::new(PlacesToVisit::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlacesToVisit::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-places_to_visit-trip_point_id")
                            .from(PlacesToVisit::Table, PlacesToVisit::TripPointId)
                            .to(TripPoints::Table, TripPoints::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-places_to_visit-trip_point_id")
                    .table(PlacesToVisit::Table)
                    .col(PlacesToVisit::TripPointId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(PlacesToVisit::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Routes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accommodations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TripPoints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await?;
        Ok(())
    }
}
