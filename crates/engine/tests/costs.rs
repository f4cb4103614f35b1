mod common;

use common::{at, day, engine_with_db, eur, point, trip};
use engine::{
    AccommodationCmd, AccommodationKind, AccommodationStatus, EngineError, ExpenseCategory,
    ExpenseCmd, MoneyCents, RouteCmd, TransportationType,
};
use uuid::Uuid;

fn hotel(cost: MoneyCents, status: AccommodationStatus) -> AccommodationCmd {
    AccommodationCmd::new(
        "Hotel Roma",
        AccommodationKind::Hotel,
        at(1, 15),
        at(4, 10),
        cost,
    )
    .status(status)
}

fn lunch(amount: MoneyCents) -> ExpenseCmd {
    ExpenseCmd::new("Lunch", ExpenseCategory::Restaurant, amount, day(2))
}

#[tokio::test]
async fn confirmed_stay_and_expense_make_the_total() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;

    engine
        .new_accommodation(rome.id, hotel(eur(120), AccommodationStatus::Confirmed))
        .await
        .unwrap();
    engine.new_expense(trip.id, lunch(eur(80))).await.unwrap();

    let stored = engine.trip(trip.id).await.unwrap();
    assert_eq!(stored.total_cost, eur(200));
}

#[tokio::test]
async fn planned_stay_does_not_count() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;

    engine
        .new_accommodation(rome.id, hotel(eur(120), AccommodationStatus::Confirmed))
        .await
        .unwrap();
    engine.new_expense(trip.id, lunch(eur(80))).await.unwrap();
    engine
        .new_accommodation(rome.id, hotel(eur(50), AccommodationStatus::Planned))
        .await
        .unwrap();

    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(200));
}

#[tokio::test]
async fn route_counts_only_once_selected() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;

    engine
        .new_accommodation(rome.id, hotel(eur(120), AccommodationStatus::Paid))
        .await
        .unwrap();
    engine.new_expense(trip.id, lunch(eur(80))).await.unwrap();

    let cmd = RouteCmd::new("Frecciarossa", TransportationType::Train).cost(eur(30));
    let route = engine
        .new_route(rome.id, florence.id, cmd.clone())
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(200));

    engine
        .update_route(route.id, cmd.selected(true))
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(230));
}

#[tokio::test]
async fn selected_route_without_cost_adds_nothing() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;

    engine
        .new_route(
            rome.id,
            florence.id,
            RouteCmd::new("Drive", TransportationType::Car).selected(true),
        )
        .await
        .unwrap();

    assert_eq!(
        engine.recalculate_trip_total_cost(trip.id).await.unwrap(),
        MoneyCents::ZERO
    );
}

#[tokio::test]
async fn deleting_an_expense_lowers_the_total() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;

    engine
        .new_accommodation(rome.id, hotel(eur(80), AccommodationStatus::Confirmed))
        .await
        .unwrap();
    engine.new_expense(trip.id, lunch(eur(110))).await.unwrap();
    let taxi = engine
        .new_expense(
            trip.id,
            ExpenseCmd::new("Taxi", ExpenseCategory::Transportation, eur(20), day(3)),
        )
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(210));

    assert!(engine.delete_expense(taxi.id).await.unwrap());
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(190));

    assert!(!engine.delete_expense(taxi.id).await.unwrap());
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(190));
}

#[tokio::test]
async fn expense_only_trip_drops_to_remaining_expense() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Weekend").await;
    engine.new_expense(trip.id, lunch(eur(110))).await.unwrap();
    let museum = engine
        .new_expense(
            trip.id,
            ExpenseCmd::new("Museum", ExpenseCategory::Entertainment, eur(15), day(2)),
        )
        .await
        .unwrap();

    engine.delete_expense(museum.id).await.unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(110));
}

#[tokio::test]
async fn cancelling_a_stay_removes_its_cost() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;

    let stay = engine
        .new_accommodation(rome.id, hotel(eur(120), AccommodationStatus::Confirmed))
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(120));

    engine
        .update_accommodation(stay.id, hotel(eur(120), AccommodationStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(
        engine.trip(trip.id).await.unwrap().total_cost,
        MoneyCents::ZERO
    );

    engine
        .update_accommodation(
            stay.id,
            hotel(eur(90), AccommodationStatus::PaymentRequired),
        )
        .await
        .unwrap();
    assert_eq!(
        engine.trip(trip.id).await.unwrap().total_cost,
        MoneyCents::ZERO
    );
}

#[tokio::test]
async fn recalculation_is_idempotent() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    engine
        .new_accommodation(rome.id, hotel(eur(99), AccommodationStatus::Paid))
        .await
        .unwrap();

    let first = engine.recalculate_trip_total_cost(trip.id).await.unwrap();
    let second = engine.recalculate_trip_total_cost(trip.id).await.unwrap();
    assert_eq!(first, eur(99));
    assert_eq!(first, second);
}

#[tokio::test]
async fn totals_converge_regardless_of_order() {
    let (engine_a, _db_a) = engine_with_db().await;
    let (engine_b, _db_b) = engine_with_db().await;

    let trip_a = trip(&engine_a, "A").await;
    let rome_a = point(&engine_a, &trip_a, "Rome", 0).await;
    engine_a.new_expense(trip_a.id, lunch(eur(12))).await.unwrap();
    let extra = engine_a
        .new_expense(trip_a.id, lunch(eur(40)))
        .await
        .unwrap();
    engine_a
        .new_accommodation(rome_a.id, hotel(eur(70), AccommodationStatus::Paid))
        .await
        .unwrap();
    engine_a.delete_expense(extra.id).await.unwrap();

    let trip_b = trip(&engine_b, "B").await;
    let rome_b = point(&engine_b, &trip_b, "Rome", 0).await;
    engine_b
        .new_accommodation(rome_b.id, hotel(eur(70), AccommodationStatus::Paid))
        .await
        .unwrap();
    engine_b.new_expense(trip_b.id, lunch(eur(12))).await.unwrap();

    let total_a = engine_a.trip(trip_a.id).await.unwrap().total_cost;
    let total_b = engine_b.trip(trip_b.id).await.unwrap().total_cost;
    assert_eq!(total_a, eur(82));
    assert_eq!(total_a, total_b);
}

#[tokio::test]
async fn unknown_trip_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let missing = Uuid::new_v4();

    let err = engine.recalculate_trip_total_cost(missing).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound(format!("trip {missing}")));

    let err = engine.new_expense(missing, lunch(eur(5))).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn invalid_children_are_rejected_before_writing() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;

    let err = engine
        .new_expense(trip.id, lunch(MoneyCents::ZERO))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));

    let backwards = AccommodationCmd::new(
        "Hotel Roma",
        AccommodationKind::Hotel,
        at(4, 10),
        at(1, 15),
        eur(50),
    )
    .status(AccommodationStatus::Confirmed);
    let err = engine
        .new_accommodation(rome.id, backwards)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));

    assert!(engine.expenses(trip.id).await.unwrap().is_empty());
    assert!(engine.accommodations(rome.id).await.unwrap().is_empty());
    assert_eq!(
        engine.trip(trip.id).await.unwrap().total_cost,
        MoneyCents::ZERO
    );
}

#[tokio::test]
async fn summary_groups_by_category() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    engine.new_expense(trip.id, lunch(eur(20))).await.unwrap();
    engine.new_expense(trip.id, lunch(eur(15))).await.unwrap();
    engine
        .new_expense(
            trip.id,
            ExpenseCmd::new("Train", ExpenseCategory::Transportation, eur(40), day(3)),
        )
        .await
        .unwrap();

    let summary = engine.expense_summary(trip.id).await.unwrap();
    assert_eq!(
        summary.by_category,
        vec![
            (ExpenseCategory::Transportation, eur(40)),
            (ExpenseCategory::Restaurant, eur(35)),
        ]
    );
    assert_eq!(summary.total, eur(75));
}

#[tokio::test]
async fn recompute_all_touches_every_trip() {
    let (engine, _db) = engine_with_db().await;
    let first = trip(&engine, "First").await;
    let second = trip(&engine, "Second").await;
    engine.new_expense(first.id, lunch(eur(10))).await.unwrap();

    let totals = engine.recompute_all_totals().await.unwrap();
    assert_eq!(totals.len(), 2);
    assert!(totals.contains(&(first.id, eur(10))));
    assert!(totals.contains(&(second.id, MoneyCents::ZERO)));
}

#[tokio::test]
async fn italy_walkthrough() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;

    let dinner = engine.new_expense(trip.id, lunch(eur(120))).await.unwrap();
    engine
        .new_accommodation(rome.id, hotel(eur(80), AccommodationStatus::Confirmed))
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(200));

    engine
        .new_accommodation(florence.id, hotel(eur(50), AccommodationStatus::Planned))
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(200));

    let cmd = RouteCmd::new("Regionale", TransportationType::Train).cost(eur(30));
    let route = engine
        .new_route(rome.id, florence.id, cmd.clone())
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(200));
    engine
        .update_route(route.id, cmd.selected(true))
        .await
        .unwrap();
    assert_eq!(
        engine.recalculate_trip_total_cost(trip.id).await.unwrap(),
        eur(230)
    );

    assert!(engine.delete_expense(dinner.id).await.unwrap());
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(110));
}

#[tokio::test]
async fn overflowing_total_is_invalid_state() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let big = MoneyCents::new(i64::MAX / 2 + 1);

    engine.new_expense(trip.id, lunch(big)).await.unwrap();
    let err = engine.new_expense(trip.id, lunch(big)).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));

    assert_eq!(engine.expenses(trip.id).await.unwrap().len(), 1);
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, big);
}

#[tokio::test]
async fn deleting_a_selected_route_lowers_the_total() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;

    engine.new_expense(trip.id, lunch(eur(10))).await.unwrap();
    let train = engine
        .new_route(
            rome.id,
            florence.id,
            RouteCmd::new("Frecciarossa", TransportationType::Train)
                .cost(eur(30))
                .selected(true),
        )
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(40));

    assert!(engine.delete_route(train.id).await.unwrap());
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(10));

    assert!(!engine.delete_route(train.id).await.unwrap());
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(10));
}

#[tokio::test]
async fn deleting_a_stay_lowers_the_total() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;

    let confirmed = engine
        .new_accommodation(rome.id, hotel(eur(120), AccommodationStatus::Confirmed))
        .await
        .unwrap();
    engine
        .new_accommodation(rome.id, hotel(eur(50), AccommodationStatus::Planned))
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(120));

    assert!(engine.delete_accommodation(confirmed.id).await.unwrap());
    assert_eq!(
        engine.trip(trip.id).await.unwrap().total_cost,
        MoneyCents::ZERO
    );
    assert_eq!(engine.accommodations(rome.id).await.unwrap().len(), 1);

    assert!(!engine.delete_accommodation(confirmed.id).await.unwrap());
}

#[tokio::test]
async fn updating_an_expense_recomputes_the_total() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let dinner = engine.new_expense(trip.id, lunch(eur(110))).await.unwrap();

    let updated = engine
        .update_expense(
            dinner.id,
            ExpenseCmd::new("Groceries", ExpenseCategory::Food, eur(70), day(3)),
        )
        .await
        .unwrap();
    assert_eq!(updated.category, ExpenseCategory::Food);
    assert_eq!(updated.trip_id, trip.id);
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(70));

    let err = engine
        .update_expense(dinner.id, lunch(MoneyCents::ZERO))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    assert_eq!(engine.expense(dinner.id).await.unwrap().amount, eur(70));

    let err = engine
        .update_expense(Uuid::new_v4(), lunch(eur(5)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}
