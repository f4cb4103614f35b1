mod common;

use common::{at, day, engine_with_db, eur, point, trip};
use engine::{
    AccommodationCmd, AccommodationKind, AccommodationStatus, EngineError, ExpenseCategory,
    ExpenseCmd, MoneyCents, PlaceCmd, RouteCmd, TransportationType,
};
use uuid::Uuid;

fn train(cost: i64) -> RouteCmd {
    RouteCmd::new("Regionale", TransportationType::Train).cost(eur(cost))
}

#[tokio::test]
async fn self_loop_route_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;

    let err = engine
        .new_route(rome.id, rome.id, train(10))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    assert!(engine.routes_for_trip(trip.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn cross_trip_route_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let italy = trip(&engine, "Italy").await;
    let spain = trip(&engine, "Spain").await;
    let rome = point(&engine, &italy, "Rome", 0).await;
    let madrid = point(&engine, &spain, "Madrid", 0).await;

    let err = engine
        .new_route(rome.id, madrid.id, train(10).selected(true))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    assert_eq!(
        engine.trip(italy.id).await.unwrap().total_cost,
        MoneyCents::ZERO
    );
}

#[tokio::test]
async fn route_to_unknown_point_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let missing = Uuid::new_v4();

    let err = engine
        .new_route(rome.id, missing, train(10))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound(format!("trip point {missing}")));
}

#[tokio::test]
async fn deleting_a_point_removes_dependents_and_refreshes_total() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;
    let venice = point(&engine, &trip, "Venice", 2).await;

    let stay = engine
        .new_accommodation(
            florence.id,
            AccommodationCmd::new(
                "B&B",
                AccommodationKind::Booking,
                at(4, 14),
                at(6, 10),
                eur(100),
            )
            .status(AccommodationStatus::Paid),
        )
        .await
        .unwrap();
    let place = engine
        .new_place(florence.id, PlaceCmd::new("Uffizi").price(eur(25)))
        .await
        .unwrap();
    let inbound = engine
        .new_route(rome.id, florence.id, train(30).selected(true))
        .await
        .unwrap();
    let outbound = engine
        .new_route(florence.id, venice.id, train(20).selected(true))
        .await
        .unwrap();
    let kept = engine
        .new_route(rome.id, venice.id, train(45))
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(150));

    engine.delete_trip_point(florence.id).await.unwrap();

    assert!(matches!(
        engine.trip_point(florence.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.accommodation(stay.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.place(place.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(!engine.delete_route(inbound.id).await.unwrap());
    assert!(!engine.delete_route(outbound.id).await.unwrap());
    assert_eq!(engine.route(kept.id).await.unwrap().id, kept.id);
    assert_eq!(
        engine.trip(trip.id).await.unwrap().total_cost,
        MoneyCents::ZERO
    );
}

#[tokio::test]
async fn deleting_a_missing_point_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let err = engine.delete_trip_point(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn deleting_a_trip_removes_everything_below_it() {
    let (engine, _db) = engine_with_db().await;
    let italy = trip(&engine, "Italy").await;
    let other = trip(&engine, "Other").await;
    let rome = point(&engine, &italy, "Rome", 0).await;
    let florence = point(&engine, &italy, "Florence", 1).await;
    let route = engine
        .new_route(rome.id, florence.id, train(30))
        .await
        .unwrap();
    let back = engine
        .new_route(florence.id, rome.id, train(30))
        .await
        .unwrap();
    let expense = engine
        .new_expense(
            italy.id,
            ExpenseCmd::new("Gelato", ExpenseCategory::Food, eur(4), day(2)),
        )
        .await
        .unwrap();
    let stay = engine
        .new_accommodation(
            rome.id,
            AccommodationCmd::new(
                "Hotel Roma",
                AccommodationKind::Hotel,
                at(1, 15),
                at(4, 10),
                eur(90),
            )
            .status(AccommodationStatus::Paid),
        )
        .await
        .unwrap();
    let uffizi = engine
        .new_place(florence.id, PlaceCmd::new("Uffizi").price(eur(25)))
        .await
        .unwrap();

    assert!(engine.delete_trip(italy.id).await.unwrap());

    assert!(matches!(
        engine.trip(italy.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.trip_point(rome.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.route(route.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.route(back.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.expense(expense.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.accommodation(stay.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.place(uffizi.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert_eq!(engine.trip(other.id).await.unwrap().id, other.id);

    assert!(!engine.delete_trip(italy.id).await.unwrap());
}

#[tokio::test]
async fn route_update_keeps_endpoints() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;
    let route = engine
        .new_route(rome.id, florence.id, train(30))
        .await
        .unwrap();

    let updated = engine
        .update_route(
            route.id,
            RouteCmd::new("Italo", TransportationType::Train)
                .carrier("Italo")
                .schedule(at(4, 8), at(4, 10))
                .duration_minutes(95)
                .cost(eur(25))
                .selected(true),
        )
        .await
        .unwrap();

    assert_eq!(updated.from_point_id, rome.id);
    assert_eq!(updated.to_point_id, florence.id);
    assert_eq!(updated.name, "Italo");
    assert_eq!(updated.duration_minutes, Some(95));
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(25));

    let err = engine
        .update_route(Uuid::new_v4(), train(1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn selecting_an_alternative_deselects_its_siblings() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;

    let slow = engine
        .new_route(rome.id, florence.id, train(20).selected(true))
        .await
        .unwrap();
    let fast = engine
        .new_route(
            rome.id,
            florence.id,
            RouteCmd::new("Frecciarossa", TransportationType::Train).cost(eur(45)),
        )
        .await
        .unwrap();
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(20));

    let selected = engine.select_route(fast.id).await.unwrap();
    assert!(selected.is_selected);
    assert!(!engine.route(slow.id).await.unwrap().is_selected);
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(45));

    let leg = engine.routes_between(rome.id, florence.id).await.unwrap();
    assert_eq!(leg.len(), 2);
    assert_eq!(leg.iter().filter(|r| r.is_selected).count(), 1);
}

#[tokio::test]
async fn point_detail_splits_routes_by_direction() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;
    let venice = point(&engine, &trip, "Venice", 2).await;

    engine
        .new_route(rome.id, florence.id, train(30))
        .await
        .unwrap();
    engine
        .new_route(florence.id, venice.id, train(20))
        .await
        .unwrap();
    engine
        .new_place(florence.id, PlaceCmd::new("Duomo"))
        .await
        .unwrap();

    let detail = engine.trip_point_detail(florence.id).await.unwrap();
    assert_eq!(detail.point.name, "Florence");
    assert_eq!(detail.incoming_routes.len(), 1);
    assert_eq!(detail.incoming_routes[0].from_point_id, rome.id);
    assert_eq!(detail.outgoing_routes.len(), 1);
    assert_eq!(detail.outgoing_routes[0].to_point_id, venice.id);
    assert_eq!(detail.places.len(), 1);

    let names: Vec<String> = engine
        .trip_points(trip.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Rome", "Florence", "Venice"]);
}

#[tokio::test]
async fn place_price_is_never_counted() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;

    let place = engine
        .new_place(rome.id, PlaceCmd::new("Colosseum").price(eur(18)))
        .await
        .unwrap();
    let place = engine
        .update_place(
            place.id,
            PlaceCmd::new("Colosseum")
                .price(eur(18))
                .visited(true)
                .visit_date(day(2)),
        )
        .await
        .unwrap();
    assert!(place.visited);

    assert_eq!(
        engine.recalculate_trip_total_cost(trip.id).await.unwrap(),
        MoneyCents::ZERO
    );
    assert!(engine.delete_place(place.id).await.unwrap());
    assert!(!engine.delete_place(place.id).await.unwrap());
}

#[tokio::test]
async fn negative_route_cost_or_duration_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let trip = trip(&engine, "Italy").await;
    let rome = point(&engine, &trip, "Rome", 0).await;
    let florence = point(&engine, &trip, "Florence", 1).await;

    let err = engine
        .new_route(
            rome.id,
            florence.id,
            RouteCmd::new("Refund", TransportationType::Bus)
                .cost(MoneyCents::new(-5000))
                .selected(true),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    assert!(engine.routes_for_trip(trip.id).await.unwrap().is_empty());
    assert_eq!(
        engine.trip(trip.id).await.unwrap().total_cost,
        MoneyCents::ZERO
    );

    let regionale = engine
        .new_route(rome.id, florence.id, train(12).selected(true))
        .await
        .unwrap();
    let err = engine
        .update_route(regionale.id, train(12).duration_minutes(-1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    assert_eq!(
        engine.route(regionale.id).await.unwrap().duration_minutes,
        None
    );
    assert_eq!(engine.trip(trip.id).await.unwrap().total_cost, eur(12));
}
