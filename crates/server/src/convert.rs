//! Mapping between engine types and wire types.

use api_types::{
    Currency as ApiCurrency,
    accommodation::{
        AccommodationInput, AccommodationKind as ApiAccommodationKind,
        AccommodationStatus as ApiAccommodationStatus, AccommodationView,
    },
    expense::{
        CategoryTotal, ExpenseCategory as ApiExpenseCategory, ExpenseInput,
        ExpenseSummaryResponse, ExpenseView, PaymentMethod as ApiPaymentMethod,
    },
    place::{PlaceInput, PlaceView},
    route::{RouteInput, RouteView, TransportationType as ApiTransportationType},
    trip::{TripDetailResponse, TripInput, TripView},
    trip_point::{TripPointDetailResponse, TripPointInput, TripPointView},
};
use engine::{
    Accommodation, AccommodationCmd, AccommodationKind, AccommodationStatus, Currency, Expense,
    ExpenseCategory, ExpenseCmd, ExpenseSummary, MoneyCents, PaymentMethod, PlaceCmd,
    PlaceToVisit, Route, RouteCmd, TransportationType, Trip, TripCmd, TripDetail, TripPoint,
    TripPointCmd, TripPointDetail,
};

/// Generates the two conversions for an enum that has the same variants on
/// both sides of the wire.
macro_rules! enum_bridge {
    ($to_engine:ident, $to_api:ident, $api:ident, $engine:ident, [$($variant:ident),+ $(,)?]) => {
        pub(crate) fn $to_engine(value: $api) -> $engine {
            match value {
                $($api::$variant => $engine::$variant,)+
            }
        }

        pub(crate) fn $to_api(value: $engine) -> $api {
            match value {
                $($engine::$variant => $api::$variant,)+
            }
        }
    };
}

enum_bridge!(
    currency_in,
    currency_out,
    ApiCurrency,
    Currency,
    [Eur, Usd, Gbp, Chf, Pln, Jpy]
);
enum_bridge!(
    transportation_in,
    transportation_out,
    ApiTransportationType,
    TransportationType,
    [Flight, Train, Bus, Car, Walking, Other]
);
enum_bridge!(
    kind_in,
    kind_out,
    ApiAccommodationKind,
    AccommodationKind,
    [Booking, Hotel, Apartment, Airbnb, Other]
);
enum_bridge!(
    status_in,
    status_out,
    ApiAccommodationStatus,
    AccommodationStatus,
    [Planned, Confirmed, PaymentRequired, Paid, Cancelled]
);
enum_bridge!(
    category_in,
    category_out,
    ApiExpenseCategory,
    ExpenseCategory,
    [
        Transportation,
        Restaurant,
        Food,
        Entertainment,
        Shopping,
        Fee,
        Living,
        Other
    ]
);
enum_bridge!(
    payment_in,
    payment_out,
    ApiPaymentMethod,
    PaymentMethod,
    [Cash, CreditCard]
);

pub(crate) fn trip_cmd(input: TripInput) -> TripCmd {
    TripCmd {
        name: input.name,
        start_date: input.start_date,
        end_date: input.end_date,
        is_completed: input.is_completed,
        is_default: input.is_default,
        description: input.description,
        planned_cost: input.planned_cost_minor.map(MoneyCents::new),
        currency: input.currency.map(currency_in).unwrap_or_default(),
    }
}

pub(crate) fn trip_view(trip: Trip) -> TripView {
    TripView {
        id: trip.id,
        remaining_budget_minor: trip.remaining_budget().map(MoneyCents::cents),
        name: trip.name,
        start_date: trip.start_date,
        end_date: trip.end_date,
        is_completed: trip.is_completed,
        is_default: trip.is_default,
        description: trip.description,
        planned_cost_minor: trip.planned_cost.map(MoneyCents::cents),
        total_cost_minor: trip.total_cost.cents(),
        currency: currency_out(trip.currency),
        created_at: trip.created_at,
        updated_at: trip.updated_at,
    }
}

pub(crate) fn trip_detail_response(detail: TripDetail) -> TripDetailResponse {
    TripDetailResponse {
        trip: trip_view(detail.trip),
        points: detail.points.into_iter().map(trip_point_view).collect(),
        expenses: detail.expenses.into_iter().map(expense_view).collect(),
    }
}

pub(crate) fn trip_point_cmd(input: TripPointInput) -> TripPointCmd {
    TripPointCmd {
        name: input.name,
        order: input.order,
        arrival_date: input.arrival_date,
        departure_date: input.departure_date,
        notes: input.notes,
    }
}

pub(crate) fn trip_point_view(point: TripPoint) -> TripPointView {
    TripPointView {
        id: point.id,
        trip_id: point.trip_id,
        name: point.name,
        order: point.order,
        arrival_date: point.arrival_date,
        departure_date: point.departure_date,
        notes: point.notes,
        created_at: point.created_at,
        updated_at: point.updated_at,
    }
}

pub(crate) fn trip_point_detail_response(detail: TripPointDetail) -> TripPointDetailResponse {
    TripPointDetailResponse {
        point: trip_point_view(detail.point),
        accommodations: detail
            .accommodations
            .into_iter()
            .map(accommodation_view)
            .collect(),
        outgoing_routes: detail.outgoing_routes.into_iter().map(route_view).collect(),
        incoming_routes: detail.incoming_routes.into_iter().map(route_view).collect(),
        places: detail.places.into_iter().map(place_view).collect(),
    }
}

pub(crate) fn route_cmd(input: RouteInput) -> RouteCmd {
    RouteCmd {
        name: input.name,
        transportation: transportation_in(input.transportation),
        carrier: input.carrier,
        departure_at: input.departure_at,
        arrival_at: input.arrival_at,
        duration_minutes: input.duration_minutes,
        cost: input.cost_minor.map(MoneyCents::new),
        is_selected: input.is_selected,
        notes: input.notes,
    }
}

pub(crate) fn route_view(route: Route) -> RouteView {
    RouteView {
        id: route.id,
        from_point_id: route.from_point_id,
        to_point_id: route.to_point_id,
        name: route.name,
        transportation: transportation_out(route.transportation),
        carrier: route.carrier,
        departure_at: route.departure_at,
        arrival_at: route.arrival_at,
        duration_minutes: route.duration_minutes,
        cost_minor: route.cost.map(MoneyCents::cents),
        is_selected: route.is_selected,
        notes: route.notes,
        created_at: route.created_at,
        updated_at: route.updated_at,
    }
}

pub(crate) fn accommodation_cmd(input: AccommodationInput) -> AccommodationCmd {
    AccommodationCmd {
        name: input.name,
        kind: kind_in(input.kind),
        address: input.address,
        check_in: input.check_in,
        check_out: input.check_out,
        website: input.website,
        cost: MoneyCents::new(input.cost_minor),
        status: status_in(input.status),
        notes: input.notes,
    }
}

pub(crate) fn accommodation_view(accommodation: Accommodation) -> AccommodationView {
    AccommodationView {
        id: accommodation.id,
        trip_point_id: accommodation.trip_point_id,
        name: accommodation.name,
        kind: kind_out(accommodation.kind),
        address: accommodation.address,
        check_in: accommodation.check_in,
        check_out: accommodation.check_out,
        website: accommodation.website,
        cost_minor: accommodation.cost.cents(),
        status: status_out(accommodation.status),
        notes: accommodation.notes,
        created_at: accommodation.created_at,
        updated_at: accommodation.updated_at,
    }
}

pub(crate) fn expense_cmd(input: ExpenseInput) -> ExpenseCmd {
    ExpenseCmd {
        description: input.description,
        category: category_in(input.category),
        amount: MoneyCents::new(input.amount_minor),
        expense_date: input.expense_date,
        payment_method: payment_in(input.payment_method),
        notes: input.notes,
    }
}

pub(crate) fn expense_view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        trip_id: expense.trip_id,
        description: expense.description,
        category: category_out(expense.category),
        amount_minor: expense.amount.cents(),
        expense_date: expense.expense_date,
        payment_method: payment_out(expense.payment_method),
        notes: expense.notes,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
    }
}

pub(crate) fn expense_summary_response(summary: ExpenseSummary) -> ExpenseSummaryResponse {
    ExpenseSummaryResponse {
        trip_id: summary.trip_id,
        by_category: summary
            .by_category
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category_out(category),
                total_minor: total.cents(),
            })
            .collect(),
        total_minor: summary.total.cents(),
    }
}

pub(crate) fn place_cmd(input: PlaceInput) -> PlaceCmd {
    PlaceCmd {
        name: input.name,
        description: input.description,
        address: input.address,
        website: input.website,
        price: input.price_minor.map(MoneyCents::new),
        visit_date: input.visit_date,
        visited: input.visited,
        notes: input.notes,
    }
}

pub(crate) fn place_view(place: PlaceToVisit) -> PlaceView {
    PlaceView {
        id: place.id,
        trip_point_id: place.trip_point_id,
        name: place.name,
        description: place.description,
        address: place.address,
        website: place.website,
        price_minor: place.price.map(MoneyCents::cents),
        visit_date: place.visit_date,
        visited: place.visited,
        notes: place.notes,
        created_at: place.created_at,
        updated_at: place.updated_at,
    }
}
