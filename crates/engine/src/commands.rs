//! Command structs for engine write operations.
//!
//! Every create/update takes the full set of mutable fields of an entity
//! (updates are full replaces). Grouping them keeps call sites readable and
//! avoids long argument lists.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    AccommodationKind, AccommodationStatus, Currency, ExpenseCategory, MoneyCents, PaymentMethod,
    TransportationType,
};

/// Create or replace a trip.
#[derive(Clone, Debug)]
pub struct TripCmd {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub is_default: bool,
    pub description: Option<String>,
    pub planned_cost: Option<MoneyCents>,
    pub currency: Currency,
}

impl TripCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date: None,
            is_completed: false,
            is_default: false,
            description: None,
            planned_cost: None,
            currency: Currency::default(),
        }
    }

    #[must_use]
    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    #[must_use]
    pub fn default_trip(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn planned_cost(mut self, planned_cost: MoneyCents) -> Self {
        self.planned_cost = Some(planned_cost);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

/// Create or replace a trip point.
#[derive(Clone, Debug)]
pub struct TripPointCmd {
    pub name: String,
    pub order: i32,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub notes: Option<String>,
}

impl TripPointCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        order: i32,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            order,
            arrival_date,
            departure_date,
            notes: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Mutable fields of a route. Endpoints are fixed at creation.
#[derive(Clone, Debug)]
pub struct RouteCmd {
    pub name: String,
    pub transportation: TransportationType,
    pub carrier: Option<String>,
    pub departure_at: Option<DateTime<Utc>>,
    pub arrival_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub cost: Option<MoneyCents>,
    pub is_selected: bool,
    pub notes: Option<String>,
}

impl RouteCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, transportation: TransportationType) -> Self {
        Self {
            name: name.into(),
            transportation,
            carrier: None,
            departure_at: None,
            arrival_at: None,
            duration_minutes: None,
            cost: None,
            is_selected: false,
            notes: None,
        }
    }

    #[must_use]
    pub fn carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }

    #[must_use]
    pub fn schedule(mut self, departure_at: DateTime<Utc>, arrival_at: DateTime<Utc>) -> Self {
        self.departure_at = Some(departure_at);
        self.arrival_at = Some(arrival_at);
        self
    }

    #[must_use]
    pub fn duration_minutes(mut self, minutes: i32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub fn cost(mut self, cost: MoneyCents) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Create or replace an accommodation.
#[derive(Clone, Debug)]
pub struct AccommodationCmd {
    pub name: String,
    pub kind: AccommodationKind,
    pub address: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub website: Option<String>,
    pub cost: MoneyCents,
    pub status: AccommodationStatus,
    pub notes: Option<String>,
}

impl AccommodationCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: AccommodationKind,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        cost: MoneyCents,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            address: None,
            check_in,
            check_out,
            website: None,
            cost,
            status: AccommodationStatus::Planned,
            notes: None,
        }
    }

    #[must_use]
    pub fn status(mut self, status: AccommodationStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Create or replace an expense.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub description: String,
    pub category: ExpenseCategory,
    pub amount: MoneyCents,
    pub expense_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        category: ExpenseCategory,
        amount: MoneyCents,
        expense_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            category,
            amount,
            expense_date,
            payment_method: PaymentMethod::CreditCard,
            notes: None,
        }
    }

    #[must_use]
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Create or replace a place to visit.
#[derive(Clone, Debug)]
pub struct PlaceCmd {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub price: Option<MoneyCents>,
    pub visit_date: Option<NaiveDate>,
    pub visited: bool,
    pub notes: Option<String>,
}

impl PlaceCmd {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            address: None,
            website: None,
            price: None,
            visit_date: None,
            visited: false,
            notes: None,
        }
    }

    #[must_use]
    pub fn price(mut self, price: MoneyCents) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn visit_date(mut self, visit_date: NaiveDate) -> Self {
        self.visit_date = Some(visit_date);
        self
    }

    #[must_use]
    pub fn visited(mut self, visited: bool) -> Self {
        self.visited = visited;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
