//! Shared fixtures for integration tests
//!
//! Four customers with one field of every scalar kind, plus a nested
//! (optional) car for path resolution.

#![allow(dead_code)]

use aerofilter::{
    EngineConfig, FilterCriterion, FilterEngine, FilterResult, Member, Navigable, Registry,
    RegistryBuilder, TypeDescriptor,
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub model: String,
    pub year: i32,
    pub brand: Brand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub vip: bool,
    pub money: i32,
    pub visits: i64,
    pub balance: Decimal,
    pub rating: f32,
    pub score: Option<f64>,
    pub born_date: Option<NaiveDateTime>,
    pub last_seen: DateTime<FixedOffset>,
    pub car: Option<Car>,
}

impl Navigable for Brand {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new("Brand").scalar::<String>("name")
    }

    fn member(&self, name: &str) -> Option<Member<'_>> {
        match name {
            "name" => Some(Member::scalar(self.name.clone())),
            _ => None,
        }
    }
}

impl Navigable for Car {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new("Car")
            .scalar::<String>("model")
            .scalar::<i32>("year")
            .object::<Brand>("brand")
    }

    fn member(&self, name: &str) -> Option<Member<'_>> {
        match name {
            "model" => Some(Member::scalar(self.model.clone())),
            "year" => Some(Member::scalar(self.year)),
            "brand" => Some(Member::object(&self.brand)),
            _ => None,
        }
    }
}

impl Navigable for Customer {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new("Customer")
            .scalar::<String>("name")
            .scalar::<i32>("money")
            .scalar::<Option<NaiveDateTime>>("bornDate")
            .optional_object::<Car>("car")
    }

    fn member(&self, name: &str) -> Option<Member<'_>> {
        match name {
            "name" => Some(Member::scalar(self.name.clone())),
            "money" => Some(Member::scalar(self.money)),
            "bornDate" => Some(Member::scalar(self.born_date)),
            "car" => Some(Member::optional(self.car.as_ref())),
            _ => None,
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn instant(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

fn car(brand: &str, model: &str, year: i32) -> Option<Car> {
    Some(Car {
        model: model.to_string(),
        year,
        brand: Brand {
            name: brand.to_string(),
        },
    })
}

pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            name: "Alice".into(),
            vip: true,
            money: 150,
            visits: 10,
            balance: Decimal::new(1250, 2),
            rating: 4.5,
            score: Some(0.75),
            born_date: Some(date(1990, 5, 20)),
            last_seen: instant("2024-03-01T10:00:00+02:00"),
            car: car("Volvo", "V70", 2015),
        },
        Customer {
            name: "Bob".into(),
            vip: false,
            money: 200,
            visits: 3_000_000_000,
            balance: Decimal::ZERO,
            rating: 3.0,
            score: None,
            born_date: Some(date(1985, 11, 2)),
            last_seen: instant("2024-03-01T09:00:00Z"),
            car: car("Audi", "A4", 2019),
        },
        Customer {
            name: "Charlie".into(),
            vip: false,
            money: 50,
            visits: 0,
            balance: Decimal::new(9999, 2),
            rating: 5.0,
            score: Some(0.5),
            born_date: None,
            last_seen: instant("2024-02-29T23:30:00-05:00"),
            car: None,
        },
        Customer {
            name: "Dave".into(),
            vip: true,
            money: 300,
            visits: 42,
            balance: Decimal::new(1000, 0),
            rating: 2.5,
            score: Some(0.9),
            born_date: Some(date(1990, 1, 15)),
            last_seen: instant("2023-12-31T23:00:00Z"),
            car: car("Volvo", "XC90", 2021),
        },
    ]
}

/// Builder with one native accessor per scalar kind
pub fn builder() -> RegistryBuilder<Customer> {
    let mut builder = RegistryBuilder::new();
    builder
        .register("name", |c: &Customer| c.name.clone())
        .register("vip", |c: &Customer| c.vip)
        .register("money", |c: &Customer| c.money)
        .register("visits", |c: &Customer| c.visits)
        .register("balance", |c: &Customer| c.balance)
        .register("rating", |c: &Customer| c.rating)
        .register("score", |c: &Customer| c.score)
        .register("bornDate", |c: &Customer| c.born_date)
        .register("lastSeen", |c: &Customer| c.last_seen);
    builder
}

pub fn names<'a>(items: impl IntoIterator<Item = &'a Customer>) -> Vec<String> {
    items.into_iter().map(|c| c.name.clone()).collect()
}

pub fn owned_names(items: impl IntoIterator<Item = Customer>) -> Vec<String> {
    items.into_iter().map(|c| c.name).collect()
}

/// Builds a registry with the given filters and returns surviving names
pub fn filter_with(config: EngineConfig, filters: Vec<FilterCriterion>) -> FilterResult<Vec<String>> {
    let mut builder = builder();
    builder.with_config(config).set_filters(filters);
    let registry = builder.build()?;
    filter_registry(&registry)
}

pub fn filter(filters: Vec<FilterCriterion>) -> FilterResult<Vec<String>> {
    filter_with(EngineConfig::default(), filters)
}

pub fn filter_registry(registry: &Registry<Customer>) -> FilterResult<Vec<String>> {
    Ok(owned_names(FilterEngine::apply(customers(), registry)?))
}
