//! Aggregates derived from a snapshot of every reservation: passengers and
//! revenue per route, gender split, age groups and the most popular routes.
//!
//! All functions are pure over `&[Reservation]`. An empty snapshot yields
//! empty aggregates; deciding how to tell the user "no data" is left to the
//! caller.

use std::collections::HashMap;
use std::fmt;

use crate::models::{Gender, Reservation, Route};

/// How many routes the report ranks.
pub const TOP_ROUTE_COUNT: usize = 3;

/// Passenger count and revenue for one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStat {
    pub route: Route,
    pub passengers: usize,
    pub total_fare: f64,
}

/// Fixed age groups used by the histogram. Upper bounds are inclusive, so a
/// passenger aged exactly 12 lands in `Child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    /// `[0, 12]`
    Child,
    /// `(12, 18]`
    Teen,
    /// `(18, 30]`
    YoungAdult,
    /// `(30, 50]`
    Adult,
    /// `(50, 100]`
    Senior,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Child,
        AgeBucket::Teen,
        AgeBucket::YoungAdult,
        AgeBucket::Adult,
        AgeBucket::Senior,
    ];

    /// Bucket for `age`. Ages below 0 clamp into `Child` and ages above 100
    /// clamp into `Senior` rather than being dropped.
    pub fn for_age(age: i64) -> Self {
        match age {
            i64::MIN..=12 => AgeBucket::Child,
            13..=18 => AgeBucket::Teen,
            19..=30 => AgeBucket::YoungAdult,
            31..=50 => AgeBucket::Adult,
            _ => AgeBucket::Senior,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Child => "0-12",
            AgeBucket::Teen => "13-18",
            AgeBucket::YoungAdult => "19-30",
            AgeBucket::Adult => "31-50",
            AgeBucket::Senior => "51+",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Group by exact `(source, destination)` equality, keeping first-seen order.
pub fn route_summary(snapshot: &[Reservation]) -> Vec<RouteStat> {
    let mut index: HashMap<Route, usize> = HashMap::new();
    let mut stats: Vec<RouteStat> = Vec::new();

    for reservation in snapshot {
        let route = reservation.route();
        match index.get(&route) {
            Some(&slot) => {
                stats[slot].passengers += 1;
                stats[slot].total_fare += reservation.fare;
            }
            None => {
                index.insert(route.clone(), stats.len());
                stats.push(RouteStat {
                    route,
                    passengers: 1,
                    total_fare: reservation.fare,
                });
            }
        }
    }

    stats
}

/// Count per gender, only for genders that actually occur, first-seen order.
pub fn gender_distribution(snapshot: &[Reservation]) -> Vec<(Gender, usize)> {
    let mut counts: Vec<(Gender, usize)> = Vec::new();
    for reservation in snapshot {
        match counts
            .iter_mut()
            .find(|(gender, _)| *gender == reservation.gender)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((reservation.gender, 1)),
        }
    }
    counts
}

/// Histogram over [`AgeBucket::ALL`]. Every bucket is listed (zeros included)
/// unless the snapshot itself is empty.
pub fn age_histogram(snapshot: &[Reservation]) -> Vec<(AgeBucket, usize)> {
    if snapshot.is_empty() {
        return Vec::new();
    }

    let mut histogram: Vec<(AgeBucket, usize)> =
        AgeBucket::ALL.iter().map(|bucket| (*bucket, 0)).collect();
    for reservation in snapshot {
        let bucket = AgeBucket::for_age(reservation.age);
        if let Some((_, count)) = histogram.iter_mut().find(|(b, _)| *b == bucket) {
            *count += 1;
        }
    }
    histogram
}

/// Routes ranked by passenger count, descending. The sort is stable, so ties
/// keep first-seen order.
pub fn top_routes(summary: &[RouteStat], limit: usize) -> Vec<RouteStat> {
    let mut ranked = summary.to_vec();
    ranked.sort_by(|a, b| b.passengers.cmp(&a.passengers));
    ranked.truncate(limit);
    ranked
}

/// Everything the analytics screen shows, computed from one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsReport {
    pub routes: Vec<RouteStat>,
    pub genders: Vec<(Gender, usize)>,
    pub ages: Vec<(AgeBucket, usize)>,
    pub top_routes: Vec<RouteStat>,
    pub total_passengers: usize,
    pub total_revenue: f64,
}

impl AnalyticsReport {
    pub fn from_snapshot(snapshot: &[Reservation]) -> Self {
        let routes = route_summary(snapshot);
        let top_routes = top_routes(&routes, TOP_ROUTE_COUNT);
        Self {
            genders: gender_distribution(snapshot),
            ages: age_histogram(snapshot),
            total_passengers: snapshot.len(),
            total_revenue: routes.iter().map(|stat| stat.total_fare).sum(),
            routes,
            top_routes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_passengers == 0
    }
}
