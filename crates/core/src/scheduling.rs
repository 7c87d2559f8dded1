//! # Slot scheduling
//!
//! Appointments occupy the half-open interval `[start, start + duration)` on
//! a resource's calendar. The resource is either the lawyer or the lawyer's
//! company, depending on the configured [`BookingScope`]. Two intervals
//! conflict when `a.start < b.end && a.end > b.start`; intervals that only
//! touch at an endpoint do not conflict.
//!
//! Only [`AppointmentStatus::BLOCKING`] statuses hold a slot. Cancelled and
//! completed appointments never take part in the check.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{LexError, LexResult},
    models::appointment::{Appointment, AppointmentStatus},
};

pub const MIN_DURATION_MINUTES: i32 = 15;
pub const MAX_DURATION_MINUTES: i32 = 480;
pub const DEFAULT_DURATION_MINUTES: i32 = 60;

pub const SLOT_TAKEN_MESSAGE: &str = "El horario ya está ocupado, por favor elija otro";

pub fn validate_duration(minutes: i32) -> LexResult<()> {
    if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(LexError::Validation(format!(
            "La duración debe estar entre {} y {} minutos",
            MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
        )))
    }
}

/// A half-open time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    /// Builds a slot from a start and a duration, enforcing the duration bounds.
    pub fn new(start: DateTime<Utc>, duration_minutes: i32) -> LexResult<Self> {
        validate_duration(duration_minutes)?;
        Ok(Self {
            start,
            end: start + Duration::minutes(i64::from(duration_minutes)),
        })
    }

    pub fn from_bounds(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains(&self, other: &Slot) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Anything that occupies a slot with a status.
pub trait Occupancy {
    fn slot(&self) -> Slot;
    fn status(&self) -> AppointmentStatus;
    fn id(&self) -> Uuid;
}

impl Occupancy for Appointment {
    fn slot(&self) -> Slot {
        Slot::from_bounds(self.starts_at, self.ends_at)
    }

    fn status(&self) -> AppointmentStatus {
        self.status
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Returns the first blocking occupancy that overlaps `proposed`.
///
/// `ignore` excludes one id, so an appointment being rescheduled does not
/// collide with itself.
pub fn find_conflict<'a, T, I>(proposed: &Slot, existing: I, ignore: Option<Uuid>) -> Option<&'a T>
where
    T: Occupancy + 'a,
    I: IntoIterator<Item = &'a T>,
{
    existing.into_iter().find(|occupied| {
        occupied.status().blocks_slot()
            && Some(occupied.id()) != ignore
            && occupied.slot().overlaps(proposed)
    })
}

pub fn has_conflict<'a, T, I>(proposed: &Slot, existing: I) -> bool
where
    T: Occupancy + 'a,
    I: IntoIterator<Item = &'a T>,
{
    find_conflict(proposed, existing, None).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingScope {
    #[default]
    Lawyer,
    Company,
}

impl FromStr for BookingScope {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lawyer" => Ok(BookingScope::Lawyer),
            "company" => Ok(BookingScope::Company),
            other => Err(LexError::Validation(format!("Unknown booking scope: {}", other))),
        }
    }
}

impl BookingScope {
    /// Lawyers without a company fall back to their own calendar.
    pub fn resource_for(&self, lawyer_id: Uuid, company_id: Option<Uuid>) -> ResourceKey {
        match (self, company_id) {
            (BookingScope::Company, Some(company_id)) => ResourceKey::Company(company_id),
            _ => ResourceKey::Lawyer(lawyer_id),
        }
    }
}

/// The calendar an appointment is booked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Lawyer(Uuid),
    Company(Uuid),
}

impl ResourceKey {
    pub fn id(&self) -> Uuid {
        match self {
            ResourceKey::Lawyer(id) | ResourceKey::Company(id) => *id,
        }
    }

    pub fn matches(&self, lawyer_id: Uuid, company_id: Option<Uuid>) -> bool {
        match self {
            ResourceKey::Lawyer(id) => *id == lawyer_id,
            ResourceKey::Company(id) => Some(*id) == company_id,
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::Lawyer(id) => write!(f, "lawyer:{}", id),
            ResourceKey::Company(id) => write!(f, "company:{}", id),
        }
    }
}

/// Start times on a `step_minutes` grid inside `window` where a
/// `duration_minutes` appointment fits without conflicting.
pub fn free_slots<'a, T, I>(
    window: &Slot,
    step_minutes: i64,
    duration_minutes: i32,
    existing: I,
    not_before: Option<DateTime<Utc>>,
) -> LexResult<Vec<Slot>>
where
    T: Occupancy + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if step_minutes <= 0 {
        return Err(LexError::Validation("Slot step must be positive".to_string()));
    }
    let blocking: Vec<Slot> = existing
        .into_iter()
        .filter(|o| o.status().blocks_slot())
        .map(Occupancy::slot)
        .collect();

    let mut slots = Vec::new();
    let mut start = window.start;
    while start < window.end {
        let candidate = Slot::new(start, duration_minutes)?;
        if !window.contains(&candidate) {
            break;
        }
        let in_future = not_before.is_none_or(|now| candidate.start >= now);
        if in_future && !blocking.iter().any(|b| b.overlaps(&candidate)) {
            slots.push(candidate);
        }
        start += Duration::minutes(step_minutes);
    }
    Ok(slots)
}
