//! Companies, buses, routes, schedules and seats.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Amount;
use crate::{EntityId, Related};

/// Bus operator ("nha xe").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    /// Primary key.
    pub id: EntityId,
    /// Trading name.
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Rich-text description.
    pub description: Option<String>,
    /// Hosted logo URL.
    pub image_url: Option<String>,
    /// Soft-delete flag. `None` if the server omitted it.
    pub active: Option<bool>,
}

/// Operational status of a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusStatus {
    /// In service.
    #[default]
    Active,
    /// Temporarily out of service.
    Maintenance,
    /// Permanently out of service.
    Retired,
    /// Status not known to this client.
    #[serde(other)]
    Unknown,
}

/// A vehicle owned by a company.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bus {
    /// Primary key.
    pub id: EntityId,
    /// Owning company.
    pub company: Option<Related<Company>>,
    /// Registration plate, unique across the platform.
    pub license_plate: String,
    /// Seat count.
    pub capacity: Option<u16>,
    /// Operational status.
    pub status: BusStatus,
    /// Hosted photo URL.
    pub image_url: Option<String>,
}

/// An origin/destination pair served by schedules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    /// Primary key.
    pub id: EntityId,
    /// Departure city or station.
    pub start_location: String,
    /// Arrival city or station.
    pub end_location: String,
    /// Length in kilometres.
    pub distance_km: Option<Amount>,
    /// Typical travel time.
    pub estimated_time_minutes: Option<u32>,
}

impl Route {
    /// Short "start -> end" label.
    pub fn label(&self) -> String {
        format!("{} -> {}", self.start_location, self.end_location)
    }
}

/// Lifecycle status of a scheduled trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Planned and bookable.
    #[default]
    Scheduled,
    /// Called off.
    Cancelled,
    /// Trip finished.
    Completed,
    /// Running late.
    Delayed,
    /// Status not known to this client.
    #[serde(other)]
    Unknown,
}

/// A bus running a route at a given time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    /// Primary key.
    pub id: EntityId,
    /// Assigned bus.
    pub bus: Option<Related<Bus>>,
    /// Route travelled.
    pub route: Option<Related<Route>>,
    /// Departure time.
    pub departure_time: Option<DateTime<FixedOffset>>,
    /// Arrival time.
    pub arrival_time: Option<DateTime<FixedOffset>>,
    /// Ticket price per seat.
    pub price: Option<Amount>,
    /// Lifecycle status.
    pub status: ScheduleStatus,
}

/// Booking status of a single seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Free to book.
    #[default]
    Available,
    /// Held by a pending reservation.
    Reserved,
    /// Paid for.
    Sold,
    /// Status not known to this client.
    #[serde(other)]
    Unknown,
}

/// A seat on a scheduled trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Seat {
    /// Primary key.
    pub id: EntityId,
    /// Seat number, unique within the schedule.
    pub seat_number: u16,
    /// Booking status.
    pub status: SeatStatus,
}
