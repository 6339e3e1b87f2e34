//! Reservations, payments and promotions.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{Amount, Schedule, Seat, User};
use crate::{EntityId, Related};

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Awaiting payment.
    #[default]
    Pending,
    /// Paid and confirmed.
    Confirmed,
    /// Cancelled by the user or operator.
    Cancelled,
    /// Trip taken.
    Completed,
    /// Status not known to this client.
    #[serde(other)]
    Unknown,
}

/// A booking of one or more seats on a schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reservation {
    /// Primary key.
    pub id: EntityId,
    /// Booking owner.
    pub user: Option<Related<User>>,
    /// Trip booked.
    pub schedule: Option<Related<Schedule>>,
    /// Human-facing booking reference, unique.
    pub booking_code: Option<String>,
    /// When the booking was made.
    pub booking_date: Option<DateTime<FixedOffset>>,
    /// Total charged.
    pub total_amount: Option<Amount>,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Free-text note from the passenger.
    pub note: Option<String>,
    /// Booked seats with passenger details.
    pub details: Vec<ReservationDetail>,
}

/// One booked seat within a reservation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationDetail {
    /// Primary key.
    pub id: EntityId,
    /// Seat held.
    pub seat: Option<Related<Seat>>,
    /// Traveller name, if different from the booking owner.
    pub passenger_name: Option<String>,
    /// Traveller phone.
    pub passenger_phone: Option<String>,
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the counter.
    Cash,
    /// Bank transfer.
    #[default]
    BankTransfer,
    /// MoMo e-wallet.
    Momo,
    /// Card payment.
    CreditCard,
    /// Method not known to this client.
    #[serde(other)]
    Unknown,
}

/// Settlement status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Initiated, not settled.
    #[default]
    Pending,
    /// Settled.
    Paid,
    /// Rejected by the provider.
    Failed,
    /// Returned to the payer.
    Refunded,
    /// Status not known to this client.
    #[serde(other)]
    Unknown,
}

/// A payment against a reservation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    /// Primary key.
    pub id: EntityId,
    /// Reservation paid for.
    pub reservation: Option<Related<Reservation>>,
    /// Amount paid.
    pub amount: Option<Amount>,
    /// Payment channel.
    pub payment_method: PaymentMethod,
    /// When the payment was recorded.
    pub payment_time: Option<DateTime<FixedOffset>>,
    /// Settlement status.
    pub status: PaymentStatus,
}

/// How a promotion's discount value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage of the total.
    #[default]
    Percent,
    /// Fixed amount off.
    Amount,
    /// Type not known to this client.
    #[serde(other)]
    Unknown,
}

/// A discount code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Promotion {
    /// Primary key.
    pub id: EntityId,
    /// Code entered at checkout, unique.
    pub code: String,
    /// Rich-text description.
    pub description: Option<String>,
    /// How `discount_value` applies.
    pub discount_type: DiscountType,
    /// Percentage or amount, depending on `discount_type`.
    pub discount_value: Option<Amount>,
    /// First moment the code is valid.
    pub start_date: Option<DateTime<FixedOffset>>,
    /// Last moment the code is valid.
    pub end_date: Option<DateTime<FixedOffset>>,
    /// Minimum order total.
    pub min_amount: Option<Amount>,
    /// Maximum redemptions. `None` means unlimited.
    pub usage_limit: Option<u32>,
}
