//! Ticketweb wire types
//!
//! Typed shapes of the JSON documents exchanged with the bus-ticketing REST
//! API: the entities the server returns, the payloads the client sends, and the
//! list envelope used by paginated collections.
//!
//! # Decoding policy
//!
//! The server is an external collaborator and its serializers evolve
//! independently of this crate. Decoding is therefore lenient:
//!
//! - Every entity field except `id` is optional or defaulted, so minimal
//!   objects such as `{"id": 9}` decode.
//! - Relations arrive either as a bare id or as an embedded object
//!   ([`Related`]).
//! - Unknown status strings decode to an `Unknown` variant.
//! - Decimal amounts are kept as the server renders them (strings).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod entities;
mod page;
mod related;
pub mod request;

pub use entities::{
    Amount, Bus, BusStatus, ChatMessage, Company, DiscountType, Entity, Notification, Payment,
    PaymentMethod, PaymentStatus, Promotion, Reservation, ReservationDetail, ReservationStatus,
    Role, Route, Schedule, ScheduleStatus, Seat, SeatStatus, User,
};
pub use page::ListResponse;
pub use related::Related;
pub use request::{
    AiSuggestRequest, ChangePasswordRequest, LoginRequest, NewBus, NewChatMessage, NewCompany,
    NewPayment, NewReservation, ProfileUpdate, QueryParams, RegisterRequest, TokenResponse,
};

/// Server-assigned primary key.
pub type EntityId = u64;
