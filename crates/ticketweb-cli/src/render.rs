//! Plain-text rendering.
//!
//! One line per record, written to any [`Write`] so tests can capture it.

use std::io::{self, Write};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;
use ticketweb_app::{RouteTable, Snapshot, View};
use ticketweb_proto::{
    Bus, ChatMessage, Company, Notification, Payment, Promotion, Related, Reservation, Route,
    Schedule, Seat, User,
};

use crate::views::Screen;

fn when(time: Option<&DateTime<FixedOffset>>) -> String {
    time.map_or_else(|| "?".to_owned(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

/// Wire name of a status enum, e.g. `bank_transfer`.
fn wire_name<S: Serialize>(value: &S) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(name)) => name,
        _ => "?".to_owned(),
    }
}

fn related<T>(value: Option<&Related<T>>, label: impl Fn(&T) -> String) -> String {
    match value {
        Some(Related::Object(object)) => label(object),
        Some(Related::Id(id)) => format!("#{id}"),
        None => "?".to_owned(),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Heading line.
pub fn heading<W: Write>(out: &mut W, view: View) -> io::Result<()> {
    writeln!(out, "== {} ==", view.title())
}

/// One company.
pub fn company<W: Write>(out: &mut W, company: &Company) -> io::Result<()> {
    writeln!(
        out,
        "#{} {}  phone {}  email {}",
        company.id,
        company.name,
        or_dash(company.phone.as_deref()),
        or_dash(company.email.as_deref())
    )
}

/// One bus.
pub fn bus<W: Write>(out: &mut W, bus: &Bus) -> io::Result<()> {
    let capacity = bus.capacity.map_or_else(|| "?".to_owned(), |c| c.to_string());
    writeln!(
        out,
        "#{} {}  {} seats  {}  [{}]",
        bus.id,
        bus.license_plate,
        capacity,
        related(bus.company.as_ref(), |c| c.name.clone()),
        wire_name(&bus.status)
    )
}

/// One route.
pub fn route<W: Write>(out: &mut W, route: &Route) -> io::Result<()> {
    let distance = route.distance_km.as_ref().map_or("?", |d| d.as_str());
    let minutes = route.estimated_time_minutes.map_or_else(|| "?".to_owned(), |m| m.to_string());
    writeln!(out, "#{} {}  {distance} km  {minutes} min", route.id, route.label())
}

/// One schedule.
pub fn schedule<W: Write>(out: &mut W, schedule: &Schedule) -> io::Result<()> {
    writeln!(
        out,
        "#{} {}  departs {}  arrives {}  price {}  bus {}  [{}]",
        schedule.id,
        related(schedule.route.as_ref(), Route::label),
        when(schedule.departure_time.as_ref()),
        when(schedule.arrival_time.as_ref()),
        schedule.price.as_ref().map_or("?", |p| p.as_str()),
        related(schedule.bus.as_ref(), |b| b.license_plate.clone()),
        wire_name(&schedule.status)
    )
}

/// One seat.
pub fn seat<W: Write>(out: &mut W, seat: &Seat) -> io::Result<()> {
    writeln!(out, "seat {} (#{})  [{}]", seat.seat_number, seat.id, wire_name(&seat.status))
}

/// One reservation.
pub fn reservation<W: Write>(out: &mut W, reservation: &Reservation) -> io::Result<()> {
    writeln!(
        out,
        "#{} {}  schedule {}  booked {}  total {}  {} seat(s)  [{}]",
        reservation.id,
        or_dash(reservation.booking_code.as_deref()),
        related(reservation.schedule.as_ref(), |s| format!("#{}", s.id)),
        when(reservation.booking_date.as_ref()),
        reservation.total_amount.as_ref().map_or("?", |a| a.as_str()),
        reservation.details.len(),
        wire_name(&reservation.status)
    )
}

/// One payment.
pub fn payment<W: Write>(out: &mut W, payment: &Payment) -> io::Result<()> {
    writeln!(
        out,
        "#{} reservation {}  {} via {}  at {}  [{}]",
        payment.id,
        related(payment.reservation.as_ref(), |r| format!("#{}", r.id)),
        payment.amount.as_ref().map_or("?", |a| a.as_str()),
        wire_name(&payment.payment_method),
        when(payment.payment_time.as_ref()),
        wire_name(&payment.status)
    )
}

/// One promotion.
pub fn promotion<W: Write>(out: &mut W, promotion: &Promotion) -> io::Result<()> {
    writeln!(
        out,
        "{}  {} {}  until {}",
        promotion.code,
        wire_name(&promotion.discount_type),
        promotion.discount_value.as_ref().map_or("?", |v| v.as_str()),
        when(promotion.end_date.as_ref())
    )
}

/// One notification.
pub fn notification<W: Write>(out: &mut W, notification: &Notification) -> io::Result<()> {
    let marker = if notification.is_read { ' ' } else { '*' };
    writeln!(out, "{marker} {}  {}", notification.title, or_dash(notification.body.as_deref()))
}

/// One chat message.
pub fn chat_message<W: Write>(out: &mut W, message: &ChatMessage) -> io::Result<()> {
    writeln!(
        out,
        "[{}] {}: {}",
        when(message.timestamp.as_ref()),
        related(message.sender.as_ref(), User::display_name),
        message.message
    )
}

/// Account summary.
pub fn user<W: Write>(out: &mut W, user: &User) -> io::Result<()> {
    let email = or_dash(Some(user.email.as_str()));
    writeln!(out, "{} ({})  email {email}", user.display_name(), user.username)
}

/// Pretty-printed JSON for replies without a fixed shape.
pub fn json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(out, "{text}")
}

/// The route table, one `path  view` pair per line.
pub fn route_table<W: Write>(out: &mut W, table: &RouteTable) -> io::Result<()> {
    for (path, view) in table.routes() {
        writeln!(out, "{path:<14}{}", view.title())?;
    }
    writeln!(out, "{:<14}{}", "*", View::NotFound.title())
}

/// Each item on its own line, or `(none)`.
pub fn list<W: Write, T>(
    out: &mut W,
    items: &[T],
    mut line: impl FnMut(&mut W, &T) -> io::Result<()>,
) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "(none)");
    }
    items.iter().try_for_each(|item| line(out, item))
}

fn cached<W: Write>(out: &mut W, view: View, snapshot: &Snapshot) -> io::Result<()> {
    match view {
        View::Profile => match &snapshot.user {
            Some(account) => user(out, account),
            None => writeln!(out, "Not signed in"),
        },
        View::Companies => list(out, &snapshot.companies, company),
        View::Buses => list(out, &snapshot.buses, bus),
        View::Schedules => list(out, &snapshot.schedules, schedule),
        View::Reservations => list(out, &snapshot.reservations, reservation),
        View::Chat => list(out, &snapshot.chat_messages, chat_message),
        View::Login | View::Register | View::Routes | View::NotFound => Ok(()),
    }
}

/// Render an opened view.
pub fn screen<W: Write>(out: &mut W, screen: &Screen) -> io::Result<()> {
    match screen {
        Screen::Form(view) => {
            heading(out, *view)?;
            writeln!(out, "Use `ticketweb {}` to submit this form", view.title().to_lowercase())
        },
        Screen::Cached(view, snapshot) => {
            heading(out, *view)?;
            cached(out, *view, snapshot)
        },
        Screen::Routes(routes) => {
            heading(out, View::Routes)?;
            list(out, routes, route)
        },
        Screen::NotFound => writeln!(out, "{}", View::NotFound.title()),
    }
}
