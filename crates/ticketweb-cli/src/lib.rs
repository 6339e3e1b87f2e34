//! Command-line front end for the bus-ticketing client.
//!
//! [`run`] executes one [`Action`] against a [`Runtime`], writing text to any
//! output. The binary wires it to the HTTP transport, the token file and
//! stdout; tests wire it to the recording transport and a buffer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod args;
mod error;
pub mod render;
pub mod views;

use std::io::Write;

pub use args::{Action, Args, Kind, PayWith};
pub use error::CliError;
use ticketweb_app::{RouteTable, Runtime};
use ticketweb_client::{TokenStore, Transport};
use ticketweb_proto::{
    AiSuggestRequest, Amount, ChangePasswordRequest, NewBus, NewChatMessage, NewCompany,
    NewPayment, NewReservation, QueryParams, RegisterRequest,
};

/// Execute `action`.
///
/// Login saves the issued token to `tokens`; logout clears it. Nothing else
/// touches the token store.
pub async fn run<T: Transport, W: Write>(
    runtime: &mut Runtime<T>,
    tokens: &dyn TokenStore,
    action: Action,
    out: &mut W,
) -> Result<(), CliError> {
    match action {
        Action::Open { path, filters } => {
            let query = filters.into_iter().fold(QueryParams::new(), |q, (k, v)| q.with(k, v));
            let screen = views::open(runtime, &RouteTable::standard(), &path, &query).await?;
            render::screen(out, &screen)?;
        },
        Action::Login { username, password } => {
            let snapshot = runtime.login(&username, &password).await?;
            if let Some(token) = &snapshot.token {
                tokens.save(token)?;
            }
            let name = snapshot.user.as_ref().map_or(username, |u| u.display_name());
            writeln!(out, "Signed in as {name}")?;
        },
        Action::Logout => {
            runtime.logout();
            tokens.clear()?;
            writeln!(out, "Signed out")?;
        },
        Action::Register { username, email, password, first_name, last_name } => {
            let request = RegisterRequest {
                username,
                confirm_password: password.clone(),
                password,
                email,
                first_name,
                last_name,
                role: None,
            };
            let user = runtime.register(&request).await?;
            writeln!(out, "Registered {}", user.username)?;
        },
        Action::Passwd { current, new } => {
            runtime.change_password(&ChangePasswordRequest::new(current, new)).await?;
            writeln!(out, "Password changed")?;
        },
        Action::Show { kind, id } => show(runtime, kind, id, out).await?,
        Action::Seats { schedule } => {
            let seats = runtime.client().seats(schedule).await?;
            for seat in &seats {
                render::seat(out, seat)?;
            }
        },
        Action::AddCompany { name, address, phone, email, description } => {
            let company = NewCompany { name, address, phone, email, description };
            render::company(out, &runtime.client().add_company(&company).await?)?;
        },
        Action::AddBus { company, license_plate, capacity } => {
            let bus = NewBus { company, license_plate, capacity, status: None };
            render::bus(out, &runtime.client().add_bus(&bus).await?)?;
        },
        Action::Book { schedule, seats, note, promo } => {
            let request = NewReservation { schedule, seats, note, promotion_code: promo };
            render::reservation(out, &runtime.book(&request).await?)?;
        },
        Action::Pay { reservation, amount, method } => {
            let payment = NewPayment {
                reservation,
                amount: Amount(amount),
                payment_method: method.into(),
            };
            render::payment(out, &runtime.client().create_payment(&payment).await?)?;
        },
        Action::Promo { code } => {
            render::json(out, &runtime.client().check_promotion(&code).await?)?;
        },
        Action::Promotions => {
            let snapshot = runtime.load_promotions().await?;
            render::list(out, &snapshot.promotions, render::promotion)?;
        },
        Action::Notifications => {
            let snapshot = runtime.load_notifications().await?;
            render::list(out, &snapshot.notifications, render::notification)?;
        },
        Action::Say { receiver, message } => {
            let snapshot = runtime.send_chat(&NewChatMessage { receiver, message }).await?;
            for message in &snapshot.chat_messages {
                render::chat_message(out, message)?;
            }
        },
        Action::Suggest { message } => {
            let reply = runtime.client().ai_suggest(&AiSuggestRequest { message }).await?;
            render::json(out, &reply)?;
        },
        Action::Routes => render::route_table(out, &RouteTable::standard())?,
    }
    Ok(())
}

async fn show<T: Transport, W: Write>(
    runtime: &Runtime<T>,
    kind: Kind,
    id: u64,
    out: &mut W,
) -> Result<(), CliError> {
    let client = runtime.client();
    match kind {
        Kind::Company => render::company(out, &client.company(id).await?)?,
        Kind::Bus => render::bus(out, &client.bus(id).await?)?,
        Kind::Route => render::route(out, &client.route(id).await?)?,
        Kind::Schedule => render::schedule(out, &client.schedule(id).await?)?,
        Kind::Reservation => render::reservation(out, &client.reservation(id).await?)?,
        Kind::Payment => render::payment(out, &client.payment(id).await?)?,
    }
    Ok(())
}
