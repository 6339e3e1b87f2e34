//! Opening views.
//!
//! Resolves a path through the route table and loads whatever the view
//! shows. Cached views go through the runtime so the store is updated; the
//! routes list is shown without being cached.

use std::sync::Arc;

use ticketweb_app::{RouteTable, Runtime, Snapshot, View};
use ticketweb_client::{ClientError, Transport};
use ticketweb_proto::{QueryParams, Route};

/// Loaded content of a view, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Form view with nothing to load.
    Form(View),
    /// View rendered from the snapshot.
    Cached(View, Arc<Snapshot>),
    /// Routes list.
    Routes(Vec<Route>),
    /// Unmatched path.
    NotFound,
}

/// Resolve `path` and load its view.
///
/// `query` filters the bus and schedule lists; other views ignore it. The
/// profile view makes no call when there is no credential.
pub async fn open<T: Transport>(
    runtime: &mut Runtime<T>,
    table: &RouteTable,
    path: &str,
    query: &QueryParams,
) -> Result<Screen, ClientError> {
    let view = table.resolve(path);
    tracing::debug!(path, view = view.title(), "open");

    let screen = match view {
        View::Login | View::Register => Screen::Form(view),
        View::Profile if runtime.client().config().token().is_none() => {
            Screen::Cached(view, runtime.snapshot())
        },
        View::Profile => Screen::Cached(view, runtime.refresh_profile().await?),
        View::Companies => Screen::Cached(view, runtime.load_companies().await?),
        View::Buses => Screen::Cached(view, runtime.load_buses(query).await?),
        View::Schedules => Screen::Cached(view, runtime.load_schedules(query).await?),
        View::Reservations => Screen::Cached(view, runtime.load_reservations().await?),
        View::Chat => Screen::Cached(view, runtime.load_chat().await?),
        View::Routes => Screen::Routes(runtime.client().routes().await?),
        View::NotFound => Screen::NotFound,
    };
    Ok(screen)
}
