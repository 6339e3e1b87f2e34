//! Route table.
//!
//! Maps navigation paths to views. Paths match exactly, ignoring one trailing
//! slash and any query string or fragment. Anything else lands on
//! [`View::NotFound`].

use std::fmt;

/// A screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Sign-in form.
    Login,
    /// Account registration form.
    Register,
    /// Current account.
    Profile,
    /// Bus companies.
    Companies,
    /// Buses.
    Buses,
    /// Routes between cities.
    Routes,
    /// Departures.
    Schedules,
    /// Reservations of the current account.
    Reservations,
    /// Support chat.
    Chat,
    /// Fallback for unmatched paths.
    NotFound,
}

impl View {
    /// Heading shown for the view.
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Profile => "Profile",
            Self::Companies => "Companies",
            Self::Buses => "Buses",
            Self::Routes => "Routes",
            Self::Schedules => "Schedules",
            Self::Reservations => "Reservations",
            Self::Chat => "Chat",
            Self::NotFound => "Page not found",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Static `(path, view)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [(&'static str, View)],
}

const STANDARD: &[(&str, View)] = &[
    ("/login", View::Login),
    ("/register", View::Register),
    ("/profile", View::Profile),
    ("/companies", View::Companies),
    ("/buses", View::Buses),
    ("/routes", View::Routes),
    ("/schedules", View::Schedules),
    ("/reservations", View::Reservations),
    ("/chat", View::Chat),
];

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    /// The client's routes.
    pub fn standard() -> Self {
        Self { routes: STANDARD }
    }

    /// Registered pairs, in declaration order.
    pub fn routes(&self) -> &'static [(&'static str, View)] {
        self.routes
    }

    /// View for `path`.
    pub fn resolve(&self, path: &str) -> View {
        let path = normalize(path);
        self.routes
            .iter()
            .find(|(route, _)| *route == path)
            .map_or(View::NotFound, |(_, view)| *view)
    }
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_resolves_to_its_view() {
        let table = RouteTable::standard();
        for (path, view) in table.routes() {
            assert_eq!(table.resolve(path), *view);
        }
        assert_eq!(table.routes().len(), 9);
    }

    #[test]
    fn unmatched_path_is_not_found() {
        let table = RouteTable::standard();

        assert_eq!(table.resolve("/nope"), View::NotFound);
        assert_eq!(table.resolve("/"), View::NotFound);
        assert_eq!(table.resolve(""), View::NotFound);
        assert_eq!(table.resolve("/companies/5"), View::NotFound);
        assert_eq!(table.resolve("/Login"), View::NotFound);
        assert_eq!(View::NotFound.title(), "Page not found");
    }

    #[test]
    fn trailing_slash_and_query_ignored() {
        let table = RouteTable::standard();

        assert_eq!(table.resolve("/buses/"), View::Buses);
        assert_eq!(table.resolve("/schedules?route=3"), View::Schedules);
        assert_eq!(table.resolve("/chat/#bottom"), View::Chat);
        assert_eq!(table.resolve("/buses//"), View::NotFound);
    }
}
