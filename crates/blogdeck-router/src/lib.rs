//! Routing for the blog applications.
//!
//! Routes carry static metadata ([`RouteMeta`]) saying whether they need a
//! signed-in user or an administrator. Before every navigation the
//! [`Router`] resolves the target, asks the pure [`decide`] guard what to do
//! with the current [`Session`](blogdeck_session::Session), and then emits
//! notices and redirects accordingly.
//!
//! The site and the console apply different rules; both are kept and
//! selected by [`Flavor`](blogdeck_client::Flavor).

mod guard;
mod route;
mod router;
pub mod routes;

pub use guard::{
    Decision, DecisionKind, HOME_PATH, LOGIN_REQUIRED_MESSAGE, NO_PERMISSION_MESSAGE, Navigation,
    decide,
};
pub use route::{ResolvedRoute, Route, RouteMeta, RouteTable, normalize_path};
pub use router::Router;
