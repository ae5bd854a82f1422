//! Web app bootstrap.
//!
//! [`create_app`] builds the router and the store, binds them together and
//! hands back a router ready to serve.

/// Page shell around the root node
pub mod root;
/// Navigable routes and the router/store binding
pub mod router;
/// Route-aware application state
pub mod store;

use axum::Router;
use serde_json::Value;
use tower_http::trace::TraceLayer;

pub use router::{create_router, sync};
pub use store::{create_store, AppStore};

/// A constructed web application.
pub struct App {
    /// Ready-to-serve router with the store attached
    pub app: Router,
    /// The unbound navigation routes
    pub router: Router<AppStore>,
    pub store: AppStore,
}

pub fn create_app(init_data: Value) -> App {
    let router = create_router();
    let store = create_store(init_data);

    let app = sync(&store, router.clone())
        .layer(TraceLayer::new_for_http())
        .with_state(store.clone());

    App { app, router, store }
}
