use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{Html, Json, Response},
    routing::get,
    Router,
};

use crate::web::root;
use crate::web::store::{AppStore, StoreSnapshot};

/// Router factory: the navigable pages of the web app plus the raw state.
pub fn create_router() -> Router<AppStore> {
    Router::new()
        .route("/", get(render_root))
        .route("/reminders", get(render_root))
        .route("/link/:token", get(render_root))
        .route("/state", get(store_state))
}

/// Binds router and store: every navigation to a known route is committed
/// to the store before the page renders, so the rendered root and any
/// store subscriber see the same location. Unmatched paths leave the store
/// untouched.
pub fn sync(store: &AppStore, router: Router<AppStore>) -> Router<AppStore> {
    router.route_layer(middleware::from_fn_with_state(store.clone(), record_navigation))
}

async fn record_navigation(
    State(store): State<AppStore>,
    request: Request,
    next: Next,
) -> Response {
    let uri = request.uri();
    // /state reads the store without moving the app anywhere
    if uri.path() != "/state" {
        store.commit_route(uri.path(), uri.query());
    }
    next.run(request).await
}

async fn render_root(State(store): State<AppStore>) -> Html<String> {
    root::render(&store.snapshot())
}

async fn store_state(State(store): State<AppStore>) -> Json<StoreSnapshot> {
    Json(store.snapshot())
}
