use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;

/// Where the web app currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    pub path: String,
    pub query: Option<String>,
    /// Path before the most recent navigation
    pub from: Option<String>,
}

/// Everything the root component renders from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub init: Value,
    pub route: RouteState,
}

/// Shared application state: the init payload plus the route, which is
/// kept in a watch channel so route changes can be observed.
#[derive(Clone)]
pub struct AppStore {
    init: Arc<Value>,
    route: Arc<watch::Sender<RouteState>>,
}

impl AppStore {
    pub fn new(init_data: Value) -> Self {
        let (route, _) = watch::channel(RouteState {
            path: "/".to_string(),
            query: None,
            from: None,
        });

        Self {
            init: Arc::new(init_data),
            route: Arc::new(route),
        }
    }

    pub fn init_data(&self) -> &Value {
        &self.init
    }

    pub fn route(&self) -> RouteState {
        self.route.borrow().clone()
    }

    /// Records a navigation. Observers are only woken when the location
    /// actually changed.
    pub fn commit_route(&self, path: &str, query: Option<&str>) {
        self.route.send_if_modified(|route| {
            let query = query.filter(|q| !q.is_empty()).map(str::to_string);
            if route.path == path && route.query == query {
                return false;
            }
            route.from = Some(std::mem::replace(&mut route.path, path.to_string()));
            route.query = query;
            true
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<RouteState> {
        self.route.subscribe()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            init: self.init.as_ref().clone(),
            route: self.route(),
        }
    }
}

/// Store factory: seeds the store from the init payload.
pub fn create_store(init_data: Value) -> AppStore {
    AppStore::new(init_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_seeded_from_init_data() {
        let store = create_store(json!({ "title": "Reminders" }));
        assert_eq!(store.init_data()["title"], "Reminders");
        assert_eq!(store.route().path, "/");
    }

    #[test]
    fn test_commit_route_tracks_previous_path() {
        let store = create_store(Value::Null);
        store.commit_route("/reminders", Some("day=today"));

        let route = store.route();
        assert_eq!(route.path, "/reminders");
        assert_eq!(route.query.as_deref(), Some("day=today"));
        assert_eq!(route.from.as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_subscribers_see_navigation() {
        let store = create_store(Value::Null);
        let mut rx = store.subscribe();

        store.commit_route("/reminders", None);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().path, "/reminders");

        // same location again does not notify
        store.commit_route("/reminders", None);
        assert!(!rx.has_changed().unwrap());
    }
}
