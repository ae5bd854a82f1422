use axum::response::Html;

use crate::web::store::StoreSnapshot;

/// Renders the page shell around the single `#app` root node, embedding
/// the store snapshot for the client to hydrate from.
pub fn render(snapshot: &StoreSnapshot) -> Html<String> {
    // `</` would let the payload close the script tag early
    let state = serde_json::to_string(snapshot)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Reminders</title>
</head>
<body>
<div id="app" data-route="{route}"></div>
<script>window.__INITIAL_STATE__ = {state};</script>
</body>
</html>
"#,
        route = escape_attr(&snapshot.route.path),
    ))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::store::RouteState;
    use serde_json::json;

    fn snapshot(path: &str, init: serde_json::Value) -> StoreSnapshot {
        StoreSnapshot {
            init,
            route: RouteState {
                path: path.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_single_root_node() {
        let Html(page) = render(&snapshot("/", json!({})));
        assert_eq!(page.matches("id=\"app\"").count(), 1);
        assert!(page.contains("data-route=\"/\""));
    }

    #[test]
    fn test_state_cannot_break_out_of_script() {
        let Html(page) = render(&snapshot("/", json!({ "note": "</script><b>" })));
        assert!(!page.contains("</script><b>"));
        assert!(page.contains("<\\/script>"));
    }

    #[test]
    fn test_route_attribute_is_escaped() {
        let Html(page) = render(&snapshot("/\"><x", json!(null)));
        assert!(page.contains("data-route=\"/&quot;&gt;&lt;x\""));
    }
}
