//! Landing page listing the test routes

use axum::{response::Html, routing::get, Router};

use crate::state::AppState;

const INDEX_HTML: &str = r#"<!doctype html>
<html>
  <body style="font-family:system-ui;padding:24px">
    <h1>todoctl + PostgreSQL</h1>
    <p>Test routes:</p>
    <ul>
      <li><a href="/hello">/hello</a></li>
      <li><a href="/healthz">/healthz</a></li>
      <li><a href="/todos">/todos</a></li>
    </ul>
  </body>
</html>
"#;

/// GET /
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
