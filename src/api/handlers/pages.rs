use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

use crate::AppState;

/// Serve a pre-rendered page from the site store. This is the router
/// fallback, so it sees every path that is not an API route; the database
/// is never touched here.
pub async fn serve(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = normalize(uri.path());
    match state.site.get_page(&path).await {
        Some(html) => Html(html).into_response(),
        None => (StatusCode::NOT_FOUND, Html(not_found_page())).into_response(),
    }
}

/// Collapse trailing slashes so `/2022-2023/odds/` finds the same page as
/// `/2022-2023/odds`.
fn normalize(path: &str) -> String {
    if path == "/" {
        return path.to_string();
    }
    path.trim_end_matches('/').to_string()
}

fn not_found_page() -> String {
    crate::site::html::layout("Not found", "<main><h1>404</h1><p>Page not found.</p></main>")
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn test_normalize_keeps_root() {
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize("/2022-2023/odds/"), "/2022-2023/odds");
    }
}
