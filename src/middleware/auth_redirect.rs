use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Send logged-out browser requests to the login form. Page loads remember
/// where they were headed in `?next=`; form posts just land on `/login`.
pub async fn redirect_unauthorized(req: Request, next: Next) -> Response {
    let target = (req.method() == Method::GET).then(|| req.uri().path().to_string());

    let response = next.run(req).await;
    if response.status() != StatusCode::UNAUTHORIZED {
        return response;
    }

    match target {
        Some(path) if is_local_path(&path) && path != "/" => {
            Redirect::to(&format!("/login?next={path}")).into_response()
        }
        _ => Redirect::to("/login").into_response(),
    }
}

/// Only same-site absolute paths may be used as a post-login target.
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_off_site_targets() {
        assert!(is_local_path("/projects/abc/edit"));
        assert!(!is_local_path("//evil.test"));
        assert!(!is_local_path("https://evil.test"));
        assert!(!is_local_path("/\\evil.test"));
    }
}
