use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use coachdesk_core::AppError;
use minijinja::{Environment, context};
use tracing::error;

const ERROR_PAGE: &str = include_str!("../templates/error.html");

/// HTTP error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) | AppError::Upload { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Persistence(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        let title = status.canonical_reason().unwrap_or("Error");
        let message = self.0.user_message();
        match Environment::new().render_named_str(
            "error.html",
            ERROR_PAGE,
            context! { title, message },
        ) {
            Ok(page) => (status, Html(page)).into_response(),
            Err(render_error) => {
                error!(error = %render_error, "failed to render error page");
                (status, message).into_response()
            }
        }
    }
}

/// Standard handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use coachdesk_core::AppError;

    use super::ApiError;

    #[test]
    fn categories_map_to_status_codes() {
        let cases = [
            (AppError::Validation("x".to_owned()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".to_owned()), StatusCode::NOT_FOUND),
            (AppError::Unauthorized("x".to_owned()), StatusCode::UNAUTHORIZED),
            (AppError::Persistence("x".to_owned()), StatusCode::BAD_GATEWAY),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError(error).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn error_page_escapes_message() {
        let response =
            ApiError(AppError::Validation("<script>alert(1)</script>".to_owned())).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let page = String::from_utf8_lossy(&body);

        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>alert"));
    }
}
