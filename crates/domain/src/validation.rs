use coachdesk_core::{AppError, AppResult};
use url::Url;

/// Checks that a video link is an absolute http(s) URL with a host.
pub fn validate_video_url(field: &str, value: &str) -> AppResult<()> {
    let invalid = || AppError::Validation(format!("{field} must be a valid http(s) URL"));

    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }

    Ok(())
}
