/// Errors that can occur during cookie parsing and storage operations.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// Cookie has invalid format
    #[error("Invalid cookie format: {0}")]
    InvalidCookie(String),
}
