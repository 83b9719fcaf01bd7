//! Cookie aware HTTP exchanges with transparent response decoding.

/// Cookie data model.
pub mod cookie;
/// Cookie error types.
pub mod cookie_error;
pub mod cookie_jar;
mod cookie_middleware;
mod cookie_store;
mod compression;
mod exchange;
mod in_memory_cookie_store;
mod response;

pub use compression::{ACCEPT_ENCODING, ContentEncoding};
pub use cookie::Cookie;
pub use cookie_error::CookieError;
pub use cookie_jar::{host_key, normalize_host};
pub use cookie_middleware::CookieMiddleware;
pub use cookie_store::CookieStore;
pub use exchange::{Exchange, ExchangeClient, encode_form};
pub use in_memory_cookie_store::InMemoryCookieStore;
pub use response::{Body, Response};
