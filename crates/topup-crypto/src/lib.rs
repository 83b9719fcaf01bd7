#![doc = include_str!("../README.md")]

mod aes_gcm;
pub use aes_gcm::{IV_SIZE, SALT_SIZE, TAG_SIZE, open, seal};
mod compression;
pub use compression::{gunzip, gzip};
mod error;
pub use error::{CryptoError, Result};
pub mod key_compression;
pub mod rsa;
mod util;
pub use util::{PasswordCharset, generate_password, md5_hex, pbkdf2_sha512};
