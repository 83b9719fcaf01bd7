#![doc = include_str!("../README.md")]

mod cache;
pub use cache::CacheStore;
mod card;
pub use card::{CardRecord, CardSource, mask_card_number};
mod card_client;
pub use card_client::{CardClient, CardClientExt, EncodedCard};
mod codec;
pub use codec::{BLOCK_SIZE, PACKED_LEN, open_card, seal_card};
mod error;
pub use error::CardError;
mod pack;
pub use pack::{pack_digits, unpack_digits};
