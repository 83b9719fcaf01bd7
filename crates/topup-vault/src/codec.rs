//! Noise padded card block.
//!
//! Layout before compression and sealing, always [BLOCK_SIZE] bytes:
//!
//! ```text
//! offset (1) ‖ noise[..offset] ‖ packed card (12) ‖ noise[offset..]
//! ```
//!
//! The block is gzipped and sealed with [topup_crypto::seal]; the layout is kept byte for byte so
//! blobs written by earlier releases still open.

use rand::{Rng, RngCore};
use topup_crypto::{gunzip, gzip, open, seal};

use crate::{CardError, CardRecord, card::CARD_DIGITS, pack_digits, unpack_digits};

/// Size of the padded block.
pub const BLOCK_SIZE: usize = 512;
/// Packed size of a card, 23 digits at two per byte.
pub const PACKED_LEN: usize = CARD_DIGITS.div_ceil(2);

fn frame(packed: &[u8], rng: &mut impl RngCore) -> Vec<u8> {
    let offset: u8 = rng.gen_range(0..u8::MAX);
    let mut noise = vec![0u8; BLOCK_SIZE - packed.len() - 1];
    rng.fill_bytes(&mut noise);
    let (head, tail) = noise.split_at(offset as usize);

    let mut block = Vec::with_capacity(BLOCK_SIZE);
    block.push(offset);
    block.extend_from_slice(head);
    block.extend_from_slice(packed);
    block.extend_from_slice(tail);
    block
}

fn unframe(block: &[u8]) -> Option<&[u8]> {
    let start = usize::from(*block.first()?) + 1;
    block.get(start..start + PACKED_LEN)
}

/// Packs, pads, compresses and seals a card with `secret`. Fails with
/// [CardError::InvalidCard] unless the card [is well formed](CardRecord::is_well_formed).
pub fn seal_card(card: &CardRecord, secret: &str) -> Result<Vec<u8>, CardError> {
    if !card.is_well_formed() {
        return Err(CardError::InvalidCard);
    }
    let packed = pack_digits(&card.digits());
    let block = frame(&packed, &mut rand::thread_rng());
    let compressed = gzip(&block)?;
    Ok(seal(&compressed, secret.as_bytes()))
}

/// Reverses [seal_card]. A blob that opens but does not hold a valid card layout is
/// [CardError::CannotLoad].
pub fn open_card(blob: &[u8], secret: &str) -> Result<CardRecord, CardError> {
    let compressed = open(blob, secret.as_bytes())?;
    let block = gunzip(&compressed)?;
    let packed = unframe(&block).ok_or(CardError::CannotLoad)?;
    let digits = zeroize::Zeroizing::new(unpack_digits(packed));

    CardRecord::from_digits(&digits).ok_or(CardError::CannotLoad)
}
