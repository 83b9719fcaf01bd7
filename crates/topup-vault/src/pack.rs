/// Packs a digit string into one byte per two-digit group.
///
/// Groups are taken from the left and a trailing odd digit forms its own group. A two-digit
/// group below 10 (`"00"`..`"09"`) is stored as `100 + n` so it stays distinguishable from a
/// single trailing digit. Non-digit characters are ignored.
pub fn pack_digits(digits: &str) -> Vec<u8> {
    let digits: Vec<u8> = digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    digits
        .chunks(2)
        .map(|chunk| {
            let value = chunk.iter().fold(0, |acc, digit| acc * 10 + digit);
            if chunk.len() == 2 && value < 10 {
                value + 100
            } else {
                value
            }
        })
        .collect()
}

/// Reverses [pack_digits].
pub fn unpack_digits(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b >= 100 {
                format!("{:02}", b - 100)
            } else {
                b.to_string()
            }
        })
        .collect()
}
