/// Sum of the character codes of `chars`.
pub fn sum_codes(chars: &[char]) -> u64 {
    chars.iter().map(|c| *c as u64).sum()
}

/// Distance the obfuscation step rotates by. Rotation does not change the sum, so
/// encode (after shuffling) and decode (before unshuffling) agree on it.
pub fn content_distance(chars: &[char]) -> usize {
    if chars.is_empty() {
        return 0;
    }
    (sum_codes(chars) % chars.len() as u64) as usize
}

/// Moves the first `distance` characters to the end
pub fn rotate_left(chars: &mut [char], distance: usize) {
    if !chars.is_empty() {
        let len = chars.len();
        chars.rotate_left(distance % len);
    }
}

/// Moves the last `distance` characters to the front
pub fn rotate_right(chars: &mut [char], distance: usize) {
    if !chars.is_empty() {
        let len = chars.len();
        chars.rotate_right(distance % len);
    }
}
