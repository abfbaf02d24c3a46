/// Pad or truncate a token sequence to exactly `max_len` entries.
///
/// Short sequences are padded at the end with `pad`, long sequences lose their tail.
pub fn pad_sequence(tokens: &[usize], max_len: usize, pad: usize) -> Vec<usize> {
    let mut padded = Vec::with_capacity(max_len);

    padded.extend(tokens.iter().take(max_len).copied());
    padded.resize(max_len, pad);

    padded
}

/// Replace any token index at or above `max_words` with the `oov` index
pub fn cap_vocabulary(tokens: &mut [usize], max_words: usize, oov: usize) {
    for token in tokens.iter_mut().filter(|token| **token >= max_words) {
        *token = oov;
    }
}
