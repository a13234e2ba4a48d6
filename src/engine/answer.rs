use icu_normalizer::ComposingNormalizerBorrowed;

/// Comparison form of an answer: trimmed, NFC-composed, lowercased.
pub fn normalize(input: &str) -> String {
    let composed = ComposingNormalizerBorrowed::new_nfc().normalize(input.trim());
    composed.to_lowercase()
}

pub fn matches(input: &str, expected: &str) -> bool {
    normalize(input) == normalize(expected)
}
