use std::collections::BTreeSet;

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Normalize a guess to a single uppercase letter.
/// Returns None unless the input is exactly one alphabetic character whose
/// uppercase form is also a single character.
pub fn normalize_letter(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    if chars.next().is_some() || !ch.is_alphabetic() {
        return None;
    }

    let mut upper = ch.to_uppercase();
    let normalized = upper.next()?;
    if upper.next().is_some() {
        return None;
    }
    Some(normalized)
}

/// Render a word with unrevealed letters masked, e.g. "_ A _"
pub fn mask_word(word: &str, revealed: &BTreeSet<char>) -> String {
    word.chars()
        .map(|ch| if revealed.contains(&ch) { ch } else { '_' })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Letters of the A-Z alphabet not present in `used`, in alphabetical order
pub fn remaining_letters(used: &BTreeSet<char>) -> Vec<char> {
    ALPHABET.chars().filter(|ch| !used.contains(ch)).collect()
}
