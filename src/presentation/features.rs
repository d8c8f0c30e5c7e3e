//! Textual features of an item name that drive signature title effects.
//!
//! Counts are taken over UTF-16 code units so a name hashes and measures
//! the same way a browser host would see it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Order-dependent 32-bit string hash: `hash = hash * 31 + unit`, wrapping.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Index into a table of `len` entries from a name hash
pub fn hash_index(hash: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (hash.unsigned_abs() as usize) % len
}

/// Measurements of a display name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NameFeatures {
    pub hash: i32,
    pub char_count: usize,
    pub vowel_count: usize,
    /// Every code unit that is not a vowel, spaces and punctuation included
    pub consonant_count: usize,
    pub uppercase_count: usize,
    /// Distinct ASCII letters, case-folded
    pub unique_letter_count: usize,
    /// Characters that are neither alphanumeric nor whitespace
    pub special_char_count: usize,
    pub word_count: usize,
    /// Shannon entropy of the character distribution divided by 5, capped at 1
    pub entropy: f64,
}

impl NameFeatures {
    pub fn measure(name: &str) -> Self {
        let units: Vec<u16> = name.encode_utf16().collect();
        let mut vowel_count = 0;
        let mut uppercase_count = 0;
        let mut special_char_count = 0;
        let mut letters = [false; 26];

        for c in name.chars() {
            if c.is_ascii_alphabetic() {
                let lower = c.to_ascii_lowercase();
                letters[(lower as u8 - b'a') as usize] = true;
                if matches!(lower, 'a' | 'e' | 'i' | 'o' | 'u') {
                    vowel_count += 1;
                }
                if c.is_ascii_uppercase() {
                    uppercase_count += 1;
                }
            } else if !c.is_ascii_digit() && !c.is_whitespace() {
                special_char_count += 1;
            }
        }

        Self {
            hash: name_hash(name),
            char_count: units.len(),
            vowel_count,
            consonant_count: units.len() - vowel_count,
            uppercase_count,
            unique_letter_count: letters.iter().filter(|seen| **seen).count(),
            special_char_count,
            word_count: name.split_whitespace().count().max(1),
            entropy: normalized_entropy(&units),
        }
    }
}

fn normalized_entropy(units: &[u16]) -> f64 {
    if units.is_empty() {
        return 0.0;
    }
    let mut freq: HashMap<u16, usize> = HashMap::new();
    for unit in units {
        *freq.entry(*unit).or_insert(0) += 1;
    }
    let len = units.len() as f64;
    let entropy: f64 = freq
        .values()
        .map(|count| {
            let p = *count as f64 / len;
            -p * p.log2()
        })
        .sum();
    (entropy / 5.0).min(1.0)
}
