//! Items: one generated or acquired cosmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{item_badge, ItemCategory};
use crate::random::{Clock, RandomSource};
use crate::rarity::RarityTier;

/// Digits in the random part of an item id
const ID_SUFFIX_DIGITS: u32 = 10;

/// A cosmetic item.
///
/// Field names on the wire match the inventory blob: `type`, `name` and
/// `dateAcquired` instead of the Rust field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub category: ItemCategory,
    #[serde(rename = "name")]
    pub display_name: String,
    pub rarity: RarityTier,
    #[serde(default)]
    pub equipped: bool,
    #[serde(rename = "dateAcquired")]
    pub acquired_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        category: ItemCategory,
        display_name: impl Into<String>,
        rarity: RarityTier,
        acquired_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            display_name: display_name.into(),
            rarity,
            equipped: false,
            acquired_at,
        }
    }

    /// Word shown as page title when this item is an equipped Title.
    ///
    /// Names of three or more words show the middle word (the noun);
    /// shorter names show their first word.
    pub fn title_word(&self) -> &str {
        let words: Vec<&str> = self.display_name.split_whitespace().collect();
        if words.len() >= 3 {
            words[1]
        } else {
            words.first().copied().unwrap_or("")
        }
    }

    pub fn badge(&self) -> &'static str {
        item_badge(self.category, self.rarity)
    }
}

/// Fresh item id: base36 milliseconds since the epoch followed by a
/// base36 random suffix.
pub fn new_item_id(clock: &dyn Clock, rng: &mut dyn RandomSource) -> String {
    let millis = clock.now().timestamp_millis().max(0) as u64;
    let span = 36u64.pow(ID_SUFFIX_DIGITS);
    let suffix = ((rng.next_f64() * span as f64) as u64).min(span - 1);
    format!(
        "{}{:0>width$}",
        to_base36(millis),
        to_base36(suffix),
        width = ID_SUFFIX_DIGITS as usize
    )
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedClock, ScriptedRandom};
    use chrono::TimeZone;

    fn sample(name: &str) -> Item {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Item::new("x1", ItemCategory::Title, name, RarityTier::Epic, at)
    }

    #[test]
    fn test_title_word_middle() {
        assert_eq!(sample("Dazzling Hero of Glory").title_word(), "Hero");
        assert_eq!(sample("Hero Glory").title_word(), "Hero");
        assert_eq!(sample("").title_word(), "");
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_item_id_shape() {
        let clock = FixedClock(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap());
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5]);
        let a = new_item_id(&clock, &mut rng);
        let b = new_item_id(&clock, &mut rng);
        assert_ne!(a, b);
        assert!(a.starts_with(&to_base36(1_700_000_000_000)));
        assert!(a.ends_with("0000000000"));
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_item_wire_names() {
        let json = serde_json::to_value(sample("Basic Hero of Skill")).unwrap();
        assert_eq!(json["type"], "Title");
        assert_eq!(json["name"], "Basic Hero of Skill");
        assert_eq!(json["rarity"], "epic");
        assert!(json.get("dateAcquired").is_some());
        assert_eq!(json["equipped"], false);
    }

    #[test]
    fn test_item_accepts_capitalised_rarity() {
        let json = r#"{"id":"a","type":"Color Scheme","name":"Neat Neon of Skill",
            "rarity":"Mythical","equipped":true,"dateAcquired":"2024-01-01T00:00:00Z"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.rarity, RarityTier::Mythical);
        assert_eq!(item.category, ItemCategory::ColorScheme);
        assert!(item.equipped);
    }
}
