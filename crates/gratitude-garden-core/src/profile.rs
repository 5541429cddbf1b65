//! The gardener's profile and friend code.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::unlocks::Unlock;

/// Characters a friend code may contain. Excludes look-alikes (I, O, 0, 1).
pub const FRIEND_CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const FRIEND_CODE_LEN: usize = 8;

/// Eight-character shareable code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FriendCode(String);

impl FriendCode {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let alphabet = FRIEND_CODE_ALPHABET.as_bytes();
        let code = (0..FRIEND_CODE_LEN)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for FriendCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        let invalid = |message: &str| ValidationError::InvalidFriendCode {
            code: s.to_string(),
            message: message.to_string(),
        };
        if code.chars().count() != FRIEND_CODE_LEN {
            return Err(invalid("expected 8 characters"));
        }
        if let Some(bad) = code.chars().find(|c| !FRIEND_CODE_ALPHABET.contains(*c)) {
            return Err(invalid(&format!("'{bad}' is not allowed")));
        }
        Ok(Self(code))
    }
}

impl TryFrom<String> for FriendCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FriendCode> for String {
    fn from(code: FriendCode) -> Self {
        code.0
    }
}

impl fmt::Display for FriendCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-user counters and granted unlocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub total_entries: u32,
    /// Only ever grows.
    #[serde(default)]
    pub unlocked_items: BTreeSet<Unlock>,
    #[serde(default)]
    pub last_entry_date: Option<DateTime<Utc>>,
    pub friend_code: FriendCode,
}

impl Profile {
    /// Fresh profile with a random friend code.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            username: String::new(),
            current_streak: 0,
            longest_streak: 0,
            total_entries: 0,
            unlocked_items: BTreeSet::new(),
            last_entry_date: None,
            friend_code: FriendCode::generate(rng),
        }
    }

    pub fn has_unlock(&self, unlock: Unlock) -> bool {
        self.unlocked_items.contains(&unlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_codes_use_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let code = FriendCode::generate(&mut rng);
            assert_eq!(code.as_str().len(), FRIEND_CODE_LEN);
            assert!(code.as_str().chars().all(|c| FRIEND_CODE_ALPHABET.contains(c)));
        }
    }

    #[test]
    fn parse_normalises_case() {
        let code: FriendCode = "abcd2345".parse().unwrap();
        assert_eq!(code.as_str(), "ABCD2345");
    }

    #[test]
    fn parse_rejects_ambiguous_characters() {
        assert!("ABCD1234".parse::<FriendCode>().is_err());
        assert!("ABCDO234".parse::<FriendCode>().is_err());
        assert!("ABC".parse::<FriendCode>().is_err());
    }

    #[test]
    fn profile_defaults_missing_counters() {
        let json = r#"{"friend_code":"QWERTY23"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.current_streak, 0);
        assert!(profile.unlocked_items.is_empty());
        assert_eq!(profile.friend_code.as_str(), "QWERTY23");
    }

    #[test]
    fn malformed_friend_code_fails_to_deserialize() {
        let json = r#"{"friend_code":"nope"}"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }
}
