//! Milestone unlocks.
//!
//! Each unlock is gated by a single threshold on the profile's counters.
//! Granting is permanent; a profile that falls back below a threshold keeps
//! what it earned.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::garden::PlantType;
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unlock {
    Flower,
    Tree,
    Fruit,
    StreakBonus,
    MasterGardener,
}

/// What a profile must reach for an unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    TotalEntries(u32),
    CurrentStreak(u32),
}

impl Requirement {
    pub fn is_met(&self, profile: &Profile) -> bool {
        match *self {
            Requirement::TotalEntries(n) => profile.total_entries >= n,
            Requirement::CurrentStreak(n) => profile.current_streak >= n,
        }
    }
}

/// Unlock rules, in grant order.
pub const UNLOCK_RULES: [(Unlock, Requirement); 5] = [
    (Unlock::Flower, Requirement::TotalEntries(5)),
    (Unlock::Tree, Requirement::TotalEntries(15)),
    (Unlock::Fruit, Requirement::TotalEntries(30)),
    (Unlock::StreakBonus, Requirement::CurrentStreak(7)),
    (Unlock::MasterGardener, Requirement::CurrentStreak(30)),
];

impl Unlock {
    pub const ALL: [Unlock; 5] = [
        Unlock::Flower,
        Unlock::Tree,
        Unlock::Fruit,
        Unlock::StreakBonus,
        Unlock::MasterGardener,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Unlock::Flower => "flower",
            Unlock::Tree => "tree",
            Unlock::Fruit => "fruit",
            Unlock::StreakBonus => "streak-bonus",
            Unlock::MasterGardener => "master-gardener",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unlock::Flower => "Flowers",
            Unlock::Tree => "Trees",
            Unlock::Fruit => "Fruit",
            Unlock::StreakBonus => "Streak Bonus",
            Unlock::MasterGardener => "Master Gardener",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Unlock::Flower => "🌸",
            Unlock::Tree => "🌳",
            Unlock::Fruit => "🍓",
            Unlock::StreakBonus => "⚡",
            Unlock::MasterGardener => "🏆",
        }
    }

    /// Announcement shown when the unlock is granted.
    pub fn message(&self) -> &'static str {
        match self {
            Unlock::Flower => "🌸 Unlocked: Flower Plants!",
            Unlock::Tree => "🌳 Unlocked: Tree Plants!",
            Unlock::Fruit => "🍓 Unlocked: Fruit Plants!",
            Unlock::StreakBonus => "🎉 Unlocked: Streak Bonus!",
            Unlock::MasterGardener => "🏆 Master Gardener Achieved!",
        }
    }

    pub fn requirement(&self) -> Requirement {
        UNLOCK_RULES
            .iter()
            .find(|(unlock, _)| unlock == self)
            .map(|(_, req)| *req)
            .unwrap_or(Requirement::TotalEntries(u32::MAX))
    }
}

impl fmt::Display for Unlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Grant every unlock whose threshold the profile now meets.
///
/// Returns only the unlocks granted by this call; calling again with an
/// unchanged profile returns an empty list.
pub fn evaluate_unlocks(profile: &mut Profile) -> Vec<Unlock> {
    let mut granted = Vec::new();
    for (unlock, requirement) in UNLOCK_RULES {
        if requirement.is_met(profile) && profile.unlocked_items.insert(unlock) {
            info!(unlock = %unlock, "unlock granted");
            granted.push(unlock);
        }
    }
    granted
}

/// Plant types a new plant may be drawn from.
pub fn available_plant_types(unlocked: &BTreeSet<Unlock>) -> Vec<PlantType> {
    let mut types = vec![PlantType::Basic];
    if unlocked.contains(&Unlock::Flower) {
        types.extend([PlantType::Flower1, PlantType::Flower2, PlantType::Flower3]);
    }
    if unlocked.contains(&Unlock::Tree) {
        types.push(PlantType::Tree);
    }
    if unlocked.contains(&Unlock::Fruit) {
        types.push(PlantType::Fruit);
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile(total_entries: u32, current_streak: u32) -> Profile {
        let mut profile = Profile::new(&mut StdRng::seed_from_u64(3));
        profile.total_entries = total_entries;
        profile.current_streak = current_streak;
        profile
    }

    #[test]
    fn five_entries_unlock_flowers_only() {
        let mut p = profile(5, 0);
        assert_eq!(evaluate_unlocks(&mut p), vec![Unlock::Flower]);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut p = profile(16, 8);
        assert_eq!(
            evaluate_unlocks(&mut p),
            vec![Unlock::Flower, Unlock::Tree, Unlock::StreakBonus]
        );
        assert!(evaluate_unlocks(&mut p).is_empty());
    }

    #[test]
    fn everything_at_the_top() {
        let mut p = profile(30, 30);
        assert_eq!(evaluate_unlocks(&mut p), Unlock::ALL.to_vec());
    }

    #[test]
    fn unlocks_are_never_revoked() {
        let mut p = profile(5, 7);
        evaluate_unlocks(&mut p);
        p.current_streak = 0;
        assert!(evaluate_unlocks(&mut p).is_empty());
        assert!(p.has_unlock(Unlock::StreakBonus));
    }

    #[test]
    fn serializes_with_kebab_ids() {
        assert_eq!(
            serde_json::to_string(&Unlock::MasterGardener).unwrap(),
            "\"master-gardener\""
        );
        for unlock in Unlock::ALL {
            let json = serde_json::to_string(&unlock).unwrap();
            assert_eq!(json, format!("\"{}\"", unlock.id()));
        }
    }

    #[test]
    fn requirements_match_rule_table() {
        assert_eq!(Unlock::Fruit.requirement(), Requirement::TotalEntries(30));
        assert_eq!(Unlock::StreakBonus.requirement(), Requirement::CurrentStreak(7));
    }

    #[test]
    fn plant_palette_grows_with_unlocks() {
        assert_eq!(available_plant_types(&BTreeSet::new()), vec![PlantType::Basic]);
        let all: BTreeSet<Unlock> = Unlock::ALL.into_iter().collect();
        assert_eq!(available_plant_types(&all).len(), 6);
    }
}
