//! Built-in farm animal catalog and team presets.

use crate::model::{Item, ItemGroup, Roster, RosterError, TeamPreset};

/// Display information for an item group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupInfo {
    pub group: ItemGroup,
    pub title: &'static str,
    pub native_title: &'static str,
    pub icon: &'static str,
}

pub const GROUPS: [GroupInfo; 3] = [
    GroupInfo {
        group: ItemGroup::Barn,
        title: "The Big Barn",
        native_title: "الحظيرة الكبيرة",
        icon: "🏠",
    },
    GroupInfo {
        group: ItemGroup::Poultry,
        title: "Birds & Ducks",
        native_title: "الطيور والدواجن",
        icon: "🦆",
    },
    GroupInfo {
        group: ItemGroup::Pets,
        title: "Small Friends",
        native_title: "الأصدقاء الصغار",
        icon: "🐇",
    },
];

pub const TEAM_PRESETS: [TeamPreset; 4] = [
    TeamPreset {
        name: "Red Lions",
        color: "red",
        icon: "🦁",
    },
    TeamPreset {
        name: "Blue Dolphins",
        color: "blue",
        icon: "🐬",
    },
    TeamPreset {
        name: "Green Frogs",
        color: "green",
        icon: "🐸",
    },
    TeamPreset {
        name: "Yellow Chicks",
        color: "yellow",
        icon: "🐥",
    },
];

// (id, label, native name, transliteration, emoji, group)
const ANIMALS: [(&str, &str, &str, &str, &str, ItemGroup); 13] = [
    ("cow", "Cow", "بَقَرَة", "Baqara", "🐄", ItemGroup::Barn),
    ("sheep", "Sheep", "خَرُوف", "Kharoof", "🐑", ItemGroup::Barn),
    ("horse", "Horse", "حِصَان", "Hissan", "🐎", ItemGroup::Barn),
    ("donkey", "Donkey", "حِمَار", "Himar", "🫏", ItemGroup::Barn),
    ("goat", "Goat", "مَاعِز", "Ma'ez", "🐐", ItemGroup::Barn),
    ("chicken", "Chicken", "دَجَاجَة", "Dajaja", "🐔", ItemGroup::Poultry),
    ("rooster", "Rooster", "دِيك", "Deek", "🐓", ItemGroup::Poultry),
    ("duck", "Duck", "بَطَّة", "Batta", "🦆", ItemGroup::Poultry),
    ("turkey", "Turkey", "دِيك رُومِي", "Deek Rumi", "🦃", ItemGroup::Poultry),
    ("cat", "Cat", "قِطَّة", "Qitta", "🐱", ItemGroup::Pets),
    ("dog", "Dog", "كَلْب", "Kalb", "🐶", ItemGroup::Pets),
    ("rabbit", "Rabbit", "أَرْنَب", "Arnab", "🐰", ItemGroup::Pets),
    ("bee", "Bee", "نَحْلَة", "Nahla", "🐝", ItemGroup::Pets),
];

/// Every catalog item, in catalog order.
#[must_use]
pub fn items() -> Vec<Item> {
    ANIMALS
        .iter()
        .map(|&(id, label, audio, translit, emoji, group)| {
            Item::new(id, label, audio, translit, emoji, group)
        })
        .collect()
}

#[must_use]
pub fn group_info(group: ItemGroup) -> &'static GroupInfo {
    match group {
        ItemGroup::Barn => &GROUPS[0],
        ItemGroup::Poultry => &GROUPS[1],
        ItemGroup::Pets => &GROUPS[2],
    }
}

/// Builds the roster for one group, or for the whole catalog when `group` is `None`.
///
/// # Errors
///
/// Propagates `RosterError` if the selection cannot fill a round.
pub fn roster_for(group: Option<ItemGroup>) -> Result<Roster, RosterError> {
    let selected = items()
        .into_iter()
        .filter(|item| group.is_none_or(|g| item.group == g))
        .collect();
    Roster::new(selected)
}

/// Preset for the team at `index`, wrapping if more slots are requested than presets exist.
#[must_use]
pub fn team_preset(index: usize) -> &'static TeamPreset {
    &TEAM_PRESETS[index % TEAM_PRESETS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_group_fills_a_round() {
        for group in ItemGroup::ALL {
            let roster = roster_for(Some(group)).unwrap();
            assert!(roster.len() >= crate::OPTIONS_PER_ROUND);
            assert!(roster.items().iter().all(|item| item.group == group));
        }
    }

    #[test]
    fn group_sizes_match_catalog() {
        assert_eq!(roster_for(Some(ItemGroup::Barn)).unwrap().len(), 5);
        assert_eq!(roster_for(Some(ItemGroup::Poultry)).unwrap().len(), 4);
        assert_eq!(roster_for(Some(ItemGroup::Pets)).unwrap().len(), 4);
        assert_eq!(roster_for(None).unwrap().len(), 13);
    }

    #[test]
    fn group_info_lines_up() {
        for group in ItemGroup::ALL {
            assert_eq!(group_info(group).group, group);
        }
    }

    #[test]
    fn presets_cover_largest_team_count() {
        assert_eq!(TEAM_PRESETS.len(), usize::from(crate::model::TeamCount::MAX));
        assert_eq!(team_preset(1).name, "Blue Dolphins");
    }
}
