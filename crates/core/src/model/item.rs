use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::ItemId;
use crate::settings::OPTIONS_PER_ROUND;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RosterError {
    #[error("roster has {len} items, at least {required} are needed")]
    TooSmall { len: usize, required: usize },

    #[error("roster contains item `{0}` more than once")]
    DuplicateItem(ItemId),
}

//
// ─── ITEM ──────────────────────────────────────────────────────────────────────
//

/// Catalog grouping used to build themed rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemGroup {
    Barn,
    Poultry,
    Pets,
}

impl ItemGroup {
    pub const ALL: [ItemGroup; 3] = [ItemGroup::Barn, ItemGroup::Poultry, ItemGroup::Pets];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            ItemGroup::Barn => "barn",
            ItemGroup::Poultry => "poultry",
            ItemGroup::Pets => "pets",
        }
    }

    /// Parses a group slug, ignoring case.
    #[must_use]
    pub fn from_slug(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.slug().eq_ignore_ascii_case(raw.trim()))
    }
}

/// A quiz item: something the player has to find by ear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// English display name.
    pub label: String,
    /// Native-language name spoken in the prompt.
    pub audio: String,
    pub transliteration: String,
    pub emoji: String,
    pub group: ItemGroup,
}

impl Item {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        audio: impl Into<String>,
        transliteration: impl Into<String>,
        emoji: impl Into<String>,
        group: ItemGroup,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            label: label.into(),
            audio: audio.into(),
            transliteration: transliteration.into(),
            emoji: emoji.into(),
            group,
        }
    }
}

//
// ─── ROSTER ────────────────────────────────────────────────────────────────────
//

/// Ordered, fixed set of items available to a session.
///
/// A roster always holds enough distinct items to fill a full option set,
/// so every round can show one target and three distractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    items: Vec<Item>,
}

impl Roster {
    /// # Errors
    ///
    /// Returns `RosterError::TooSmall` if fewer than `OPTIONS_PER_ROUND` items are given.
    /// Returns `RosterError::DuplicateItem` if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self, RosterError> {
        if items.len() < OPTIONS_PER_ROUND {
            return Err(RosterError::TooSmall {
                len: items.len(),
                required: OPTIONS_PER_ROUND,
            });
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(RosterError::DuplicateItem(item.id.clone()));
            }
        }

        Ok(Self { items })
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }
}
