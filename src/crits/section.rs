//! Structural sections and the items installed in them
//!
//! Plain value inputs produced by external collaborators (the data-file
//! parser and the loadout editor); nothing here is computed, only carried.

use serde::{Deserialize, Serialize};

/// Unique identifier for an installed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// One distinct item type installed in a section
///
/// `count` aggregates identical copies; `health` is `f64::INFINITY` for
/// indestructible items such as engines, which still occupy slots and soak
/// critical rolls as pure damage buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProfile {
    pub id: ItemId,
    pub name: String,
    pub slots: u32,
    pub health: f64,
    pub crittable: bool,
    pub count: u32,
}

impl ItemProfile {
    pub fn new(id: ItemId, name: &str, slots: u32, health: f64, count: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            slots,
            health,
            crittable: true,
            count,
        }
    }

    /// Engine: indestructible, but occupies slots and soaks critical rolls
    pub fn engine(id: ItemId, slots: u32) -> Self {
        Self::new(id, "Engine", slots, f64::INFINITY, 1)
    }

    /// Single heat sink
    pub fn heat_sink(id: ItemId) -> Self {
        Self::new(id, "Heat Sink", 1, 10.0, 1)
    }

    /// Ammunition rack
    pub fn ammo_rack(id: ItemId) -> Self {
        Self::new(id, "Ammo Rack", 1, 10.0, 1)
    }
}

/// A structural section with its equipped and fixed items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProfile {
    pub name: String,
    pub base_structure_hp: f64,
    pub items: Vec<ItemProfile>,
}

impl SectionProfile {
    pub fn new(name: &str, base_structure_hp: f64, items: Vec<ItemProfile>) -> Self {
        Self {
            name: name.to_string(),
            base_structure_hp,
            items,
        }
    }

    /// Structural hit points under a modifier set
    pub fn structure_hp(&self, modifiers: &ModifierSet) -> f64 {
        self.base_structure_hp * modifiers.structure_multiplier
    }
}

/// Build-level modifiers affecting a section's effective structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModifierSet {
    pub structure_multiplier: f64,
}

impl Default for ModifierSet {
    fn default() -> Self {
        Self {
            structure_multiplier: 1.0,
        }
    }
}
