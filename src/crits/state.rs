//! Branch-local state of the destruction recursion
//!
//! An arena of fixed-size records, one per distinct crittable item, indexed
//! densely. Records are never removed: a group whose multiplicity reaches
//! zero stays in place as a dead record, which keeps indices stable across
//! the whole recursion and makes a branch copy one flat memcpy instead of a
//! map rebuild. Every branch works on its own copy; the shared destruction
//! accumulators live with the top-level simulation call.

use ahash::AHashMap;

use crate::crits::section::{ItemId, SectionProfile};

/// What a single critical roll did to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RollOutcome {
    /// One unit of multiplicity was destroyed
    Destroyed,
    /// The group lost one reference-damage increment of health
    Damaged,
}

#[derive(Debug, Clone)]
pub(crate) struct ItemRecord {
    pub id: ItemId,
    pub slots_per_unit: u32,
    pub multiplicity: u32,
    /// Health summed across the group's remaining units; infinite for
    /// indestructible items
    pub health_remaining: f64,
    /// Set when the group was damaged this strike; struck groups are
    /// excluded from the remaining rolls of the current strike only
    pub struck_this_strike: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DestructionState {
    records: Vec<ItemRecord>,
}

impl DestructionState {
    /// Build the initial state from a section's crittable items
    ///
    /// Duplicate ids are merged: counts add up and so does grouped health.
    /// Records are ordered by id so branch enumeration is deterministic.
    pub(crate) fn from_section(section: &SectionProfile) -> Self {
        let mut records: Vec<ItemRecord> = Vec::new();
        for item in &section.items {
            if !item.crittable || item.count == 0 || item.slots == 0 {
                continue;
            }
            let grouped_health = item.health * item.count as f64;
            if let Some(record) = records.iter_mut().find(|record| record.id == item.id) {
                record.multiplicity += item.count;
                record.health_remaining += grouped_health;
            } else {
                records.push(ItemRecord {
                    id: item.id,
                    slots_per_unit: item.slots,
                    multiplicity: item.count,
                    health_remaining: grouped_health,
                    struck_this_strike: false,
                });
            }
        }
        records.sort_by_key(|record| record.id.0);
        Self { records }
    }

    /// Initial multiplicity per item, for result normalization
    pub(crate) fn multiplicities(&self) -> AHashMap<ItemId, u32> {
        self.records
            .iter()
            .filter(|record| record.multiplicity > 0)
            .map(|record| (record.id, record.multiplicity))
            .collect()
    }

    pub(crate) fn id_of(&self, index: usize) -> ItemId {
        self.records[index].id
    }

    /// Targeting distribution for the next roll of the current strike
    ///
    /// Weight is slot footprint times remaining multiplicity, normalized
    /// over the groups not yet struck this strike. Empty when every live
    /// group has already been struck.
    pub(crate) fn targets(&self) -> Vec<(usize, f64)> {
        let candidates: Vec<(usize, f64)> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.struck_this_strike && record.multiplicity > 0)
            .map(|(index, record)| {
                (index, (record.slots_per_unit * record.multiplicity) as f64)
            })
            .collect();
        let total: f64 = candidates.iter().map(|(_, slots)| slots).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        candidates
            .into_iter()
            .map(|(index, slots)| (index, slots / total))
            .collect()
    }

    /// Resolve one critical roll against the record at `index`
    ///
    /// A group at or below one reference-damage increment loses a unit of
    /// multiplicity (dead at zero); otherwise it loses one increment and
    /// sits out the remaining rolls of this strike.
    pub(crate) fn apply_roll(
        &mut self,
        index: usize,
        reference_damage: f64,
        tolerance: f64,
    ) -> RollOutcome {
        let record = &mut self.records[index];
        if record.health_remaining <= reference_damage + tolerance {
            record.multiplicity -= 1;
            RollOutcome::Destroyed
        } else {
            record.health_remaining -= reference_damage;
            record.struck_this_strike = true;
            RollOutcome::Damaged
        }
    }

    /// Strike boundary: struck groups become targetable again
    pub(crate) fn end_strike(&mut self) {
        for record in &mut self.records {
            record.struck_this_strike = false;
        }
    }
}
