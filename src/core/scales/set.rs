//! Ordered set of distinct export scales

use crate::domain::{ExportStructure, Scale, MAX_SCALE};
use serde::{Deserialize, Serialize};

/// Distinct positive scales selected for export
///
/// Insertion order is kept for display; it has no meaning for export.
/// Duplicates are collapsed on construction, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Scale>", into = "Vec<Scale>")]
pub struct ScaleSet {
    scales: Vec<Scale>,
}

impl ScaleSet {
    /// Creates an empty scale set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    pub fn contains(&self, scale: Scale) -> bool {
        self.scales.contains(&scale)
    }

    pub fn iter(&self) -> impl Iterator<Item = Scale> + '_ {
        self.scales.iter().copied()
    }

    pub fn as_slice(&self) -> &[Scale] {
        &self.scales
    }

    /// Largest scale in the set, if any
    pub fn max(&self) -> Option<Scale> {
        self.scales.iter().copied().max()
    }

    /// Insert a scale, returning `false` if it was already present
    pub fn insert(&mut self, scale: Scale) -> bool {
        if self.contains(scale) {
            return false;
        }
        self.scales.push(scale);
        true
    }

    /// Append `max(set, 0) + 1`, which can never collide with a member
    ///
    /// Once the largest member is at [`MAX_SCALE`] the smallest whole scale
    /// not yet in the set is appended instead.
    pub fn add(&mut self) -> Scale {
        let next = self.max().map(|s| s.value()).unwrap_or(0.0) + 1.0;
        let free = Scale::new(next).ok().or_else(|| {
            (1..=MAX_SCALE as u32)
                .map(Scale::whole)
                .find(|s| !self.contains(*s))
        });
        let Some(scale) = free else {
            // every whole scale up to the cap is taken
            return Scale::whole(1);
        };
        self.scales.push(scale);
        tracing::debug!(scale = %scale, "Added export scale");
        scale
    }

    /// Remove a scale, returning whether it was present
    pub fn remove(&mut self, scale: Scale) -> bool {
        let before = self.scales.len();
        self.scales.retain(|s| *s != scale);
        let removed = self.scales.len() != before;
        if removed {
            tracing::debug!(scale = %scale, "Removed export scale");
        }
        removed
    }

    /// Replace `old` with `new` at the same position
    ///
    /// Fails without mutating when `new` is already in the set or `old` is not.
    pub fn rename(&mut self, old: Scale, new: Scale) -> bool {
        if self.contains(new) {
            tracing::debug!(old = %old, new = %new, "Rejected rename to existing scale");
            return false;
        }
        match self.scales.iter_mut().find(|s| **s == old) {
            Some(slot) => {
                *slot = new;
                tracing::debug!(old = %old, new = %new, "Renamed export scale");
                true
            }
            None => false,
        }
    }

    /// Scales the structure will silently skip on export
    pub fn unsupported(&self, structure: ExportStructure) -> Vec<Scale> {
        self.iter().filter(|s| !structure.supports(*s)).collect()
    }

    /// Scales the structure will export
    pub fn supported(&self, structure: ExportStructure) -> Vec<Scale> {
        self.iter().filter(|s| structure.supports(*s)).collect()
    }
}

impl From<Vec<Scale>> for ScaleSet {
    fn from(scales: Vec<Scale>) -> Self {
        scales.into_iter().collect()
    }
}

impl From<ScaleSet> for Vec<Scale> {
    fn from(set: ScaleSet) -> Self {
        set.scales
    }
}

impl FromIterator<Scale> for ScaleSet {
    fn from_iter<I: IntoIterator<Item = Scale>>(iter: I) -> Self {
        let mut set = ScaleSet::new();
        for scale in iter {
            set.insert(scale);
        }
        set
    }
}
