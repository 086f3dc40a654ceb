//! Mapping of detected effective sizes to the user's standard sizes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{standard_sizes::StandardSizes, text_descriptor::SizeKey};

/// Returns the standard size closest to `size`; ties go to the smaller standard size.
pub fn closest(size: f64, standard_sizes: &StandardSizes) -> f64 {
    standard_sizes.closest(size)
}

/// One row of the mapping, as exposed to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub size: SizeKey,
    pub standard: f64,
}

/// Holds the chosen standard size for each detected effective size.
///
/// Entries are created lazily with the closest standard size and can be overridden
/// explicitly. Iteration is in ascending size order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeMapper {
    entries: BTreeMap<SizeKey, f64>,
}

impl SizeMapper {
    pub fn new() -> Self {
        Default::default()
    }

    /// Fills every unique size that has no entry yet with its closest standard size.
    /// Existing entries, including explicit choices, are left alone.
    pub fn seed_defaults(&mut self, unique_sizes: &[SizeKey], standard_sizes: &StandardSizes) {
        for &size in unique_sizes {
            self.entries
                .entry(size)
                .or_insert_with(|| standard_sizes.closest(size.value()));
        }
    }

    /// Explicit override; replaces any existing entry.
    pub fn set_mapping(&mut self, size: SizeKey, standard: f64) {
        log::debug!("Mapping {}px -> {}px", size, standard);
        self.entries.insert(size, standard);
    }

    /// Recomputes every unique size with `closest`, discarding overrides.
    pub fn reset_all(&mut self, unique_sizes: &[SizeKey], standard_sizes: &StandardSizes) {
        self.entries.clear();
        self.seed_defaults(unique_sizes, standard_sizes);
    }

    pub fn get(&self, size: SizeKey) -> Option<f64> {
        self.entries.get(&size).copied()
    }

    pub fn entries(&self) -> Vec<MappingEntry> {
        self.entries
            .iter()
            .map(|(&size, &standard)| MappingEntry { size, standard })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(sizes: &[f64]) -> Vec<SizeKey> {
        sizes.iter().copied().map(SizeKey::from_size).collect()
    }

    #[test]
    fn test_seed_defaults_picks_closest() {
        let unique = keys(&[11.0, 23.5]);
        let standard = StandardSizes::new([12.0, 24.0, 36.0]).unwrap();
        let mut mapper = SizeMapper::new();
        mapper.seed_defaults(&unique, &standard);
        assert_eq!(mapper.get(unique[0]), Some(12.0));
        assert_eq!(mapper.get(unique[1]), Some(24.0));
        assert_eq!(mapper.len(), 2);
    }

    #[test]
    fn test_seed_defaults_keeps_overrides() {
        let unique = keys(&[11.0, 23.5]);
        let standard = StandardSizes::new([12.0, 24.0]).unwrap();
        let mut mapper = SizeMapper::new();
        mapper.set_mapping(unique[0], 24.0);
        mapper.seed_defaults(&unique, &standard);
        assert_eq!(mapper.get(unique[0]), Some(24.0));

        // A changed standard size list still does not touch existing entries.
        let narrower = StandardSizes::new([10.0]).unwrap();
        mapper.seed_defaults(&unique, &narrower);
        assert_eq!(mapper.get(unique[1]), Some(24.0));
    }

    #[test]
    fn test_reset_all_discards_overrides() {
        let unique = keys(&[11.0]);
        let standard = StandardSizes::new([12.0, 24.0]).unwrap();
        let mut mapper = SizeMapper::new();
        mapper.set_mapping(unique[0], 24.0);
        mapper.set_mapping(SizeKey::from_size(99.0), 24.0);
        mapper.reset_all(&unique, &standard);
        assert_eq!(
            mapper.entries(),
            vec![MappingEntry {
                size: unique[0],
                standard: 12.0
            }]
        );
    }

    #[test]
    fn test_closest_tie_goes_to_smaller() {
        let standard = StandardSizes::new([24.0, 12.0]).unwrap();
        assert_eq!(closest(18.0, &standard), 12.0);
    }
}
