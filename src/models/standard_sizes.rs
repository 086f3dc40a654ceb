// src/models/standard_sizes.rs

use serde::{Deserialize, Serialize};

use crate::errors::{Result, StandardizeError};

/// Standard size inputs offered before the user edits anything.
pub const DEFAULT_STANDARD_SIZES: [f64; 8] = [8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 24.0, 32.0];

/// The user's target sizes: finite positive numbers sorted ascending.
///
/// Construction fails with [`StandardizeError::NoStandardSizes`] when no usable value
/// remains, so every `StandardSizes` holds at least one size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StandardSizes(Vec<f64>);

impl StandardSizes {
    /// Keeps the finite positive values, sorted ascending. Duplicates are tolerated.
    pub fn new<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sizes: Vec<f64> = values
            .into_iter()
            .filter(|size| size.is_finite() && *size > 0.0)
            .collect();
        if sizes.is_empty() {
            return Err(StandardizeError::NoStandardSizes);
        }
        sizes.sort_by(f64::total_cmp);
        Ok(StandardSizes(sizes))
    }

    /// Parses raw input strings; entries that are not numbers are skipped.
    pub fn parse_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Self> {
        Self::new(
            inputs
                .iter()
                .filter_map(|raw| raw.as_ref().trim().parse::<f64>().ok()),
        )
    }

    /// The standard size with the smallest absolute difference to `size`.
    /// On a tie the smaller standard size wins.
    pub fn closest(&self, size: f64) -> f64 {
        let mut best = self.0[0];
        for &candidate in &self.0[1..] {
            if (candidate - size).abs() < (best - size).abs() {
                best = candidate;
            }
        }
        best
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, size: f64) -> bool {
        self.0.iter().any(|&s| s == size)
    }
}

/// The structural list of standard-size inputs as typed by the user.
///
/// Values may be empty or non-numeric; they are only interpreted when converted to
/// [`StandardSizes`]. The list never drops below one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeInputs(Vec<String>);

impl SizeInputs {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inputs: Vec<String> = values.into_iter().map(Into::into).collect();
        if inputs.is_empty() {
            inputs.push(String::new());
        }
        SizeInputs(inputs)
    }

    pub fn from_sizes(sizes: &[f64]) -> Self {
        Self::new(sizes.iter().map(|size| size.to_string()))
    }

    /// Appends a new input; returns its index.
    pub fn add(&mut self, value: impl Into<String>) -> usize {
        self.0.push(value.into());
        self.0.len() - 1
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let slot = self.0.get_mut(index).ok_or_else(|| {
            StandardizeError::InvalidInput(format!("no standard size input at index {index}"))
        })?;
        *slot = value.into();
        Ok(())
    }

    /// Removes an input. The last remaining input is never removed.
    pub fn remove(&mut self, index: usize) -> Result<String> {
        if self.0.len() <= 1 {
            return Err(StandardizeError::MinimumSizeInputInvariant);
        }
        if index >= self.0.len() {
            return Err(StandardizeError::InvalidInput(format!(
                "no standard size input at index {index}"
            )));
        }
        Ok(self.0.remove(index))
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: at least one input exists.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn standard_sizes(&self) -> Result<StandardSizes> {
        StandardSizes::parse_inputs(&self.0)
    }
}

impl Default for SizeInputs {
    fn default() -> Self {
        Self::from_sizes(&DEFAULT_STANDARD_SIZES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sizes_sorted_and_filtered() {
        let sizes = StandardSizes::new([24.0, -1.0, 12.0, f64::NAN, 0.0, 12.0]).unwrap();
        assert_eq!(sizes.as_slice(), &[12.0, 12.0, 24.0]);
    }

    #[test]
    fn test_standard_sizes_rejects_empty() {
        assert!(matches!(
            StandardSizes::new(Vec::new()),
            Err(StandardizeError::NoStandardSizes)
        ));
        assert!(matches!(
            StandardSizes::parse_inputs(&["", "abc", "-3"]),
            Err(StandardizeError::NoStandardSizes)
        ));
    }

    #[test]
    fn test_closest_prefers_smaller_on_tie() {
        let sizes = StandardSizes::new([14.0, 10.0]).unwrap();
        assert_eq!(sizes.closest(12.0), 10.0);
        assert_eq!(sizes.closest(13.0), 14.0);
        assert_eq!(sizes.closest(100.0), 14.0);
        assert_eq!(sizes.closest(1.0), 10.0);
    }

    #[test]
    fn test_closest_minimizes_difference() {
        let sizes = StandardSizes::new([12.0, 24.0, 36.0]).unwrap();
        for probe in [0.5, 11.0, 17.9, 18.0, 18.1, 23.5, 29.0, 31.0, 99.0] {
            let chosen = sizes.closest(probe);
            assert!(sizes.contains(chosen));
            let best = sizes
                .iter()
                .map(|s| (s - probe).abs())
                .fold(f64::INFINITY, f64::min);
            assert_eq!((chosen - probe).abs(), best, "probe {probe}");
        }
        assert_eq!(sizes.closest(18.0), 12.0);
        assert_eq!(sizes.closest(30.0), 24.0);
    }

    #[test]
    fn test_size_inputs_keep_at_least_one() {
        let mut inputs = SizeInputs::new(["12", "24"]);
        assert_eq!(inputs.remove(0).unwrap(), "12");
        assert!(matches!(
            inputs.remove(0),
            Err(StandardizeError::MinimumSizeInputInvariant)
        ));
        assert_eq!(inputs.values(), &["24".to_string()]);

        let empty = SizeInputs::new(Vec::<String>::new());
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn test_size_inputs_edit() {
        let mut inputs = SizeInputs::new(["12"]);
        let index = inputs.add("");
        inputs.set(index, "18").unwrap();
        assert!(inputs.set(9, "1").is_err());
        assert!(matches!(
            inputs.remove(7),
            Err(StandardizeError::InvalidInput(_))
        ));
        assert_eq!(inputs.standard_sizes().unwrap().as_slice(), &[12.0, 18.0]);
    }

    #[test]
    fn test_default_inputs_parse() {
        let sizes = SizeInputs::default().standard_sizes().unwrap();
        assert_eq!(sizes.as_slice(), &DEFAULT_STANDARD_SIZES);
    }
}
