use serde::{Serialize, Deserialize};

use std::io::{Read, Write};

use crate::Result;


/// Runtime settings of a [`BoostingClassifier`](super::BoostingClassifier).
///
/// - `max_iterations` limits the rounds used for scoring
///   (`None` uses every stored round),
/// - `grouped` merges the rounds sharing a pivot before scoring.
///
/// # Example
/// ```
/// use textboost::ClassifierCustomizer;
///
/// let customizer = ClassifierCustomizer::new()
///     .max_iterations(50)
///     .grouped(true);
/// assert_eq!(customizer.active_iterations(200), 50);
/// assert_eq!(customizer.active_iterations(20), 20);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierCustomizer {
    max_iterations: Option<usize>,
    grouped: bool,
}


impl ClassifierCustomizer {
    /// Construct a new instance of [`ClassifierCustomizer`].
    /// By default every round is used and grouping is off.
    pub fn new() -> Self {
        Self::default()
    }


    /// Use at most `it` rounds for scoring.
    pub fn max_iterations(mut self, it: usize) -> Self {
        self.max_iterations = Some(it);
        self
    }


    /// Use every stored round for scoring.
    pub fn all_iterations(mut self) -> Self {
        self.max_iterations = None;
        self
    }


    /// Turn the grouping of rounds by pivot on or off.
    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }


    /// Returns the configured maximal number of rounds.
    pub fn iteration_limit(&self) -> Option<usize> {
        self.max_iterations
    }


    /// Returns `true` if grouping is on.
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }


    /// Returns `min(stored, max_iterations)`.
    #[inline]
    pub fn active_iterations(&self, stored: usize) -> usize {
        self.max_iterations.map_or(stored, |it| it.min(stored))
    }


    /// Write `self` as JSON.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }


    /// Read a customizer written by [`ClassifierCustomizer::to_writer`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let customizer = serde_json::from_reader(reader)?;
        Ok(customizer)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let customizer = ClassifierCustomizer::new()
            .max_iterations(7)
            .grouped(true);

        let mut buf = Vec::new();
        customizer.to_writer(&mut buf).unwrap();
        let result = ClassifierCustomizer::from_reader(&buf[..]).unwrap();
        assert_eq!(customizer, result, "expected {customizer:?}, got {result:?}.");
    }

    #[test]
    fn test_default_uses_everything() {
        let customizer = ClassifierCustomizer::default();
        assert_eq!(customizer.active_iterations(12), 12);
        assert!(!customizer.is_grouped());
    }
}
