//! Lazy Cartesian products.
//!
//! Several operators choose one alternative per statement independently; the
//! outputs are the Cartesian product of those choices. The product is walked
//! as a mixed-radix counter so only the current index tuple is ever held in
//! memory, no matter how many combinations exist.

/// Iterator over all index tuples `t` with `t[i] < radices[i]`.
///
/// Tuples come out in little-endian counting order, starting from all zeros.
/// By convention operators put the unchanged alternative at index 0, so the
/// first tuple reproduces the input.
///
/// # Examples
///
/// ```
/// use pattern_ops::cartesian::MixedRadix;
///
/// let tuples: Vec<Vec<usize>> = MixedRadix::new(vec![2, 3]).collect();
/// assert_eq!(tuples.len(), 6);
/// assert_eq!(tuples[0], vec![0, 0]);
/// assert_eq!(tuples[1], vec![1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct MixedRadix {
    radices: Vec<usize>,
    current: Option<Vec<usize>>,
}

impl MixedRadix {
    /// Creates the product over the given radices. A zero radix makes the
    /// product empty; no radices at all yield a single empty tuple.
    #[must_use]
    pub fn new(radices: Vec<usize>) -> Self {
        let current = if radices.contains(&0) {
            None
        } else {
            Some(vec![0; radices.len()])
        };
        Self { radices, current }
    }

    /// Total number of tuples, saturating at `usize::MAX`.
    #[must_use]
    pub fn size(&self) -> usize {
        self.radices.iter().fold(1usize, |acc, r| acc.saturating_mul(*r))
    }
}

impl Iterator for MixedRadix {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.take()?;
        let mut next = out.clone();
        for (digit, radix) in next.iter_mut().zip(&self.radices) {
            *digit += 1;
            if *digit < *radix {
                self.current = Some(next);
                return Some(out);
            }
            *digit = 0;
        }
        // Wrapped around: `out` was the last tuple.
        Some(out)
    }
}
