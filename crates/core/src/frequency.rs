//! Symbol frequency counting.

/// Occurrence statistics for one symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyEntry {
    /// Number of occurrences of the symbol
    pub count: u64,
    /// Length of the input the count was taken over
    pub total: u64,
    /// `count / total`
    pub frequency: f64,
}

/// Per-byte frequency table, indexed by symbol value.
///
/// Only symbols that occurred have an entry, so iteration yields exactly the
/// observed alphabet in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    entries: [Option<FrequencyEntry>; 256],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            entries: [None; 256],
        }
    }

    /// Build a table from raw per-symbol weights.
    ///
    /// Symbols with a zero weight are left out. Used when frequencies come
    /// from somewhere other than a byte sample.
    pub fn from_weights(weights: &[(u8, f64)]) -> Self {
        let mut table = Self::new();
        for &(symbol, frequency) in weights {
            if frequency > 0.0 {
                table.entries[symbol as usize] = Some(FrequencyEntry {
                    count: 0,
                    total: 0,
                    frequency,
                });
            }
        }
        table
    }

    pub fn get(&self, symbol: u8) -> Option<&FrequencyEntry> {
        self.entries[symbol as usize].as_ref()
    }

    /// Number of distinct symbols observed.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }

    /// Iterate `(symbol, entry)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &FrequencyEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(s, e)| e.as_ref().map(|e| (s as u8, e)))
    }

    /// Sum of all frequencies (1.0 for a table built from a non-empty sample).
    pub fn total_frequency(&self) -> f64 {
        self.iter().map(|(_, e)| e.frequency).sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Count each byte of `bytes` and normalize by the input length.
///
/// Empty input yields an empty table.
pub fn build_frequency_table(bytes: &[u8]) -> FrequencyTable {
    let mut counts = [0u64; 256];
    for &byte in bytes {
        counts[byte as usize] += 1;
    }
    table_from_counts(&counts, bytes.len() as u64)
}

/// Normalize pre-counted occurrences against `total`.
pub(crate) fn table_from_counts(counts: &[u64; 256], total: u64) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for (symbol, &count) in counts.iter().enumerate() {
        if count > 0 {
            table.entries[symbol] = Some(FrequencyEntry {
                count,
                total,
                frequency: count as f64 / total as f64,
            });
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_frequencies() {
        let table = build_frequency_table(b"ABACAAACBC");
        let cases = [(b'A', 5, 0.5), (b'B', 2, 0.2), (b'C', 3, 0.3)];
        for (symbol, count, frequency) in cases {
            let entry = table.get(symbol).unwrap();
            assert_eq!(entry.count, count);
            assert_eq!(entry.total, 10);
            assert_eq!(entry.frequency, frequency);
        }
        assert_eq!(table.len(), 3);
        assert!(table.get(b'D').is_none());
    }

    #[test]
    fn test_frequencies_sum_to_one() {
        let table = build_frequency_table(b"A_DEAD_DAD_CEDED_A_BAD_BABE_A_BEADED_ABACA_BED");
        assert!((table.total_frequency() - 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_empty_input() {
        let table = build_frequency_table(b"");
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.total_frequency(), 0.0);
    }

    #[test]
    fn test_iteration_is_ascending() {
        let table = build_frequency_table(b"zyxzyz");
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, b"xyz".to_vec());
    }

    #[test]
    fn test_from_weights_skips_zero() {
        let table = FrequencyTable::from_weights(&[(0, 0.5), (1, 0.0), (2, 0.5)]);
        assert_eq!(table.len(), 2);
        assert!(table.get(1).is_none());
    }
}
