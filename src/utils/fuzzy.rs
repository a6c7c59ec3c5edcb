//! Fuzzy phrase similarity
//!
//! Ratio in the style of difflib's `SequenceMatcher`: `2 * M / T`, where `M`
//! is the total size of the matching blocks and `T` the number of characters
//! in both strings. Matching blocks are found by taking the longest common
//! substring and recursing on both sides of it, which scores scattered
//! matches lower than a longest-common-subsequence diff would.

use std::collections::HashMap;

/// Element count from which characters occurring in more than 1% of `b` are
/// not used to start a match
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity of two strings in `[0, 1]`, ignoring case
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = Matcher::new(&a, &b).matched_chars();
    2.0 * matched as f64 / total as f64
}

struct Matcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, ascending
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> Matcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Total size of all matching blocks
    fn matched_chars(&self) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, size) = self.longest_match(alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }

            matched += size;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }

        matched
    }

    /// Longest block `a[i..i+size] == b[j..j+size]` inside the given ranges,
    /// earliest in `a` (then `b`) on ties
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // Length of the match ending at (i - 1, j), keyed by j
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            let positions = self.b2j.get(&self.a[i]).map(Vec::as_slice).unwrap_or(&[]);

            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }

                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
            run_lengths = next;
        }

        // Grow the block over characters left out of `b2j`
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_ignores_case() {
        assert_eq!(similarity("Stop The Timer", "stop the timer"), 1.0);
    }

    #[test]
    fn test_empty_transcript_scores_zero() {
        assert_eq!(similarity("", "stop the timer"), 0.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_ratio_values() {
        // 2 * 14 / (18 + 14)
        assert!((similarity("stop the timer now", "stop the timer") - 0.875).abs() < 1e-9);
        // 2 * 14 / (25 + 14): extra words dilute the ratio
        assert!(similarity("please stop the timer now", "stop the timer") < 0.8);
    }

    #[test]
    fn test_scattered_matches_score_below_subsequence() {
        // A subsequence diff finds 10 common characters (0.87); matching
        // blocks only find "lan", "d", "n", " gear" (2 * 9 / 23)
        assert!((similarity("langdn gear", "landing gear") - 18.0 / 23.0).abs() < 1e-9);
        assert!(similarity("langdn gear", "landing gear") < 0.8);
        assert!((similarity("laindn ggear", "landing gear") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_long_inputs_skip_popular_characters() {
        let a = "ab".repeat(150);
        let b = "ba".repeat(150);
        // Both characters are popular in `b`, so only the block grown around
        // an empty match survives
        assert_eq!(similarity(&a, &b), 0.0);
        assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_asr_variations_stay_close() {
        // Guardrail: common transcription slips must stay above the instant threshold
        assert!(similarity("landing gear", "landing gears") > 0.8);
        assert!(similarity("boost engines", "boost engine") > 0.8);

        // Distinct phrases must not
        assert!(similarity("deploy landing gear", "open the map") < 0.5);
        assert!(similarity("fire", "pause") < 0.5);
    }
}
