//! String similarity primitive
//!
//! Ratcliff/Obershelp ratio: repeatedly take the longest common contiguous
//! block, recurse into the unmatched left and right remainders, and score
//! 2·M / T where M is the total matched length and T the combined length of
//! both strings. Symmetric; 1.0 for identical strings, 0.0 for strings with
//! no characters in common.

/// Similarity score in [0.0, 1.0] between two strings
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        // Two empty strings are identical
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f64 / total as f64
}

/// Total length of the non-overlapping, order-preserving matched blocks
fn matched_len(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..a_start], &b[..b_start])
        + matched_len(&a[a_start + len..], &b[b_start + len..])
}

/// Longest common contiguous block, earliest position on ties.
/// Returns (start in a, start in b, length). O(|a|·|b|) time, O(|b|) space.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        let mut current = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                current[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = current;
    }

    best
}
