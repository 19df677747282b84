//! Textual similarity ratio based on longest matching blocks.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both strings
//! and `M` is the number of characters covered by matching blocks. Blocks are
//! found by taking the longest common run, then recursing on the pieces to its
//! left and right (the same alignment `diff`-style tools use).

use std::collections::HashMap;

/// Sequences at least this long get the "popular element" heuristic: a
/// character occurring in more than 1% of positions is not used to seed matches.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Case-insensitive similarity in `[0.0, 1.0]`. Either side empty gives `0.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    if a == b {
        return 1.0;
    }

    // The block alignment is not symmetric in its arguments; fix an order.
    let (a, b) = if (a.len(), &a) <= (b.len(), &b) {
        (a, b)
    } else {
        (b, a)
    };

    let total = a.len() + b.len();
    let matched = Matcher::new(&a, &b).matching_characters();
    2.0 * matched as f64 / total as f64
}

struct Matcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each (non-popular) character in `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> Matcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Total size of all matching blocks.
    fn matching_characters(&self) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        matched
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given window.
    /// Earliest `i`, then earliest `j`, wins among equally long blocks.
    fn longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
        // j -> length of the match ending at (i - 1, j)
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied();
                    let k = prev.unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > best_k {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_k = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular characters never seed a match but may still extend one.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi
            && best_j + best_k < bhi
            && self.a[best_i + best_k] == self.b[best_j + best_k]
        {
            best_k += 1;
        }
        (best_i, best_j, best_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("", "shoes"), 0.0);
        assert_eq!(similarity("shoes", ""), 0.0);
    }

    #[test]
    fn identical_is_one() {
        assert_eq!(similarity("red running shoes", "red running shoes"), 1.0);
        assert_eq!(similarity("x", "x"), 1.0);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(similarity("Red Running Shoes", "red running shoes"), 1.0);
    }

    #[test]
    fn known_ratios() {
        // "abcd" vs "bcde": one block "bcd" -> 2*3/8
        assert!(approx(similarity("abcd", "bcde"), 0.75));
        // Disjoint alphabets.
        assert_eq!(similarity("abc", "xyz"), 0.0);
        // "red running shoes" vs "shoe": block "shoe" -> 2*4/21
        assert!(approx(similarity("red running shoes", "shoe"), 8.0 / 21.0));
    }

    #[test]
    fn symmetric_where_alignment_order_matters() {
        // Greedy block choice differs by argument order for this pair.
        assert_eq!(similarity("tide", "diet"), similarity("diet", "tide"));
        assert_eq!(similarity("tide", "diet"), 0.5);
    }

    #[test]
    fn symmetric_and_bounded() {
        let samples = [
            "wireless mouse",
            "Wireless Optical Mouse",
            "mouse pad",
            "red running shoes",
            "shoe",
            "a",
            "zzzz",
        ];
        for a in samples {
            for b in samples {
                let ab = similarity(a, b);
                assert_eq!(ab, similarity(b, a), "{a:?} vs {b:?}");
                assert!((0.0..=1.0).contains(&ab), "{a:?} vs {b:?} = {ab}");
            }
        }
    }

    #[test]
    fn long_inputs_with_popular_characters() {
        let long = "ab".repeat(150);
        assert_eq!(similarity(&long, &long), 1.0);
        let r = similarity(&long, "ab");
        assert!(r > 0.0 && r < 1.0);
        assert_eq!(r, similarity("ab", &long));
    }
}
