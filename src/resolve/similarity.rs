//! Sequence-alignment string similarity ("gestalt pattern matching").
//!
//! The score of two strings is `2·M / (|a| + |b|)`, where `M` is the number
//! of characters covered by matching blocks found by repeatedly taking the
//! longest common contiguous block and recursing on both sides of it. This
//! rewards shared runs of characters rather than counting edits, so
//! "Falcon 9 Block 5" sits much closer to "Falcon 9" than to "Falcon Heavy".

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::HashSet;

/// Minimum ratio for a candidate to count as a match at all.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Sequences at least this long drop "popular" characters from the index,
/// the usual guard against quadratic blow-up on long repetitive text.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Holds the second sequence indexed by character, so one query can be
/// compared against many candidates cheaply.
struct Indexed {
    b: Vec<char>,
    /// Character -> ascending positions in `b`.
    b2j: HashMap<char, Vec<usize>>,
}

impl Indexed {
    fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            let popular: HashSet<char> = b2j
                .iter()
                .filter(|(_, positions)| positions.len() > ntest)
                .map(|(c, _)| *c)
                .collect();
            for c in popular {
                b2j.remove(&c);
            }
        }

        Self { b, b2j }
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows.
    /// Ties go to the earliest `i`, then the earliest `j`.
    fn longest_match(&self, a: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        // j -> length of the match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|prev| j2len.get(&prev)).copied().unwrap_or(0) + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular characters are missing from the index; grow the block
        // across any of them that still match on either side.
        while best_i > alo && best_j > blo && a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }

    /// Total characters covered by matching blocks between `a` and `b`.
    fn matched_chars(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }

    fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let length = a.len() + self.b.len();
        if length == 0 {
            return 1.0;
        }
        2.0 * self.matched_chars(&a) as f64 / length as f64
    }
}

/// Similarity of `candidate` to `query` in `[0, 1]`.
pub fn ratio(candidate: &str, query: &str) -> f64 {
    Indexed::new(query).ratio(candidate)
}

/// Every candidate scoring at least `cutoff`, best first. Equal scores are
/// ordered by the candidate string, greatest first.
pub fn close_matches<'a, S: AsRef<str>>(query: &str, candidates: &'a [S], cutoff: f64) -> Vec<(f64, &'a str)> {
    let index = Indexed::new(query);
    let mut scored: Vec<(f64, &'a str)> = candidates
        .iter()
        .map(|c| (index.ratio(c.as_ref()), c.as_ref()))
        .filter(|(score, _)| *score >= cutoff)
        .collect();

    scored.sort_by(|x, y| rank(y, x));
    scored
}

/// The single best candidate scoring at least `cutoff`, if any.
pub fn best_match<'a, S: AsRef<str>>(query: &str, candidates: &'a [S], cutoff: f64) -> Option<&'a str> {
    best_match_index(query, candidates, cutoff).map(|i| candidates[i].as_ref())
}

/// Position of the best candidate scoring at least `cutoff`. When the winning
/// string appears more than once, the earliest position is returned.
pub fn best_match_index<S: AsRef<str>>(query: &str, candidates: &[S], cutoff: f64) -> Option<usize> {
    let index = Indexed::new(query);
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (i, (index.ratio(c.as_ref()), c.as_ref())))
        .filter(|(_, scored)| scored.0 >= cutoff)
        .min_by(|(_, x), (_, y)| rank(y, x))
        .map(|(i, _)| i)
}

fn rank(x: &(f64, &str), y: &(f64, &str)) -> Ordering {
    x.0.partial_cmp(&y.0)
        .unwrap_or(Ordering::Equal)
        .then_with(|| x.1.cmp(y.1))
}
