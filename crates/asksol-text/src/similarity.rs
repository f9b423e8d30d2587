//! Character-alignment similarity.
//!
//! `ratio = 2·M / T` where `M` is the total size of the matching blocks found
//! by repeatedly taking the longest common substring and recursing on the
//! unmatched left and right sides, and `T` is the combined length.

use std::collections::HashMap;

/// Case-insensitive, symmetric similarity in `[0, 1]`.
///
/// Both strings are lowercased and put in lexicographic order before
/// alignment, so argument order never changes the result.
pub fn similarity(a: &str, b: &str) -> f64 {
	let a = a.to_lowercase();
	let b = b.to_lowercase();
	let (first, second) = if a <= b { (a, b) } else { (b, a) };
	let first: Vec<char> = first.chars().collect();
	let second: Vec<char> = second.chars().collect();
	let total = first.len() + second.len();
	if total == 0 { return 1.0; }
	let matched = Aligner::new(&first, &second).matched_len();
	2.0 * matched as f64 / total as f64
}

struct Aligner<'a> {
	a: &'a [char],
	b: &'a [char],
	/// Positions of every char in `b`, ascending.
	b2j: HashMap<char, Vec<usize>>,
}

impl<'a> Aligner<'a> {
	fn new(a: &'a [char], b: &'a [char]) -> Self {
		let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
		for (j, c) in b.iter().enumerate() { b2j.entry(*c).or_default().push(j); }
		Self { a, b, b2j }
	}

	/// Longest block `a[i..i+k] == b[j..j+k]` inside the given window.
	/// Ties go to the smallest `i`, then the smallest `j`.
	fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
		let mut best = (alo, blo, 0);
		// j2len[j] = length of the match ending at a[i-1], b[j]
		let mut j2len: HashMap<usize, usize> = HashMap::new();
		for i in alo..ahi {
			let mut next: HashMap<usize, usize> = HashMap::new();
			if let Some(positions) = self.b2j.get(&self.a[i]) {
				for &j in positions {
					if j < blo { continue; }
					if j >= bhi { break; }
					let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
					next.insert(j, k);
					if k > best.2 { best = (i + 1 - k, j + 1 - k, k); }
				}
			}
			j2len = next;
		}
		best
	}

	fn matched_len(&self) -> usize {
		let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
		let mut matched = 0;
		while let Some((alo, ahi, blo, bhi)) = pending.pop() {
			let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
			if k == 0 { continue; }
			matched += k;
			if alo < i && blo < j { pending.push((alo, i, blo, j)); }
			if i + k < ahi && j + k < bhi { pending.push((i + k, ahi, j + k, bhi)); }
		}
		matched
	}
}
