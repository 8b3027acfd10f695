//! Line differ based on longest-matching-block recursion.
//!
//! [`LineDiffer`] aligns two sequences by repeatedly taking the longest
//! contiguous run of equal items and recursing on what lies to either side.
//! When several runs share the maximum length, the one starting earliest in
//! the old sequence wins, then the one starting earliest in the new sequence.
//! Items are compared by exact equality.
//!
//! Once the new sequence has [`POPULAR_MIN_LEN`] items or more, items that
//! occur in it more than `len / 100 + 1` times (blank lines, running headers,
//! page numbers) cannot seed a match. A match found from the remaining items
//! is then extended across neighbouring equal items, popular or not, which
//! keeps the search fast on long documents.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

/// Length of the new sequence from which popular items stop seeding matches.
pub const POPULAR_MIN_LEN: usize = 200;

/// A run of `len` equal items starting at `old_start` / `new_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub old_start: usize,
    pub new_start: usize,
    pub len: usize,
}

/// One step of an alignment between an old and a new sequence.
///
/// Ranges index into the sequences passed to [`LineDiffer::new`]. Applying
/// the ops in order, the old-side ranges tile the old sequence and the
/// new-side ranges tile the new sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    /// `old` and `new` hold equal items.
    Equal { old: Range<usize>, new: Range<usize> },
    /// `old` is present only in the old sequence; `new_index` is where it
    /// would sit in the new sequence.
    Delete { old: Range<usize>, new_index: usize },
    /// `new` is present only in the new sequence; `old_index` is where it
    /// would sit in the old sequence.
    Insert { old_index: usize, new: Range<usize> },
    /// `old` was replaced by `new`. Only produced by [`LineDiffer::opcodes`].
    Replace { old: Range<usize>, new: Range<usize> },
}

impl DiffOp {
    /// The range this op covers in the old sequence (empty for inserts).
    pub fn old_range(&self) -> Range<usize> {
        match self {
            DiffOp::Equal { old, .. } | DiffOp::Delete { old, .. } | DiffOp::Replace { old, .. } => {
                old.clone()
            }
            DiffOp::Insert { old_index, .. } => *old_index..*old_index,
        }
    }

    /// The range this op covers in the new sequence (empty for deletes).
    pub fn new_range(&self) -> Range<usize> {
        match self {
            DiffOp::Equal { new, .. } | DiffOp::Insert { new, .. } | DiffOp::Replace { new, .. } => {
                new.clone()
            }
            DiffOp::Delete { new_index, .. } => *new_index..*new_index,
        }
    }

    /// Short lowercase name of the op.
    pub fn tag(&self) -> &'static str {
        match self {
            DiffOp::Equal { .. } => "equal",
            DiffOp::Delete { .. } => "delete",
            DiffOp::Insert { .. } => "insert",
            DiffOp::Replace { .. } => "replace",
        }
    }
}

/// Computes the alignment of two sequences.
///
/// Matching blocks are computed once in [`new`](LineDiffer::new); the ratio
/// and op views are derived from them.
pub struct LineDiffer<'a, T> {
    old: &'a [T],
    new: &'a [T],
    blocks: Vec<MatchingBlock>,
}

impl<'a, T: Eq + Hash> LineDiffer<'a, T> {
    pub fn new(old: &'a [T], new: &'a [T]) -> Self {
        let mut positions: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, item) in new.iter().enumerate() {
            positions.entry(item).or_default().push(j);
        }
        if new.len() >= POPULAR_MIN_LEN {
            let limit = new.len() / 100 + 1;
            positions.retain(|_, js| js.len() <= limit);
        }
        let blocks = matching_blocks(old, new, &positions);
        Self { old, new, blocks }
    }

    /// Matching blocks in ascending order, adjacent blocks merged.
    pub fn matching_blocks(&self) -> &[MatchingBlock] {
        &self.blocks
    }

    /// Total number of items covered by matching blocks.
    pub fn matched_len(&self) -> usize {
        self.blocks.iter().map(|b| b.len).sum()
    }

    /// Similarity in `[0, 1]`: `2 * matched / (old.len() + new.len())`.
    ///
    /// Two empty sequences are identical and score `1.0`.
    pub fn ratio(&self) -> f64 {
        let total = self.old.len() + self.new.len();
        if total == 0 {
            return 1.0;
        }
        (2 * self.matched_len()) as f64 / total as f64
    }

    /// Grouped ops, with unmatched pairs reported as [`DiffOp::Replace`].
    pub fn opcodes(&self) -> Vec<DiffOp> {
        let sentinel = MatchingBlock {
            old_start: self.old.len(),
            new_start: self.new.len(),
            len: 0,
        };
        let mut ops = Vec::new();
        let (mut i, mut j) = (0, 0);
        for block in self.blocks.iter().chain(std::iter::once(&sentinel)) {
            match (i < block.old_start, j < block.new_start) {
                (true, true) => ops.push(DiffOp::Replace {
                    old: i..block.old_start,
                    new: j..block.new_start,
                }),
                (true, false) => ops.push(DiffOp::Delete {
                    old: i..block.old_start,
                    new_index: j,
                }),
                (false, true) => ops.push(DiffOp::Insert {
                    old_index: i,
                    new: j..block.new_start,
                }),
                (false, false) => {}
            }
            i = block.old_start + block.len;
            j = block.new_start + block.len;
            if block.len > 0 {
                ops.push(DiffOp::Equal {
                    old: block.old_start..i,
                    new: block.new_start..j,
                });
            }
        }
        ops
    }

    /// Additive/subtractive edit script: every replace becomes a delete
    /// immediately followed by an insert.
    pub fn edit_script(&self) -> Vec<DiffOp> {
        let mut ops = Vec::new();
        for op in self.opcodes() {
            match op {
                DiffOp::Replace { old, new } => {
                    ops.push(DiffOp::Delete {
                        new_index: new.start,
                        old: old.clone(),
                    });
                    ops.push(DiffOp::Insert {
                        old_index: old.end,
                        new,
                    });
                }
                other => ops.push(other),
            }
        }
        ops
    }
}

fn matching_blocks<T: Eq + Hash>(
    old: &[T],
    new: &[T],
    positions: &HashMap<&T, Vec<usize>>,
) -> Vec<MatchingBlock> {
    let mut rows = RunRows::new(new.len());
    let mut found = Vec::new();
    let mut pending = vec![(0, old.len(), 0, new.len())];
    while let Some((old_lo, old_hi, new_lo, new_hi)) = pending.pop() {
        let m = longest_match(old, new, positions, &mut rows, old_lo..old_hi, new_lo..new_hi);
        if m.len == 0 {
            continue;
        }
        if old_lo < m.old_start && new_lo < m.new_start {
            pending.push((old_lo, m.old_start, new_lo, m.new_start));
        }
        let (old_end, new_end) = (m.old_start + m.len, m.new_start + m.len);
        if old_end < old_hi && new_end < new_hi {
            pending.push((old_end, old_hi, new_end, new_hi));
        }
        found.push(m);
    }
    found.sort_unstable();

    let mut merged: Vec<MatchingBlock> = Vec::with_capacity(found.len());
    for block in found {
        if let Some(last) = merged.last_mut() {
            if last.old_start + last.len == block.old_start
                && last.new_start + last.len == block.new_start
            {
                last.len += block.len;
                continue;
            }
        }
        merged.push(block);
    }
    merged
}

/// Run lengths for the previous and current row of the match search.
///
/// Both rows are indexed by position in the new sequence and are all zero
/// between searches; only the touched slots are reset.
struct RunRows {
    prev: Vec<usize>,
    prev_touched: Vec<usize>,
    cur: Vec<usize>,
    cur_touched: Vec<usize>,
}

impl RunRows {
    fn new(len: usize) -> Self {
        Self {
            prev: vec![0; len],
            prev_touched: Vec::new(),
            cur: vec![0; len],
            cur_touched: Vec::new(),
        }
    }

    /// Make the current row the previous one and clear the new current row.
    fn advance(&mut self) {
        for j in self.prev_touched.drain(..) {
            self.prev[j] = 0;
        }
        std::mem::swap(&mut self.prev, &mut self.cur);
        std::mem::swap(&mut self.prev_touched, &mut self.cur_touched);
    }

    /// Clear the last row of a finished search.
    fn reset(&mut self) {
        for j in self.prev_touched.drain(..) {
            self.prev[j] = 0;
        }
    }
}

/// Longest run of equal items inside the given windows.
///
/// `rows.prev[j]` holds the length of the run ending at `old[i - 1]` and
/// `new[j]`; scanning `i` upwards with a strict `>` keeps the earliest run.
/// Only items left in `positions` seed a run; the best run is then widened
/// over equal neighbours.
fn longest_match<T: Eq + Hash>(
    old: &[T],
    new: &[T],
    positions: &HashMap<&T, Vec<usize>>,
    rows: &mut RunRows,
    old_window: Range<usize>,
    new_window: Range<usize>,
) -> MatchingBlock {
    let mut best = MatchingBlock {
        old_start: old_window.start,
        new_start: new_window.start,
        len: 0,
    };
    for i in old_window.clone() {
        if let Some(js) = positions.get(&old[i]) {
            for &j in js {
                if j < new_window.start {
                    continue;
                }
                if j >= new_window.end {
                    break;
                }
                let k = j.checked_sub(1).map_or(0, |prev| rows.prev[prev]) + 1;
                rows.cur[j] = k;
                rows.cur_touched.push(j);
                if k > best.len {
                    best = MatchingBlock {
                        old_start: i + 1 - k,
                        new_start: j + 1 - k,
                        len: k,
                    };
                }
            }
        }
        rows.advance();
    }
    rows.reset();

    while best.old_start > old_window.start
        && best.new_start > new_window.start
        && old[best.old_start - 1] == new[best.new_start - 1]
    {
        best.old_start -= 1;
        best.new_start -= 1;
        best.len += 1;
    }
    while best.old_start + best.len < old_window.end
        && best.new_start + best.len < new_window.end
        && old[best.old_start + best.len] == new[best.new_start + best.len]
    {
        best.len += 1;
    }
    best
}
