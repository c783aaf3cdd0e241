//! Pure set algebra over normalized interval sequences.
//!
//! Every function here takes slices that are already sorted ascending by
//! start and pairwise disjoint (see [`is_normalized`]) and returns a vector
//! with the same property. Nothing re-checks the precondition outside of
//! debug assertions; [`IntervalSet`](crate::IntervalSet) is the type that
//! guarantees it. All operations are total: empty inputs give empty outputs.
//!
//! Sweeps are linear in the combined input length. Point lookups use a binary
//! search over starts.

use crate::interval::Interval;

/// `true` if `intervals` is sorted by start and no two intervals overlap.
///
/// Touching intervals (`end_i == start_{i+1}`) are allowed, except for a
/// zero-length interval sitting on its predecessor's end.
pub fn is_normalized(intervals: &[Interval]) -> bool {
    intervals.windows(2).all(|w| {
        w[0].end() < w[1].start() || (w[0].end() == w[1].start() && !w[1].is_empty())
    })
}

/// Sort raw intervals and merge the ones that strictly overlap.
///
/// Touching intervals stay separate so that adjacent bins survive
/// construction. A zero-length interval lying inside or on the end of its
/// predecessor is absorbed. Returns the normalized intervals and the number of
/// input intervals that were merged away.
pub fn normalize(mut intervals: Vec<Interval>) -> (Vec<Interval>, usize) {
    if is_normalized(&intervals) {
        return (intervals, 0);
    }

    intervals.sort_by(|a, b| {
        a.start()
            .total_cmp(&b.start())
            .then(a.end().total_cmp(&b.end()))
    });

    let input_len = intervals.len();
    let mut out: Vec<Interval> = Vec::with_capacity(input_len);
    for iv in intervals {
        match out.last_mut() {
            Some(cur) if iv.start() < cur.end() || (iv.is_empty() && iv.start() <= cur.end()) => {
                if iv.end() > cur.end() {
                    *cur = Interval::new_unchecked(cur.start(), iv.end());
                }
            }
            _ => out.push(iv),
        }
    }

    let merged = input_len - out.len();
    (out, merged)
}

/// Union of two normalized sequences.
///
/// Intervals that overlap or touch (`end_i >= start_{i+1}`) are merged into
/// one.
pub fn union(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    debug_assert!(is_normalized(a) && is_normalized(b));

    let mut out: Vec<Interval> = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        let next = match (a.get(i), b.get(j)) {
            (Some(x), Some(y)) if x.start() <= y.start() => {
                i += 1;
                *x
            }
            (_, Some(y)) => {
                j += 1;
                *y
            }
            (Some(x), None) => {
                i += 1;
                *x
            }
            (None, None) => break,
        };

        match out.last_mut() {
            Some(cur) if next.start() <= cur.end() => {
                if next.end() > cur.end() {
                    *cur = Interval::new_unchecked(cur.start(), next.end());
                }
            }
            _ => out.push(next),
        }
    }

    out
}

/// Intersection of two normalized sequences.
///
/// Only non-empty overlaps are emitted.
pub fn intersection(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    debug_assert!(is_normalized(a) && is_normalized(b));

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (x, y) = (a[i], b[j]);
        let lo = x.start().max(y.start());
        let hi = x.end().min(y.end());
        if lo < hi {
            out.push(Interval::new_unchecked(lo, hi));
        }

        if x.end() < y.end() {
            i += 1;
        } else {
            j += 1;
        }
    }

    out
}

/// Coverage of `a` minus the coverage of `b`.
///
/// Each interval of `a` is clipped against the overlapping intervals of `b`
/// in order; empty survivors are dropped.
pub fn difference(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    debug_assert!(is_normalized(a) && is_normalized(b));

    let mut out = Vec::with_capacity(a.len());
    let mut j = 0;

    for x in a {
        // Intervals of `b` ending before `x` can't touch any later `x` either.
        while j < b.len() && b[j].end() <= x.start() {
            j += 1;
        }

        let mut cur = x.start();
        let mut k = j;
        while k < b.len() && b[k].start() < x.end() {
            let y = b[k];
            k += 1;
            if y.is_empty() || y.end() <= cur {
                continue;
            }
            if y.start() > cur {
                out.push(Interval::new_unchecked(cur, y.start()));
            }
            cur = cur.max(y.end());
            if cur >= x.end() {
                break;
            }
        }

        if cur < x.end() {
            out.push(Interval::new_unchecked(cur, x.end()));
        }
    }

    out
}

/// Merge consecutive intervals separated by a gap of at most `gap` seconds.
///
/// `gap = 0.0` merges touching intervals only.
pub fn merge_close(a: &[Interval], gap: f64) -> Vec<Interval> {
    debug_assert!(is_normalized(a));

    let mut out: Vec<Interval> = Vec::with_capacity(a.len());
    for &next in a {
        match out.last_mut() {
            Some(cur) if next.start() - cur.end() <= gap => {
                if next.end() > cur.end() {
                    *cur = Interval::new_unchecked(cur.start(), next.end());
                }
            }
            _ => out.push(next),
        }
    }
    out
}

/// Drop intervals shorter than `min_duration`.
pub fn drop_short(a: &[Interval], min_duration: f64) -> Vec<Interval> {
    a.iter()
        .copied()
        .filter(|iv| iv.duration() >= min_duration)
        .collect()
}

/// Drop intervals longer than `max_duration`.
pub fn drop_long(a: &[Interval], max_duration: f64) -> Vec<Interval> {
    a.iter()
        .copied()
        .filter(|iv| iv.duration() <= max_duration)
        .collect()
}

/// Index of the interval containing `t`, if any.
///
/// Binary search for the rightmost start `<= t`, then check its end.
pub fn find_containing(a: &[Interval], t: f64) -> Option<usize> {
    let idx = a.partition_point(|iv| iv.start() <= t);
    if idx == 0 {
        return None;
    }
    let candidate = idx - 1;
    a[candidate].contains(t).then_some(candidate)
}

/// `true` if some interval of `a` contains `t`.
pub fn contains(a: &[Interval], t: f64) -> bool {
    find_containing(a, t).is_some()
}

/// The parts of `within` not covered by `a`.
pub fn complement(a: &[Interval], within: Interval) -> Vec<Interval> {
    difference(&[within], a)
}

/// Split every interval into consecutive bins of `bin_size` seconds.
///
/// The last bin of each interval is clipped to the interval's end, so the
/// bins partition `a` exactly. Bin edges are computed as `start + k * size`
/// rather than by accumulation to keep them stable over long intervals.
/// `bin_size` must be finite and positive; callers validate it.
pub fn split(a: &[Interval], bin_size: f64) -> Vec<Interval> {
    debug_assert!(bin_size.is_finite() && bin_size > 0.0);

    let mut out = Vec::new();
    for iv in a {
        let mut k = 0u64;
        loop {
            let lo = iv.start() + (k as f64) * bin_size;
            if lo >= iv.end() {
                break;
            }
            let hi = (iv.start() + ((k + 1) as f64) * bin_size).min(iv.end());
            if hi > lo {
                out.push(Interval::new_unchecked(lo, hi));
            }
            k += 1;
        }
    }
    out
}

/// Sum of interval durations.
pub fn total_duration(a: &[Interval]) -> f64 {
    a.iter().map(Interval::duration).sum()
}
