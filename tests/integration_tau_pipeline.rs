//! Integration tests for the rank-correlation and inference pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end tau-b pipeline: from validated paired input,
//!   through the sorted counting passes, to the finalized statistic, z,
//!   and p-value.
//! - Exercise realistic sample regimes (ties, monotone trends, weak
//!   relationships, moderate n) rather than toy edge cases only.
//! - Exercise the clustered sandwich estimator on a multi-cluster sample
//!   alongside the statistic, as a host pipeline would.
//!
//! Coverage
//! --------
//! - `correlation::kendall::TauOutcome`:
//!   - Perfect concordance/discordance, tie-heavy patterns, n = 2, and
//!     degenerate dimensions through the public API.
//! - `correlation::order_tree::OrderStatTree`:
//!   - The public rank/duplicate and count-and-reset contracts on a
//!     realistic insertion sequence.
//! - `inference::sandwich`:
//!   - Clustered accumulation on a sample with interleaved group labels.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level helpers (tie-run registers,
//!   moment sums, rotation bookkeeping) — covered by unit tests.
//! - Python bindings and array marshalling — exercised at the Python
//!   package level.
//! - Randomized equivalence against the naive O(n²) reference — covered
//!   by the proptest suite in `property_tau.rs`.
use ndarray::array;
use rust_rankstats::correlation::{OrderStatTree, SampleAxis, TauError, TauOutcome};
use rust_rankstats::inference::clustered_covariance;

/// Build a noisy monotone sample: y follows x's order except at a fixed
/// set of swapped positions, giving a known concordance deficit.
fn monotone_with_swaps(n: usize, swaps: &[(usize, usize)]) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let mut y = x.clone();
    for &(i, j) in swaps {
        y.swap(i, j);
    }
    (x, y)
}

#[test]
/// Perfect concordance and discordance on [1..5] hit tau = ±1 exactly,
/// with identical two-tailed p-values.
fn perfect_monotone_samples_reach_unit_tau() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let y_up = x.clone();
    let y_down: Vec<f64> = x.iter().rev().copied().collect();

    let up = TauOutcome::kendall_tau_b(&x, &y_up).expect("concordant sample");
    let down = TauOutcome::kendall_tau_b(&x, &y_down).expect("discordant sample");

    assert_eq!(up.tau(), 1.0);
    assert_eq!(down.tau(), -1.0);
    assert_eq!(up.p_value(), down.p_value());

    let p = up.p_value().expect("n = 5 has a p-value");
    assert!(p < 0.05, "a perfect rank agreement on 5 points is significant, got p = {p}");
}

#[test]
/// The symmetric tie pattern from the statistic's contract: tau = 0 for
/// x = [1,1,2,2], y = [1,2,1,2].
fn symmetric_tie_pattern_is_uncorrelated() {
    let outcome =
        TauOutcome::kendall_tau_b(&[1.0, 1.0, 2.0, 2.0], &[1.0, 2.0, 1.0, 2.0]).expect("ties ok");
    assert_eq!(outcome.tau(), 0.0);
}

#[test]
/// A mostly monotone sample with a few swapped ranks stays strongly but
/// not perfectly correlated, and its significance weakens as more swaps
/// are introduced.
fn swapped_ranks_weaken_tau_and_significance() {
    let (x1, y1) = monotone_with_swaps(20, &[(3, 4)]);
    let (x2, y2) = monotone_with_swaps(20, &[(3, 4), (8, 11), (0, 15)]);

    let light = TauOutcome::kendall_tau_b(&x1, &y1).expect("light noise");
    let heavy = TauOutcome::kendall_tau_b(&x2, &y2).expect("heavy noise");

    assert!(light.tau() < 1.0 && light.tau() > 0.9, "one swap: tau = {}", light.tau());
    assert!(heavy.tau() < light.tau(), "more swaps must not increase tau");
    let (p_light, p_heavy) =
        (light.p_value().expect("p"), heavy.p_value().expect("p"));
    assert!(p_light <= p_heavy, "weaker agreement cannot be more significant");
}

#[test]
/// Degenerate dimensions surface as structured errors through the public
/// API, with the offending axis named, and n = 2 carries no p-value.
fn degenerate_and_minimal_samples_are_reported() {
    let constant = vec![2.5; 5];
    let varying = vec![1.0, 4.0, 2.0, 5.0, 3.0];

    match TauOutcome::kendall_tau_b(&varying, &constant) {
        Err(TauError::DegenerateAxis(SampleAxis::Y)) => {}
        other => panic!("expected DegenerateAxis(Y), got {other:?}"),
    }
    match TauOutcome::kendall_tau_b(&constant, &varying) {
        Err(TauError::DegenerateAxis(SampleAxis::X)) => {}
        other => panic!("expected DegenerateAxis(X), got {other:?}"),
    }

    let minimal = TauOutcome::kendall_tau_b(&[0.0, 1.0], &[1.0, 0.0]).expect("n = 2 yields tau");
    assert_eq!(minimal.tau(), -1.0);
    assert!(minimal.p_value().is_none(), "n = 2 has no defined variance");
}

#[test]
/// Validation failures arrive before any counting work: mismatched
/// lengths, short samples, and non-finite values each get their own
/// error variant.
fn malformed_inputs_are_rejected_up_front() {
    assert!(matches!(
        TauOutcome::kendall_tau_b(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
        Err(TauError::LengthMismatch { x_len: 3, y_len: 2 })
    ));
    assert!(matches!(
        TauOutcome::kendall_tau_b(&[1.0], &[1.0]),
        Err(TauError::InsufficientData { len: 1 })
    ));
    assert!(matches!(
        TauOutcome::kendall_tau_b(&[1.0, f64::NAN], &[1.0, 2.0]),
        Err(TauError::InvalidData(_))
    ));
}

#[test]
/// The order-statistics tree honors its public contract on a realistic
/// interleaved sequence: ranks count strictly-smaller prior occurrences,
/// the root size tracks the number of insertions, and the destructive
/// count-and-reset recovers each multiset entry exactly once.
fn order_tree_contract_over_interleaved_insertions() {
    let keys = [0.5, 2.0, 0.5, -1.0, 2.0, 2.0, 0.5, 3.5];
    let mut tree = OrderStatTree::new();

    let mut last_rank_of_2 = 0;
    for &key in &keys {
        let (num_lt, _) = tree.insert(key);
        if key == 2.0 {
            last_rank_of_2 = num_lt;
        }
    }
    assert_eq!(tree.len(), keys.len() as u64);
    // At the final insert of 2.0, strictly smaller keys were {0.5, 0.5, -1.0}.
    assert_eq!(last_rank_of_2, 3);

    assert_eq!(tree.count_and_reset(0.5), 3);
    assert_eq!(tree.count_and_reset(2.0), 3);
    assert_eq!(tree.count_and_reset(-1.0), 1);
    assert_eq!(tree.count_and_reset(3.5), 1);
    assert_eq!(tree.count_and_reset(0.5), 1, "reset keys answer with the sentinel");
}

#[test]
/// The clustered sandwich estimator accumulates per-cluster rank-1 sums
/// on an interleaved three-cluster sample, and its output dimensions
/// follow the design pseudoinverse and residual matrices.
fn clustered_covariance_on_interleaved_groups() {
    // 5 subjects, 2 coefficients, 3 outcomes, clusters interleaved.
    let design_pinv = array![
        [1.0, 0.0, -1.0, 0.5, 2.0],
        [0.0, 1.0, 1.0, -0.5, 0.0],
    ];
    let residuals = array![
        [1.0, 0.0, 2.0],
        [0.0, 1.0, -1.0],
        [2.0, 1.0, 0.0],
        [1.0, -1.0, 1.0],
        [0.5, 0.5, 0.5],
    ];
    let groups = [0usize, 1, 0, 2, 1];

    let cov = clustered_covariance(residuals.view(), design_pinv.view(), &groups)
        .expect("well-shaped sample");

    assert_eq!(cov.dim(), (2, 3));
    // Every entry is a sum of squares and therefore non-negative.
    assert!(cov.iter().all(|&v| v >= 0.0));

    // Cluster 0 contributes (col0·row0 + col2·row2) squared; spot-check
    // the (0, 0) entry by hand:
    //   cluster 0: 1·1 + (-1)·2 = -1          → 1
    //   cluster 1: 0·0 + 2·0.5  = 1           → 1
    //   cluster 2: 0.5·1        = 0.5         → 0.25
    assert!((cov[[0, 0]] - 2.25).abs() < 1e-12);
}
