//! correlation::order_tree — augmented order-statistics red-black tree.
//!
//! Purpose
//! -------
//! Provide the balanced search tree that powers the O(n log n) Kendall
//! tau-b counting pass. Each node stores a scalar key, the number of times
//! that exact key has been inserted, and the total occurrence count of its
//! subtree, so that a single insertion can simultaneously report the rank
//! of the new key (how many previously inserted keys are strictly smaller)
//! and its updated duplicate count.
//!
//! Key behaviors
//! -------------
//! - [`OrderStatTree::insert`] adds one occurrence of a key in O(log n)
//!   and returns `(num_lt, num_eq)`: the subtree size strictly to the
//!   key's left at lookup time, and the key's new occurrence count.
//! - [`OrderStatTree::count_and_reset`] returns a key's occurrence count
//!   and destructively resets it to the sentinel value 1, which the
//!   tie-correction pass relies on to account for each tie group exactly
//!   once across repeated equal values.
//! - Balancing follows the 2-3 left-leaning red-black scheme: color flips
//!   push black links up, a lone right-leaning red link is rotated left,
//!   and two consecutive left red links are rotated right.
//!
//! Invariants & assumptions
//! ------------------------
//! - Red-black: no red node has a red child, every root-to-nil path
//!   crosses the same number of black nodes, and the root is repainted
//!   black after every insertion.
//! - Augmentation: a node's `branch_count` always equals its own `count`
//!   plus the `branch_count` of both children. Every rotation and color
//!   flip recomputes the sizes of the touched nodes from their (possibly
//!   new) children before returning; this is what keeps the rank query
//!   valid after rebalancing.
//! - Keys must admit a total order. NaN keys are a caller bug: callers in
//!   this crate validate inputs for finiteness before any key reaches the
//!   tree, and an incomparable key aborts with a diagnostic rather than
//!   silently corrupting counts.
//! - After `count_and_reset`, subtree sizes are deliberately NOT rewound;
//!   from that point the tree only answers further `count_and_reset`
//!   queries, never rank queries.
//!
//! Conventions
//! -----------
//! - Child links are exclusively owned (`Option<Box<Node>>`); rotations
//!   are pointer reassignments with no allocation.
//! - Disposal is RAII: dropping the tree releases every node, on early
//!   error returns as well as on the normal path. Depth is O(log n), so
//!   the recursive drop cannot overflow the stack.
//!
//! Downstream usage
//! ----------------
//! - `correlation::kendall` builds one tree over the x-values and one over
//!   the y-values of a sorted sample, consuming the per-insertion counts
//!   in its concordance and tie-correction passes.
//!
//! Testing notes
//! -------------
//! - Unit tests below verify the rank/duplicate contract of `insert`, the
//!   sentinel behavior of `count_and_reset`, and the red-black plus
//!   augmentation invariants after randomized insertion sequences.
use std::cmp::Ordering;

struct Node {
    key: f64,
    /// Occurrences of `key` inserted so far (reset to 1 by `count_and_reset`).
    count: u64,
    /// Total occurrences in this subtree: `count` + both children's totals.
    branch_count: u64,
    red: bool,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

/// OrderStatTree — duplicate-counting search tree with subtree-size ranks.
///
/// Purpose
/// -------
/// Own the root of an augmented left-leaning red-black tree over `f64`
/// keys and expose the two operations the tau-b passes need: rank-reporting
/// insertion and the destructive per-key occurrence query.
///
/// Key behaviors
/// -------------
/// - [`insert`](Self::insert) and [`count_and_reset`](Self::count_and_reset)
///   as described at module level.
/// - [`len`](Self::len) reports the total number of insertions (the root's
///   subtree size), which equals the sample size after a full pass.
///
/// Invariants
/// ----------
/// - The red-black and augmentation invariants documented at module level
///   hold between any two public calls, up to the documented staleness of
///   subtree sizes after the first `count_and_reset`.
///
/// Performance
/// -----------
/// - `insert` and `count_and_reset` are O(log n); the tree allocates one
///   node per distinct key, so memory is O(distinct keys).
///
/// Notes
/// -----
/// - Each statistic computation owns its trees exclusively; nothing here
///   is shared or `'static`, so independent computations are parallel-safe
///   without synchronization.
pub struct OrderStatTree {
    root: Option<Box<Node>>,
}

impl OrderStatTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        OrderStatTree { root: None }
    }

    /// Total occurrences inserted so far (the root's subtree size).
    pub fn len(&self) -> u64 {
        branch_count(&self.root)
    }

    /// Whether no key has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert one occurrence of `key`, reporting its rank and multiplicity.
    ///
    /// Parameters
    /// ----------
    /// - `key`: `f64`
    ///   Scalar key to insert. Must be comparable under `partial_cmp`
    ///   (i.e. not NaN); callers validate this upstream.
    ///
    /// Returns
    /// -------
    /// `(u64, u64)`
    ///   - `num_lt`: total occurrences of keys strictly less than `key`
    ///     among everything inserted so far; the occurrence added by this
    ///     call is not counted.
    ///   - `num_eq`: the occurrence count of `key` after this insertion
    ///     (`1` for a first-seen key).
    ///
    /// Errors
    /// ------
    /// - Never returns an error.
    ///
    /// Panics
    /// ------
    /// - Panics with a diagnostic if `key` is incomparable (NaN). This is
    ///   treated as a programming defect: validated inputs cannot reach
    ///   this state.
    ///
    /// Notes
    /// -----
    /// - The rank is accumulated on the way back up from the recursion,
    ///   after the child insertion has completed, so it reflects the tree
    ///   contents at lookup time. The root is repainted black afterwards.
    pub fn insert(&mut self, key: f64) -> (u64, u64) {
        let mut num_lt: u64 = 0;
        let mut num_eq: u64 = 0;
        let mut root = insert_node(self.root.take(), key, &mut num_lt, &mut num_eq);
        root.red = false;
        self.root = Some(root);
        (num_lt, num_eq)
    }

    /// Return a key's occurrence count and reset it to the sentinel 1.
    ///
    /// Parameters
    /// ----------
    /// - `key`: `f64`
    ///   Key to look up; must be comparable (not NaN).
    ///
    /// Returns
    /// -------
    /// `u64`
    ///   The occurrence count recorded for `key` before the reset, `1` on
    ///   any later call for the same key, or `0` if the key was never
    ///   inserted (a silent no-op that correct usage never triggers).
    ///
    /// Notes
    /// -----
    /// - The reset is intentional and destructive: the tie-correction pass
    ///   revisits every row of the sorted sample, and the sentinel makes
    ///   repeated equal values contribute their tie group exactly once.
    /// - Subtree sizes are not adjusted; rank queries are invalid after
    ///   the first reset.
    pub fn count_and_reset(&mut self, key: f64) -> u64 {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            match key.partial_cmp(&node.key).expect("order-statistics tree key must not be NaN") {
                Ordering::Equal => {
                    let count = node.count;
                    node.count = 1;
                    return count;
                }
                Ordering::Greater => cursor = node.right.as_deref_mut(),
                Ordering::Less => cursor = node.left.as_deref_mut(),
            }
        }
        0
    }
}

impl Default for OrderStatTree {
    fn default() -> Self {
        Self::new()
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Subtree occurrence total of an optional node (0 for nil).
#[inline]
fn branch_count(node: &Option<Box<Node>>) -> u64 {
    node.as_ref().map_or(0, |n| n.branch_count)
}

/// Whether an optional node is a red link (nil links are black).
#[inline]
fn is_red(node: &Option<Box<Node>>) -> bool {
    node.as_ref().is_some_and(|n| n.red)
}

/// Recompute a node's subtree size from its current children and count.
#[inline]
fn update_branch_count(node: &mut Node) {
    node.branch_count = branch_count(&node.left) + branch_count(&node.right) + node.count;
}

/// Make a right-leaning red link lean left. Sizes of both touched nodes
/// are recomputed from their new children before returning.
fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let mut x = node.right.take().expect("rotate_left requires a right child");
    node.right = x.left.take();
    x.red = node.red;
    node.red = true;
    update_branch_count(&mut node);
    x.left = Some(node);
    update_branch_count(&mut x);
    x
}

/// Make a left-leaning red link lean right; mirror of [`rotate_left`].
fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let mut x = node.left.take().expect("rotate_right requires a left child");
    node.left = x.right.take();
    x.red = node.red;
    node.red = true;
    update_branch_count(&mut node);
    x.right = Some(node);
    update_branch_count(&mut x);
    x
}

/// Flip the colors of a node and its two children, pushing a black link up.
fn flip_colors(node: &mut Node) {
    node.red = !node.red;
    if let Some(left) = node.left.as_deref_mut() {
        left.red = !left.red;
    }
    if let Some(right) = node.right.as_deref_mut() {
        right.red = !right.red;
    }
}

/// Recursive insertion into the subtree rooted at `node`.
///
/// Writes the rank of `key` into `num_lt` and its updated occurrence count
/// into `num_eq`. The rank contribution of each ancestor on a rightward
/// step is added after the child call returns, so it counts upwards from
/// the leaf against the pre-insertion left subtrees.
fn insert_node(
    node: Option<Box<Node>>, key: f64, num_lt: &mut u64, num_eq: &mut u64,
) -> Box<Node> {
    let mut node = match node {
        None => {
            *num_lt = 0;
            *num_eq = 1;
            return Box::new(Node {
                key,
                count: 1,
                branch_count: 1,
                red: true,
                left: None,
                right: None,
            });
        }
        Some(existing) => existing,
    };

    match key.partial_cmp(&node.key).expect("order-statistics tree key must not be NaN") {
        Ordering::Equal => {
            node.count += 1;
            node.branch_count += 1;
            *num_lt = branch_count(&node.left);
            *num_eq = node.count;
            return node;
        }
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, num_lt, num_eq));
            // Everything at or left of this ancestor is strictly smaller.
            *num_lt += branch_count(&node.left) + node.count;
        }
        Ordering::Less => {
            node.left = Some(insert_node(node.left.take(), key, num_lt, num_eq));
        }
    }

    // 2-3 LLRB fix-up, then restore the augmentation from the new children.
    if is_red(&node.left) && is_red(&node.right) {
        flip_colors(&mut node);
    }
    if !is_red(&node.left) && is_red(&node.right) {
        node = rotate_left(node);
    }
    if is_red(&node.left) && node.left.as_ref().is_some_and(|l| is_red(&l.left)) {
        node = rotate_right(node);
    }
    update_branch_count(&mut node);

    node
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The (num_lt, num_eq) contract of `insert` for new and duplicate keys.
    // - The sentinel behavior of `count_and_reset` (multiset recovery once,
    //   then 1; absent keys return 0).
    // - Red-black and subtree-size invariants after randomized insertions.
    //
    // They intentionally DO NOT cover:
    // - The Kendall tau-b passes that consume these counts; those are
    //   exercised in `correlation::kendall` and in the integration tests.
    // -------------------------------------------------------------------------

    /// Walk the tree checking size, red-red, and black-height invariants.
    /// Returns the black height of the subtree.
    fn check_invariants(node: &Option<Box<Node>>) -> u64 {
        match node {
            None => 1,
            Some(n) => {
                assert!(
                    n.count >= 1,
                    "node occurrence count must be at least 1, got {}",
                    n.count
                );
                assert_eq!(
                    n.branch_count,
                    branch_count(&n.left) + branch_count(&n.right) + n.count,
                    "subtree size must equal own count plus children's sizes"
                );
                if n.red {
                    assert!(
                        !is_red(&n.left) && !is_red(&n.right),
                        "red node must not have a red child"
                    );
                }
                let left_black = check_invariants(&n.left);
                let right_black = check_invariants(&n.right);
                assert_eq!(left_black, right_black, "black heights must match on all paths");
                left_black + if n.red { 0 } else { 1 }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the rank/duplicate contract of `insert` on a small hand-checked
    // sequence containing duplicates.
    //
    // Given
    // -----
    // - The insertion sequence [5.0, 3.0, 8.0, 5.0, 1.0, 5.0].
    //
    // Expect
    // ------
    // - Each call returns the number of strictly smaller prior occurrences
    //   and the key's updated multiplicity.
    fn insert_reports_rank_and_multiplicity() {
        // Arrange
        let mut tree = OrderStatTree::new();

        // Act & Assert
        assert_eq!(tree.insert(5.0), (0, 1));
        assert_eq!(tree.insert(3.0), (0, 1));
        assert_eq!(tree.insert(8.0), (2, 1), "8 exceeds both 5 and 3");
        assert_eq!(tree.insert(5.0), (1, 2), "only 3 is strictly below 5");
        assert_eq!(tree.insert(1.0), (0, 1));
        assert_eq!(tree.insert(5.0), (2, 3), "1 and 3 are strictly below 5");
        assert_eq!(tree.len(), 6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the root's subtree size equals the number of insertions and
    // that the red-black plus augmentation invariants hold after a
    // pseudo-random insertion sequence with duplicates.
    //
    // Given
    // -----
    // - 500 keys generated by a small multiplicative congruence, folded
    //   into 17 buckets to force duplicates.
    //
    // Expect
    // ------
    // - `len()` equals 500 after all insertions.
    // - `check_invariants` passes at every 50th step and at the end.
    fn randomized_insertions_preserve_invariants() {
        // Arrange
        let mut tree = OrderStatTree::new();
        let mut state: u64 = 0x2545F4914F6CDD1D;

        // Act
        for i in 1..=500u64 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let key = (state % 17) as f64;
            tree.insert(key);
            if i % 50 == 0 {
                check_invariants(&tree.root);
            }
        }

        // Assert
        assert_eq!(tree.len(), 500);
        check_invariants(&tree.root);
    }

    #[test]
    // Purpose
    // -------
    // Verify that ascending and descending insertion orders (the classic
    // degenerate cases for unbalanced trees) keep the tree balanced and
    // the ranks exact.
    //
    // Given
    // -----
    // - Keys 0..200 inserted ascending into one tree and descending into
    //   another.
    //
    // Expect
    // ------
    // - Ascending: every insert reports rank i, count 1.
    // - Descending: every insert reports rank 0, count 1.
    // - Both trees satisfy the structural invariants.
    fn monotone_insertion_orders_stay_balanced() {
        // Arrange
        let mut ascending = OrderStatTree::new();
        let mut descending = OrderStatTree::new();

        // Act & Assert
        for i in 0..200u64 {
            assert_eq!(ascending.insert(i as f64), (i, 1));
            assert_eq!(descending.insert(-(i as f64)), (0, 1));
        }
        check_invariants(&ascending.root);
        check_invariants(&descending.root);
    }

    #[test]
    // Purpose
    // -------
    // Verify the `count_and_reset` round trip: one call per distinct key
    // recovers the inserted multiset, and any later call returns the
    // sentinel 1, never the original count again.
    //
    // Given
    // -----
    // - 2.0 inserted three times, 7.0 twice, and 9.0 once.
    //
    // Expect
    // ------
    // - First calls return 3, 2, 1 respectively.
    // - Second calls return 1 for every key.
    // - A key never inserted returns 0.
    fn count_and_reset_recovers_multiset_once() {
        // Arrange
        let mut tree = OrderStatTree::new();
        for key in [2.0, 7.0, 2.0, 9.0, 2.0, 7.0] {
            tree.insert(key);
        }

        // Act & Assert: first visit yields the full counts
        assert_eq!(tree.count_and_reset(2.0), 3);
        assert_eq!(tree.count_and_reset(7.0), 2);
        assert_eq!(tree.count_and_reset(9.0), 1);

        // Act & Assert: revisits yield the sentinel
        assert_eq!(tree.count_and_reset(2.0), 1);
        assert_eq!(tree.count_and_reset(7.0), 1);

        // Act & Assert: absent key is a silent no-op
        assert_eq!(tree.count_and_reset(4.0), 0);
    }
}
