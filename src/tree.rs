use itertools::Itertools;

use crate::aggregate::{Aggregate, Gcd, MaxIndex};
use crate::error::TreeError;

/// A segment tree answering range aggregations with point updates.
///
/// Positions are 1-based. The tree is stored implicitly in a buffer of `4 * n`
/// slots: the root is slot `1` and the children of slot `i` are `2 * i` and
/// `2 * i + 1`. Node ranges are never stored; every traversal recomputes them
/// by splitting `[l, r]` at `(l + r) / 2`.
#[derive(Clone, Debug)]
pub struct SegmentTree<T, A>
where
    A: Aggregate<T>,
{
    values: Vec<T>,
    nodes: Vec<A::Output>,
    aggregate: A,
}

pub type MaxIndexTree<T> = SegmentTree<T, MaxIndex>;
pub type GcdTree = SegmentTree<i64, Gcd>;

impl<T, A> SegmentTree<T, A>
where
    A: Aggregate<T>,
{
    /// Builds a tree over the given sequence.
    ///
    /// Returns [`TreeError::Empty`] if the sequence has no elements.
    pub fn build<I>(into_iter: I, aggregate: A) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let values = into_iter.into_iter().collect_vec();
        if values.is_empty() {
            return Err(TreeError::Empty);
        }

        let nodes = vec![aggregate.identity(); 4 * values.len()];
        let mut tree = Self {
            values,
            nodes,
            aggregate,
        };
        tree.build_node(1, 1, tree.len());
        tracing::trace!(len = tree.len(), "segment tree built");
        Ok(tree)
    }

    /// Number of elements. Never zero.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The backing elements in position order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn aggregate(&self) -> &A {
        &self.aggregate
    }

    /// Returns the element at position `pos`.
    pub fn get(&self, pos: usize) -> Result<&T, TreeError> {
        self.check_position(pos)?;
        Ok(&self.values[pos - 1])
    }

    /// The aggregate over every element.
    pub fn total(&self) -> A::Output {
        self.nodes[1].clone()
    }

    /// Combines the elements at positions `left..=right`.
    ///
    /// Visits `O(log n)` nodes.
    pub fn query(&self, left: usize, right: usize) -> Result<A::Output, TreeError> {
        if left == 0 || left > right || right > self.len() {
            return Err(TreeError::InvalidRange {
                left,
                right,
                len: self.len(),
            });
        }
        Ok(self.query_node(1, 1, self.len(), left, right))
    }

    /// Replaces the element at position `pos` with `value`.
    ///
    /// Only the nodes on the path from the root to the leaf are recomputed.
    pub fn update(&mut self, pos: usize, value: T) -> Result<(), TreeError> {
        self.check_position(pos)?;
        self.values[pos - 1] = value;
        self.update_node(1, 1, self.len(), pos);
        tracing::trace!(pos, "segment tree updated");
        Ok(())
    }

    /// Checks that every leaf matches its element and every internal node is
    /// the combination of its children.
    pub fn is_consistent(&self) -> bool
    where
        A::Output: PartialEq,
    {
        self.node_consistent(1, 1, self.len())
    }

    fn check_position(&self, pos: usize) -> Result<(), TreeError> {
        if pos == 0 || pos > self.len() {
            return Err(TreeError::PositionOutOfBounds {
                pos,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn build_node(&mut self, node: usize, l: usize, r: usize) {
        if l == r {
            self.nodes[node] = self.aggregate.leaf(l, &self.values[l - 1]);
            return;
        }

        let mid = (l + r) / 2;
        self.build_node(2 * node, l, mid);
        self.build_node(2 * node + 1, mid + 1, r);
        self.pull(node);
    }

    fn query_node(&self, node: usize, l: usize, r: usize, ql: usize, qr: usize) -> A::Output {
        if ql > qr {
            return self.aggregate.identity();
        }
        if ql == l && qr == r {
            return self.nodes[node].clone();
        }

        let mid = (l + r) / 2;
        if qr <= mid {
            self.query_node(2 * node, l, mid, ql, qr)
        } else if ql > mid {
            self.query_node(2 * node + 1, mid + 1, r, ql, qr)
        } else {
            let left = self.query_node(2 * node, l, mid, ql, mid);
            let right = self.query_node(2 * node + 1, mid + 1, r, mid + 1, qr);
            self.aggregate.combine(&self.values, &left, &right)
        }
    }

    fn update_node(&mut self, node: usize, l: usize, r: usize, pos: usize) {
        if l == r {
            self.nodes[node] = self.aggregate.leaf(pos, &self.values[pos - 1]);
            return;
        }

        let mid = (l + r) / 2;
        if pos <= mid {
            self.update_node(2 * node, l, mid, pos);
        } else {
            self.update_node(2 * node + 1, mid + 1, r, pos);
        }
        self.pull(node);
    }

    fn pull(&mut self, node: usize) {
        self.nodes[node] = self.aggregate.combine(
            &self.values,
            &self.nodes[2 * node],
            &self.nodes[2 * node + 1],
        );
    }

    fn node_consistent(&self, node: usize, l: usize, r: usize) -> bool
    where
        A::Output: PartialEq,
    {
        if l == r {
            return self.nodes[node] == self.aggregate.leaf(l, &self.values[l - 1]);
        }

        let mid = (l + r) / 2;
        let expected = self.aggregate.combine(
            &self.values,
            &self.nodes[2 * node],
            &self.nodes[2 * node + 1],
        );
        self.nodes[node] == expected
            && self.node_consistent(2 * node, l, mid)
            && self.node_consistent(2 * node + 1, mid + 1, r)
    }
}

#[cfg(test)]
mod test {
    use crate::aggregate::{FnAggregate, Min, Sum};

    use super::*;

    #[test]
    fn gcd_query_test() {
        let mut tree = GcdTree::build([4, 6, 8], Gcd).unwrap();
        assert_eq!(tree.query(1, 3), Ok(2));
        tree.update(2, 3).unwrap();
        assert_eq!(tree.query(1, 3), Ok(1));
        assert_eq!(tree.query(2, 2), Ok(3));
        assert_eq!(tree.query(3, 3), Ok(8));
        assert!(tree.is_consistent());
    }

    #[test]
    fn gcd_zero_and_negative_test() {
        let mut tree = GcdTree::build([0, -12, 18, 0], Gcd).unwrap();
        assert_eq!(tree.query(1, 1), Ok(0));
        assert_eq!(tree.query(1, 2), Ok(12));
        assert_eq!(tree.query(1, 4), Ok(6));
        assert_eq!(tree.query(4, 4), Ok(0));

        tree.update(2, 0).unwrap();
        tree.update(3, 0).unwrap();
        assert_eq!(tree.total(), 0);
        assert!(tree.is_consistent());
    }

    #[test]
    fn max_index_query_test() {
        let mut tree = MaxIndexTree::build([3, 9, 4], MaxIndex).unwrap();
        assert_eq!(tree.query(1, 3), Ok(Some(2)));
        tree.update(2, 1).unwrap();
        assert_eq!(tree.query(1, 3), Ok(Some(3)));
        assert_eq!(tree.query(1, 2), Ok(Some(1)));
        assert_eq!(tree.query(2, 2), Ok(Some(2)));
        assert!(tree.is_consistent());
    }

    #[test]
    fn max_index_tie_test() {
        let tree = MaxIndexTree::build([5, 5], MaxIndex).unwrap();
        assert_eq!(tree.query(1, 2), Ok(Some(1)));
        assert_eq!(tree.total(), Some(1));

        let tree = MaxIndexTree::build([1, 7, 2, 7, 7, 0, 7], MaxIndex).unwrap();
        assert_eq!(tree.query(1, 7), Ok(Some(2)));
        assert_eq!(tree.query(3, 7), Ok(Some(4)));
        assert_eq!(tree.query(5, 7), Ok(Some(5)));
        assert_eq!(tree.query(6, 7), Ok(Some(7)));
    }

    #[test]
    fn update_isolation_test() {
        let mut tree = SegmentTree::build(1..=10i64, Sum).unwrap();
        assert_eq!(tree.query(1, 4), Ok(10));
        tree.update(7, 100).unwrap();
        assert_eq!(tree.query(1, 4), Ok(10));
        assert_eq!(tree.query(8, 10), Ok(27));
        assert_eq!(tree.query(7, 7), Ok(100));
        assert_eq!(tree.total(), 148);
        assert_eq!(tree.get(7), Ok(&100));
    }

    #[test]
    fn single_element_test() {
        let mut tree = SegmentTree::build([42i64], Min).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.query(1, 1), Ok(42));
        tree.update(1, -3).unwrap();
        assert_eq!(tree.query(1, 1), Ok(-3));
        assert!(tree.is_consistent());
    }

    #[test]
    fn closure_aggregate_test() {
        let xor = FnAggregate::new(|a: &u8, b: &u8| a ^ b, 0);
        let mut tree = SegmentTree::build([0b0001, 0b0011, 0b0100], xor).unwrap();
        assert_eq!(tree.query(1, 2), Ok(0b0010));
        assert_eq!(tree.query(1, 3), Ok(0b0110));
        tree.update(3, 0b0010).unwrap();
        assert_eq!(tree.total(), 0);
    }

    #[test]
    fn repeated_query_test() {
        let tree = GcdTree::build([12, 18, 30, 42], Gcd).unwrap();
        let first = tree.query(2, 4);
        for _ in 0..5 {
            assert_eq!(tree.query(2, 4), first);
        }
    }

    #[test]
    fn error_test() {
        assert_eq!(GcdTree::build(Vec::new(), Gcd).unwrap_err(), TreeError::Empty);

        let mut tree = GcdTree::build([4, 6, 8], Gcd).unwrap();
        let invalid = |left, right| TreeError::InvalidRange {
            left,
            right,
            len: 3,
        };
        assert_eq!(tree.query(0, 2), Err(invalid(0, 2)));
        assert_eq!(tree.query(3, 2), Err(invalid(3, 2)));
        assert_eq!(tree.query(1, 4), Err(invalid(1, 4)));

        let out_of_bounds = |pos| TreeError::PositionOutOfBounds { pos, len: 3 };
        assert_eq!(tree.update(0, 1), Err(out_of_bounds(0)));
        assert_eq!(tree.update(4, 1), Err(out_of_bounds(4)));
        assert_eq!(tree.get(4), Err(out_of_bounds(4)));

        // Rejected updates leave the tree untouched
        assert_eq!(tree.values(), &[4, 6, 8]);
        assert!(tree.is_consistent());
    }

    #[test]
    fn node_layout_test() {
        // [1, 5] splits into [1, 3] and [4, 5]
        let tree = SegmentTree::build([1i64, 2, 3, 4, 5], Sum).unwrap();
        assert_eq!(tree.nodes.len(), 20);
        assert_eq!(tree.nodes[1], 15);
        assert_eq!(tree.nodes[2], 6);
        assert_eq!(tree.nodes[3], 9);
        assert_eq!(tree.nodes[4], 3);
        assert_eq!(tree.nodes[5], 3);
        assert_eq!(tree.nodes[8], 1);
        assert_eq!(tree.nodes[9], 2);
    }
}
