use std::ops::Add;

/// A combining strategy for [`SegmentTree`](crate::SegmentTree).
///
/// `combine` must be associative and `identity` must be neutral for it. The tree
/// always passes the operand covering the earlier positions as `left`, so
/// strategies that break ties by position stay deterministic.
pub trait Aggregate<T> {
    type Output: Clone;

    /// The result of aggregating an empty range.
    fn identity(&self) -> Self::Output;

    /// The aggregate of the single element `value` stored at the 1-based
    /// position `pos`.
    fn leaf(&self, pos: usize, value: &T) -> Self::Output;

    /// Merges two adjacent aggregates. `values` is the backing array, indexed
    /// from 0.
    fn combine(&self, values: &[T], left: &Self::Output, right: &Self::Output) -> Self::Output;
}

/// Types with a value that is never smaller than any other value.
pub trait Infinity {
    fn infinity() -> Self;
}

macro_rules! impl_infinity {
    ($($t:ty => $inf:expr),* $(,)?) => {
        $(impl Infinity for $t {
            fn infinity() -> Self {
                $inf
            }
        })*
    };
}

impl_infinity! {
    i32 => i32::MAX,
    i64 => i64::MAX,
    u32 => u32::MAX,
    u64 => u64::MAX,
    usize => usize::MAX,
    f64 => f64::INFINITY,
}

/// Position of the largest element. Among equal elements the earliest one wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxIndex;

impl<T: PartialOrd> Aggregate<T> for MaxIndex {
    type Output = Option<usize>;

    fn identity(&self) -> Option<usize> {
        None
    }

    fn leaf(&self, pos: usize, _: &T) -> Option<usize> {
        Some(pos)
    }

    fn combine(
        &self,
        values: &[T],
        left: &Option<usize>,
        right: &Option<usize>,
    ) -> Option<usize> {
        match (*left, *right) {
            (Some(l), Some(r)) => {
                // Only a strictly larger right element can displace the left one.
                if values[r - 1] > values[l - 1] {
                    Some(r)
                } else {
                    Some(l)
                }
            }
            (Some(l), None) => Some(l),
            (None, r) => r,
        }
    }
}

/// Greatest common divisor. Negative elements count by their absolute value
/// and zeros are neutral, so an all-zero range yields `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gcd;

impl Aggregate<i64> for Gcd {
    type Output = u64;

    fn identity(&self) -> u64 {
        0
    }

    fn leaf(&self, _: usize, value: &i64) -> u64 {
        value.unsigned_abs()
    }

    fn combine(&self, _: &[i64], left: &u64, right: &u64) -> u64 {
        gcd(*left, *right)
    }
}

/// Euclid's algorithm with `gcd(a, 0) == a`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl<T> Aggregate<T> for Sum
where
    T: Copy + Default + Add<Output = T>,
{
    type Output = T;

    fn identity(&self) -> T {
        T::default()
    }

    fn leaf(&self, _: usize, value: &T) -> T {
        *value
    }

    fn combine(&self, _: &[T], left: &T, right: &T) -> T {
        *left + *right
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

impl<T> Aggregate<T> for Min
where
    T: Copy + PartialOrd + Infinity,
{
    type Output = T;

    fn identity(&self) -> T {
        T::infinity()
    }

    fn leaf(&self, _: usize, value: &T) -> T {
        *value
    }

    fn combine(&self, _: &[T], left: &T, right: &T) -> T {
        if right < left {
            *right
        } else {
            *left
        }
    }
}

/// Wraps a plain binary operation on element values together with its
/// identity.
///
/// # Example
/// ```
/// use rangeagg::{FnAggregate, SegmentTree};
///
/// let or = FnAggregate::new(|a: &u32, b: &u32| a | b, 0);
/// let tree = SegmentTree::build([1, 2, 4, 8], or).unwrap();
/// assert_eq!(tree.query(2, 3).unwrap(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct FnAggregate<T, F> {
    op: F,
    id: T,
}

impl<T, F> FnAggregate<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    pub fn new(op: F, id: T) -> Self {
        Self { op, id }
    }
}

impl<T, F> Aggregate<T> for FnAggregate<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    type Output = T;

    fn identity(&self) -> T {
        self.id.clone()
    }

    fn leaf(&self, _: usize, value: &T) -> T {
        value.clone()
    }

    fn combine(&self, _: &[T], left: &T, right: &T) -> T {
        (self.op)(left, right)
    }
}
