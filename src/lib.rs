pub mod aggregate;
pub mod checker;
mod error;
pub mod scanner;
pub mod tasks;
mod tree;

pub use aggregate::{Aggregate, FnAggregate, Gcd, Infinity, MaxIndex, Min, Sum};
pub use error::TreeError;
pub use tree::{GcdTree, MaxIndexTree, SegmentTree};
