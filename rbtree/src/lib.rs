//! An ordered multiset built on a red-black tree.
//!
//! [`RedBlackTree`] keeps its keys sorted and guarantees O(log n) `insert`,
//! `delete` and `find` no matter the insertion order. Equal keys are stored
//! side by side rather than merged.
//!
//! ```
//! use rbtree::RedBlackTree;
//!
//! let mut tree: RedBlackTree<i32> = (1..20).collect();
//! for key in (2..20).step_by(2) {
//!     tree.delete(&key);
//! }
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 7, 9, 11, 13, 15, 17, 19]);
//! assert!(tree.validate().is_ok());
//! ```
//!
//! The tree is not synchronized. Share it between threads behind a single
//! lock around every call.

#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod error;
mod iter;
mod node;
mod print;
mod red_black_tree;
mod validate;

#[cfg(test)]
mod metrics;

pub use error::{Error, InvariantViolation};
pub use iter::Iter;
pub use node::{Color, NodeId, NodeRef};
pub use print::Pretty;
pub use red_black_tree::RedBlackTree;

/// Routes `log` output of the tree into the test harness.
///
/// Level comes from `RBTREE_TEST_LOG` (`trace` shows every rebalance step),
/// default is `debug`.
#[cfg(test)]
fn init_test_logger() {
    use simplelog::{Config, LevelFilter, TestLogger};

    let level = std::env::var("RBTREE_TEST_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Debug);
    // already initialized by another test in this binary
    let _ = TestLogger::init(level, Config::default());
}
