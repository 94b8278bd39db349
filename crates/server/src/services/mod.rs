//! Business logic kept out of the handlers.

pub mod earnings;

pub use earnings::{Earnings, summarize};
