//! Collections used by the schedulers in the `pages` crate.
pub mod pq;
