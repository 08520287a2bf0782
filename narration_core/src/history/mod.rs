//! History module - the time-indexed record of every candidate message.
//!
//! - **Candidates**: classifier output, not yet stamped
//! - **Logged messages**: stamped, immutable entries
//! - **Index**: buckets keyed by coarse timestamp, queried by kind and direction

mod index;
mod message;

pub use index::*;
pub use message::*;
