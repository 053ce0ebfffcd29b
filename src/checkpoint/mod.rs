//! Stream position persistence
//!
//! Lets the relay resume after a restart without skipping or re-reading
//! blockchain data beyond the last unsaved range.

mod offset;
mod tracker;

pub use offset::{read_offset, write_offset};
pub use tracker::*;
