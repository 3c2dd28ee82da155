//! Output composition and writing.

mod compose;
mod writer;

pub use compose::{compose, ComposedPartition};
pub use writer::{write_partitions, WriteReport};
