//! Authoritative Store Module
//!
//! The table every read and write is ultimately checked against, and the
//! allocator that hands out record identifiers.

mod id;
mod table;

pub use id::IdAllocator;
pub use table::RecordTable;
