//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Sweep: expires stale incidents and relieves cache pressure at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
