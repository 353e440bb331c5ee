//! Background Tasks Module
//!
//! Long-running maintenance tasks spawned at server startup.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
