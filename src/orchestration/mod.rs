//! Invocation orchestration

pub mod task_runner;

pub use task_runner::DbTaskRunner;
