//! Process execution and logging sinks

pub mod log_sink;
pub mod runner;

pub use log_sink::{ConsoleSink, LogLevel, LogSink, RecordingSink};
pub use runner::ProcessRunner;
