
/// Report line formatting and the trace writer.
pub mod report;

/// The built-in reference scenario.
pub mod scenario;

/// Cycle stepping and observer notification.
pub mod simulator;
