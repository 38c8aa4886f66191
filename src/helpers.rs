pub mod sentry;
pub mod tracing;
