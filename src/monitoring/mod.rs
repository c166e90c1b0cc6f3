/*!
 * Monitoring
 * Structured tracing setup for the binary
 */

mod tracer;

pub use tracer::init_tracing;
