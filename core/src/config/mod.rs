//! Run configuration: the record, the resolver, and the usage table.

pub mod params;
pub mod resolver;
pub mod usage;

pub use params::{default_thread_count, Keep, RunConfig, MAX_BATCH_SIZE};
pub use resolver::Resolver;
pub use usage::usage;
