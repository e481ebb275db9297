pub mod report_log;
pub mod run_aggregator;
pub mod sampler;

#[cfg(test)]
pub(crate) mod testing;

pub use run_aggregator::{RunAggregator, RunOptions};
pub use sampler::Sampler;
