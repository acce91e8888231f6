mod aggregator;
mod calendar;

pub use aggregator::{GroupKey, WindowAggregates, WindowAggregator, WindowBreach, WindowStat};
pub use calendar::{daily_buckets, DailyBucket};
