//! 服务模块

pub mod aggregator;
pub mod merge;
pub mod settle;

pub use aggregator::{PageAggregator, create_page_aggregator};
pub use merge::merge_favorites;
pub use settle::{PageSlot, Settled, settle3};
