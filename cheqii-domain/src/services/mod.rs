pub mod allocator;
pub mod balance_aggregator;
pub mod settlement_resolver;

pub use allocator::ProportionalAllocator;
pub use balance_aggregator::BalanceAggregator;
pub use settlement_resolver::SettlementResolver;
