/// CSV export of daily impact series.
pub mod export;
