pub mod time_range;
pub mod query_builder;
pub mod quota_calculator;
pub mod notifier;
pub mod executor;
pub mod fetcher;
pub mod presenter;
pub mod stats_view;

pub use time_range::*;
pub use query_builder::*;
pub use quota_calculator::*;
pub use notifier::*;
pub use executor::*;
pub use fetcher::*;
pub use presenter::*;
pub use stats_view::*;
