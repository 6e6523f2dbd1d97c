use crate::config::Config;
use crate::models::{QueryParams, TimeWindow, TopLimit};
use crate::services::executor::RequestExecutor;
use crate::services::fetcher::{FetchOutcome, FetchState, TopUsersFetcher};
use crate::services::notifier::Notifier;
use crate::services::presenter::{LeaderboardRow, ResultPresenter};
use crate::services::query_builder::build_query;
use crate::services::time_range::TimeRangeController;

/// State behind the top-users page: selected window, selected limit, and the
/// last fetched result set. All edits go through the named setters; query
/// parameters are rebuilt from the current selection on every refresh.
pub struct StatsView<E, N> {
    time_range: TimeRangeController,
    limit: TopLimit,
    fetcher: TopUsersFetcher<E, N>,
    presenter: ResultPresenter,
}

impl<E: RequestExecutor, N: Notifier> StatsView<E, N> {
    pub fn new(fetcher: TopUsersFetcher<E, N>, presenter: ResultPresenter) -> Self {
        Self {
            time_range: TimeRangeController::new(),
            limit: TopLimit::default(),
            fetcher,
            presenter,
        }
    }

    pub fn from_config(config: &Config, executor: E, notifier: N) -> Self {
        let fetcher = TopUsersFetcher::new(executor, notifier).with_path(config.endpoint_path.clone());
        let mut view = Self::new(fetcher, ResultPresenter::new(config.quota_display()));
        view.limit = config.default_limit();
        view
    }

    pub fn with_time_range(mut self, time_range: TimeRangeController) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn window(&self) -> TimeWindow {
        self.time_range.window()
    }

    pub fn limit(&self) -> TopLimit {
        self.limit
    }

    /// Returns the window actually stored, which differs from the input when
    /// it was clamped.
    pub fn set_window(&mut self, start: i64, end: i64) -> TimeWindow {
        self.time_range.set_window(start, end)
    }

    pub fn set_limit(&mut self, limit: TopLimit) {
        self.limit = limit;
    }

    pub fn query_params(&self) -> QueryParams {
        build_query(&self.time_range.window(), self.limit.get())
    }

    pub async fn refresh(&self) -> FetchOutcome {
        let params = self.query_params();
        self.fetcher.fetch(&params).await
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    pub fn state(&self) -> FetchState {
        self.fetcher.snapshot()
    }

    pub fn rows(&self) -> Vec<LeaderboardRow> {
        self.presenter.present(&self.fetcher.records())
    }
}
