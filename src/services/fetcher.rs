use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::{AppError, Result};
use crate::models::{QueryParams, TopUserRecord};
use crate::services::executor::RequestExecutor;
use crate::services::notifier::Notifier;

pub const TOP_USERS_PATH: &str = "/api/log/top_users";

/// What the view renders: the loading flag and the last accepted result set.
/// Rank is the position in `records`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    pub loading: bool,
    pub records: Vec<TopUserRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records replaced with this many rows.
    Applied(usize),
    /// Failure reported to the notifier; records untouched.
    Failed(String),
    /// A newer fetch was issued before this one settled; result discarded.
    Superseded,
}

/// Runs top-users queries and owns the resulting [`FetchState`].
///
/// Every call takes a fresh token. Only the response carrying the most
/// recently issued token may touch the state, so overlapping fetches resolve
/// to the latest request regardless of arrival order.
pub struct TopUsersFetcher<E, N> {
    executor: E,
    notifier: N,
    path: String,
    state: Mutex<FetchState>,
    latest_token: AtomicU64,
}

impl<E: RequestExecutor, N: Notifier> TopUsersFetcher<E, N> {
    pub fn new(executor: E, notifier: N) -> Self {
        Self {
            executor,
            notifier,
            path: TOP_USERS_PATH.to_string(),
            state: Mutex::new(FetchState::default()),
            latest_token: AtomicU64::new(0),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn snapshot(&self) -> FetchState {
        self.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn records(&self) -> Vec<TopUserRecord> {
        self.lock().records.clone()
    }

    pub async fn fetch(&self, params: &QueryParams) -> FetchOutcome {
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::begin(self, token);

        tracing::debug!(token, query = %params.to_query_string(), "Fetching top users");

        let result = self.request(params).await;

        if !self.is_current(token) {
            tracing::warn!(token, "Discarding top users response from superseded request");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                self.lock().records = records;
                tracing::info!(token, count, "Top users updated");
                FetchOutcome::Applied(count)
            }
            Err(e) => {
                let message = e.user_message();
                self.notifier.report_error(&message);
                FetchOutcome::Failed(message)
            }
        }
    }

    async fn request(&self, params: &QueryParams) -> Result<Vec<TopUserRecord>> {
        let envelope = self.executor.get(&self.path, &params.to_pairs()).await?;

        if !envelope.success {
            return Err(AppError::Rejected(envelope.message().to_string()));
        }

        match envelope.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(data) => Ok(serde_json::from_value(data)?),
        }
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest_token.load(Ordering::SeqCst) == token
    }

    fn lock(&self) -> MutexGuard<'_, FetchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Raises `loading` for the duration of one fetch. On drop, clears it unless a
/// newer fetch has taken over, in which case that fetch clears it instead.
///
/// Dropping the latest fetch abandons the query: `loading` goes false even if
/// older fetches are still in flight, and those settle as superseded.
struct LoadingGuard<'a, E, N> {
    fetcher: &'a TopUsersFetcher<E, N>,
    token: u64,
}

impl<'a, E: RequestExecutor, N: Notifier> LoadingGuard<'a, E, N> {
    fn begin(fetcher: &'a TopUsersFetcher<E, N>, token: u64) -> Self {
        fetcher.lock().loading = true;
        Self { fetcher, token }
    }
}

impl<'a, E, N> Drop for LoadingGuard<'a, E, N> {
    fn drop(&mut self) {
        if self.fetcher.latest_token.load(Ordering::SeqCst) == self.token {
            self.fetcher
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .loading = false;
        }
    }
}
