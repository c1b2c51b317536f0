//! Generic entity store

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use docy_client::{ApiClient, ApiError};
use log::{debug, warn};
use tokio::sync::watch;

use crate::error::{StoreError, StoreResult};
use crate::resource::Resource;
use crate::state::{RequestId, StoreState};

/// What happens to `pending` when an operation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settle {
    /// The operation is finished.
    Done,
    /// A refetch follows immediately, keep `pending` set.
    Continue,
}

/// Mirror of one entity kind plus the operations that keep it in sync.
///
/// The store is the only writer of its state. Clones share the same state.
pub struct EntityStore<R: Resource> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Resource> {
    api: ApiClient,
    state: watch::Sender<StoreState<R>>,
    latest: AtomicU64,
}

impl<R: Resource> Clone for EntityStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> EntityStore<R> {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            inner: Arc::new(StoreInner {
                api,
                state,
                latest: AtomicU64::new(0),
            }),
        }
    }

    /// Receiver that sees every state change of this store.
    pub fn subscribe(&self) -> watch::Receiver<StoreState<R>> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreState<R> {
        self.inner.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<R::Record> {
        self.inner.state.borrow().items.clone()
    }

    pub fn current(&self) -> Option<R::Detail> {
        self.inner.state.borrow().current.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().pending
    }

    pub fn last_error(&self) -> Option<ApiError> {
        self.inner.state.borrow().last_error.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.inner.state.borrow().error_message().map(str::to_string)
    }

    /// Drop the selection without talking to the server.
    pub fn clear_current(&self) {
        self.inner.state.send_if_modified(|state| state.current.take().is_some());
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub(crate) fn is_selected(&self, key: &R::Key) -> bool {
        self.inner
            .state
            .borrow()
            .current
            .as_ref()
            .is_some_and(|detail| R::detail_key(detail) == *key)
    }

    pub(crate) fn modify_local(&self, modify: impl FnOnce(&mut R::Local)) {
        self.inner.state.send_modify(|state| modify(&mut state.local));
    }

    /// Start a request: it becomes the latest one, `pending` is set and the
    /// previous error is cleared.
    pub(crate) fn begin(&self) -> RequestId {
        let mut request = RequestId::new(0);
        self.inner.state.send_modify(|state| {
            request = RequestId::new(self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1);
            state.pending = true;
            state.last_error = None;
        });
        debug!("{} request {} started", R::NAME, request);
        request
    }

    /// Apply `result` to the state if `request` is still the latest one.
    /// Returns false when the request was superseded and nothing changed.
    fn apply_if_latest<T>(
        &self,
        request: RequestId,
        result: &Result<T, ApiError>,
        settle: Settle,
        apply: impl FnOnce(&mut StoreState<R>, &T),
    ) -> bool {
        let latest = &self.inner.latest;
        self.inner.state.send_if_modified(|state| {
            if latest.load(Ordering::SeqCst) != request.value() {
                return false;
            }
            match result {
                Ok(value) => {
                    apply(state, value);
                    if settle == Settle::Done {
                        state.pending = false;
                    }
                }
                Err(err) => {
                    state.pending = false;
                    state.last_error = Some(err.clone());
                }
            }
            true
        })
    }

    fn report<T>(&self, request: RequestId, result: Result<T, ApiError>) -> StoreResult<T> {
        match result {
            Ok(value) => {
                debug!("{} request {} succeeded", R::NAME, request);
                Ok(value)
            }
            Err(err) => {
                warn!("{} request {} failed: {}", R::NAME, request, err);
                Err(err.into())
            }
        }
    }

    /// Finish a read. Results of superseded reads are discarded.
    pub(crate) fn settle<T>(
        &self,
        request: RequestId,
        result: Result<T, ApiError>,
        settle: Settle,
        apply: impl FnOnce(&mut StoreState<R>, &T),
    ) -> StoreResult<T> {
        if !self.apply_if_latest(request, &result, settle, apply) {
            debug!("{} request {} superseded, response dropped", R::NAME, request);
            return Err(StoreError::Superseded {
                entity: R::NAME,
                request,
            });
        }
        self.report(request, result)
    }

    /// Finish a write. The server has acted on it either way, so a superseded
    /// write skips the local apply but still hands its result to the caller.
    pub(crate) fn settle_write<T>(
        &self,
        request: RequestId,
        result: Result<T, ApiError>,
        settle: Settle,
        apply: impl FnOnce(&mut StoreState<R>, &T),
    ) -> StoreResult<T> {
        if !self.apply_if_latest(request, &result, settle, apply) {
            debug!("{} write {} overtaken by a newer request", R::NAME, request);
        }
        self.report(request, result)
    }

    /// Run one read under the busy/error protocol.
    pub(crate) async fn run<T, F>(
        &self,
        settle: Settle,
        call: F,
        apply: impl FnOnce(&mut StoreState<R>, &T),
    ) -> StoreResult<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let request = self.begin();
        let result = call.await;
        self.settle(request, result, settle, apply)
    }

    /// Run one write under the busy/error protocol. Never reports `Superseded`.
    pub(crate) async fn run_write<T, F>(
        &self,
        settle: Settle,
        call: F,
        apply: impl FnOnce(&mut StoreState<R>, &T),
    ) -> StoreResult<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let request = self.begin();
        let result = call.await;
        self.settle_write(request, result, settle, apply)
    }

    /// Replace `items` with the server's list.
    pub async fn fetch_all(&self) -> StoreResult<Vec<R::Record>> {
        self.run(Settle::Done, R::list(self.api()), |state, items| {
            state.items = items.clone();
        })
        .await
    }

    /// Load one record into `current`. On failure `current` is left as it was.
    pub async fn fetch_one(&self, key: R::Key) -> StoreResult<R::Detail> {
        self.load_one(key, Settle::Done).await
    }

    async fn load_one(&self, key: R::Key, settle: Settle) -> StoreResult<R::Detail> {
        let api = self.api();
        let call = async {
            match R::check_key(&key) {
                Ok(()) => R::get(api, &key).await,
                Err(err) => Err(err),
            }
        };
        self.run(settle, call, |state, detail| {
            state.current = Some(detail.clone());
        })
        .await
    }

    /// Create a record, then reload the list.
    pub async fn create(&self, payload: &R::Create) -> StoreResult<R::Created> {
        let created = self
            .run_write(Settle::Continue, R::create(self.api(), payload), |_, _| {})
            .await?;
        self.refetch_all().await;
        Ok(created)
    }

    /// Update a record, then reload it if it is selected, then reload the list.
    /// Partial responses are never merged into local state.
    pub async fn update(&self, key: R::Key, payload: &R::Update) -> StoreResult<R::Updated> {
        let api = self.api();
        let call = async {
            match R::check_key(&key) {
                Ok(()) => R::update(api, &key, payload).await,
                Err(err) => Err(err),
            }
        };
        let updated = self.run_write(Settle::Continue, call, |_, _| {}).await?;
        self.refresh_after_write(&key).await;
        Ok(updated)
    }

    pub(crate) async fn refresh_after_write(&self, key: &R::Key) {
        if self.is_selected(key) {
            if let Err(err) = self.load_one(key.clone(), Settle::Continue).await {
                debug!("Refreshing {} {} after write failed: {}", R::NAME, key, err);
            }
        }
        self.refetch_all().await;
    }

    pub(crate) async fn refetch_all(&self) {
        if let Err(err) = self.fetch_all().await {
            debug!("Refreshing {} list failed: {}", R::NAME, err);
        }
    }
}
