//! Fetch-on-change list.
//!
//! Selecting a resource dispatches `Select`; an effect keyed on the selected
//! resource issues one request and feeds the outcome back as `Loaded` or
//! `Failed`. Results replace the previous records wholesale. A result tagged
//! with a resource that is no longer selected is stale and ignored.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::network::{Record, ResourceFetcher};
use crate::hooks::{Cleanup, EffectSlot};
use crate::mvi::{Action, Reducer, Store, StoreState};

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub resource: String,
    pub records: Vec<Record>,
    pub loading: bool,
    /// Message from the last failed fetch of the current resource.
    pub error: Option<String>,
}

impl StoreState for FeedState {}

impl FeedState {
    /// State before the first fetch of `resource` completes.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            records: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedAction {
    Select(String),
    Loaded {
        resource: String,
        records: Vec<Record>,
    },
    Failed {
        resource: String,
        message: String,
    },
}

impl Action for FeedAction {
    fn name(&self) -> &'static str {
        match self {
            FeedAction::Select(_) => "SELECT_RESOURCE",
            FeedAction::Loaded { .. } => "RESOURCE_LOADED",
            FeedAction::Failed { .. } => "RESOURCE_FAILED",
        }
    }
}

pub struct FeedReducer;

impl Reducer for FeedReducer {
    type State = FeedState;
    type Action = FeedAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            FeedAction::Select(resource) => {
                if resource == state.resource {
                    return state;
                }
                FeedState {
                    resource,
                    loading: true,
                    error: None,
                    ..state
                }
            }
            FeedAction::Loaded { resource, records } => {
                if resource != state.resource {
                    return state;
                }
                FeedState {
                    resource,
                    records,
                    loading: false,
                    error: None,
                }
            }
            FeedAction::Failed { resource, message } => {
                if resource != state.resource {
                    return state;
                }
                // Prior records stay visible.
                FeedState {
                    loading: false,
                    error: Some(message),
                    ..state
                }
            }
        }
    }
}

pub type FeedStore = Store<FeedReducer>;

/// Feed store plus the fetch effect that keeps it in sync with its selector.
pub struct ResourceFeed {
    store: FeedStore,
    fetcher: Arc<dyn ResourceFetcher>,
    runtime: Handle,
    limit: usize,
    effect: EffectSlot<String>,
}

impl ResourceFeed {
    /// Create the feed and issue the first request.
    pub fn mount(
        runtime: Handle,
        fetcher: Arc<dyn ResourceFetcher>,
        resource: impl Into<String>,
        limit: usize,
    ) -> Self {
        let mut feed = Self {
            store: Store::new(FeedState::new(resource)),
            fetcher,
            runtime,
            limit,
            effect: EffectSlot::new(),
        };
        feed.sync();
        feed
    }

    pub fn store(&self) -> &FeedStore {
        &self.store
    }

    /// Change the selector. Re-selecting the current resource does not refetch.
    pub fn select(&mut self, resource: impl Into<String>) {
        self.store.dispatch(FeedAction::Select(resource.into()));
        self.sync();
    }

    /// Number of requests issued so far.
    pub fn requests(&self) -> usize {
        self.effect.runs()
    }

    /// Wait until the current request has settled and return that state.
    pub async fn settled(&self) -> Arc<FeedState> {
        // Subscribe before checking so a result landing in between is not missed.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _subscription = self.store.subscribe(move |state| {
            let _ = tx.send(Arc::clone(state));
        });

        let current = self.store.get_state();
        if !current.loading {
            return current;
        }
        while let Some(state) = rx.recv().await {
            if !state.loading {
                return state;
            }
        }
        self.store.get_state()
    }

    fn sync(&mut self) {
        let resource = self.store.get_state().resource.clone();
        let store = self.store.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let runtime = self.runtime.clone();
        let limit = self.limit;

        self.effect.run(resource, move |resource| {
            let resource = resource.clone();
            let task = runtime.spawn(async move {
                match fetcher.fetch(&resource).await {
                    Ok(mut records) => {
                        records.truncate(limit);
                        store.dispatch(FeedAction::Loaded { resource, records });
                    }
                    Err(err) => {
                        tracing::warn!(resource = %resource, error = %err, "Fetch failed");
                        store.dispatch(FeedAction::Failed {
                            resource,
                            message: err.to_string(),
                        });
                    }
                }
            });
            // A superseded request is abandoned rather than raced.
            Cleanup::new(move || task.abort())
        });
    }
}
