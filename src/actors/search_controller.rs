use crate::actors::debounce::DebounceGate;
use crate::github::ProfileSource;
use crate::lookup::lookup;
use crate::models::{Query, ViewState, DEFAULT_REPO_LIMIT};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort, SpawnErr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Configuration for the search controller
#[derive(Debug, Clone)]
pub struct SearchControllerConfig {
    /// Quiet period after the last keystroke before a lookup starts
    pub debounce: Duration,
    /// Maximum number of repositories kept for display
    pub repo_limit: usize,
}

impl Default for SearchControllerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            repo_limit: DEFAULT_REPO_LIMIT,
        }
    }
}

/// Turns input events into lookups and publishes the resulting view state
pub struct SearchController;

/// State for the search controller
pub struct SearchControllerState {
    source: Arc<dyn ProfileSource>,
    config: SearchControllerConfig,
    debounce: DebounceGate,
    /// Input text as of the last change event
    pending_input: String,
    /// Sequence number of the most recently started search
    latest_seq: u64,
    view: watch::Sender<ViewState>,
    stats: SearchStats,
}

/// Messages the controller can handle
#[derive(Debug)]
pub enum SearchControllerMessage {
    /// The input text changed; debounced
    InputChanged(String),
    /// Enter was pressed; looks up immediately
    Submit(String),
    /// The debounce timer elapsed
    DebounceElapsed { generation: u64 },
    /// A spawned lookup completed
    LookupFinished { seq: u64, state: ViewState },
    /// Get the currently rendered state
    GetState(RpcReplyPort<ViewState>),
    /// Get statistics about lookups
    GetStats(RpcReplyPort<SearchStats>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub lookups_started: u64,
    pub stale_results_discarded: u64,
}

/// Arguments for starting the controller
pub struct SearchControllerArgs {
    pub source: Arc<dyn ProfileSource>,
    pub config: SearchControllerConfig,
    pub view: watch::Sender<ViewState>,
}

impl SearchController {
    /// Spawn a controller and hand back a receiver that follows its view state
    pub async fn spawn_with_view(
        source: Arc<dyn ProfileSource>,
        config: SearchControllerConfig,
    ) -> Result<(ActorRef<SearchControllerMessage>, watch::Receiver<ViewState>), SpawnErr> {
        let (view_tx, view_rx) = watch::channel(ViewState::Idle);

        let args = SearchControllerArgs {
            source,
            config,
            view: view_tx,
        };

        let (actor_ref, _handle) = Actor::spawn(None, SearchController, args).await?;

        info!("Search controller started");
        Ok((actor_ref, view_rx))
    }

    fn start_search(&self, myself: &ActorRef<SearchControllerMessage>, raw: &str, state: &mut SearchControllerState) {
        let query = Query::new(raw);
        state.latest_seq += 1;
        let seq = state.latest_seq;

        // Bumping the sequence above also orphans anything still in flight
        if query.is_empty() {
            debug!(seq, "Empty query, clearing results");
            state.publish(ViewState::Idle);
            return;
        }

        info!(seq, username = query.as_str(), "Starting lookup");
        state.stats.lookups_started += 1;
        state.publish(ViewState::Loading);

        let source = state.source.clone();
        let repo_limit = state.config.repo_limit;
        let myself = myself.clone();

        tokio::spawn(async move {
            let state = lookup(source.as_ref(), &query, repo_limit).await;
            if let Err(e) = myself.send_message(SearchControllerMessage::LookupFinished { seq, state }) {
                error!("Failed to report finished lookup {}: {}", seq, e);
            }
        });
    }
}

impl SearchControllerState {
    fn publish(&mut self, view: ViewState) {
        self.view.send_replace(view);
    }
}

#[ractor::async_trait]
impl Actor for SearchController {
    type Msg = SearchControllerMessage;
    type State = SearchControllerState;
    type Arguments = SearchControllerArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments
    ) -> Result<Self::State, ActorProcessingErr> {
        info!(
            debounce_ms = args.config.debounce.as_millis() as u64,
            repo_limit = args.config.repo_limit,
            "Starting search controller"
        );

        args.view.send_replace(ViewState::Idle);

        Ok(SearchControllerState {
            source: args.source,
            config: args.config,
            debounce: DebounceGate::new(),
            pending_input: String::new(),
            latest_seq: 0,
            view: args.view,
            stats: SearchStats::default(),
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State
    ) -> Result<(), ActorProcessingErr> {
        match message {
            SearchControllerMessage::InputChanged(text) => {
                state.pending_input = text;
                let delay = state.config.debounce;
                state.debounce.schedule(&myself, delay, |generation| {
                    SearchControllerMessage::DebounceElapsed { generation }
                });
            }

            SearchControllerMessage::Submit(text) => {
                // The pending tick would only repeat this lookup
                state.debounce.cancel();
                state.pending_input = text.clone();
                self.start_search(&myself, &text, state);
            }

            SearchControllerMessage::DebounceElapsed { generation } => {
                if !state.debounce.is_current(generation) {
                    debug!(generation, "Ignoring superseded debounce tick");
                    return Ok(());
                }
                state.debounce.fired();
                let text = state.pending_input.clone();
                self.start_search(&myself, &text, state);
            }

            SearchControllerMessage::LookupFinished { seq, state: view } => {
                if seq != state.latest_seq {
                    debug!(seq, latest = state.latest_seq, "Discarding stale lookup result");
                    state.stats.stale_results_discarded += 1;
                    return Ok(());
                }
                state.publish(view);
            }

            SearchControllerMessage::GetState(reply) => {
                let _ = reply.send(state.view.borrow().clone());
            }

            SearchControllerMessage::GetStats(reply) => {
                let _ = reply.send(state.stats.clone());
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State
    ) -> Result<(), ActorProcessingErr> {
        state.debounce.cancel();
        info!(
            lookups = state.stats.lookups_started,
            discarded = state.stats.stale_results_discarded,
            "Search controller stopped"
        );
        Ok(())
    }
}
