/*!
# Lookup controller

Runs one lookup at a time. `trigger` validates the input and spawns the worker
on the runtime; `poll` is called from the presentation loop every tick and
applies finished lookups to the [`Presenter`].

```rust,no_run
use std::sync::Arc;
use steamid_lookup::{
    client::Client,
    config::Config,
    controller::LookupController,
    presenter::Presenter,
};

#[tokio::main]
async fn main() {
    let client = Client::new(&Config::new("YOUR_API_KEY")).unwrap();
    let mut controller = LookupController::new(Arc::new(client), tokio::runtime::Handle::current());
    let mut presenter = Presenter::new();

    controller.trigger(&mut presenter, "76561197960287930");
    while controller.is_in_flight() {
        controller.poll(&mut presenter);
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
}
```
*/

use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::client::{Client, Transport};
use crate::error::{ApiError, LookupFailure};
use crate::presenter::Presenter;
use crate::types::id::{PlayerIdentifier, validate};
use crate::types::profile::ProfileRecord;

/// Where the worker gets its data from, `Client` in production
#[async_trait]
pub trait ProfileSource: Send + Sync + 'static {
    async fn fetch_profile(&self, id: &PlayerIdentifier) -> Result<ProfileRecord, ApiError>;
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

#[async_trait]
impl<T: Transport + 'static> ProfileSource for Client<T> {
    async fn fetch_profile(&self, id: &PlayerIdentifier) -> Result<ProfileRecord, ApiError> {
        Client::fetch_profile(self, id).await
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        Client::fetch_image(self, url).await
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupState {
    Idle,
    InFlight { ticket: Uuid },
}

/// What a call to `trigger` did
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trigger {
    Started(Uuid),
    /// Input failed validation, nothing was sent
    Rejected,
    /// A lookup is already running
    Ignored,
}

#[derive(Debug)]
pub struct LookupOutcome {
    pub ticket: Uuid,
    pub result: Result<(ProfileRecord, Vec<u8>), LookupFailure>,
}

pub struct LookupController<S: ProfileSource> {
    source: Arc<S>,
    runtime: Handle,
    state: LookupState,
    /// Worker of the lookup in flight, checked when no outcome arrives
    worker: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<LookupOutcome>,
    rx: mpsc::UnboundedReceiver<LookupOutcome>,
}

impl<S: ProfileSource> LookupController<S> {
    /**
    # Arguments
    - `source`: Shared data source, each worker holds a clone of the `Arc`
    - `runtime`: Runtime the workers are spawned on, separate from the presentation thread
    */
    pub fn new(source: Arc<S>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        LookupController {
            source,
            runtime,
            state: LookupState::Idle,
            worker: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> LookupState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, LookupState::InFlight { .. })
    }

    /**
    Start a lookup for the text in the input field

    # Arguments
    - `presenter`: UI state, the lookup button is disabled here and re-enabled by `poll`
    - `input`: Raw input text

    # Returns
    Whether a worker was started; a trigger while in flight is a no-op
    */
    pub fn trigger(&mut self, presenter: &mut Presenter, input: &str) -> Trigger {
        if self.is_in_flight() || !presenter.lookup_enabled() {
            tracing::debug!("lookup already in flight, ignoring trigger");
            return Trigger::Ignored;
        }

        let id = match validate(input) {
            Ok(id) => id,
            Err(e) => {
                tracing::info!(input = input.trim(), error = %e, "rejected SteamID64");
                presenter.render_invalid();
                return Trigger::Rejected;
            }
        };

        let ticket = Uuid::new_v4();
        presenter.begin_lookup();
        self.state = LookupState::InFlight { ticket };
        tracing::info!(%ticket, steam_id = %id, "lookup started");

        let source = self.source.clone();
        let tx = self.tx.clone();
        self.worker = Some(self.runtime.spawn(async move {
            let result = run_lookup(source.as_ref(), &id).await;
            // Receiver only goes away with the controller, nobody is left to show the result
            let _ = tx.send(LookupOutcome { ticket, result });
        }));

        Trigger::Started(ticket)
    }

    /**
    Apply finished lookups to the presenter. Call once per tick from the presentation thread.

    # Notes
    A worker that ended without reporting (it panicked) fails the lookup here,
    so the controller never stays in flight

    # Returns
    Whether an outcome was applied
    */
    pub fn poll(&mut self, presenter: &mut Presenter) -> bool {
        if self.drain(presenter) {
            return true;
        }

        let LookupState::InFlight { ticket } = self.state else {
            return false;
        };
        if !self.worker.as_ref().is_some_and(|w| w.is_finished()) {
            return false;
        }
        // The worker sends before it finishes, look once more before giving up on it
        if self.drain(presenter) {
            return true;
        }

        tracing::error!(%ticket, "lookup worker stopped without a result");
        self.state = LookupState::Idle;
        self.worker = None;
        presenter.render_error("the lookup stopped unexpectedly");
        true
    }

    fn drain(&mut self, presenter: &mut Presenter) -> bool {
        let mut applied = false;

        while let Ok(outcome) = self.rx.try_recv() {
            self.state = LookupState::Idle;
            self.worker = None;
            applied = true;

            match outcome.result {
                Ok((record, avatar)) => {
                    tracing::info!(ticket = %outcome.ticket, steam_id = %record.steam_id, "lookup finished");
                    presenter.render(record, &avatar);
                }
                Err(failure) => {
                    tracing::warn!(ticket = %outcome.ticket, error = %failure, "lookup failed");
                    presenter.render_error(&failure.0);
                }
            }
        }

        applied
    }
}

async fn run_lookup<S: ProfileSource>(
    source: &S,
    id: &PlayerIdentifier,
) -> Result<(ProfileRecord, Vec<u8>), LookupFailure> {
    let record = source.fetch_profile(id).await?;
    let avatar = source.fetch_image(&record.avatar_url).await?;
    Ok((record, avatar))
}
