pub mod config;
pub mod gamification;
pub mod progress;
pub mod timer;

use focusloop_core::storage::ProgressStore;
use focusloop_core::sync::{SyncClient, SyncError};
use focusloop_core::{Config, CoreError, SessionStateMachine};
use url::Url;

/// Wire up the engine from config + default store.
pub fn build_machine() -> Result<(SessionStateMachine, Config), CoreError> {
    let config = Config::load()?;
    let store = ProgressStore::open_default()?;
    let sync = sync_client(&config)?;
    let machine = SessionStateMachine::new(config.durations, store, sync);
    Ok((machine, config))
}

pub fn sync_client(config: &Config) -> Result<SyncClient, CoreError> {
    let base_url = Url::parse(&config.sync.base_url).map_err(SyncError::from)?;
    Ok(SyncClient::new(base_url, config.sync.timeout_secs))
}
