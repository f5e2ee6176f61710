use std::sync::Arc;

use crate::{
    config::Config,
    repositories::{KeyValueStore, Repository},
    utils::time::{Clock, SystemClock},
};

#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}

impl AppState {
    /// Wires the store with a wall clock in the configured timezone.
    pub fn new(store: Arc<dyn KeyValueStore>, config: Config) -> Self {
        let clock = Arc::new(SystemClock::new(config.time_zone));
        Self::with_clock(store, clock, config)
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            repo: Repository::new(store),
            clock,
            config,
        }
    }
}
