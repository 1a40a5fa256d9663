use std::sync::Arc;

use omni_config::Config;
use tokio::sync::{Mutex, RwLock};

use crate::history::HistoryStorage;
use crate::session::Session;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: Mutex<Session>,
    pub storage: HistoryStorage,
}

impl AppState {
    /// Loads the history file named by the config
    pub fn new(config: Config) -> Self {
        let storage = HistoryStorage::new(&config.history.path);
        let session = Session::new(storage.load());

        Self {
            config: Arc::new(RwLock::new(config)),
            session: Mutex::new(session),
            storage,
        }
    }
}
