use std::sync::Arc;

use tokio::sync::Mutex;

pub mod sensors;
pub mod sim;
pub mod store;
pub mod timers;

/// The store as shared between the timer tasks and the event loop.
pub type SharedStore = Arc<Mutex<store::JogStore>>;
