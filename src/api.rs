//! HTTP API for Gram Sahayak
//!
//! Stands in for the chat UI: sessions hold one conversation each and a chat
//! message runs one orchestration cycle.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::conversation::Conversation;
use crate::runtime::Orchestrator;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            sessions: Arc::new(SessionStore::default()),
        }
    }
}

/// In-memory conversations, lost on restart.
///
/// Each conversation sits behind its own mutex; holding it is what makes a
/// cycle the only one in flight for that conversation.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Conversation>>>>,
}

impl SessionStore {
    /// Store a conversation under a fresh id
    pub async fn insert(&self, conversation: Conversation) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(conversation)));
        id
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<Conversation>>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Discard a conversation; returns whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }
}
