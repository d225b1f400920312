use crate::core::swipe::{LikedLog, SwipeDeck};
use crate::models::ResponseDraft;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Where a questionnaire session is in its one-way lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Answers are still being collected (the draft may already be complete)
    Collecting,
    /// The match filter has been evaluated and the deck is loaded
    Matched,
}

/// One adopter's questionnaire and swipe session
#[derive(Debug)]
pub struct Session {
    pub client_id: String,
    pub draft: ResponseDraft,
    pub state: SessionState,
    pub deck: SwipeDeck,
    pub liked: LikedLog,
}

impl Session {
    pub fn new(client_id: String, liked: LikedLog) -> Self {
        Self {
            client_id,
            draft: ResponseDraft::new(),
            state: SessionState::Collecting,
            deck: SwipeDeck::default(),
            liked,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.state == SessionState::Matched
    }

    /// Load matched candidates; the session never returns to collecting
    pub fn finish_matching(&mut self, deck: SwipeDeck) {
        self.deck = deck;
        self.state = SessionState::Matched;
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

/// In-memory session registry with idle expiry
///
/// Requests for the same session serialise on the session's mutex.
pub struct SessionStore {
    sessions: moka::future::Cache<Uuid, SharedSession>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, ttl_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(ttl_secs))
            .build();

        Self { sessions }
    }

    /// Register a new session and return its id
    pub async fn create(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, Arc::new(Mutex::new(session))).await;
        tracing::trace!("Session created: {}", id);
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).await
    }

    pub async fn remove(&self, id: &Uuid) {
        self.sessions.invalidate(id).await;
    }
}
