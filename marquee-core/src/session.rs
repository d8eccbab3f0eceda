use std::sync::Arc;

use marquee_model::UserData;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A signed-in TMDB user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub session_id: String,
    pub user: UserData,
}

impl UserSession {
    pub fn account_id(&self) -> u64 {
        self.user.id
    }
}

/// Current sign-in state, observable by any number of subscribers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sender: Arc<watch::Sender<Option<UserSession>>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> Option<UserSession> {
        self.sender.borrow().clone()
    }

    pub fn session_id(&self) -> Option<String> {
        self.sender
            .borrow()
            .as_ref()
            .map(|session| session.session_id.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.sender.borrow().is_some()
    }

    pub fn subscribe(&self) -> WatchStream<Option<UserSession>> {
        WatchStream::new(self.sender.subscribe())
    }

    pub fn set(&self, session: UserSession) {
        self.sender.send_replace(Some(session));
    }

    /// Clear the session if it is still `session_id`. Returns whether it was.
    pub fn clear_if(&self, session_id: &str) -> bool {
        self.sender.send_if_modified(|current| {
            let matches = current
                .as_ref()
                .is_some_and(|session| session.session_id == session_id);
            if matches {
                *current = None;
            }
            matches
        })
    }

    pub fn clear(&self) {
        self.sender.send_replace(None);
    }
}
