use std::sync::{Arc, Mutex};

/// In-memory holder for the current bearer token.
///
/// Cloneable handle over a shared cell: set on successful login, cleared on
/// logout, read by every outgoing request to decorate the Authorization
/// header. Nothing is persisted; ending the process ends the session.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<Mutex<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.inner.lock().unwrap() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.inner.lock().unwrap() = None;
    }

    pub fn current_token(&self) -> Option<String> {
        self.inner.lock().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().unwrap().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_roundtrip() {
        let session = Session::new();
        assert_eq!(session.current_token(), None);

        session.set_token("jwt-abc");
        assert!(session.is_authenticated());
        assert_eq!(session.current_token().as_deref(), Some("jwt-abc"));

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.current_token(), None);
    }

    #[test]
    fn clones_share_the_cell() {
        let session = Session::new();
        let handle = session.clone();
        handle.set_token("jwt-xyz");
        assert_eq!(session.current_token().as_deref(), Some("jwt-xyz"));
    }
}
