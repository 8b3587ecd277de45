//! In-memory stand-ins for the session, notifications and navigation
use crate::{
    notify::{Notification, Notifier},
    session::{Navigator, SessionContext, Token},
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A session holding a fixed token that counts its invalidations
#[derive(Debug, Default)]
pub struct FakeSession {
    token: Mutex<Option<Token>>,
    invalidations: AtomicUsize,
}

impl FakeSession {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.map(Token::new)),
            invalidations: AtomicUsize::new(0),
        }
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

impl SessionContext for FakeSession {
    fn resolve_token(&self) -> Option<Token> {
        self.token.lock().clone()
    }

    fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        *self.token.lock() = None;
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Everything notified so far, draining the record
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self, login_route: &str) {
        self.redirects.lock().push(login_route.to_string());
    }
}
