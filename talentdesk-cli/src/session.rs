//! Session tokens: where they come from and what happens when they expire

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Key the token is persisted under
pub const PERSISTED_TOKEN_KEY: &str = "authToken";

/// A bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

/// Source of the credential attached to outgoing requests.
///
/// Injected into the resource client, so tests can hand in a fake.
pub trait SessionContext: Debug + Send + Sync {
    /// The token to send, if any
    fn resolve_token(&self) -> Option<Token>;

    /// Called once per response with HTTP 401: forget the persisted token
    fn invalidate(&self);
}

/// Where the user is sent once their session expired
pub trait Navigator: Debug + Send + Sync {
    fn redirect_to_login(&self, login_route: &str);
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialsFile {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<Token>,
}

/// Token persisted as JSON under [`PERSISTED_TOKEN_KEY`] in a credentials file
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Token>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Reading credentials from {}", self.path.display()))
            }
        };

        let file: CredentialsFile = serde_json::from_str(&contents)
            .with_context(|| format!("Parsing credentials in {}", self.path.display()))?;

        Ok(file.auth_token)
    }

    pub fn save(&self, token: &Token) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let file = CredentialsFile {
            auth_token: Some(token.clone()),
        };
        fs::write(&self.path, serde_json::to_vec_pretty(&file)?)
            .with_context(|| format!("Writing credentials to {}", self.path.display()))?;

        tracing::info!(path = ?self.path, "Persisted session token");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = ?self.path, "Removed persisted session token");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Removing credentials at {}", self.path.display())),
        }
    }
}

/// Active session token first, persisted token second
#[derive(Debug)]
pub struct Session {
    active: RwLock<Option<Token>>,
    store: TokenStore,
}

impl Session {
    pub fn new(store: TokenStore) -> Self {
        Self {
            active: RwLock::new(None),
            store,
        }
    }

    pub fn with_active(self, token: Option<Token>) -> Self {
        *self.active.write() = token;
        self
    }

    /// Make `token` the active session and persist it
    pub fn sign_in(&self, token: Token) -> Result<()> {
        self.store.save(&token)?;
        *self.active.write() = Some(token);
        Ok(())
    }

    /// Drop the active session and the persisted token
    pub fn sign_out(&self) -> Result<()> {
        *self.active.write() = None;
        self.store.clear()
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }
}

impl SessionContext for Session {
    fn resolve_token(&self) -> Option<Token> {
        if let Some(token) = self.active.read().clone() {
            return Some(token);
        }

        match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(err = %format!("{e:#}"), "Ignoring unreadable credentials file");
                None
            }
        }
    }

    fn invalidate(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(err = %format!("{e:#}"), "Failed to clear persisted session token");
        }
    }
}
