//! Access-credential gate for the dashboard.
//!
//! The remote service hands operators an access token at login; the dashboard
//! refuses to start without one. The token is held as an explicit [`Session`]
//! capability passed into the runtime rather than read from ambient storage,
//! and its memory is wiped when the session is dropped.

use std::fs;
use std::path::Path;

use zeroize::Zeroizing;

/// An authenticated operator session.
///
/// Holding a value of this type is the precondition for talking to the
/// remote service; the gateway borrows the token for its auth header.
pub struct Session {
    token: Zeroizing<String>,
}

impl Session {
    /// What: Load a stored access token from disk.
    ///
    /// Inputs:
    /// - `path`: Token file location (one token, optionally newline-terminated).
    ///
    /// Output: `Some(Session)` when the file exists and is non-empty; `None`
    /// otherwise.
    pub fn load(path: &Path) -> Option<Self> {
        let raw = fs::read_to_string(path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: Zeroizing::new(token.to_string()),
        })
    }

    /// What: Construct a session directly from a token string.
    ///
    /// Inputs:
    /// - `token`: Access token as entered or stored.
    ///
    /// Output: `Some(Session)` for non-empty input; `None` for blank tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: Zeroizing::new(token.to_string()),
        })
    }

    /// Borrow the raw token for the gateway's auth header.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }
}

/// What: Obtain a session, prompting the operator when no token is stored.
///
/// Inputs:
/// - `path`: Token file location under the config dir.
///
/// Output: `Some(Session)` once a token is available; `None` when the prompt
/// is aborted or yields an empty token.
///
/// Details: The terminal analog of the login redirect — a missing credential
/// drops into an interactive prompt before the UI starts. Entered tokens are
/// persisted with owner-only permissions on Unix.
pub fn acquire(path: &Path) -> Option<Session> {
    if let Some(session) = Session::load(path) {
        return Some(session);
    }
    let entered = rpassword::prompt_password("Access token: ").ok()?;
    let session = Session::from_token(&entered)?;
    store_token(path, session.token());
    Some(session)
}

/// What: Persist the token file, restricting permissions where the platform
/// allows it.
///
/// Inputs:
/// - `path`: Destination file.
/// - `token`: Token text to store.
fn store_token(path: &Path, token: &str) {
    if let Err(e) = fs::write(path, token) {
        tracing::warn!(error = %e, path = %path.display(), "failed to store access token");
        return;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    tracing::info!(path = %path.display(), "stored access token");
}

#[cfg(test)]
mod tests {
    use super::Session;

    /// What: Loading a token file round-trips through the session gate.
    ///
    /// Inputs: A temp file containing a padded token, and a missing path.
    /// Output: The padded token loads trimmed; the missing path yields `None`.
    #[test]
    fn load_reads_trimmed_token_and_rejects_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("access_token");
        std::fs::write(&path, "  tok-123  \n").expect("write token");
        let session = Session::load(&path).expect("session should load");
        assert_eq!(session.token(), "tok-123");
        assert!(Session::load(&dir.path().join("absent")).is_none());
    }

    /// What: Blank tokens never produce a session.
    ///
    /// Inputs: An empty file and a whitespace-only token string.
    /// Output: Both are rejected.
    #[test]
    fn blank_tokens_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("access_token");
        std::fs::write(&path, "\n").expect("write token");
        assert!(Session::load(&path).is_none());
        assert!(Session::from_token("   ").is_none());
    }
}
