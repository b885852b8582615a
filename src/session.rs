use crate::cache::ImageCache;
use crate::table::Table;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "gallery_session";

/// State one browser keeps between interactions.
#[derive(Debug, Default)]
pub struct Session {
    /// Most recently uploaded table, if it was valid.
    pub table: Option<Table>,
    /// Name of the file the table came from.
    pub file_name: Option<String>,
    /// Why the last upload was rejected.
    pub upload_error: Option<String>,
    pub cache: ImageCache,
}

impl Session {
    /// Replace the table with a fresh upload. The image cache is reset.
    pub fn load_table(&mut self, file_name: String, table: Table) {
        self.table = Some(table);
        self.file_name = Some(file_name);
        self.upload_error = None;
        self.cache.clear();
    }

    /// Record a rejected upload. Any previous table is discarded.
    pub fn reject_upload(&mut self, file_name: Option<String>, error: String) {
        self.table = None;
        self.file_name = file_name;
        self.upload_error = Some(error);
        self.cache.clear();
    }
}

pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// How long a session survives without being seen.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// All live sessions, keyed by the id stored in the session cookie.
///
/// A session expires once it has gone unseen for longer than the store's
/// time-to-live; expired sessions are pruned whenever a new one is created.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Return the session for `id`, creating one when the id is missing,
    /// malformed, unknown or expired. The returned id is the one to set in
    /// the cookie.
    pub fn get_or_create(&self, id: Option<&str>) -> (Uuid, SessionHandle) {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();

        if let Some(id) = id.and_then(|raw| Uuid::parse_str(raw).ok()) {
            if let Some(entry) = sessions.get_mut(&id) {
                if now.duration_since(entry.last_seen) < self.ttl {
                    entry.last_seen = now;
                    return (id, Arc::clone(&entry.handle));
                }
            }
        }

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
        if sessions.len() < before {
            log::debug!("Pruned {} expired sessions", before - sessions.len());
        }

        let id = Uuid::new_v4();
        let handle = SessionHandle::default();
        sessions.insert(
            id,
            SessionEntry {
                handle: Arc::clone(&handle),
                last_seen: now,
            },
        );
        log::debug!("Created session {}", id);
        (id, handle)
    }

    /// Look up a live session without creating one.
    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        let id = Uuid::parse_str(id).ok()?;
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = sessions.get_mut(&id)?;
        let now = Instant::now();
        if now.duration_since(entry.last_seen) >= self.ttl {
            return None;
        }
        entry.last_seen = now;
        Some(Arc::clone(&entry.handle))
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
