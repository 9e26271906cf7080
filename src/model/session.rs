//! Per-language editing sessions
//!
//! An `EditorSession` is the code and output text for one language. The
//! `SessionStore` persists both fields write-through to a per-tab medium so
//! a reload of the view restores them.

use std::sync::Arc;

use crate::languages::default_sample;
use crate::storage::KeyValueStore;
use crate::util::text::strip_code_fences;

/// Code and output text for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    /// Language identifier this session belongs to
    pub language: String,
    /// Edit buffer
    pub code: String,
    /// Output buffer (raw, as returned by the execution service)
    pub output: String,
    /// Bumped on every code mutation; used to detect stale remote results
    pub revision: u64,
}

impl EditorSession {
    pub fn new(
        language: impl Into<String>,
        code: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
            output: output.into(),
            revision: 0,
        }
    }

    /// Output text as it should be displayed (code fence markers removed)
    pub fn display_output(&self) -> String {
        strip_code_fences(&self.output)
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// Persisted code and output for a language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub code: String,
    pub output: String,
}

/// Write-through persistence for editor sessions
///
/// Storage failures are logged and otherwise ignored: the session keeps
/// working from memory.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

fn code_key(language: &str) -> String {
    format!("{}Code", language)
}

fn output_key(language: &str) -> String {
    format!("{}Output", language)
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Session read of {} failed: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!("Session write of {} failed: {}", key, e);
        }
    }

    /// Load the persisted session, seeding code with the language sample
    /// when nothing has been stored yet
    pub fn load(&self, language: &str) -> StoredSession {
        let code = self
            .read(&code_key(language))
            .unwrap_or_else(|| default_sample(language).to_string());
        let output = self.read(&output_key(language)).unwrap_or_default();
        StoredSession { code, output }
    }

    /// Persist both fields (empty strings included)
    pub fn save(&self, language: &str, code: &str, output: &str) {
        self.write(&code_key(language), code);
        self.write(&output_key(language), output);
        tracing::trace!(
            "Saved {} session ({} code bytes, {} output bytes)",
            language,
            code.len(),
            output.len()
        );
    }

    /// Open the session for a language
    pub fn open(&self, language: &str) -> EditorSession {
        let stored = self.load(language);
        EditorSession::new(language, stored.code, stored.output)
    }
}
