use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{codegen, error::StoreError, models::Record};

/// Upper bound on candidates drawn for a single new link. With 62^6 codes
/// available, running out means the generator is broken.
pub const MAX_MINT_ATTEMPTS: usize = 64;

type Generator = Box<dyn Fn() -> String + Send + Sync>;

/// Result of [`LinkStore::shorten`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    /// A new record was inserted under this code.
    Created(String),
    /// The URL was already shortened; nothing changed.
    Existing(String),
}

impl ShortenOutcome {
    pub fn code(&self) -> &str {
        match self {
            ShortenOutcome::Created(code) | ShortenOutcome::Existing(code) => code,
        }
    }

    pub fn into_code(self) -> String {
        match self {
            ShortenOutcome::Created(code) | ShortenOutcome::Existing(code) => code,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ShortenOutcome::Created(_))
    }
}

#[derive(Default)]
struct Inner {
    records: HashMap<String, Record>,
    /// original_url → short code, kept in step with `records`.
    by_url: HashMap<String, String>,
}

/// In-memory map from short code to [`Record`].
///
/// Every operation goes through one lock, so the dedup check and the insert
/// in `shorten` are a single step, and concurrent `resolve` calls on the same
/// code never lose a click. `get_stats` only reads and may share the lock
/// with other readers.
pub struct LinkStore {
    inner: RwLock<Inner>,
    generate: Generator,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::with_generator(codegen::generate_candidate)
    }

    /// Build a store that draws candidate codes from `generate`.
    pub fn with_generator(generate: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            generate: Box::new(generate),
        }
    }

    /// Return the code for `url`, minting one if the URL is new.
    ///
    /// URLs are compared byte for byte: no trimming, case folding or
    /// trailing-slash handling. Callers must validate `url` beforehand.
    pub async fn shorten(&self, url: &str) -> ShortenOutcome {
        let mut inner = self.inner.write().await;

        if let Some(code) = inner.by_url.get(url) {
            return ShortenOutcome::Existing(code.clone());
        }

        let code = self.mint(&inner.records);
        inner.records.insert(code.clone(), Record::new(url));
        inner.by_url.insert(url.to_owned(), code.clone());

        ShortenOutcome::Created(code)
    }

    /// Look up `code` and count the visit.
    ///
    /// The returned record already includes this click.
    pub async fn resolve(&self, code: &str) -> Result<Record, StoreError> {
        let mut inner = self.inner.write().await;
        let record = inner.records.get_mut(code).ok_or(StoreError::NotFound)?;
        record.clicks += 1;
        Ok(record.clone())
    }

    /// Snapshot of the record behind `code`. Does not count as a click.
    pub async fn get_stats(&self, code: &str) -> Result<Record, StoreError> {
        let inner = self.inner.read().await;
        inner.records.get(code).cloned().ok_or(StoreError::NotFound)
    }

    /// Number of stored links.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    fn mint(&self, taken: &HashMap<String, Record>) -> String {
        for _ in 0..MAX_MINT_ATTEMPTS {
            let candidate = (self.generate)();
            debug_assert!(
                codegen::is_short_code(&candidate),
                "malformed candidate {candidate:?}"
            );
            if !taken.contains_key(&candidate) {
                return candidate;
            }
            tracing::debug!("short code {} already taken, drawing another", candidate);
        }
        panic!("no free short code after {MAX_MINT_ATTEMPTS} attempts");
    }
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new()
    }
}
