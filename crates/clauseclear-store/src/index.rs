//! Per-document retrieval index registry
//!
//! Each document id maps to one immutable [`Artifact`] behind an `Arc`.
//! A rebuild constructs the new artifact completely, persists it (when a
//! store is attached) and only then swaps it into the registry, so readers
//! see either the old artifact or the new one.

use crate::error::IndexError;
use crate::tfidf::{SparseMatrix, TfidfVectorizer, DEFAULT_MAX_FEATURES};
use clauseclear_domain::{Clause, ClauseId, IndexShape, RiskVerdict, SearchHit};
use clauseclear_rules::RuleEngine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Default number of results returned by a search
pub const DEFAULT_TOP_K: usize = 5;

/// Row metadata kept alongside the matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMeta {
    /// Clause id of the row
    pub id: ClauseId,
    /// Page of the clause
    pub page: u32,
}

/// Everything needed to answer queries for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Fitted vectorizer
    pub model: TfidfVectorizer,
    /// One row per clause, in build order
    pub matrix: SparseMatrix,
    /// Row index to clause id and page
    pub metadata: Vec<RowMeta>,
}

impl Artifact {
    /// Matrix shape
    pub fn shape(&self) -> IndexShape {
        IndexShape {
            rows: self.matrix.rows().len(),
            cols: self.matrix.cols(),
        }
    }
}

/// Backing storage for artifacts
///
/// `save` must replace any previous artifact for the id atomically.
pub trait ArtifactStore: Send + Sync {
    /// Persist an artifact, replacing any previous one
    fn save(&self, document_id: &str, artifact: &Artifact) -> Result<(), IndexError>;

    /// Load an artifact if one exists
    fn load(&self, document_id: &str) -> Result<Option<Artifact>, IndexError>;

    /// Delete an artifact, returning whether one existed
    fn delete(&self, document_id: &str) -> Result<bool, IndexError>;

    /// Ids of every persisted document
    fn document_ids(&self) -> Result<Vec<String>, IndexError>;
}

/// A search hit with its rule-engine verdict attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedClause {
    /// The retrieval hit
    #[serde(flatten)]
    pub hit: SearchHit,
    /// Verdict for the hit's clause
    #[serde(flatten)]
    pub verdict: RiskVerdict,
}

/// Registry of per-document TF-IDF artifacts
pub struct RetrievalIndex {
    artifacts: RwLock<HashMap<String, Arc<Artifact>>>,
    store: Option<Box<dyn ArtifactStore>>,
    max_features: usize,
}

impl RetrievalIndex {
    /// Create an in-memory index
    pub fn new() -> Self {
        Self {
            artifacts: RwLock::new(HashMap::new()),
            store: None,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    /// Create an index that writes through to the given store
    pub fn with_store(store: Box<dyn ArtifactStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    /// Override the vocabulary cap
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features.max(1);
        self
    }

    /// Fit and register an artifact for a document
    ///
    /// Replaces any existing artifact for the same id.
    ///
    /// # Errors
    ///
    /// - [`IndexError::EmptyCorpus`] if `clauses` is empty
    /// - persistence errors from an attached store; the registry is left
    ///   unchanged in that case
    pub fn build(&self, document_id: &str, clauses: &[Clause]) -> Result<IndexShape, IndexError> {
        if clauses.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }

        let texts: Vec<&str> = clauses.iter().map(|c| c.text.as_str()).collect();
        let (model, matrix) = TfidfVectorizer::fit(&texts, self.max_features);
        let metadata = clauses
            .iter()
            .map(|c| RowMeta {
                id: c.id.clone(),
                page: c.page,
            })
            .collect();

        let artifact = Artifact {
            model,
            matrix,
            metadata,
        };
        let shape = artifact.shape();

        if let Some(store) = &self.store {
            store.save(document_id, &artifact)?;
        }

        self.write_lock()?
            .insert(document_id.to_string(), Arc::new(artifact));

        info!(
            "Built index for {} ({} rows x {} cols)",
            document_id, shape.rows, shape.cols
        );
        Ok(shape)
    }

    /// Rank clauses of a document against a free-text query
    ///
    /// Returns up to `top_k` hits (coerced to at least 1), highest score
    /// first, ties in build order. Each row is joined back to `clauses` by
    /// id; rows whose id is not present are dropped.
    ///
    /// # Errors
    ///
    /// - [`IndexError::IndexNotBuilt`] if no artifact exists for the document
    pub fn search(
        &self,
        document_id: &str,
        query: &str,
        clauses: &[Clause],
        top_k: usize,
    ) -> Result<Vec<SearchHit>, IndexError> {
        let artifact = self.artifact(document_id)?;
        let top_k = top_k.max(1);

        let query_vec = artifact.model.transform(query);
        let mut scored: Vec<(usize, f64)> = artifact
            .matrix
            .rows()
            .iter()
            .enumerate()
            .map(|(row, vec)| (row, query_vec.dot(vec)))
            .collect();

        // Stable: equal scores keep row order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        let by_id: HashMap<&ClauseId, &Clause> = clauses.iter().map(|c| (&c.id, c)).collect();

        let hits: Vec<SearchHit> = scored
            .into_iter()
            .filter_map(|(row, score)| {
                let meta = artifact.metadata.get(row)?;
                let clause = by_id.get(&meta.id)?;
                Some(SearchHit {
                    id: clause.id.clone(),
                    page: clause.page,
                    text: clause.text.clone(),
                    score,
                })
            })
            .collect();

        debug!(
            "Search '{}' on {} returned {} hits",
            query,
            document_id,
            hits.len()
        );
        Ok(hits)
    }

    /// Search, then attach each hit's verdict from the rule engine
    pub fn query(
        &self,
        document_id: &str,
        query: &str,
        clauses: &[Clause],
        top_k: usize,
        engine: &RuleEngine,
    ) -> Result<Vec<RankedClause>, IndexError> {
        let hits = self.search(document_id, query, clauses, top_k)?;
        Ok(hits
            .into_iter()
            .map(|hit| {
                let clause = Clause::from_text(hit.id.clone(), hit.page, hit.text.as_str());
                let verdict = engine.score(&clause);
                RankedClause { hit, verdict }
            })
            .collect())
    }

    /// Shape of a document's artifact
    pub fn shape(&self, document_id: &str) -> Result<IndexShape, IndexError> {
        Ok(self.artifact(document_id)?.shape())
    }

    /// Whether an artifact is available for the document
    pub fn contains(&self, document_id: &str) -> Result<bool, IndexError> {
        match self.artifact(document_id) {
            Ok(_) => Ok(true),
            Err(IndexError::IndexNotBuilt(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Drop a document's artifact from memory and the attached store
    pub fn remove(&self, document_id: &str) -> Result<bool, IndexError> {
        let in_memory = self.write_lock()?.remove(document_id).is_some();
        let persisted = match &self.store {
            Some(store) => store.delete(document_id)?,
            None => false,
        };
        Ok(in_memory || persisted)
    }

    /// Ids of every known document, sorted
    pub fn documents(&self) -> Result<Vec<String>, IndexError> {
        let mut ids: Vec<String> = self.read_lock()?.keys().cloned().collect();
        if let Some(store) = &self.store {
            ids.extend(store.document_ids()?);
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    fn artifact(&self, document_id: &str) -> Result<Arc<Artifact>, IndexError> {
        if let Some(artifact) = self.read_lock()?.get(document_id) {
            return Ok(Arc::clone(artifact));
        }

        let Some(store) = &self.store else {
            return Err(IndexError::IndexNotBuilt(document_id.to_string()));
        };

        match store.load(document_id)? {
            Some(artifact) => {
                debug!("Loaded persisted index for {}", document_id);
                let artifact = Arc::new(artifact);
                self.write_lock()?
                    .entry(document_id.to_string())
                    .or_insert_with(|| Arc::clone(&artifact));
                Ok(artifact)
            }
            None => Err(IndexError::IndexNotBuilt(document_id.to_string())),
        }
    }

    fn read_lock(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Artifact>>>, IndexError> {
        self.artifacts
            .read()
            .map_err(|_| IndexError::Persistence("index registry lock poisoned".to_string()))
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<Artifact>>>, IndexError> {
        self.artifacts
            .write()
            .map_err(|_| IndexError::Persistence("index registry lock poisoned".to_string()))
    }
}

impl Default for RetrievalIndex {
    fn default() -> Self {
        Self::new()
    }
}
