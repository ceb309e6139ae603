mod record;
mod source;

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use record::{
    slugify, DeskId, DeskRecord, DeskStatus, MonitorLayout, ScreenLayout, SocialLinks,
};
pub use source::{parse_desks, DeskSource, JsonFileSource};

#[cfg(test)]
pub(crate) use record::sample_desk;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read desks from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse desks payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("desk source failed: {0}")]
    Source(String),
    #[error("a catalog load is already in flight")]
    LoadInProgress,
    #[error("catalog load {0:?} is no longer in flight")]
    StaleLoad(CatalogLoad),
    #[error("no desk with id {0}")]
    UnknownDesk(DeskId),
    #[error("no desk with slug {0:?}")]
    UnknownSlug(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Empty,
    Loading,
    Loaded,
    Failed,
}

/// Handle for the single in-flight load; completions carrying any other handle are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLoad(u64);

#[derive(Debug, Default)]
pub struct DeskCatalog {
    desks: Vec<DeskRecord>,
    status: LoadStatus,
    error: Option<String>,
    in_flight: Option<CatalogLoad>,
    loads_started: u64,
}

impl DeskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_desks(desks: Vec<DeskRecord>) -> Self {
        warn_on_slug_collisions(&desks);
        Self {
            desks,
            status: LoadStatus::Loaded,
            ..Self::default()
        }
    }

    pub fn desks(&self) -> &[DeskRecord] {
        &self.desks
    }

    pub fn len(&self) -> usize {
        self.desks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.desks.is_empty()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find_by_id(&self, id: DeskId) -> Option<&DeskRecord> {
        self.desks.iter().find(|desk| desk.id == id)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&DeskRecord> {
        self.desks.iter().find(|desk| desk.slug == slug)
    }

    /// Starts a load, or returns `None` while another one is still in flight.
    pub fn begin_load(&mut self) -> Option<CatalogLoad> {
        if let Some(current) = self.in_flight {
            tracing::debug!(?current, "catalog load already in flight; ignoring request");
            return None;
        }
        self.loads_started += 1;
        let load = CatalogLoad(self.loads_started);
        self.in_flight = Some(load);
        self.status = LoadStatus::Loading;
        tracing::debug!(?load, "catalog load started");
        Some(load)
    }

    pub fn finish_load(
        &mut self,
        load: CatalogLoad,
        result: CatalogResult<Vec<DeskRecord>>,
    ) -> CatalogResult<usize> {
        if self.in_flight != Some(load) {
            tracing::warn!(?load, in_flight = ?self.in_flight, "ignoring completion of unknown catalog load");
            return Err(CatalogError::StaleLoad(load));
        }
        self.in_flight = None;

        match result {
            Ok(desks) => {
                warn_on_slug_collisions(&desks);
                let count = desks.len();
                self.desks = desks;
                self.status = LoadStatus::Loaded;
                self.error = None;
                tracing::info!(count, "desk catalog loaded");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(%err, kept = self.desks.len(), "desk catalog load failed");
                self.error = Some(err.to_string());
                self.status = if self.desks.is_empty() {
                    LoadStatus::Failed
                } else {
                    LoadStatus::Loaded
                };
                Err(err)
            }
        }
    }

    pub fn load(&mut self, source: &dyn DeskSource) -> CatalogResult<usize> {
        let load = self.begin_load().ok_or(CatalogError::LoadInProgress)?;
        let result = source.fetch_desks();
        self.finish_load(load, result)
    }
}

fn warn_on_slug_collisions(desks: &[DeskRecord]) {
    let mut seen = HashSet::with_capacity(desks.len());
    for desk in desks {
        if !seen.insert(desk.slug.as_str()) {
            tracing::warn!(slug = %desk.slug, id = %desk.id, "duplicate desk slug in catalog");
        }
    }
}
