//! Session facade over one archive.
//!
//! [`Archive`] owns the configuration and the table cache so callers making
//! many queries (co-occurrence matrices, time series) load each folder once.

use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregator, GrabRequest, ProjectedTable};
use crate::config::ArchiveConfig;
use crate::error::Result;
use crate::frequency::{FrequencyTable, count_unique};
use crate::search::{SearchEngine, SourceQuery};
use crate::store::MetadataStore;

/// Whether a folder's table has been extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderStatus {
    pub folder: String,
    pub has_table: bool,
}

#[derive(Debug)]
pub struct Archive {
    config: ArchiveConfig,
    store: MetadataStore,
}

impl Archive {
    pub fn new(config: ArchiveConfig) -> Self {
        let store = MetadataStore::new(&config);
        Self { config, store }
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// See [`SearchEngine::find_source`]
    pub fn find_source(&mut self, query: &SourceQuery) -> Result<Vec<String>> {
        SearchEngine::new(&self.config, &mut self.store).find_source(query)
    }

    /// See [`Aggregator::grab_data`]
    pub fn grab_data(&mut self, request: &GrabRequest) -> Result<ProjectedTable> {
        Aggregator::new(&self.config, &mut self.store).grab_data(request)
    }

    /// Tag frequencies of one field over the whole archive
    ///
    /// Date cells are counted in their metadata text form.
    pub fn count_field(&mut self, field: &str) -> Result<FrequencyTable> {
        let projected = self.grab_data(&GrabRequest::new().fields([field]))?;
        let values = projected.display_values(field).unwrap_or_default();
        Ok(count_unique(values.iter().map(|v| v.as_deref()), &self.config.delimiter))
    }

    /// Extraction state of every known folder
    pub fn folder_status(&self) -> Vec<FolderStatus> {
        self.config
            .folders()
            .iter()
            .map(|folder| FolderStatus { folder: folder.clone(), has_table: self.store.has_table(folder) })
            .collect()
    }
}
