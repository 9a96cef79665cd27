use std::path::{Path, PathBuf};
use tracing::info;
use validator::Validate;

use crate::client::{RequestClient, TemplateResolver, Transport};
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::models::{ObservationSet, TemplateDescriptor, TemplateMetadata};
use crate::processors::{DeduplicationStats, Deduplicator, ObservationValidator};
use crate::readers::ObservationReader;
use crate::writers::{BatchUploader, UploadReport};

/// Everything one load run needs besides settings.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub observations_path: PathBuf,
    pub procedure: String,
    pub observed_property: String,
    pub offering: String,
    pub metadata: TemplateMetadata,
    pub endpoint: String,
}

impl LoadRequest {
    pub fn descriptor(&self) -> TemplateDescriptor {
        TemplateDescriptor::new(
            self.procedure.as_str(),
            self.observed_property.as_str(),
            self.offering.as_str(),
            self.metadata.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub template_id: Option<String>,
    pub rows_read: usize,
    pub duplicates_removed: usize,
    pub null_values: usize,
    /// `None` when the run stopped after validation.
    pub upload: Option<UploadReport>,
}

impl LoadSummary {
    pub fn observations(&self) -> usize {
        self.rows_read - self.duplicates_removed
    }

    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} rows read, {} duplicates removed, {} null values",
            self.rows_read, self.duplicates_removed, self.null_values
        );
        if let Some(report) = &self.upload {
            text.push_str(&format!("; {}", report.summary()));
        }
        text
    }
}

/// Runs a load: template resolution, validation, deduplication, then upload.
pub struct ObservationLoader<T: Transport> {
    client: RequestClient<T>,
    config: LoaderConfig,
    show_progress: bool,
}

impl<T: Transport> ObservationLoader<T> {
    pub fn new(transport: T, config: LoaderConfig) -> Self {
        Self {
            client: RequestClient::new(transport),
            config,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn client(&self) -> &RequestClient<T> {
        &self.client
    }

    pub async fn load(&self, request: &LoadRequest) -> Result<LoadSummary> {
        request.metadata.validate()?;

        let resolver = TemplateResolver::new(&self.client);
        let template_id = resolver
            .resolve_or_create(&request.descriptor(), &request.endpoint)
            .await?;

        info!("Validating {}", request.observations_path.display());
        let (observations, stats) = self.prepare(&request.observations_path)?;

        info!(
            "Uploading {} observations in batches of {}",
            observations.len(),
            self.config.batch_size
        );
        let report = BatchUploader::new(&self.client)
            .with_progress(self.show_progress)
            .upload(
                observations.as_slice(),
                &template_id,
                &request.endpoint,
                self.config.batch_size,
            )
            .await;

        info!(
            "Upload finished: {} rows accepted, {} rows dropped",
            report.rows_accepted, report.rows_dropped
        );

        Ok(LoadSummary {
            template_id: Some(template_id),
            rows_read: stats.input_records,
            duplicates_removed: stats.duplicates_removed,
            null_values: observations.null_count(),
            upload: Some(report),
        })
    }

    /// Read, validate and deduplicate the observation file without contacting the service.
    pub fn validate_only(&self, request: &LoadRequest) -> Result<LoadSummary> {
        request.metadata.validate()?;

        info!("Validating {}", request.observations_path.display());
        let (observations, stats) = self.prepare(&request.observations_path)?;

        Ok(LoadSummary {
            template_id: None,
            rows_read: stats.input_records,
            duplicates_removed: stats.duplicates_removed,
            null_values: observations.null_count(),
            upload: None,
        })
    }

    fn prepare(&self, path: &Path) -> Result<(ObservationSet, DeduplicationStats)> {
        let table = ObservationReader::new().read_table(path)?;
        let observations = ObservationValidator::new().validate(&table)?;

        info!("Removing duplicate timestamps");
        let (observations, stats) = Deduplicator::new().deduplicate_with_stats(observations);

        Ok((observations, stats))
    }
}
