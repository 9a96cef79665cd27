use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::client::protocol::{InsertResultRequest, RESULT_ACCEPTED};
use crate::client::{RequestClient, Transport};
use crate::models::Observation;
use crate::utils::progress::ProgressReporter;
use crate::writers::ResultEncoding;

/// A contiguous slice of observations queued for one `InsertResult` attempt.
#[derive(Debug, Clone, Copy)]
pub struct UploadBatch<'a> {
    pub observations: &'a [Observation],
    /// Batch size this slice was cut with; a failed slice is only split when it exceeds 1.
    pub batch_size: usize,
    /// Index of the first row within the uploaded dataset.
    pub offset: usize,
}

impl<'a> UploadBatch<'a> {
    fn len(&self) -> usize {
        self.observations.len()
    }

    /// Cut this slice into consecutive batches of at most `batch_size` rows.
    pub fn split(&self, batch_size: usize) -> Vec<UploadBatch<'a>> {
        self.observations
            .chunks(batch_size)
            .enumerate()
            .map(|(i, chunk)| UploadBatch {
                observations: chunk,
                batch_size,
                offset: self.offset + i * batch_size,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    Sent,
    Failed,
}

/// What happened to the rows of one upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub requests_issued: usize,
    pub requests_accepted: usize,
    pub requests_rejected: usize,
    pub rows_accepted: usize,
    pub rows_dropped: usize,
}

impl UploadReport {
    pub fn rows_processed(&self) -> usize {
        self.rows_accepted + self.rows_dropped
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows accepted, {} rows dropped, {} requests ({} rejected)",
            self.rows_accepted, self.rows_dropped, self.requests_issued, self.requests_rejected
        )
    }
}

/// Inserts observations under a result template in batches.
///
/// A rejected batch is resent one row per request so that rows the service
/// already holds only cost themselves. A rejected single-row insert is
/// dropped without further retries.
pub struct BatchUploader<'a, T: Transport> {
    client: &'a RequestClient<T>,
    encoding: ResultEncoding,
    show_progress: bool,
}

impl<'a, T: Transport> BatchUploader<'a, T> {
    pub fn new(client: &'a RequestClient<T>) -> Self {
        Self {
            client,
            encoding: ResultEncoding::default(),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn upload(
        &self,
        observations: &[Observation],
        template_id: &str,
        endpoint: &str,
        batch_size: usize,
    ) -> UploadReport {
        let mut report = UploadReport::default();
        if observations.is_empty() {
            debug!("No observations to upload");
            return report;
        }

        let progress = ProgressReporter::new(
            observations.len() as u64,
            "Uploading observations...",
            !self.show_progress,
        );

        let root = UploadBatch {
            observations,
            batch_size: batch_size.max(1),
            offset: 0,
        };
        let mut pending: VecDeque<UploadBatch> = root.split(root.batch_size).into();

        while let Some(batch) = pending.pop_front() {
            report.requests_issued += 1;

            match self.send_batch(&batch, template_id, endpoint).await {
                BatchOutcome::Sent => {
                    debug!(
                        "Inserted rows {} to {}",
                        batch.offset,
                        batch.offset + batch.len() - 1
                    );
                    report.requests_accepted += 1;
                    report.rows_accepted += batch.len();
                    progress.increment(batch.len() as u64);
                }
                BatchOutcome::Failed if batch.batch_size > 1 => {
                    info!(
                        "Failed batch insert of rows {} to {}, retrying one row at a time",
                        batch.offset,
                        batch.offset + batch.len() - 1
                    );
                    report.requests_rejected += 1;
                    for unit in batch.split(1).into_iter().rev() {
                        pending.push_front(unit);
                    }
                }
                BatchOutcome::Failed => {
                    debug!(
                        "Dropped row {} ({} rows), assumed already stored",
                        batch.offset,
                        batch.len()
                    );
                    report.requests_rejected += 1;
                    report.rows_dropped += batch.len();
                    progress.increment(batch.len() as u64);
                }
            }
        }

        progress.finish_with_message(&report.summary());
        if report.rows_dropped > 0 {
            warn!(
                "{} of {} observations were not inserted",
                report.rows_dropped,
                observations.len()
            );
        }

        report
    }

    async fn send_batch(
        &self,
        batch: &UploadBatch<'_>,
        template_id: &str,
        endpoint: &str,
    ) -> BatchOutcome {
        let request =
            InsertResultRequest::new(template_id, self.encoding.encode_block(batch.observations));

        if self.client.send(&request, RESULT_ACCEPTED, endpoint).await {
            BatchOutcome::Sent
        } else {
            BatchOutcome::Failed
        }
    }
}
