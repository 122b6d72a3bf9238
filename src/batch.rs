use std::time::Duration;

use tracing::{error, info};

use crate::hibp::{AccountSource, Resource};
use crate::report::ReportFiles;
use crate::subjects::Subject;

/// Per-subject tally of what a batch found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectResult {
    pub subject: String,
    pub breaches: usize,
    pub pastes: usize,
    pub failures: Vec<String>,
}

#[derive(Debug)]
pub struct BatchSummary {
    pub files: ReportFiles,
    pub results: Vec<SubjectResult>,
}

impl BatchSummary {
    pub fn total_failures(&self) -> usize {
        self.results.iter().map(|r| r.failures.len()).sum()
    }
}

/// Look up every subject, one at a time and in order, appending rows to `files`.
///
/// `subject_delay` is slept before each subject. A failed lookup is recorded
/// and contributes no rows; only I/O errors on the CSV files abort the batch.
pub async fn process(
    source: &dyn AccountSource,
    subjects: &[Subject],
    files: ReportFiles,
    subject_delay: Duration,
) -> anyhow::Result<BatchSummary> {
    let mut results = Vec::with_capacity(subjects.len());

    for subject in subjects {
        if !subject_delay.is_zero() {
            tokio::time::sleep(subject_delay).await;
        }

        let mut result = SubjectResult {
            subject: subject.to_string(),
            ..Default::default()
        };

        for resource in [Resource::Breaches, Resource::Pastes] {
            match source.query(resource, subject).await {
                Ok(outcome) => {
                    let records = outcome.into_records();
                    files.append(resource, subject, &records)?;
                    match resource {
                        Resource::Breaches => result.breaches = records.len(),
                        Resource::Pastes => result.pastes = records.len(),
                    }
                    info!("{}: {} {}", subject, records.len(), resource);
                }
                Err(e) => {
                    error!("Error fetching {} for {}: {}", resource, subject, e);
                    result.failures.push(format!("{resource}: {e}"));
                }
            }
        }

        results.push(result);
    }

    Ok(BatchSummary { files, results })
}
