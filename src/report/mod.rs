pub mod csv;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::hibp::{Record, Resource};
use crate::subjects::Subject;

pub const BREACH_HEADER: &[&str] = &[
    "Email",
    "AddedDate",
    "BreachDate",
    "DataClasses",
    "Description",
    "Domain",
    "ModifiedDate",
    "Name",
    "PwnCount",
    "Title",
    "IsFabricated",
    "IsSpamList",
    "IsRetired",
    "LogoPath",
    "IsSensitive",
    "IsVerified",
];

pub const PASTE_HEADER: &[&str] = &["Email", "Date", "EmailCount", "Id", "Source", "Title"];

const EMAIL_COLUMN: &str = "Email";

/// The pair of CSV files written by one run.
#[derive(Debug, Clone)]
pub struct ReportFiles {
    pub breaches: PathBuf,
    pub pastes: PathBuf,
}

impl ReportFiles {
    /// Create both files with a local-time prefix (`YYYYMMDD-HHMMSS_`) and write headers.
    pub fn create(folder: &Path) -> anyhow::Result<Self> {
        let prefix = chrono::Local::now().format("%Y%m%d-%H%M%S_").to_string();
        Self::create_with_prefix(folder, &prefix)
    }

    pub fn create_with_prefix(folder: &Path, prefix: &str) -> anyhow::Result<Self> {
        let files = Self {
            breaches: folder.join(format!("{prefix}breached_accounts.csv")),
            pastes: folder.join(format!("{prefix}pasted_accounts.csv")),
        };
        for resource in [Resource::Breaches, Resource::Pastes] {
            let path = files.path(resource);
            std::fs::write(path, csv::render_row(header(resource)))
                .with_context(|| format!("Failed to create {}", path.display()))?;
            tracing::debug!("Created {}", path.display());
        }
        Ok(files)
    }

    pub fn path(&self, resource: Resource) -> &Path {
        match resource {
            Resource::Breaches => &self.breaches,
            Resource::Pastes => &self.pastes,
        }
    }

    /// Append one row per record, each tagged with `subject`.
    ///
    /// The file is opened and closed per call; nothing is written unless every
    /// row rendered.
    pub fn append(
        &self,
        resource: Resource,
        subject: &Subject,
        records: &[Record],
    ) -> anyhow::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let columns = header(resource);
        let chunk: String = records
            .iter()
            .map(|record| csv::render_row(row_cells(columns, subject, record)))
            .collect();

        let path = self.path(resource);
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        file.write_all(chunk.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

pub fn header(resource: Resource) -> &'static [&'static str] {
    match resource {
        Resource::Breaches => BREACH_HEADER,
        Resource::Pastes => PASTE_HEADER,
    }
}

fn row_cells(columns: &[&str], subject: &Subject, record: &Record) -> Vec<String> {
    columns
        .iter()
        .map(|&column| {
            if column == EMAIL_COLUMN {
                subject.as_str().to_string()
            } else {
                csv::render_cell(record.get(column))
            }
        })
        .collect()
}
