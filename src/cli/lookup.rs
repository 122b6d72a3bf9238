use std::time::Duration;

use comfy_table::{Cell, Table};

use crate::batch::{self, BatchSummary};
use crate::cli::Cli;
use crate::config;
use crate::hibp::backoff::RetryPolicy;
use crate::hibp::client::{ClientSettings, HibpClient};
use crate::report::ReportFiles;
use crate::subjects::{self, Subject};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let (outfolder, defaulted) = config::resolve_outfolder(cli.outfolder.as_deref())?;
    if defaulted {
        println!("No folder path was supplied, using {}", outfolder.display());
    }
    config::ensure_outfolder(&outfolder)?;

    let subjects = match (&cli.user_list, &cli.user) {
        (Some(path), _) => subjects::load_subject_list(path)?,
        (None, Some(user)) => Subject::parse(user).into_iter().collect(),
        (None, None) => anyhow::bail!("Submit either a user list file or a user"),
    };
    if cli.token.as_deref().is_none_or(|t| t.trim().is_empty()) {
        tracing::warn!("No API key supplied; every lookup will fail. Pass --token or set HIBP_API_KEY");
    }

    let client = HibpClient::new(ClientSettings {
        base_url: cli.api_url,
        api_key: cli.token,
        retry: RetryPolicy {
            max_retries: cli.max_retries,
            ..Default::default()
        },
    })?;

    let files = ReportFiles::create(&outfolder)?;

    if subjects.is_empty() {
        println!("No email addresses to check.");
    } else {
        println!("Parsing the following accounts:");
        for subject in &subjects {
            println!("  {subject}");
        }
    }

    let summary = batch::process(
        &client,
        &subjects,
        files,
        Duration::from_millis(cli.delay_ms),
    )
    .await?;

    print_summary(&summary);
    println!("Done.");
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!("\n--- Results ---");
    let mut table = Table::new();
    table.set_header(vec!["Email", "Breaches", "Pastes", "Failures"]);

    for r in &summary.results {
        table.add_row(vec![
            Cell::new(&r.subject),
            Cell::new(r.breaches),
            Cell::new(r.pastes),
            Cell::new(if r.failures.is_empty() {
                "-".to_string()
            } else {
                r.failures.join("; ")
            }),
        ]);
    }
    println!("{table}");

    println!("Breaches written to {}", summary.files.breaches.display());
    println!("Pastes written to   {}", summary.files.pastes.display());
    let failures = summary.total_failures();
    if failures > 0 {
        println!("{failures} lookup(s) failed, see the table above.");
    }
}
