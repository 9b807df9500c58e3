//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docmill_domain::traits::{EntryStore, JobStatus};
use docmill_domain::{ProcessingResult, RawDocument};
use docmill_extract::estimate_page_count;
use docmill_llm::{DisabledChatProvider, HttpChatProvider};
use docmill_pipeline::{DocumentProcessor, ProcessorConfig};
use docmill_store::SqliteStore;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Execute the process command.
pub async fn execute_process(
    args: ProcessArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let path = Path::new(&args.file);
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.clone());
    let media_type = args
        .media_type
        .clone()
        .unwrap_or_else(|| infer_media_type(&name));

    let document = RawDocument::new(name, media_type, bytes);

    let processor_config = ProcessorConfig {
        use_ai: args.ai,
        ai_timeout_secs: config.ai.timeout_secs,
        ..ProcessorConfig::default()
    };

    let result = if args.ai {
        let (endpoint, key, model) = config.ai_credentials().ok_or_else(|| {
            CliError::Config(
                "--ai requires endpoint, api_key, and model in the [ai] config section".into(),
            )
        })?;
        let provider = HttpChatProvider::new(endpoint, key, model);
        DocumentProcessor::new(Arc::new(provider), processor_config)
            .process(&document)
            .await
    } else {
        DocumentProcessor::new(Arc::new(DisabledChatProvider), processor_config)
            .process(&document)
            .await
    };

    println!("{}", formatter.format_result_summary(&result));
    if args.verbose || !result.success {
        println!("{}", formatter.format_log(result.log.entries()));
    }
    if !result.entries.is_empty() {
        println!("{}", formatter.format_entries(&result.entries)?);
    }

    if args.dry_run {
        println!("{}", formatter.info("Dry run: nothing was persisted"));
        return Ok(());
    }

    persist(&document, &result, config, formatter)?;
    Ok(())
}

/// Write the document, a job row, and the entries, in that order.
fn persist(
    document: &RawDocument,
    result: &ProcessingResult,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let mut store = SqliteStore::new(config.database_path()?)?;

    let page_count = estimate_page_count(&document.bytes);
    let document_id = store.insert_document(document, page_count)?;
    let job_id = store.insert_job(document_id)?;
    store.update_job_status(job_id, JobStatus::Processing)?;

    if result.success {
        let stored = store.insert_entries(document_id, &result.entries)?;
        store.update_job_status(job_id, JobStatus::Completed)?;
        println!(
            "{}",
            formatter.success(&format!(
                "Stored {} entries under document {}",
                stored, document_id
            ))
        );
    } else {
        store.update_job_status(job_id, JobStatus::Failed)?;
        println!(
            "{}",
            formatter.error(&format!("Job {} recorded as failed", job_id))
        );
    }
    Ok(())
}

/// Infer a media type from the filename extension.
fn infer_media_type(name: &str) -> String {
    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        _ => "application/octet-stream",
    }
    .to_string()
}
