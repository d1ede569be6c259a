//! `leadminer search`: run one aggregated search and print it.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use leadminer_core::{unique_sources, AppConfig, GeoPoint};
use leadminer_gemini::GeminiClient;
use leadminer_search::{Aggregator, GENERIC_FAILURE_MESSAGE};

use crate::render::{render_contacts, render_sources};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// What to look for, e.g. "dentists downtown"
    pub query: String,
    /// Latitude used to bias results towards an area
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,
    /// Longitude used to bias results towards an area
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,
    /// Write the results to an .xlsx file
    #[arg(long)]
    pub export: bool,
    /// Directory for the exported file (defaults to LEADMINER_EXPORT_DIR)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Runs the search and prints contacts, sources and any advisory.
///
/// # Errors
///
/// Returns an error if the query is blank, the client cannot be built, the
/// search collects nothing before failing, or the export cannot be written.
pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        anyhow::bail!("search query must not be blank");
    }

    let location = GeoPoint::from_parts(args.lat, args.lng);
    if location.is_none() && (args.lat.is_some() || args.lng.is_some()) {
        tracing::warn!(
            lat = ?args.lat,
            lng = ?args.lng,
            "ignoring out-of-range coordinates; searching without location"
        );
    }

    let client = GeminiClient::from_app_config(config)?;
    tracing::info!(query, model = client.model(), located = location.is_some(), "starting search");

    let search = Aggregator::new(&client)
        .with_page_delay(Duration::from_millis(config.page_delay_ms))
        .run(query, location, |event| {
            if let Some(text) = event.progress_text() {
                eprintln!("{text}");
            }
        })
        .await
        .context(GENERIC_FAILURE_MESSAGE)?;

    let result = &search.result;
    println!("{}", render_contacts(&result.contacts));

    let sources = unique_sources(&result.sources);
    if !sources.is_empty() {
        println!("\nSources:");
        println!("{}", render_sources(&sources));
    }

    println!("\n{} leads found for \"{query}\"", result.contacts.len());
    if let Some(advisory) = search.advisory() {
        println!("{advisory}");
    }

    if args.export {
        if result.contacts.is_empty() {
            println!("No contacts to export.");
        } else {
            let dir = args.output.as_deref().unwrap_or(config.export_dir.as_path());
            let path = leadminer_export::write_workbook(&result.contacts, dir, query)?;
            println!("Exported to {}", path.display());
        }
    }

    Ok(())
}
