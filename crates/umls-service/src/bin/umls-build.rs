//! Builds a UMLS terminology store from a Metathesaurus archive.

use umls_loader::{TerminologyStore, UmlsLoader};
use umls_service::{init_tracing, ServiceConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = ServiceConfig::from_env();

    tracing::info!("Opening terminology store at {}", config.db_path);
    let store = TerminologyStore::open(&config.db_path)?;
    store.create_schema()?;

    let loader = UmlsLoader::with_defaults()?.with_config(config.loader_config());
    tracing::info!(
        "Loading {} ({} sources, batches of {})",
        config.archive_path,
        loader.catalog().len(),
        config.batch_size
    );
    let summary = loader.load_archive_path(&store, &config.archive_path)?;

    for (name, stats) in [
        ("MRCONSO", &summary.concepts),
        ("MRSAT", &summary.attributes),
        ("MRREL", &summary.relationships),
    ] {
        tracing::info!(
            "{}: {} of {} rows written ({:.1}%), {} skipped",
            name,
            stats.written_records,
            stats.total_records,
            stats.write_rate(),
            stats.skipped_records()
        );
        for (reason, count) in &stats.skipped {
            tracing::info!("  {}: {}", reason, count);
        }
    }
    if !summary.skipped_entries.is_empty() {
        tracing::info!("Skipped {} archive entries", summary.skipped_entries.len());
    }

    tracing::info!(
        "Store now holds {} code systems, {} codings, {} property values",
        store.code_system_count()?,
        store.coding_count()?,
        store.coding_property_count()?
    );
    Ok(())
}
