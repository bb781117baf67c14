/// Load a song from a source and publish it to the catalog
use crate::error::Result;
use cantata_catalog_client::CatalogClient;
use cantata_core::RemoteSongId;
use cantata_sources::SongSource;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Replaces whatever description the source provided
    pub description: Option<String>,
    /// Build and normalize everything but send nothing to the catalog
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Uploaded {
        name: String,
        id: RemoteSongId,
    },
    DryRun {
        name: String,
        cover_size: usize,
        audio_size: usize,
    },
}

pub async fn run(
    source: &dyn SongSource,
    catalog: &CatalogClient,
    options: &RunOptions,
) -> Result<Outcome> {
    info!(source = %source.describe(), "Loading song");
    let mut bundle = source.load().await?;

    if let Some(description) = &options.description {
        bundle.description = description.clone();
    }

    if options.dry_run {
        let prepared = catalog.prepare(&bundle).await?;
        info!(name = %bundle.name, "Dry run, nothing uploaded");
        return Ok(Outcome::DryRun {
            name: bundle.name,
            cover_size: prepared.cover_jpeg.len(),
            audio_size: prepared.audio.len(),
        });
    }

    info!(name = %bundle.name, catalog = %catalog.url(), "Uploading song");
    let id = catalog.upload(&bundle).await?;

    Ok(Outcome::Uploaded {
        name: bundle.name,
        id,
    })
}
