/// Cantata Uploader - publish one song to the music catalog
use cantata_artwork::LoftyCoverReader;
use cantata_catalog_client::CatalogClient;
use cantata_sources::{LookupClient, LookupSource, ManifestSource, SongSource};
use cantata_uploader::{
    config::UploaderConfig,
    error::UploaderError,
    pipeline::{self, Outcome, RunOptions},
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cantata-upload")]
#[command(about = "Upload a song with its lyrics and cover to the music catalog", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog base URL, overriding the configuration
    #[arg(long, env = "CANTATA_API_URL", global = true)]
    api_url: Option<String>,

    /// Log request-level details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload the song described by a JSON manifest
    Manifest {
        /// Manifest file path
        path: PathBuf,

        #[command(flatten)]
        upload: UploadArgs,
    },
    /// Upload a local audio file with metadata from the lookup service
    Lookup {
        /// Song ID on the lookup service
        song_id: u64,

        /// Local audio file to upload
        audio_path: PathBuf,

        #[command(flatten)]
        upload: UploadArgs,
    },
}

#[derive(Args)]
struct UploadArgs {
    /// Description shown alongside the song
    #[arg(long)]
    description: Option<String>,

    /// Load and normalize everything without uploading
    #[arg(long)]
    dry_run: bool,
}

impl From<UploadArgs> for RunOptions {
    fn from(args: UploadArgs) -> Self {
        RunOptions {
            description: args.description,
            dry_run: args.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "cantata_uploader=debug,cantata_sources=debug,cantata_catalog_client=debug,cantata_artwork=debug"
    } else {
        "cantata_uploader=info,cantata_sources=info,cantata_catalog_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match execute(cli).await {
        Ok(Outcome::Uploaded { name, id }) => {
            println!("Uploaded {} (id {})", name, id);
            ExitCode::SUCCESS
        }
        Ok(Outcome::DryRun {
            name,
            cover_size,
            audio_size,
        }) => {
            println!(
                "Dry run for {}: cover {} bytes, audio {} bytes, nothing uploaded",
                name, cover_size, audio_size
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "Run failed");
            // Each error's message already includes its causes
            eprintln!("error: {}", err);
            if let Some(id) = err
                .downcast_ref::<UploaderError>()
                .and_then(|e| e.orphaned_id())
            {
                eprintln!(
                    "note: catalog record {} was created but is incomplete",
                    id
                );
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<Outcome> {
    let mut config = UploaderConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.catalog.url = url;
    }
    config.validate()?;

    let catalog = CatalogClient::new(config.catalog_config()).map_err(UploaderError::from)?;

    let (source, options): (Box<dyn SongSource>, RunOptions) = match cli.command {
        Commands::Manifest { path, upload } => (
            Box::new(ManifestSource::new(path, Arc::new(LoftyCoverReader::new()))),
            upload.into(),
        ),
        Commands::Lookup {
            song_id,
            audio_path,
            upload,
        } => {
            let lookup = LookupClient::new(config.lookup_config()).map_err(UploaderError::from)?;
            (
                Box::new(LookupSource::new(lookup, song_id, audio_path)),
                upload.into(),
            )
        }
    };

    Ok(pipeline::run(source.as_ref(), &catalog, &options).await?)
}
