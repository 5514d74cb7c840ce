use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use folio::archive::{self, ExtractLayout};
use folio::export;
use folio::project::Project;
use folio::registry::ProjectRegistry;
use folio::server;
use folio::store::{DEFAULT_CONNECT_TIMEOUT, DbStore, DirStore};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio web server and static site exporter")]
#[command(long_about = "\
Portfolio web server and static site exporter

A zip archive supplies the content. It is unpacked on startup, loaded into a
document database (or read straight from a directory of markdown files), and
served over HTTP — or exported as a fully static site.

Archive layout:

  input.zip
  ├── projects.json                # Project records (title, short, image_url,
  │                                #   description, date)
  └── images/                      # Image files → static/img/, flattened

Pipeline:

  extract → populate database → load registry → serve (and/or export)

In directory mode (--source dir) the archive and database are skipped: every
file in the content directory becomes one project, markdown converted to HTML,
titled by its file stem.")]
#[command(version)]
struct Cli {
    /// Zip archive supplying project records and images
    #[arg(long, default_value = "input/input.zip", global = true)]
    archive: PathBuf,

    /// Directory extracted content is written to (and the dir-mode source)
    #[arg(long, default_value = "extracted", global = true)]
    content_dir: PathBuf,

    /// Static asset directory; archive images land in its img/ subdirectory
    #[arg(long, default_value = "static", global = true)]
    asset_dir: PathBuf,

    /// Where project records come from
    #[arg(long, value_enum, default_value = "db", global = true)]
    source: SourceMode,

    /// Database connection string (ws://, rocksdb://, or mem://)
    #[arg(long, env = "FOLIO_DB", default_value = "ws://127.0.0.1:8000", global = true)]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SourceMode {
    /// Extract the archive, bulk-load the database, read records back
    Db,
    /// Read markdown files straight from the content directory
    Dir,
}

#[derive(Subcommand)]
enum Command {
    /// Run the content pipeline, then serve over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:9000")]
        addr: SocketAddr,

        /// Also export the rendered site before serving
        #[arg(long, env = "FOLIO_STATIC")]
        static_export: bool,

        /// Export destination (with --static-export)
        #[arg(long, default_value = "out")]
        output: PathBuf,
    },
    /// Run the content pipeline, then export the site as static files
    Export {
        /// Export destination
        #[arg(long, default_value = "out")]
        output: PathBuf,
    },
    /// Run the content pipeline and report what it finds, without serving
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let registry = Arc::new(ProjectRegistry::new());
    load_content(&cli, &registry).await?;

    match cli.command {
        Command::Serve {
            addr,
            static_export,
            output,
        } => {
            if static_export {
                let report = export::export_all(&registry, &cli.asset_dir, &output)
                    .context("static export failed")?;
                info!(
                    pages = report.pages,
                    assets = report.assets,
                    "exported site to {}",
                    output.display()
                );
            }
            server::serve(addr, registry, cli.asset_dir.clone())
                .await
                .context("server error")?;
        }
        Command::Export { output } => {
            let report = export::export_all(&registry, &cli.asset_dir, &output)
                .context("static export failed")?;
            info!(
                pages = report.pages,
                assets = report.assets,
                "exported site to {}",
                output.display()
            );
        }
        Command::Check => {
            println!("==> Content is valid");
            for project in registry.snapshot().iter() {
                println!("    {}", project.title);
            }
            println!("    {} project(s)", registry.len());
        }
    }

    Ok(())
}

/// Run the front half of the pipeline: extract, populate, load.
///
/// Every failure here is fatal by design — a misconfigured deployment must
/// not come up serving empty content.
async fn load_content(cli: &Cli, registry: &ProjectRegistry) -> anyhow::Result<()> {
    match cli.source {
        SourceMode::Db => {
            let layout = ExtractLayout {
                content_dir: cli.content_dir.clone(),
                image_dir: cli.asset_dir.join("img"),
            };
            let report = archive::extract(&cli.archive, &layout)
                .with_context(|| format!("extracting {}", cli.archive.display()))?;
            info!(
                content_files = report.content_files,
                images = report.images,
                "archive extracted"
            );

            let records = read_records(&cli.content_dir.join("projects.json"))?;

            let store = DbStore::connect(&cli.db, DEFAULT_CONNECT_TIMEOUT)
                .await
                .with_context(|| format!("connecting to database at {}", cli.db))?;
            store
                .populate(&records)
                .await
                .context("populating database")?;

            let count = registry
                .reload(&store)
                .await
                .context("loading projects from database")?;
            info!(count, "registry loaded from database");
        }
        SourceMode::Dir => {
            let store = DirStore::new(cli.content_dir.clone());
            let count = registry
                .reload(&store)
                .await
                .with_context(|| {
                    format!("loading projects from {}", cli.content_dir.display())
                })?;
            info!(count, "registry loaded from {}", cli.content_dir.display());
        }
    }
    Ok(())
}

fn read_records(path: &Path) -> anyhow::Result<Vec<Project>> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<Project> =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}
