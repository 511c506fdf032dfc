use anyhow::Context;
use cakestand_common::CakeId;
use cakestand_input::Action;
use cakestand_render::{DebugTextRenderer, Renderer};
use cakestand_scene::{Catalog, Scene};
use cakestand_stage::Stage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cakestand-cli", about = "CLI tool for cakestand")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML catalog replacing the built-in cakes
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and catalog summary
    Info,
    /// List the cakes in the catalog
    List,
    /// Print the catalog as YAML, a starting point for `--catalog`
    Export,
    /// Select cakes in order and print the resulting frame
    Select {
        /// Cake ids, applied left to right
        #[arg(required = true)]
        ids: Vec<u32>,
        /// Print the final state as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };

    match cli.command {
        Commands::Info => {
            println!("cakestand-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "catalog: {} cakes ({})",
                catalog.len(),
                if cli.catalog.is_some() { "file" } else { "built-in" }
            );
            let stage = Stage::new(Scene::from_catalog(&catalog));
            let cam = stage.camera();
            println!(
                "camera: eye=({:.1}, {:.1}, {:.1}) fov={:.0}",
                cam.position.x,
                cam.position.y,
                cam.position.z,
                cam.fov.to_degrees()
            );
        }
        Commands::List => {
            for spec in &catalog.cakes {
                let [x, y, z] = spec.position;
                println!(
                    "{:<4} {:<20} ({x:>5.1}, {y:>5.1}, {z:>5.1})  {}  {}",
                    spec.id.to_string(),
                    spec.name,
                    spec.color.to_hex(),
                    spec.image.display()
                );
            }
        }
        Commands::Export => {
            print!("{}", catalog.to_yaml()?);
        }
        Commands::Select { ids, json } => {
            let mut stage = Stage::new(Scene::from_catalog(&catalog));
            for id in ids {
                let change = stage
                    .apply(Action::Select(CakeId(id)))?
                    .context("select produced no change")?;
                tracing::info!(
                    "selected {} (previous {:?})",
                    change.current,
                    change.previous
                );
                for event in stage.scene_mut().drain_events() {
                    tracing::debug!("scene event: {event:?}");
                }
            }

            if json {
                let cam = stage.camera();
                let out = serde_json::json!({
                    "selected": stage.scene().selected(),
                    "cakes": stage.scene().cakes(),
                    "label": stage.scene().label().map(|l| l.text),
                    "camera": {
                        "position": cam.position.to_array(),
                        "target": cam.target.to_array(),
                        "up": cam.up.to_array(),
                    },
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let frame = DebugTextRenderer::new().render(stage.scene(), stage.camera());
                print!("{frame}");
            }
        }
    }

    Ok(())
}
