//! Copies the hand-detection scripts and model files out of `node_modules`
//! into the directory the game serves them from.
//!
//! Usage: cargo run --bin prepare-assets -- --node-modules node_modules --dest assets/mediapipe

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use fortune_hands::assets::{self, AssetConfig};

    #[derive(Parser, Debug)]
    #[command(name = "prepare-assets")]
    #[command(about = "Copy the hand-detection library into the public asset directory")]
    struct Args {
        /// Directory holding the installed npm packages
        #[arg(long, default_value = "node_modules")]
        node_modules: PathBuf,

        /// Destination directory (created if missing)
        #[arg(long, default_value = "assets/mediapipe")]
        dest: PathBuf,
    }

    pub fn run() -> Result<()> {
        tracing_subscriber::fmt::init();
        let args = Args::parse();
        let config = AssetConfig {
            node_modules: args.node_modules,
            dest: args.dest,
        };
        let written = assets::prepare(&config).with_context(|| {
            format!(
                "preparing hand-detection assets from {}",
                config.node_modules.display()
            )
        })?;

        for path in &written {
            println!("  {}", path.display());
        }
        println!(
            "copied {} files into {}",
            written.len(),
            config.dest.display()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = cli::run() {
        eprintln!("prepare-assets failed: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
