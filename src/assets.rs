//! Build-time copy of the hand-detection library into the public asset
//! directory. A missing file is fatal: the game cannot start without it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AssetError;

const HANDS_PACKAGE: &str = "@mediapipe/hands";
const CAMERA_UTILS_PACKAGE: &str = "@mediapipe/camera_utils";
const CAMERA_UTILS_TARGET: &str = "camera_utils.js";

const HANDS_FILES: [&str; 4] = [
    "hands.js",
    "hands_solution_simd_wasm_bin.wasm",
    "hands_solution_simd_wasm_bin.data",
    "hands_solution_simd_wasm_bin.js",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub node_modules: PathBuf,
    pub dest: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            node_modules: PathBuf::from("node_modules"),
            dest: PathBuf::from("assets/mediapipe"),
        }
    }
}

impl AssetConfig {
    fn hands_dir(&self) -> PathBuf {
        self.node_modules.join(HANDS_PACKAGE)
    }

    fn camera_utils_dir(&self) -> PathBuf {
        self.node_modules.join(CAMERA_UTILS_PACKAGE)
    }
}

/// Copies every required file, stopping at the first failure. Returns the
/// written paths in copy order.
pub fn prepare(config: &AssetConfig) -> Result<Vec<PathBuf>, AssetError> {
    fs::create_dir_all(&config.dest).map_err(|source| AssetError::Io {
        path: config.dest.clone(),
        source,
    })?;

    let hands_dir = config.hands_dir();
    let mut written = Vec::with_capacity(HANDS_FILES.len() + 1);
    for file in HANDS_FILES {
        let to = config.dest.join(file);
        copy(&hands_dir.join(file), &to)?;
        info!(file, "copied");
        written.push(to);
    }

    let camera_utils = find_camera_utils(&config.camera_utils_dir())?;
    let to = config.dest.join(CAMERA_UTILS_TARGET);
    copy(&camera_utils, &to)?;
    info!(file = CAMERA_UTILS_TARGET, "copied");
    written.push(to);

    Ok(written)
}

fn copy(from: &Path, to: &Path) -> Result<(), AssetError> {
    if !from.is_file() {
        return Err(AssetError::MissingSource(from.to_path_buf()));
    }
    fs::copy(from, to).map_err(|source| AssetError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// The camera utils package ships a single script whose name varies between
/// releases; take the first `.js` file by name.
fn find_camera_utils(dir: &Path) -> Result<PathBuf, AssetError> {
    let entries = fs::read_dir(dir).map_err(|source| AssetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut scripts: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "js"))
        .collect();
    scripts.sort();
    scripts
        .into_iter()
        .next()
        .ok_or_else(|| AssetError::NoCameraUtils(dir.to_path_buf()))
}
