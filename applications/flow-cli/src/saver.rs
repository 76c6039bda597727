//! Saving downloaded tracks to disk

use crate::error::{AppError, Result};
use flow_core::Track;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for a track: `"{artist} - {title}.mp3"`
///
/// Path separators, characters reserved on common filesystems and control
/// characters become `_`.
pub fn file_name(track: &Track) -> String {
    let stem: String = track
        .display_title()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let stem = stem.trim().trim_matches('.');
    if stem.is_empty() {
        "track.mp3".to_string()
    } else {
        format!("{}.mp3", stem)
    }
}

/// Write `bytes` into `dir` under the track's file name
///
/// Creates `dir` when missing. Returns the written path.
pub async fn save_track(dir: &Path, track: &Track, bytes: &[u8]) -> Result<PathBuf> {
    let save_failed = |e: std::io::Error| AppError::SaveFailed {
        cause: e.to_string(),
    };

    tokio::fs::create_dir_all(dir).await.map_err(save_failed)?;

    let path = dir.join(file_name(track));
    tokio::fs::write(&path, bytes).await.map_err(save_failed)?;

    info!(path = %path.display(), size = bytes.len(), "Track saved");
    Ok(path)
}
