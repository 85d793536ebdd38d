//! Find subtitle files for scanned episodes.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::organize::types::{EpisodeEntry, SubtitleFile};
use crate::{display_relative, list_directory, os_str_to_string, path_to_file_extension_string};

/// Extensions accepted for subtitle files placed directly in a subtitle directory.
pub const SUBTITLE_EXTENSIONS: [&str; 5] = ["srt", "smi", "ssa", "ass", "vtt"];

/// Collect subtitles for the given episodes from the subtitle directories.
///
/// Each subtitle directory can contain:
/// - a directory named after the episode key, with `.srt` files inside,
/// - subtitle files named after the episode key, like `Show.S01E02.English.srt`.
///
/// Entries that do not match any episode are ignored.
/// Directories are visited in the given order and their contents in name order.
/// When `progress` is given, every visited entry is written to it relative to the root.
pub fn locate_subtitles(
    mut episodes: Vec<EpisodeEntry>,
    subtitle_dirs: &[impl AsRef<Path>],
    root: &Path,
    mut progress: Option<&mut dyn Write>,
) -> Result<Vec<EpisodeEntry>> {
    let index: HashMap<String, usize> = episodes
        .iter()
        .enumerate()
        .map(|(position, episode)| (episode.key.clone(), position))
        .collect();

    for subtitle_dir in subtitle_dirs {
        for entry in list_directory(subtitle_dir.as_ref())? {
            let path = entry.path();
            if let Some(out) = progress.as_deref_mut() {
                writeln!(out, "{}", display_relative(path, root))?;
            }
            let name = os_str_to_string(entry.file_name());
            if entry.file_type().is_dir() {
                let Some(&position) = index.get(&name) else {
                    continue;
                };
                let found = collect_srt_files(path)?;
                episodes[position].subtitles.get_or_insert_with(Vec::new).extend(found);
            } else if entry.file_type().is_file() && is_subtitle_file(path) {
                let stem = name.rsplit_once('.').map_or(name.as_str(), |(stem, _)| stem);
                let Some(position) = match_episode_key(stem, &index) else {
                    continue;
                };
                let subtitle = subtitle_file(path)?;
                episodes[position].subtitles.get_or_insert_with(Vec::new).push(subtitle);
            }
        }
    }

    Ok(episodes)
}

/// Check if the path has one of the supported subtitle extensions.
#[must_use]
pub fn is_subtitle_file(path: &Path) -> bool {
    let extension = path_to_file_extension_string(path);
    SUBTITLE_EXTENSIONS.contains(&extension.as_str())
}

/// Find the episode whose key matches the subtitle file stem.
///
/// The stem matches when it equals the key,
/// or starts with the key followed by a dot-separated suffix.
/// The longest matching key wins.
fn match_episode_key(stem: &str, index: &HashMap<String, usize>) -> Option<usize> {
    let mut candidate = stem;
    loop {
        if let Some(&position) = index.get(candidate) {
            return Some(position);
        }
        candidate = candidate.rsplit_once('.')?.0;
    }
}

/// Collect `.srt` files directly inside the per-episode directory, sorted by name.
fn collect_srt_files(dir: &Path) -> Result<Vec<SubtitleFile>> {
    list_directory(dir)?
        .iter()
        .filter(|entry| entry.file_type().is_file() && path_to_file_extension_string(entry.path()) == "srt")
        .map(|entry| subtitle_file(entry.path()))
        .collect()
}

fn subtitle_file(path: &Path) -> Result<SubtitleFile> {
    let size = fs::metadata(path)
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?
        .len();
    Ok(SubtitleFile::new(path.to_path_buf(), size))
}
