//! Classify the entries of the season directory.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use itertools::Itertools;
use regex::Regex;

use crate::organize::types::{EpisodeEntry, ScanResult};
use crate::{list_directory, normalize_name, os_str_to_string, path_to_file_extension_string, path_to_filename_string};

/// Extensions that are deleted by default.
pub const DEFAULT_TRASH_EXTENSIONS: [&str; 3] = ["txt", "nfo", "exe"];

static RE_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?)(?: - )?[sS](?P<season>[0-9]+)[eE](?P<episode>[0-9]+).*\.(?P<extension>\w{3})$")
        .expect("Failed to create regex pattern for episode file name")
});

static RE_TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[0-9]{4}$").expect("Failed to create regex pattern for trailing year"));

/// Scan the root directory without recursion.
///
/// Files matching the episode pattern become episodes,
/// files with a trash extension are collected for deletion,
/// and directories starting with "sub" are collected as subtitle directories.
/// Everything else is ignored.
pub fn scan_directory(root: &Path, trash_extensions: &[String]) -> Result<ScanResult> {
    let mut result = ScanResult::default();
    let mut keys: HashSet<String> = HashSet::new();

    for entry in list_directory(root)? {
        let path = entry.path();
        let file_type = entry.file_type();
        if file_type.is_file() {
            if let Some(episode) = parse_episode_file(path) {
                if keys.insert(episode.key.clone()) {
                    result.episodes.push(episode);
                } else {
                    result.warnings.push(format!(
                        "Duplicate episode {}, skipping {}",
                        episode.key,
                        path_to_filename_string(path)
                    ));
                }
            } else if is_trash_file(path, trash_extensions) {
                result.trash.push(path.to_path_buf());
            }
        } else if file_type.is_dir() && is_subtitle_dir_name(&os_str_to_string(entry.file_name())) {
            result.subtitle_dirs.push(path.to_path_buf());
        }
    }

    if result.subtitle_dirs.len() > 1 {
        result.warnings.push(format!(
            "Found {} subtitle directories, merging: {}",
            result.subtitle_dirs.len(),
            result.subtitle_dirs.iter().map(|dir| path_to_filename_string(dir)).join(", ")
        ));
    }

    Ok(result)
}

/// Parse an episode from a media file path.
///
/// Returns `None` if the file name does not match the episode pattern.
#[must_use]
pub fn parse_episode_file(path: &Path) -> Option<EpisodeEntry> {
    let file_name = path_to_filename_string(path);
    let captures = RE_EPISODE.captures(&file_name)?;

    let extension = captures.name("extension")?;
    let season_digits = captures.name("season")?.as_str();
    let episode_digits = captures.name("episode")?.as_str();
    let season = season_digits.parse().ok()?;
    let episode = episode_digits.parse().ok()?;

    // Key is the file name without the trailing ".ext"
    let key = file_name[..extension.start() - 1].to_string();

    Some(EpisodeEntry {
        key,
        name: format_display_name(captures.name("name")?.as_str()),
        season,
        episode,
        tag: format!("s{season_digits}e{episode_digits}"),
        extension: extension.as_str().to_string(),
        media: path.to_path_buf(),
        subtitles: None,
    })
}

/// Format the raw show name from a file name.
///
/// Dots are replaced with spaces and a trailing release year is removed.
/// A name that consists only of a year is kept.
///
/// ```rust
/// use season_organizer::organize::format_display_name;
///
/// assert_eq!(format_display_name("Show.Name.2019."), "Show Name");
/// assert_eq!(format_display_name("Show Name"), "Show Name");
/// assert_eq!(format_display_name("1917"), "1917");
/// ```
#[must_use]
pub fn format_display_name(raw: &str) -> String {
    let name = raw.replace('.', " ");
    let name = name.trim();
    let without_year = RE_TRAILING_YEAR.replace(name, "");
    let without_year = without_year.trim();
    if without_year.is_empty() {
        normalize_name(name)
    } else {
        normalize_name(without_year)
    }
}

/// Check if the file extension is one of the given trash extensions.
#[must_use]
pub fn is_trash_file(path: &Path, trash_extensions: &[String]) -> bool {
    let extension = path_to_file_extension_string(path);
    !extension.is_empty() && trash_extensions.iter().any(|trash| *trash == extension)
}

/// Subtitle directories are named like "Subs", "subtitles" or " Sub ".
#[must_use]
pub fn is_subtitle_dir_name(name: &str) -> bool {
    name.trim().to_lowercase().starts_with("sub")
}
