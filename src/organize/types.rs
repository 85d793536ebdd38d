//! Values passed between the scan, plan and execute stages.

use std::path::{Path, PathBuf};

/// A media file recognized as a season episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeEntry {
    /// Original filename without extension.
    /// Used to correlate the media file with its subtitles.
    pub key: String,
    /// Show name formatted for the target filename.
    pub name: String,
    pub season: u32,
    pub episode: u32,
    /// Lowercase `s01e02` label keeping the original digits.
    pub tag: String,
    /// Media file extension as written in the original filename.
    pub extension: String,
    /// Absolute path to the media file.
    pub media: PathBuf,
    /// Subtitles found for this episode.
    /// `None` when no subtitle directory entry matched the key.
    pub subtitles: Option<Vec<SubtitleFile>>,
}

/// Subtitle candidate with its size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Filesystem operation produced by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Move { from: PathBuf, to: PathBuf },
    Delete { from: PathBuf },
}

/// Ordered operations together with warnings collected while planning.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Plan {
    pub operations: Vec<Operation>,
    pub warnings: Vec<String>,
}

/// Result of scanning the season directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Episodes in scan order.
    pub episodes: Vec<EpisodeEntry>,
    /// Files to delete.
    pub trash: Vec<PathBuf>,
    /// Directories that contain subtitles.
    pub subtitle_dirs: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl EpisodeEntry {
    /// Name with the episode tag, for example `Show Name - s01e02`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.tag)
    }

    /// Target filename for the media file.
    #[must_use]
    pub fn media_file_name(&self) -> String {
        format!("{}.{}", self.label(), self.extension)
    }

    /// Per-episode folder name, with the episode number written without leading zeros.
    #[must_use]
    pub fn folder_name(&self) -> String {
        format!("Episode {}", self.episode)
    }

    /// Subtitles for planning, or `None` if there are none.
    #[must_use]
    pub fn found_subtitles(&self) -> Option<&[SubtitleFile]> {
        self.subtitles.as_deref().filter(|subtitles| !subtitles.is_empty())
    }
}

impl SubtitleFile {
    #[must_use]
    pub const fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

impl Operation {
    /// Source path of the operation.
    #[must_use]
    pub fn source(&self) -> &Path {
        match self {
            Self::Move { from, .. } | Self::Delete { from } => from,
        }
    }

    /// Target path for moves.
    #[must_use]
    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Move { to, .. } => Some(to),
            Self::Delete { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }

    #[must_use]
    pub const fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}

impl Plan {
    /// Number of planned move operations.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_move()).count()
    }

    /// Number of planned delete operations.
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_delete()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
