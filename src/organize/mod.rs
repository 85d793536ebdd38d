//! Organize a TV season directory.
//!
//! Episode files are renamed to `<Show> - s01e02.<ext>`.
//! When subtitles are found, each episode is moved to an `Episode <n>` folder
//! together with its subtitles named by language and role,
//! for example `<Show> - s01e02.en.forced.srt`.
//! Leftover text, info and executable files are deleted
//! and empty directories are removed afterwards.

mod config;
mod execute;
mod language;
mod organizer;
mod plan;
mod report;
mod scan;
mod subtitles;
mod types;

pub use config::{CliOptions, OrgSeasonConfig, OrganizeConfig};
pub use execute::{execute_operations, remove_empty_directories};
pub use language::{LANGUAGES, Language, detect_languages};
pub use organizer::{RunOutcome, SeasonOrganizer};
pub use plan::{RoleAssignment, SubtitleRole, assign_roles, plan_operations};
pub use report::{
    Summary, confirm, existing_target_count, overwrite_count, print_operations, print_warnings, repeated_source_count,
};
pub use scan::{
    DEFAULT_TRASH_EXTENSIONS, format_display_name, is_subtitle_dir_name, is_trash_file, parse_episode_file,
    scan_directory,
};
pub use subtitles::{SUBTITLE_EXTENSIONS, is_subtitle_file, locate_subtitles};
pub use types::{EpisodeEntry, Operation, Plan, ScanResult, SubtitleFile};
