//! Decide target names for episodes and subtitles.
//!
//! Episodes without subtitles are renamed in place.
//! Episodes with subtitles are moved into an `Episode <n>` folder together with their subtitles.
//! When there are several subtitles, they are grouped by language
//! and the role of each file (forced, plain or SDH) is inferred from its size:
//! forced subtitles only contain the foreign dialogue so they are much smaller,
//! while SDH subtitles also describe sounds so they are the largest.

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::organize::language::{Language, detect_languages};
use crate::organize::types::{EpisodeEntry, Operation, Plan, SubtitleFile};
use crate::path_to_filename_string;

/// Language code used when an episode has exactly one subtitle.
const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Subtitle variant inferred from the file sizes within one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleRole {
    /// Only foreign dialogue and on-screen text.
    Forced,
    Plain,
    /// Includes descriptions of non-dialogue audio.
    Sdh,
}

/// Outcome of assigning roles to a same-language subtitle group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleAssignment {
    /// One role per subtitle, in ascending size order.
    Assigned(Vec<SubtitleRole>),
    /// Three subtitles without a clearly smaller forced one.
    SimilarSizes,
    /// Group size other than one to three.
    UnexpectedCount(usize),
}

struct Planner<'a> {
    root: &'a Path,
    plan: Plan,
}

impl SubtitleRole {
    /// Filename suffix placed between the language code and the extension.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Forced => ".forced",
            Self::Plain => "",
            Self::Sdh => ".sdh",
        }
    }
}

/// Create the ordered operations for the given episodes and trash files.
///
/// Operations follow the episode order, with trash deletions last.
#[must_use]
pub fn plan_operations(root: &Path, episodes: &[EpisodeEntry], trash: &[PathBuf]) -> Plan {
    let mut planner = Planner::new(root);
    for episode in episodes {
        planner.plan_episode(episode);
    }
    for path in trash {
        planner.plan.operations.push(Operation::Delete { from: path.clone() });
    }
    planner.plan
}

/// Assign roles to a same-language subtitle group from sizes sorted in ascending order.
///
/// ```rust
/// use season_organizer::organize::{RoleAssignment, SubtitleRole, assign_roles};
///
/// assert_eq!(
///     assign_roles(&[100, 300]),
///     RoleAssignment::Assigned(vec![SubtitleRole::Forced, SubtitleRole::Plain])
/// );
/// assert_eq!(
///     assign_roles(&[100, 150]),
///     RoleAssignment::Assigned(vec![SubtitleRole::Plain, SubtitleRole::Sdh])
/// );
/// ```
#[must_use]
pub fn assign_roles(sorted_sizes: &[u64]) -> RoleAssignment {
    match *sorted_sizes {
        [_] => RoleAssignment::Assigned(vec![SubtitleRole::Plain]),
        [smaller, larger] => {
            if is_forced_size(smaller, larger) {
                RoleAssignment::Assigned(vec![SubtitleRole::Forced, SubtitleRole::Plain])
            } else {
                RoleAssignment::Assigned(vec![SubtitleRole::Plain, SubtitleRole::Sdh])
            }
        }
        [smallest, _, largest] => {
            if is_forced_size(smallest, largest) {
                RoleAssignment::Assigned(vec![SubtitleRole::Forced, SubtitleRole::Plain, SubtitleRole::Sdh])
            } else {
                RoleAssignment::SimilarSizes
            }
        }
        _ => RoleAssignment::UnexpectedCount(sorted_sizes.len()),
    }
}

/// A forced subtitle is at most half the size of the largest one.
const fn is_forced_size(smaller: u64, larger: u64) -> bool {
    smaller.saturating_mul(2) <= larger
}

impl<'a> Planner<'a> {
    fn new(root: &'a Path) -> Self {
        Self {
            root,
            plan: Plan::default(),
        }
    }

    fn plan_episode(&mut self, episode: &EpisodeEntry) {
        let Some(subtitles) = episode.found_subtitles() else {
            self.push_move(&episode.media, self.root.join(episode.media_file_name()));
            return;
        };

        let folder = self.root.join(episode.folder_name());
        self.push_move(&episode.media, folder.join(episode.media_file_name()));

        if let [subtitle] = subtitles {
            self.push_move(
                &subtitle.path,
                folder.join(subtitle_file_name(episode, DEFAULT_LANGUAGE_CODE, SubtitleRole::Plain)),
            );
        } else {
            self.plan_subtitle_groups(episode, subtitles, &folder);
        }
    }

    fn plan_subtitle_groups(&mut self, episode: &EpisodeEntry, subtitles: &[SubtitleFile], folder: &Path) {
        for (language, mut group) in self.group_by_language(episode, subtitles) {
            group.sort_by_key(|subtitle| subtitle.size);
            let sizes: Vec<u64> = group.iter().map(|subtitle| subtitle.size).collect();
            match assign_roles(&sizes) {
                RoleAssignment::Assigned(roles) => {
                    for (subtitle, role) in group.iter().zip(roles) {
                        self.push_move(&subtitle.path, folder.join(subtitle_file_name(episode, language.code, role)));
                    }
                }
                RoleAssignment::SimilarSizes => self.plan.warnings.push(format!(
                    "{} has 3 {} subs of similar size, please check manually",
                    episode.label(),
                    language.display_name()
                )),
                RoleAssignment::UnexpectedCount(count) => self.plan.warnings.push(format!(
                    "{} has {count} {} subs, please check manually",
                    episode.label(),
                    language.display_name()
                )),
            }
        }
    }

    /// Group subtitles by detected language, keeping the order of first appearance.
    /// Subtitles without a recognized language are left out with a warning.
    /// A subtitle matching several languages joins each group and is flagged with a warning.
    fn group_by_language<'s>(
        &mut self,
        episode: &EpisodeEntry,
        subtitles: &'s [SubtitleFile],
    ) -> Vec<(Language, Vec<&'s SubtitleFile>)> {
        let mut groups: Vec<(Language, Vec<&SubtitleFile>)> = Vec::new();
        for subtitle in subtitles {
            let file_name = path_to_filename_string(&subtitle.path);
            let languages = detect_languages(&file_name);
            if languages.is_empty() {
                self.plan.warnings.push(format!(
                    "{} subtitle {file_name} has no recognized language, skipping",
                    episode.label()
                ));
            } else if languages.len() > 1 {
                self.plan.warnings.push(format!(
                    "{} subtitle {file_name} matches several languages ({}), please check manually",
                    episode.label(),
                    languages.iter().map(Language::display_name).join(", ")
                ));
            }
            for language in languages {
                if let Some((_, group)) = groups.iter_mut().find(|(existing, _)| *existing == language) {
                    group.push(subtitle);
                } else {
                    groups.push((language, vec![subtitle]));
                }
            }
        }
        groups
    }

    /// Add a move unless the file is already at the target.
    fn push_move(&mut self, from: &Path, to: PathBuf) {
        if from != to {
            self.plan.operations.push(Operation::Move {
                from: from.to_path_buf(),
                to,
            });
        }
    }
}

fn subtitle_file_name(episode: &EpisodeEntry, language_code: &str, role: SubtitleRole) -> String {
    format!("{}.{language_code}{}.srt", episode.label(), role.suffix())
}

#[cfg(test)]
mod plan_tests {
    use super::*;

    const ROOT: &str = "/tv/Show";

    fn root() -> PathBuf {
        PathBuf::from(ROOT)
    }

    fn episode(subtitles: Option<Vec<SubtitleFile>>) -> EpisodeEntry {
        EpisodeEntry {
            key: "Show.Name.2019.S01E02".to_string(),
            name: "Show Name".to_string(),
            season: 1,
            episode: 2,
            tag: "s01e02".to_string(),
            extension: "mkv".to_string(),
            media: root().join("Show.Name.2019.S01E02.mkv"),
            subtitles,
        }
    }

    fn subtitle(name: &str, size: u64) -> SubtitleFile {
        SubtitleFile::new(root().join("Subs").join("Show.Name.2019.S01E02").join(name), size)
    }

    fn moved(from: PathBuf, to: &str) -> Operation {
        Operation::Move {
            from,
            to: root().join(to),
        }
    }

    fn media_move_to_folder() -> Operation {
        moved(
            root().join("Show.Name.2019.S01E02.mkv"),
            "Episode 2/Show Name - s01e02.mkv",
        )
    }

    #[test]
    fn no_subtitles_renames_in_place() {
        let plan = plan_operations(&root(), &[episode(None)], &[]);
        assert_eq!(
            plan.operations,
            vec![moved(root().join("Show.Name.2019.S01E02.mkv"), "Show Name - s01e02.mkv")]
        );
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn empty_subtitle_list_renames_in_place() {
        let plan = plan_operations(&root(), &[episode(Some(Vec::new()))], &[]);
        assert_eq!(
            plan.operations,
            vec![moved(root().join("Show.Name.2019.S01E02.mkv"), "Show Name - s01e02.mkv")]
        );
    }

    #[test]
    fn single_subtitle_defaults_to_english() {
        let sub = subtitle("Show.Name.2019.S01E02.ass", 500);
        let plan = plan_operations(&root(), &[episode(Some(vec![sub.clone()]))], &[]);
        assert_eq!(
            plan.operations,
            vec![
                media_move_to_folder(),
                moved(sub.path, "Episode 2/Show Name - s01e02.en.srt"),
            ]
        );
    }

    #[test]
    fn forced_and_plain_pair() {
        let small = subtitle("2_English.srt", 100);
        let large = subtitle("3_English.srt", 300);
        let plan = plan_operations(&root(), &[episode(Some(vec![large.clone(), small.clone()]))], &[]);
        assert_eq!(
            plan.operations,
            vec![
                media_move_to_folder(),
                moved(small.path, "Episode 2/Show Name - s01e02.en.forced.srt"),
                moved(large.path, "Episode 2/Show Name - s01e02.en.srt"),
            ]
        );
    }

    #[test]
    fn plain_and_sdh_pair() {
        let small = subtitle("2_English.srt", 100);
        let large = subtitle("3_English.srt", 150);
        let plan = plan_operations(&root(), &[episode(Some(vec![small.clone(), large.clone()]))], &[]);
        assert_eq!(
            plan.operations,
            vec![
                media_move_to_folder(),
                moved(small.path, "Episode 2/Show Name - s01e02.en.srt"),
                moved(large.path, "Episode 2/Show Name - s01e02.en.sdh.srt"),
            ]
        );
    }

    #[test]
    fn exactly_half_size_is_forced() {
        assert_eq!(
            assign_roles(&[100, 200]),
            RoleAssignment::Assigned(vec![SubtitleRole::Forced, SubtitleRole::Plain])
        );
        assert_eq!(
            assign_roles(&[101, 200]),
            RoleAssignment::Assigned(vec![SubtitleRole::Plain, SubtitleRole::Sdh])
        );
    }

    #[test]
    fn three_subtitles_with_forced() {
        let forced = subtitle("2_English.srt", 50);
        let plain = subtitle("3_English.srt", 140);
        let sdh = subtitle("4_English.srt", 200);
        let plan = plan_operations(
            &root(),
            &[episode(Some(vec![sdh.clone(), forced.clone(), plain.clone()]))],
            &[],
        );
        assert_eq!(
            plan.operations,
            vec![
                media_move_to_folder(),
                moved(forced.path, "Episode 2/Show Name - s01e02.en.forced.srt"),
                moved(plain.path, "Episode 2/Show Name - s01e02.en.srt"),
                moved(sdh.path, "Episode 2/Show Name - s01e02.en.sdh.srt"),
            ]
        );
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn three_similar_subtitles_warn() {
        let subtitles = vec![
            subtitle("2_English.srt", 100),
            subtitle("3_English.srt", 110),
            subtitle("4_English.srt", 120),
        ];
        let plan = plan_operations(&root(), &[episode(Some(subtitles))], &[]);
        assert_eq!(plan.operations, vec![media_move_to_folder()]);
        assert_eq!(
            plan.warnings,
            vec!["Show Name - s01e02 has 3 English subs of similar size, please check manually"]
        );
    }

    #[test]
    fn four_subtitles_warn_with_count() {
        let subtitles = vec![
            subtitle("2_Spanish.srt", 10),
            subtitle("3_Spanish.srt", 20),
            subtitle("4_Spanish.srt", 30),
            subtitle("5_Spanish.srt", 40),
            subtitle("6_French.srt", 40),
        ];
        let plan = plan_operations(&root(), &[episode(Some(subtitles.clone()))], &[]);
        assert_eq!(
            plan.operations,
            vec![
                media_move_to_folder(),
                moved(subtitles[4].path.clone(), "Episode 2/Show Name - s01e02.fr.srt"),
            ]
        );
        assert_eq!(
            plan.warnings,
            vec!["Show Name - s01e02 has 4 Spanish subs, please check manually"]
        );
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let german = subtitle("5_German.srt", 10);
        let english = subtitle("6_English.srt", 10);
        let plan = plan_operations(&root(), &[episode(Some(vec![german.clone(), english.clone()]))], &[]);
        assert_eq!(
            plan.operations,
            vec![
                media_move_to_folder(),
                moved(german.path, "Episode 2/Show Name - s01e02.de.srt"),
                moved(english.path, "Episode 2/Show Name - s01e02.en.srt"),
            ]
        );
    }

    #[test]
    fn unknown_language_is_skipped_with_warning() {
        let english = subtitle("2_English.srt", 10);
        let unknown = subtitle("9_Klingon.srt", 10);
        let plan = plan_operations(&root(), &[episode(Some(vec![english.clone(), unknown]))], &[]);
        assert_eq!(
            plan.operations,
            vec![
                media_move_to_folder(),
                moved(english.path, "Episode 2/Show Name - s01e02.en.srt"),
            ]
        );
        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings[0].contains("9_Klingon.srt"));
    }

    #[test]
    fn subtitle_with_several_languages_is_flagged() {
        let english = subtitle("2_English.srt", 100);
        let both = subtitle("3_English_German.srt", 150);
        let plan = plan_operations(&root(), &[episode(Some(vec![english.clone(), both.clone()]))], &[]);
        assert_eq!(
            plan.operations,
            vec![
                media_move_to_folder(),
                moved(english.path, "Episode 2/Show Name - s01e02.en.srt"),
                moved(both.path.clone(), "Episode 2/Show Name - s01e02.en.sdh.srt"),
                moved(both.path, "Episode 2/Show Name - s01e02.de.srt"),
            ]
        );
        assert_eq!(
            plan.warnings,
            vec![
                "Show Name - s01e02 subtitle 3_English_German.srt matches several languages (English, German), \
                 please check manually"
            ]
        );
    }

    #[test]
    fn trash_deletes_come_last() {
        let trash = vec![root().join("RARBG.txt"), root().join("info.nfo")];
        let plan = plan_operations(&root(), &[episode(None)], &trash);
        assert_eq!(plan.operations.len(), 3);
        assert!(plan.operations[0].is_move());
        assert_eq!(
            plan.operations[1..],
            [
                Operation::Delete {
                    from: root().join("RARBG.txt")
                },
                Operation::Delete {
                    from: root().join("info.nfo")
                },
            ]
        );
    }

    #[test]
    fn already_named_file_is_not_moved() {
        let mut entry = episode(None);
        entry.media = root().join("Show Name - s01e02.mkv");
        let plan = plan_operations(&root(), &[entry], &[]);
        assert!(plan.is_empty());
    }

    #[test]
    fn operations_follow_episode_order() {
        let mut first = episode(None);
        first.media = root().join("b.S01E02.mkv");
        let mut second = episode(None);
        second.media = root().join("a.S01E03.mkv");
        second.episode = 3;
        second.tag = "s01e03".to_string();

        let plan = plan_operations(&root(), &[first, second], &[]);
        let sources: Vec<PathBuf> = plan.operations.iter().map(|op| op.source().to_path_buf()).collect();
        assert_eq!(sources, vec![root().join("b.S01E02.mkv"), root().join("a.S01E03.mkv")]);
    }
}
