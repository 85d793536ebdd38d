//! Apply planned operations to the filesystem.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::organize::types::Operation;
use crate::{is_directory_empty, list_directory};

/// Perform all operations in order and return how many were applied.
///
/// Stops at the first failure.
/// Operations that were already performed stay applied.
pub fn execute_operations(operations: &[Operation]) -> Result<usize> {
    let mut count = 0;
    for operation in operations {
        match operation {
            Operation::Move { from, to } => {
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
                }
                fs::rename(from, to)
                    .with_context(|| format!("Failed to move {} to {}", from.display(), to.display()))?;
            }
            Operation::Delete { from } => {
                fs::remove_file(from).with_context(|| format!("Failed to delete {}", from.display()))?;
            }
        }
        count += 1;
    }
    Ok(count)
}

/// Remove empty directories under the root, deepest first.
///
/// A directory that only contains empty directories is removed as well.
/// The root itself is kept. Symlinks are not followed.
/// Returns the number of removed directories.
pub fn remove_empty_directories(root: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in list_directory(root)? {
        if entry.file_type().is_dir() {
            removed += remove_if_empty(entry.path())?;
        }
    }
    Ok(removed)
}

/// Process children first, then remove the directory if nothing is left.
fn remove_if_empty(dir: &Path) -> Result<usize> {
    let mut removed = remove_empty_directories(dir)?;
    if is_directory_empty(dir) {
        fs::remove_dir(dir).with_context(|| format!("Failed to remove directory: {}", dir.display()))?;
        removed += 1;
    }
    Ok(removed)
}
