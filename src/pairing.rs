/*!
 * Batch pairing of subtitle files between two folders.
 *
 * Files are walked in natural order. Each file of the first folder is matched
 * to one unmatched file of the second folder, either by name containment
 * (confirmed by the operator) or by explicit selection. A file of the second
 * folder is used at most once.
 */

use std::path::{Path, PathBuf};
use log::{info, warn};
use crate::errors::PairingError;
use crate::file_utils::FileManager;
use crate::prompt::{select_index, Prompter};

/// Two files to merge together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub first: PathBuf,
    pub second: PathBuf,
}

/// Leading part of a file name up to its first `.`, so `ep01.en.srt` gives `ep01`
pub fn match_key(name: &str) -> &str {
    name.split('.').next().unwrap_or_default()
}

/// Index of the first candidate whose name contains the match key of `name`,
/// or whose match key is contained in `name`
pub fn find_auto_match(name: &str, candidates: &[PathBuf]) -> Option<usize> {
    let key = match_key(name);

    candidates.iter().position(|candidate| {
        let other = FileManager::file_name(candidate);
        let other_key = match_key(&other);
        (!key.is_empty() && other.contains(key)) || (!other_key.is_empty() && name.contains(other_key))
    })
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, PairingError> {
    FileManager::list_subtitle_files(dir).map_err(|e| PairingError::DirectoryListing {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })
}

/// Pair the subtitle files of `dir1` with those of `dir2`.
///
/// Produces at most `min(|dir1|, |dir2|)` pairs, in `dir1` order.
pub fn pair_files<P1: AsRef<Path>, P2: AsRef<Path>>(
    dir1: P1,
    dir2: P2,
    prompter: &mut dyn Prompter,
) -> Result<Vec<FilePair>, PairingError> {
    let files1 = list_dir(dir1.as_ref())?;
    let mut candidates = list_dir(dir2.as_ref())?;

    if files1.len() != candidates.len() {
        warn!("Different number of files in folders ({} vs {})", files1.len(), candidates.len());
    }

    let mut pairs = Vec::with_capacity(files1.len().min(candidates.len()));

    for (i, file1) in files1.iter().enumerate() {
        if candidates.is_empty() {
            let unmatched: Vec<String> = files1[i..].iter().map(|f| FileManager::file_name(f)).collect();
            warn!("No files left to match for: {}", unmatched.join(", "));
            break;
        }

        let name1 = FileManager::file_name(file1);
        prompter.show(&format!("\nFile {}: {}", i + 1, name1));

        if let Some(index) = find_auto_match(&name1, &candidates) {
            prompter.show(&format!("Auto-matched with: {}", FileManager::file_name(&candidates[index])));
            if prompter.confirm("Is this correct?", true)? {
                pairs.push(FilePair {
                    first: file1.clone(),
                    second: candidates.remove(index),
                });
                continue;
            }
        }

        prompter.show("\nAvailable matching files:");
        for (j, candidate) in candidates.iter().enumerate() {
            prompter.show(&format!("{}: {}", j + 1, FileManager::file_name(candidate)));
        }

        let message = format!("Select matching file for {} (1-{})", name1, candidates.len());
        let index = select_index(prompter, &message, candidates.len())?;
        pairs.push(FilePair {
            first: file1.clone(),
            second: candidates.remove(index),
        });
    }

    info!("Matched {} file pair(s)", pairs.len());
    Ok(pairs)
}
