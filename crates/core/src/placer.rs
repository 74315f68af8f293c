use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    Move,
    Copy,
}

/// Puts `source` into `output_root/subject/`, never overwriting: on a name
/// collision `_1`, `_2`, ... is appended before the extension until a free
/// name is found. Returns the final destination path.
pub fn place(
    source: &Path,
    output_root: &Path,
    subject: &str,
    mode: PlacementMode,
) -> Result<PathBuf> {
    let subject_dir = output_root.join(subject);
    fs::create_dir_all(&subject_dir)
        .with_context(|| format!("Failed to create subject folder: {}", subject_dir.display()))?;

    let file_name = source
        .file_name()
        .with_context(|| format!("Source has no file name: {}", source.display()))?;
    let candidate = subject_dir.join(file_name);
    let dest = if candidate.exists() {
        next_free_name(&candidate)
    } else {
        candidate
    };

    match mode {
        PlacementMode::Move => {
            info!("Moving {} to {}", source.display(), dest.display());
            move_file(source, &dest)
        }
        PlacementMode::Copy => {
            info!("Copying {} to {}", source.display(), dest.display());
            copy_file(source, &dest)
        }
    }
    .with_context(|| format!("Failed to place {} at {}", source.display(), dest.display()))?;

    Ok(dest)
}

fn next_free_name(dest: &Path) -> PathBuf {
    let stem = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string();
    let ext = dest
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut counter = 1;
    loop {
        let name = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    // rename fails across filesystems; fall back to copy + delete.
    if fs::rename(from, to).is_err() {
        copy_file(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)?;
    // Best effort: carry the source mtime over, like shutil.copy2 would.
    if let Ok(meta) = fs::metadata(from) {
        let mtime = filetime::FileTime::from_last_modification_time(&meta);
        let _ = filetime::set_file_mtime(to, mtime);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_into_subject_folder() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("note.pdf");
        fs::write(&src, b"content").unwrap();
        let out = temp.path().join("out");

        let dest = place(&src, &out, "Biology", PlacementMode::Move).unwrap();
        assert_eq!(dest, out.join("Biology").join("note.pdf"));
        assert!(dest.exists());
        assert!(!src.exists());
    }

    #[test]
    fn copy_mode_retains_source() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("note.pdf");
        fs::write(&src, b"content").unwrap();
        let out = temp.path().join("out");

        let dest = place(&src, &out, "Math", PlacementMode::Copy).unwrap();
        assert!(src.exists());
        assert!(dest.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"content");
    }

    #[test]
    fn collisions_get_incrementing_suffixes() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("out");

        for expected in ["note.pdf", "note_1.pdf", "note_2.pdf"] {
            let src = temp.path().join("note.pdf");
            fs::write(&src, b"content").unwrap();
            let dest = place(&src, &out, "Biology", PlacementMode::Move).unwrap();
            assert_eq!(dest, out.join("Biology").join(expected));
        }

        let dir = out.join("Biology");
        assert!(dir.join("note.pdf").exists());
        assert!(dir.join("note_1.pdf").exists());
        assert!(dir.join("note_2.pdf").exists());
    }

    #[test]
    fn collision_suffix_without_extension() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("out");

        for expected in ["note", "note_1"] {
            let src = temp.path().join("note");
            fs::write(&src, b"content").unwrap();
            let dest = place(&src, &out, "Misc", PlacementMode::Move).unwrap();
            assert_eq!(dest, out.join("Misc").join(expected));
        }
    }

    #[test]
    fn subject_folder_creation_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(out.join("Biology")).unwrap();

        let src = temp.path().join("note.pdf");
        fs::write(&src, b"content").unwrap();
        assert!(place(&src, &out, "Biology", PlacementMode::Move).is_ok());
    }

    #[test]
    fn missing_source_propagates_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("out");
        let err = place(
            &temp.path().join("gone.pdf"),
            &out,
            "Biology",
            PlacementMode::Move,
        );
        assert!(err.is_err());
    }

    #[test]
    fn copy_preserves_mtime() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("note.pdf");
        fs::write(&src, b"content").unwrap();
        let past = filetime::FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&src, past).unwrap();

        let dest = place(&src, &temp.path().join("out"), "B", PlacementMode::Copy).unwrap();
        let meta = fs::metadata(&dest).unwrap();
        assert_eq!(
            filetime::FileTime::from_last_modification_time(&meta).unix_seconds(),
            1_000_000_000
        );
    }
}
