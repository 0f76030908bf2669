//! File discovery for transcript JSONL files

use crate::error::LoadError;
use crate::types::{FileEntry, HistoryDir};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Default projects directory (~/.claude/projects)
pub fn projects_dir() -> Result<PathBuf, LoadError> {
    let home = dirs::home_dir().ok_or(LoadError::HomeDirUnavailable)?;
    Ok(home.join(".claude").join("projects"))
}

/// Convert an absolute path to the history directory naming format
/// e.g. `/home/user/my-project` -> `-home-user-my-project`
pub fn project_dir_name(path: &Path) -> String {
    path.to_string_lossy()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

/// Work out which directory to browse for `cwd`.
///
/// Inside the projects directory, `cwd` is browsed as-is. Elsewhere the
/// matching history directory is used when it exists, labelled with the
/// project path; otherwise we fall back to `cwd` with no label.
pub fn resolve_history_dir(cwd: &Path) -> Result<HistoryDir, LoadError> {
    resolve_history_dir_in(cwd, &projects_dir()?)
}

pub fn resolve_history_dir_in(cwd: &Path, projects: &Path) -> Result<HistoryDir, LoadError> {
    if cwd.starts_with(projects) {
        return Ok(HistoryDir {
            search_dir: cwd.to_path_buf(),
            project: None,
        });
    }

    let abs = if cwd.is_absolute() {
        cwd.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| LoadError::io(cwd, e))?
            .join(cwd)
    };

    let history = projects.join(project_dir_name(&abs));
    if history.is_dir() {
        info!(dir = %history.display(), "using project history directory");
        Ok(HistoryDir {
            search_dir: history,
            project: Some(abs),
        })
    } else {
        debug!(dir = %history.display(), "no history directory, browsing cwd");
        Ok(HistoryDir {
            search_dir: cwd.to_path_buf(),
            project: None,
        })
    }
}

/// Describe a single file given on the command line
pub fn file_entry(path: &Path) -> Result<FileEntry, LoadError> {
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| LoadError::io(path, e))?;
    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileEntry {
        path: path.to_path_buf(),
        display_name,
        modified: DateTime::<Local>::from(modified),
    })
}

/// Find `*.jsonl` files directly inside `dir`, newest first
pub fn find_jsonl_files(dir: &Path) -> Result<Vec<FileEntry>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || !name.ends_with(".jsonl") {
            continue;
        }
        let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) else {
            continue;
        };
        files.push(FileEntry {
            path: path.to_path_buf(),
            display_name: name.to_string(),
            modified: DateTime::<Local>::from(modified),
        });
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    info!(dir = %dir.display(), count = files.len(), "discovered transcript files");
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_project_dir_name() {
        let cases = [
            ("/Users/someone/my-project", "-Users-someone-my-project"),
            ("/home/user/code", "-home-user-code"),
            ("/path/with spaces/and.dots", "-path-with-spaces-and-dots"),
        ];
        for (input, expected) in cases {
            assert_eq!(project_dir_name(Path::new(input)), expected);
        }
    }

    #[test]
    fn test_resolve_inside_projects_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let projects = tmp.path().join("projects");
        let inside = projects.join("-some-project");
        fs::create_dir_all(&inside).unwrap();

        let resolved = resolve_history_dir_in(&inside, &projects).unwrap();
        assert_eq!(resolved.search_dir, inside);
        assert_eq!(resolved.project, None);
    }

    #[test]
    fn test_resolve_maps_project_history() {
        let tmp = tempfile::tempdir().unwrap();
        let projects = tmp.path().join("projects");
        let cwd = tmp.path().join("work").join("app");
        fs::create_dir_all(&cwd).unwrap();
        let history = projects.join(project_dir_name(&cwd));
        fs::create_dir_all(&history).unwrap();

        let resolved = resolve_history_dir_in(&cwd, &projects).unwrap();
        assert_eq!(resolved.search_dir, history);
        assert_eq!(resolved.project, Some(cwd));
    }

    #[test]
    fn test_resolve_falls_back_to_cwd() {
        let tmp = tempfile::tempdir().unwrap();
        let projects = tmp.path().join("projects");
        let cwd = tmp.path().join("elsewhere");
        fs::create_dir_all(&cwd).unwrap();

        let resolved = resolve_history_dir_in(&cwd, &projects).unwrap();
        assert_eq!(resolved.search_dir, cwd);
        assert_eq!(resolved.project, None);
    }

    #[test]
    fn test_find_jsonl_files_sorted_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let old = tmp.path().join("old.jsonl");
        let new = tmp.path().join("new.jsonl");
        fs::write(&old, "{}").unwrap();
        fs::write(&new, "{}").unwrap();
        fs::write(tmp.path().join("readme.txt"), "hello").unwrap();
        fs::create_dir_all(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("deep.jsonl"), "{}").unwrap();

        let past = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let files = find_jsonl_files(tmp.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.display_name.as_str()).collect();
        assert_eq!(names, vec!["new.jsonl", "old.jsonl"]);
    }

    #[test]
    fn test_file_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.jsonl");
        fs::write(&path, "{}").unwrap();
        let entry = file_entry(&path).unwrap();
        assert_eq!(entry.display_name, "session.jsonl");
        assert_eq!(entry.path, path);
        assert!(file_entry(&tmp.path().join("missing.jsonl")).is_err());
    }

    #[test]
    fn test_find_jsonl_files_missing_dir() {
        assert!(find_jsonl_files(Path::new("/nonexistent/path")).is_err());
    }
}
