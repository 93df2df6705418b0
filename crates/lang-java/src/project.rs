use crate::constants::JAVA_EXTENSION;
use crate::error::{JavaError, Result};
use ignore::WalkBuilder;
use refscope_api::{Project, ProjectRoot, RootKind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const BUILD_MARKERS: &[&str] = &[
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "settings.gradle",
    "settings.gradle.kts",
    ".project",
];
const SOURCE_DIRS: &[&str] = &["src/main/java", "src/test/java"];
const BINARY_DIRS: &[&str] = &["lib", "libs", "target/classes", "build/classes"];

pub fn is_java_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext == JAVA_EXTENSION)
}

/// Directories never descended into while looking for build files.
fn is_skipped_dir(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => {
            name == ".git" || name == "target" || name == "build" || name == "node_modules"
        }
        None => false,
    }
}

/// Finds the projects under `root`.
///
/// Every directory holding a build file is a project. Without any build
/// file the root itself is the single project. A project without a
/// standard source layout uses its own directory as source root, unless
/// it only aggregates nested projects.
pub fn discover_projects(root: &Path) -> Result<Vec<Project>> {
    if !root.is_dir() {
        return Err(JavaError::Workspace(format!(
            "workspace root {} is not an accessible directory",
            root.display()
        )));
    }

    let mut dirs: BTreeSet<PathBuf> = WalkBuilder::new(root)
        .hidden(false)
        .filter_entry(|entry| !(entry.depth() > 0 && is_skipped_dir(entry.path())))
        .build()
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            let name = path.file_name()?.to_str()?;
            if path.is_file() && BUILD_MARKERS.contains(&name) {
                return path.parent().map(Path::to_path_buf);
            }
            None
        })
        .collect();
    if dirs.is_empty() {
        dirs.insert(root.to_path_buf());
    }

    let projects = dirs
        .iter()
        .map(|dir| {
            let aggregates = dirs.iter().any(|other| other != dir && other.starts_with(dir));
            project_at(root, dir, aggregates)
        })
        .collect();
    Ok(projects)
}

fn project_at(root: &Path, dir: &Path, aggregates: bool) -> Project {
    let mut roots: Vec<ProjectRoot> = SOURCE_DIRS
        .iter()
        .map(|rel| dir.join(rel))
        .filter(|p| p.is_dir())
        .map(|path| ProjectRoot {
            path,
            kind: RootKind::Source,
        })
        .collect();
    if roots.is_empty() && !aggregates {
        roots.push(ProjectRoot {
            path: dir.to_path_buf(),
            kind: RootKind::Source,
        });
    }
    roots.extend(
        BINARY_DIRS
            .iter()
            .map(|rel| dir.join(rel))
            .filter(|p| p.is_dir())
            .map(|path| ProjectRoot {
                path,
                kind: RootKind::Binary,
            }),
    );

    let name = dir
        .strip_prefix(root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
        .or_else(|| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "root".to_string());
    Project { name, roots }
}
