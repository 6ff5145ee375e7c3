use std::path::Path;

use anyhow::Context as _;

/// One user-selected file: its bare name, optional relative path and raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub relative_path: Option<String>,
    pub contents: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            relative_path: None,
            contents: contents.into(),
        }
    }

    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }

    /// Relative path when known, else the bare name.
    pub fn display_path(&self) -> &str {
        self.relative_path.as_deref().unwrap_or(&self.name)
    }

    pub fn matches_output(&self, output: &str) -> bool {
        self.name == output
            || self
                .relative_path
                .as_deref()
                .is_some_and(|path| path.ends_with(output))
    }
}

/// Reads every regular file under `root` into memory, in sorted path order.
///
/// Relative paths start with the directory's own name (`output/pages/a.json`), matching how a
/// browser directory picker reports them.
pub fn read_dir_files(root: &Path) -> anyhow::Result<Vec<LocalFile>> {
    if !root.is_dir() {
        anyhow::bail!("not a directory: {}", root.display());
    }

    let prefix = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut paths = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current)
            .with_context(|| format!("read dir: {}", current.display()))?
        {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let contents =
            std::fs::read(&path).with_context(|| format!("read file: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative = relative_path(root, &path, &prefix);
        files.push(LocalFile {
            name,
            relative_path: Some(relative),
            contents,
        });
    }

    tracing::debug!(root = %root.display(), files = files.len(), "read local file set");
    Ok(files)
}

fn relative_path(root: &Path, path: &Path, prefix: &str) -> String {
    let rest = path
        .strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if prefix.is_empty() {
        rest
    } else {
        format!("{prefix}/{rest}")
    }
}
