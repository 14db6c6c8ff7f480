use std::path::Path;

use tracing::debug;

/// A label and its ordered children, used only for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTreeNode {
    pub label: String,
    pub children: Vec<PathTreeNode>,
}

impl PathTreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Draws the tree with box-drawing connectors, one line per node.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![self.label.clone()];
        self.render_children("", &mut lines);
        lines
    }

    fn render_children(&self, prefix: &str, lines: &mut Vec<String>) {
        let len = self.children.len();
        for (idx, child) in self.children.iter().enumerate() {
            let is_last = idx + 1 == len;
            let branch = if is_last { "└── " } else { "├── " };
            lines.push(format!("{}{}{}", prefix, branch, child.label));

            let nested = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            child.render_children(&nested, lines);
        }
    }
}

/// Groups `files` below `root` by directory.
///
/// Directory labels end with `/`. Groups keep the order in which they were
/// first seen. Files outside `root` are left out.
pub fn build_tree<I, P>(root: &Path, files: I) -> PathTreeNode
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let relative: Vec<Vec<String>> = files
        .into_iter()
        .filter_map(|file| match file.as_ref().strip_prefix(root) {
            Ok(rel) => Some(segments(rel)),
            Err(_) => {
                debug!("Not below {:?}: {:?}", root, file.as_ref());
                None
            }
        })
        .collect();
    let entries: Vec<&[String]> = relative.iter().map(Vec::as_slice).collect();

    PathTreeNode {
        label: root_label(root),
        children: group(&entries),
    }
}

fn group(entries: &[&[String]]) -> Vec<PathTreeNode> {
    let mut groups: Vec<(String, Vec<&[String]>)> = Vec::new();

    for entry in entries {
        let Some((first, rest)) = entry.split_first() else {
            continue;
        };
        let key = if rest.is_empty() {
            first.clone()
        } else {
            format!("{}/", first)
        };
        let index = match groups.iter().position(|(k, _)| *k == key) {
            Some(index) => index,
            None => {
                groups.push((key, Vec::new()));
                groups.len() - 1
            }
        };
        if !rest.is_empty() {
            groups[index].1.push(rest);
        }
    }

    groups
        .into_iter()
        .map(|(label, rest)| PathTreeNode {
            label,
            children: group(&rest),
        })
        .collect()
}

/// The flat alternative to [`build_tree`]: the root, then one indented relative path per file.
pub fn file_list<I, P>(root: &Path, files: I) -> Vec<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut lines = vec![root_label(root)];
    lines.extend(
        files
            .into_iter()
            .map(|file| format!("  {}", relative_display(root, file.as_ref()))),
    );
    lines
}

/// `path` relative to `root` with `/` separators, or the full path if it is not below `root`.
pub(crate) fn relative_display(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => segments(rel).join("/"),
        Err(_) => path.display().to_string(),
    }
}

fn segments(path: &Path) -> Vec<String> {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

fn root_label(root: &Path) -> String {
    let label = root.display().to_string();
    if label.ends_with('/') {
        label
    } else {
        format!("{}/", label)
    }
}
