use crate::layout::Layout;
use colored::Colorize;
use std::path::{Component, Path};

/// Represents a node in the tree (either file or directory).
#[derive(Debug, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub children: Vec<TreeNode>,
    pub is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }

    /// Returns the child directory called `name`, creating it on first use.
    fn directory(&mut self, name: &str) -> &mut TreeNode {
        let position = self
            .children
            .iter()
            .position(|child| !child.is_file && child.name == name);

        let index = match position {
            Some(index) => index,
            None => {
                self.children.push(TreeNode::new(name.to_string(), false));
                self.children.len() - 1
            }
        };

        &mut self.children[index]
    }
}

/// Build the directory tree for a layout, rooted at the `destination` name.
///
/// Nested keys such as `a/b` imply the intermediate `a` directory, which is
/// shared with any sibling key.
pub fn build_tree(layout: &Layout, destination: &Path) -> TreeNode {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let mut root = TreeNode::new(root_name, false);

    for (directory, files) in &layout.entries {
        let mut node = &mut root;

        for component in Path::new(directory).components() {
            if let Component::Normal(segment) = component {
                node = node.directory(&segment.to_string_lossy());
            }
        }

        for file in files {
            let exists = node
                .children
                .iter()
                .any(|child| child.is_file && &child.name == file);

            if !exists {
                node.children.push(TreeNode::new(file.clone(), true));
            }
        }
    }

    root
}

/// Number of directory nodes below `node`, implied intermediates included.
pub fn count_directories(node: &TreeNode) -> usize {
    node.children
        .iter()
        .filter(|child| !child.is_file)
        .map(|child| 1 + count_directories(child))
        .sum()
}

/// Renders the tree with box-drawing connectors, one line per node.
pub fn render_tree(node: &TreeNode) -> Vec<String> {
    let mut lines = Vec::new();

    render_node(node, "", true, &mut lines);

    lines
}

fn render_node(node: &TreeNode, prefix: &str, is_last: bool, lines: &mut Vec<String>) {
    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = if node.is_file {
        node.name.green()
    } else {
        node.name.blue()
    };
    lines.push(format!("{}{}{}", prefix.yellow(), connector, name));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i == len - 1;
        render_node(child, &child_prefix, last, lines);
    }
}

pub fn preview_as_tree(layout: &Layout, destination: &Path) {
    let tree_root = build_tree(layout, destination);

    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    for line in render_tree(&tree_root) {
        println!("{}", line);
    }

    println!(
        "\n{} {} directories, {} files",
        "└─".bold().bright_blue(),
        count_directories(&tree_root),
        layout.file_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(node: &TreeNode) -> Vec<&str> {
        node.children.iter().map(|child| child.name.as_str()).collect()
    }

    #[test]
    fn test_build_tree_shares_intermediate_directories() {
        let layout = Layout::from_entries(
            "nested",
            [
                ("internal/config", vec!["config.go"]),
                ("internal/network", vec!["dns.go"]),
                ("", vec!["go.mod"]),
            ],
        );

        let root = build_tree(&layout, Path::new("/tmp/kryptx"));

        assert_eq!(root.name, "kryptx");
        assert_eq!(names(&root), vec!["internal", "go.mod"]);
        let internal = &root.children[0];
        assert!(!internal.is_file);
        assert_eq!(names(internal), vec!["config", "network"]);
        assert_eq!(names(&internal.children[1]), vec!["dns.go"]);
        assert!(internal.children[1].children[0].is_file);
    }

    #[test]
    fn test_build_tree_ignores_cur_dir_segments() {
        let layout = Layout::from_entries("dots", [("./web", vec!["index.html"])]);

        let root = build_tree(&layout, Path::new("site"));

        assert_eq!(names(&root), vec!["web"]);
    }

    #[test]
    fn test_count_directories_includes_implied_parents() {
        let root = build_tree(&Layout::kryptx(), Path::new("kryptx"));

        // cmd, cmd/client, cmd/server, internal + 5 children, pkg, pkg/api, web, configs, scripts
        assert_eq!(count_directories(&root), 14);
    }

    #[test]
    fn test_count_directories_skips_cur_dir_and_base_keys() {
        let layout = Layout::from_entries(
            "dots",
            [("./web", vec!["a"]), ("web", vec!["b"]), (".", vec!["c"]), ("", vec!["d"])],
        );

        let root = build_tree(&layout, Path::new("site"));

        assert_eq!(count_directories(&root), 1);
    }

    #[test]
    fn test_render_tree_connectors() {
        colored::control::set_override(false);
        let layout = Layout::from_entries("small", [("a", vec!["x", "y"]), ("", vec!["z"])]);

        let lines = render_tree(&build_tree(&layout, Path::new("root")));

        assert_eq!(
            lines,
            vec![
                "└── root",
                "    ├── a",
                "    │   ├── x",
                "    │   └── y",
                "    └── z",
            ]
        );
    }
}
