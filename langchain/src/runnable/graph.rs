//! ASCII rendering of a pipeline tree.

use super::{Node, Runnable};

impl Node {
    /// Renders the pipeline as an indented tree, one node per line.
    ///
    /// Parallel branches are prefixed with their key, branch cases with `if #i` and the
    /// default with `else`.
    pub fn draw_ascii(&self) -> String {
        let mut out = String::new();
        out.push_str(self.name());
        out.push('\n');
        write_children(self, "", &mut out);
        out
    }
}

fn children(node: &Node) -> Vec<(Option<String>, &Node)> {
    match node {
        Node::Sequence(seq) => seq.steps().iter().map(|n| (None, n)).collect(),
        Node::Parallel(par) => par
            .branches()
            .iter()
            .map(|(key, n)| (Some(key.clone()), n))
            .collect(),
        Node::Branch(branch) => {
            let mut out: Vec<_> = branch
                .cases()
                .enumerate()
                .map(|(i, n)| (Some(format!("if #{}", i)), n))
                .collect();
            if let Some(n) = branch.default_node() {
                out.push((Some("else".to_string()), n));
            }
            out
        }
        Node::Prompt(_)
        | Node::Model(_)
        | Node::Parser(_)
        | Node::Lambda(_)
        | Node::Passthrough(_) => Vec::new(),
    }
}

fn write_children(node: &Node, prefix: &str, out: &mut String) {
    let children = children(node);
    let count = children.len();
    for (i, (label, child)) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        if let Some(label) = label {
            out.push_str(&label);
            out.push_str(": ");
        }
        out.push_str(child.name());
        out.push('\n');
        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        write_children(child, &child_prefix, out);
    }
}
