//! Tree rendering for debugging and journal/report output.

use super::Tree;

impl<T> Tree<T>
where
    T: std::fmt::Display + Clone + 'static,
{
    /// Render the full tree structure as a string, forcing every level.
    pub fn render(&self) -> String {
        let mut result = String::new();
        self.render_recursive(&mut result, "", true);
        result
    }

    fn render_recursive(&self, result: &mut String, prefix: &str, is_last: bool) {
        result.push_str(prefix);
        result.push_str(if is_last { "└── " } else { "├── " });
        result.push_str(&format!("{}\n", self.outcome()));

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let children = self.shrinks();
        for (i, child) in children.iter().enumerate() {
            let child_is_last = i == children.len() - 1;
            child.render_recursive(result, &child_prefix, child_is_last);
        }
    }

    /// Render compactly, e.g. `10[5[2], 0]`.
    pub fn render_compact(&self) -> String {
        let children = self.shrinks();
        if children.is_empty() {
            format!("{}", self.outcome())
        } else {
            let parts: Vec<String> = children.iter().map(|c| c.render_compact()).collect();
            format!("{}[{}]", self.outcome(), parts.join(", "))
        }
    }

    /// Render only the immediate shrink sequence, e.g. `10 → [5, 0]`.
    pub fn render_shrinks(&self) -> String {
        let children = self.shrinks();
        if children.is_empty() {
            format!("{} (no shrinks)", self.outcome())
        } else {
            let parts: Vec<String> = children.iter().map(|c| format!("{}", c.outcome())).collect();
            format!("{} → [{}]", self.outcome(), parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::Tree;

    #[test]
    fn full_rendering() {
        let tree = Tree::with_children(
            10,
            vec![
                Tree::with_children(5, vec![Tree::singleton(2)]),
                Tree::singleton(0),
            ],
        );

        let rendered = tree.render();
        assert!(rendered.contains("└── 10"));
        assert!(rendered.contains("├── 5"));
        assert!(rendered.contains("└── 0"));
        assert!(rendered.contains("└── 2"));

        assert_eq!(tree.render_compact(), "10[5[2], 0]");
        assert_eq!(tree.render_shrinks(), "10 → [5, 0]");
    }

    #[test]
    fn singleton_rendering() {
        let singleton = Tree::singleton(42);
        assert_eq!(singleton.render_compact(), "42");
        assert_eq!(singleton.render_shrinks(), "42 (no shrinks)");
    }
}
