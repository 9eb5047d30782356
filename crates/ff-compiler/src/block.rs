//! Indentation-based block parsing.
//!
//! Lines are nested Python-style: a line indented strictly deeper than the
//! line above it becomes that line's child. Indentation is the raw count of
//! leading whitespace characters, so tabs and spaces both count as one.

use std::fmt;

/// A line of pattern text and the more deeply indented lines under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Trimmed, comment-stripped text of this line.
    pub line: String,
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            children: Vec::new(),
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:width$}{}", "", self.line, width = depth * 2)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Parse lines into a forest of blocks. Blank lines are skipped.
pub fn parse_indented_lines_into_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<Block> {
    let mut roots: Vec<Block> = Vec::new();
    // Open ancestor chain; a block is attached to its parent when it is closed.
    let mut stack: Vec<(Block, usize)> = Vec::new();

    for line in lines {
        let line = line.as_ref();
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let indent = line.chars().take_while(|ch| ch.is_whitespace()).count();

        while stack.last().is_some_and(|(_, top)| *top >= indent) {
            close_top(&mut stack, &mut roots);
        }

        stack.push((Block::new(text), indent));
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    roots
}

fn close_top(stack: &mut Vec<(Block, usize)>, roots: &mut Vec<Block>) {
    if let Some((block, _)) = stack.pop() {
        match stack.last_mut() {
            Some((parent, _)) => parent.children.push(block),
            None => roots.push(block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(line: &str) -> Block {
        Block::new(line)
    }

    fn node(line: &str, children: Vec<Block>) -> Block {
        Block {
            line: line.to_string(),
            children,
        }
    }

    #[test]
    fn test_hierarchy() {
        let lines = [
            "Root 1",
            "  Child 1.1",
            "    Grandchild 1.1.1",
            "  Child 1.2",
            "Root 2",
            "  Child 2.1",
        ];

        let blocks = parse_indented_lines_into_blocks(&lines);

        assert_eq!(
            blocks,
            vec![
                node(
                    "Root 1",
                    vec![
                        node("Child 1.1", vec![leaf("Grandchild 1.1.1")]),
                        leaf("Child 1.2"),
                    ]
                ),
                node("Root 2", vec![leaf("Child 2.1")]),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(parse_indented_lines_into_blocks(&lines).is_empty());
    }

    #[test]
    fn test_flat_roots() {
        let blocks = parse_indented_lines_into_blocks(&["Root 1", "Root 2", "Root 3"]);
        assert_eq!(blocks, vec![leaf("Root 1"), leaf("Root 2"), leaf("Root 3")]);
    }

    #[test]
    fn test_skips_blank_lines() {
        let blocks = parse_indented_lines_into_blocks(&["Root", "", "   ", "  Child", "\t"]);
        assert_eq!(blocks, vec![node("Root", vec![leaf("Child")])]);
    }

    #[test]
    fn test_inconsistent_indentation() {
        let blocks = parse_indented_lines_into_blocks(&["A", "  B", "     C", "   D"]);
        assert_eq!(
            blocks,
            vec![node("A", vec![node("B", vec![leaf("C"), leaf("D")])])]
        );
    }

    #[test]
    fn test_dedent_pops_several_levels() {
        let blocks = parse_indented_lines_into_blocks(&["A", " B", "  C", "   D", " E"]);
        assert_eq!(
            blocks,
            vec![node(
                "A",
                vec![node("B", vec![node("C", vec![leaf("D")])]), leaf("E")]
            )]
        );
    }

    #[test]
    fn test_tabs_count_as_one() {
        let blocks = parse_indented_lines_into_blocks(&["A", "\tB", "  C"]);
        assert_eq!(blocks, vec![node("A", vec![node("B", vec![leaf("C")])])]);
    }

    #[test]
    fn test_indented_first_line() {
        let blocks = parse_indented_lines_into_blocks(&["    A", "B"]);
        assert_eq!(blocks, vec![leaf("A"), leaf("B")]);
    }

    #[test]
    fn test_display_outline() {
        let blocks = parse_indented_lines_into_blocks(&["A", "  B"]);
        assert_eq!(blocks[0].to_string(), "A\n  B\n");
    }
}
