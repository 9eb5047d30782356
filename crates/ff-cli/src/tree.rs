use std::path::Path;

use ff_compiler::{compile_blocks_with_report, parse_document};

use crate::entries::read_patterns;

/// Print the block forest or the compiled pattern tree of a pattern file.
pub fn run_tree(patterns: &Path, blocks_only: bool) -> Result<(), String> {
    let text = read_patterns(patterns)?;
    print!("{}", render_tree(&text, blocks_only));
    Ok(())
}

pub fn render_tree(text: &str, blocks_only: bool) -> String {
    let blocks = parse_document(text);

    if blocks_only {
        return blocks.iter().map(ToString::to_string).collect();
    }

    let report = compile_blocks_with_report(&blocks);
    let mut out = report.pattern.to_string();
    out.push_str(&format!(
        "\n{} directive(s), {} dropped\n",
        report.pattern.directive_count(),
        report.dropped.len()
    ));
    for dropped in &report.dropped {
        out.push_str(&format!("  dropped '{}': {}\n", dropped.line, dropped.error));
    }
    out
}
