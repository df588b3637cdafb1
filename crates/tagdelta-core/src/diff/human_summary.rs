//! Human-readable summary renderer for deltas.

use crate::diff::model::Delta;
use crate::model::Association;

/// Render a human-readable Markdown/text summary of a [`Delta`].
///
/// Informational only; it does not affect the structured delta.
pub fn render_delta_summary(delta: &Delta) -> String {
    let mut out = String::new();

    out.push_str("## Association Delta\n\n");

    if delta.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    let retagged = delta.retagged_items();
    out.push_str(&format!(
        "**Removed**: {}  \n**Added**: {}  \n**Retagged**: {}\n\n",
        delta.removed.len(),
        delta.added.len(),
        retagged.len()
    ));

    if !delta.removed.is_empty() {
        out.push_str("### Removed\n\n");
        for association in &delta.removed {
            out.push_str(&format!("- {}\n", bullet(association)));
        }
        out.push('\n');
    }

    if !delta.added.is_empty() {
        out.push_str("### Added\n\n");
        for association in &delta.added {
            out.push_str(&format!("- {}\n", bullet(association)));
        }
        out.push('\n');
    }

    if !retagged.is_empty() {
        out.push_str("### Retagged\n\n");
        for item in retagged {
            out.push_str(&format!("- `{}`\n", item));
        }
        out.push('\n');
    }

    out
}

fn bullet(association: &Association) -> String {
    match &association.tag {
        Some(tag) => format!("`{}` ({})", association.item, tag),
        None => format!("`{}` (untagged)", association.item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_delta;
    use crate::model::Snapshot;

    #[test]
    fn test_empty_delta_summary() {
        let summary = render_delta_summary(&Delta::default());
        assert!(summary.contains("_No changes detected._"));
        assert!(!summary.contains("### Added"));
    }

    #[test]
    fn test_summary_lists_sections() {
        let previous = Snapshot::try_from_associations(vec![
            Association::tagged("a.rs", "git"),
            Association::tagged("b.rs", "git"),
        ])
        .unwrap();
        let current = Snapshot::try_from_associations(vec![
            Association::tagged("a.rs", "hg"),
            Association::untagged("c.rs"),
        ])
        .unwrap();

        let summary = render_delta_summary(&compute_delta(&previous, &current));

        assert!(summary.contains("**Removed**: 2"));
        assert!(summary.contains("**Added**: 2"));
        assert!(summary.contains("**Retagged**: 1"));
        assert!(summary.contains("- `b.rs` (git)"));
        assert!(summary.contains("- `c.rs` (untagged)"));
        assert!(summary.contains("### Retagged\n\n- `a.rs`"));
    }
}
