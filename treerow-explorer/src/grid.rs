//! Text rendering of the rows inside the viewport.

use std::io::{self, Write};

use treerow::store::TreeStore;
use treerow::{GuideStyle, TreeIndex, TreeResult, Viewport, render_guides};

/// Renders index rows as indented, numbered lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridView {
    style: GuideStyle,
}

impl GridView {
    pub fn new(style: GuideStyle) -> Self {
        Self { style }
    }

    fn marker(&self, expandable: bool, expanded: bool) -> &'static str {
        match (expandable, expanded, self.style) {
            (false, _, _) => " ",
            (true, true, GuideStyle::Ascii) => "-",
            (true, false, GuideStyle::Ascii) => "+",
            (true, true, _) => "▾",
            (true, false, _) => "▸",
        }
    }

    /// One line for `row`: number, guides, expansion marker and label.
    pub fn line<S: TreeStore>(
        &self,
        index: &TreeIndex<S>,
        row: usize,
        label: impl Fn(&S::Item) -> String,
    ) -> TreeResult<String> {
        let item = index.item_at_row(row)?;
        let guides = render_guides(&index.guides(row)?, self.style);
        let expandable = index
            .store()
            .is_some_and(|store| store.is_expandable(item));
        let marker = self.marker(expandable, index.is_expanded_at_row(row)?);
        Ok(format!("{row:>5} {guides}{marker} {}", label(item)))
    }

    /// Write every row of the viewport, followed by a status line.
    pub fn render<S: TreeStore, W: Write>(
        &self,
        index: &TreeIndex<S>,
        viewport: &Viewport,
        label: impl Fn(&S::Item) -> String,
        out: &mut W,
    ) -> io::Result<()> {
        for row in viewport.range() {
            match self.line(index, row, &label) {
                Ok(line) => writeln!(out, "{line}")?,
                Err(e) => {
                    log::warn!("GridView: row {row}: {e}");
                    break;
                }
            }
        }
        let range = viewport.range();
        writeln!(
            out,
            "-- rows {}-{} of {} --",
            range.start,
            range.end.saturating_sub(1),
            viewport.rows()
        )
    }
}
