//! Connector guides for indentation lines.

/// One indentation column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guide {
    /// An ancestor at this column has siblings below: continue its line.
    Vertical,
    /// An ancestor at this column was the last child: nothing to draw.
    Blank,
    /// The row itself, with siblings below.
    Branch,
    /// The row itself, last among its siblings.
    Last,
}

/// Glyph set used to draw guides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideStyle {
    /// ASCII guides: `|`, `+--`, `` `-- ``.
    Ascii,
    /// Unicode box-drawing characters (default).
    #[default]
    Unicode,
    /// Unicode with a rounded corner for the last child.
    Rounded,
}

impl Guide {
    /// Four-column glyph for this guide in the given style.
    pub const fn symbol(self, style: GuideStyle) -> &'static str {
        match (self, style) {
            (Guide::Blank, _) => "    ",
            (Guide::Vertical, GuideStyle::Ascii) => "|   ",
            (Guide::Vertical, _) => "\u{2502}   ",
            (Guide::Branch, GuideStyle::Ascii) => "+-- ",
            (Guide::Branch, _) => "\u{251C}\u{2500}\u{2500} ",
            (Guide::Last, GuideStyle::Ascii) => "`-- ",
            (Guide::Last, GuideStyle::Unicode) => "\u{2514}\u{2500}\u{2500} ",
            (Guide::Last, GuideStyle::Rounded) => "\u{2570}\u{2500}\u{2500} ",
        }
    }
}

/// Render a guide sequence as one prefix string.
pub fn render_guides(guides: &[Guide], style: GuideStyle) -> String {
    guides.iter().map(|g| g.symbol(style)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ascii() {
        let prefix = render_guides(&[Guide::Vertical, Guide::Blank, Guide::Last], GuideStyle::Ascii);
        assert_eq!(prefix, "|       `-- ");
    }

    #[test]
    fn test_symbols_are_four_columns() {
        for style in [GuideStyle::Ascii, GuideStyle::Unicode, GuideStyle::Rounded] {
            for guide in [Guide::Vertical, Guide::Blank, Guide::Branch, Guide::Last] {
                assert_eq!(guide.symbol(style).chars().count(), 4);
            }
        }
    }
}
