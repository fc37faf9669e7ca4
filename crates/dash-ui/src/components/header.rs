use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Source and last-update information in `[ source | updated HH:MM:SS ]`
///    format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Summary source being watched (file or directory path).
    pub source: &'a str,
    /// Wall-clock time of the last successful load, pre-formatted.
    pub updated: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(source: &'a str, updated: &'a str, theme: &'a Theme) -> Self {
        Self {
            source,
            updated,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" CLOUDSIM SIMULATION DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Source / update info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | updated ", self.theme.label),
                Span::styled(self.updated, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let header = Header::new("results", "12:34:56", &theme);
        let lines = header.to_lines();
        assert_eq!(lines.len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let header = Header::new("results", "12:34:56", &theme);
        let lines = header.to_lines();

        let title_text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(
            title_text.contains("CLOUDSIM SIMULATION DASHBOARD"),
            "title line must contain the dashboard title, got: {title_text}"
        );
        assert!(
            title_text.contains(SPARKLES),
            "title line must contain sparkles, got: {title_text}"
        );
    }

    #[test]
    fn test_header_info_line_content() {
        let theme = Theme::dark();
        let header = Header::new("runs/summary.csv", "09:00:01", &theme);
        let lines = header.to_lines();

        let info_text: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(
            info_text.contains("runs/summary.csv"),
            "source must appear, got: {info_text}"
        );
        assert!(
            info_text.contains("updated 09:00:01"),
            "update time must appear, got: {info_text}"
        );
        assert!(
            info_text.contains("[ ") && info_text.contains(" ]"),
            "format must be '[ source | updated time ]', got: {info_text}"
        );
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let header = Header::new("results", "12:00:00", &theme);
        let lines = header.to_lines();

        let sep_text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(
            sep_text.chars().count(),
            60,
            "separator must be 60 chars wide"
        );
        assert!(
            sep_text.chars().all(|c| c == '='),
            "separator must consist of '=' characters, got: {sep_text}"
        );
    }

    #[test]
    fn test_header_empty_fourth_line() {
        let theme = Theme::dark();
        let header = Header::new("results", "12:00:00", &theme);
        let lines = header.to_lines();

        let empty_text: String = lines[3].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(empty_text.is_empty());
    }
}
