//! Page layout and pagination of document text

use tracing::debug;

use crate::text::{wrap_text, FontFace};

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Create a length from points (1/72 inch)
    pub fn from_pt(pt: f64) -> Self {
        Length(pt * 25.4 / 72.0)
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        self.0 * 72.0 / 25.4
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self {
            width: Length::from_mm(210.0),
            height: Length::from_mm(297.0),
        }
    }
}

/// Margins for page content
#[derive(Debug, Clone, Copy)]
pub struct Margins {
    pub top: Length,
    pub bottom: Length,
    pub left: Length,
    pub right: Length,
}

impl Margins {
    /// Create margins with same value on all sides
    pub fn uniform(margin: Length) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }
}

/// Geometry and typography of a converted document
#[derive(Debug, Clone)]
pub struct TextLayout {
    pub page: PageDimensions,
    /// Left/right margins bound the wrap width. The bottom margin is the
    /// cursor threshold for a page break and the top margin is where the
    /// cursor resets on a new page.
    pub margins: Margins,
    /// Distance from the top edge to the title baseline on the first page
    pub title_offset: Length,
    pub title_font_size: f32,
    /// Cursor drop after the title
    pub title_spacing: Length,
    pub body_font_size: f32,
    /// Cursor drop after each body line
    pub leading: Length,
    /// Extra cursor drop after each paragraph
    pub paragraph_spacing: Length,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            page: PageDimensions::a4(),
            margins: Margins::uniform(Length::from_pt(60.0)),
            title_offset: Length::from_pt(80.0),
            title_font_size: 16.0,
            title_spacing: Length::from_pt(30.0),
            body_font_size: 12.0,
            leading: Length::from_pt(16.0),
            paragraph_spacing: Length::from_pt(10.0),
        }
    }
}

impl TextLayout {
    /// Page width minus left and right margins, in points
    pub fn content_width(&self) -> f32 {
        (self.page.width.pt() - self.margins.left.pt() - self.margins.right.pt()) as f32
    }

    /// Baseline where body text resumes on a fresh page, in points
    pub fn top_of_page(&self) -> f32 {
        (self.page.height.pt() - self.margins.top.pt()) as f32
    }

    /// Lowest baseline allowed before a page break, in points
    pub fn bottom_limit(&self) -> f32 {
        self.margins.bottom.pt() as f32
    }
}

/// One line of text positioned on a page (origin bottom-left, points)
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub face: FontFace,
    pub size: f32,
    pub text: String,
}

/// The lines drawn on a single page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Lay out a titled document onto pages.
///
/// The title heads the first page. Each paragraph is trimmed and wrapped to
/// the content width; blank paragraphs are dropped. A `'\n'` inside a
/// paragraph starts a new line without the paragraph gap. Before a line is placed,
/// a cursor that has fallen below the bottom margin starts a new page.
pub fn paginate<S: AsRef<str>>(layout: &TextLayout, title: &str, paragraphs: &[S]) -> Vec<PageLayout> {
    let x = layout.margins.left.pt() as f32;
    let width = layout.content_width();
    let leading = layout.leading.pt() as f32;
    let paragraph_spacing = layout.paragraph_spacing.pt() as f32;

    let mut pages = vec![PageLayout::default()];
    let mut y = (layout.page.height.pt() - layout.title_offset.pt()) as f32;

    pages[0].lines.push(PlacedLine {
        x,
        y,
        face: FontFace::Bold,
        size: layout.title_font_size,
        text: title.to_string(),
    });
    y -= layout.title_spacing.pt() as f32;

    for paragraph in paragraphs {
        let text = paragraph.as_ref().trim();
        if text.is_empty() {
            continue;
        }

        for segment in text.split('\n') {
            let mut lines = wrap_text(segment, FontFace::Regular, layout.body_font_size, width);
            if lines.is_empty() {
                // A blank segment between two breaks still takes up a line
                lines.push(String::new());
            }

            for line in lines {
                if line.is_empty() {
                    y -= leading;
                    continue;
                }
                if y < layout.bottom_limit() {
                    pages.push(PageLayout::default());
                    y = layout.top_of_page();
                }
                if let Some(page) = pages.last_mut() {
                    page.lines.push(PlacedLine {
                        x,
                        y,
                        face: FontFace::Regular,
                        size: layout.body_font_size,
                        text: line,
                    });
                }
                y -= leading;
            }
        }
        y -= paragraph_spacing;
    }

    debug!(title, pages = pages.len(), "Paginated document");
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_lines(pages: &[PageLayout]) -> Vec<&PlacedLine> {
        pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .filter(|l| l.face == FontFace::Regular)
            .collect()
    }

    #[test]
    fn test_length_conversions() {
        let len = Length::from_pt(72.0);
        assert!((len.mm() - 25.4).abs() < 0.01);
        assert!((len.pt() - 72.0).abs() < 0.01);
    }

    #[test]
    fn test_a4_size() {
        let a4 = PageDimensions::a4();
        assert!((a4.width.pt() - 595.276).abs() < 0.01);
        assert!((a4.height.pt() - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_default_geometry() {
        let layout = TextLayout::default();
        assert!((layout.content_width() - (595.276 - 120.0)).abs() < 0.01);
        assert!((layout.top_of_page() - (841.89 - 60.0)).abs() < 0.01);
        assert!((layout.bottom_limit() - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_title_heads_first_page() {
        let layout = TextLayout::default();
        let pages = paginate(&layout, "Notes", &["First paragraph."]);

        assert_eq!(pages.len(), 1);
        let title = &pages[0].lines[0];
        assert_eq!(title.text, "Notes");
        assert_eq!(title.face, FontFace::Bold);
        assert_eq!(title.size, 16.0);
        assert!((title.y - (841.89 - 80.0)).abs() < 0.01);

        let body = &pages[0].lines[1];
        assert_eq!(body.face, FontFace::Regular);
        assert!((title.y - body.y - 30.0).abs() < 0.01);
        assert!((body.x - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_blank_paragraphs_are_skipped() {
        let layout = TextLayout::default();
        let pages = paginate(&layout, "t", &["one", "   ", "", "two"]);
        let lines = body_lines(&pages);

        assert_eq!(lines.len(), 2);
        // One leading plus one paragraph gap between the two lines
        assert!((lines[0].y - lines[1].y - 26.0).abs() < 0.01);
    }

    #[test]
    fn test_line_breaks_inside_paragraph_are_kept() {
        let layout = TextLayout::default();
        let pages = paginate(&layout, "t", &["first line\nsecond line", "next"]);
        let lines = body_lines(&pages);

        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first line", "second line", "next"]);
        // Leading only within the paragraph, leading plus gap after it
        assert!((lines[0].y - lines[1].y - 16.0).abs() < 0.01);
        assert!((lines[1].y - lines[2].y - 26.0).abs() < 0.01);
    }

    #[test]
    fn test_blank_line_between_breaks_takes_space() {
        let layout = TextLayout::default();
        let pages = paginate(&layout, "t", &["above\n\nbelow"]);
        let lines = body_lines(&pages);

        assert_eq!(lines.len(), 2);
        assert!((lines[0].y - lines[1].y - 32.0).abs() < 0.01);
    }

    #[test]
    fn test_long_paragraph_wraps_to_content_width() {
        let layout = TextLayout::default();
        let paragraph = "word ".repeat(400);
        let pages = paginate(&layout, "t", &[paragraph]);
        let lines = body_lines(&pages);

        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.face.text_width(&line.text, line.size) <= layout.content_width());
        }
    }

    #[test]
    fn test_page_break_resets_cursor() {
        let layout = TextLayout::default();
        let paragraph = "lorem ipsum ".repeat(2000);
        let pages = paginate(&layout, "t", &[paragraph]);

        assert!(pages.len() >= 2);
        let leading = layout.leading.pt() as f32;

        for (i, page) in pages.iter().enumerate() {
            for line in &page.lines {
                assert!(line.y >= layout.bottom_limit());
            }
            if i > 0 {
                assert!((page.lines[0].y - layout.top_of_page()).abs() < 0.01);
            }
            if i + 1 < pages.len() {
                // The break happened because the next baseline fell below the margin
                let last = page.lines.last().expect("page has lines");
                assert!(last.y - leading < layout.bottom_limit());
            }
        }
    }

    #[test]
    fn test_paragraphs_fill_pages_in_order() {
        let layout = TextLayout::default();
        let paragraphs: Vec<String> = (0..200).map(|i| format!("Paragraph {}", i)).collect();
        let pages = paginate(&layout, "t", &paragraphs);

        let texts: Vec<&str> = body_lines(&pages).iter().map(|l| l.text.as_str()).collect();
        let expected: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
        assert_eq!(texts, expected);
        assert!(pages.len() > 1);
    }
}
