//! Glyph metrics for the two standard fonts used on text pages

use super::encoding::encode_win_ansi;

/// Typeface used for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Helvetica, used for body text
    Regular,
    /// Helvetica-Bold, used for the document title
    Bold,
}

impl FontFace {
    /// PostScript name of the standard-14 font
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    /// Name under which the font is registered in page resources
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    fn ascii_widths(&self) -> &'static [u16; 95] {
        match self {
            FontFace::Regular => &HELVETICA_WIDTHS,
            FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of one WinAnsi code in 1/1000ths of the em square
    pub fn code_width(&self, code: u8) -> u16 {
        match code {
            0x20..=0x7E => self.ascii_widths()[(code - 0x20) as usize],
            0xA0 => self.ascii_widths()[0],
            // Accented letters and punctuation above 0x7F: average lowercase width
            _ => match self {
                FontFace::Regular => 556,
                FontFace::Bold => 611,
            },
        }
    }

    /// Width of `text` in points when set at `size`
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| u32::from(self.code_width(code)))
            .sum();
        units as f32 * size / 1000.0
    }
}

/// Helvetica advance widths for codes 32..=126 (Adobe AFM)
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // 0..9
    278, 278, 584, 584, 584, 556, 1015,                                             // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // N..Z
    278, 278, 278, 469, 556, 333,                                                   // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // n..z
    334, 260, 334, 584,                                                             // {..~
];

/// Helvetica-Bold advance widths for codes 32..=126 (Adobe AFM)
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];
