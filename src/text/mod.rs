//! Text measurement, encoding and wrapping

pub mod encoding;
pub mod metrics;
pub mod wrap;

pub use encoding::{decode_cp1252, encode_win_ansi};
pub use metrics::FontFace;
pub use wrap::wrap_text;
