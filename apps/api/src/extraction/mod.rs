// Layout Reconstructor
// Implements: PDF decoding into positioned fragments and reading-order text
// reconstruction from those fragments.

pub mod fragment;
pub mod pdf;
pub mod reconstruct;

pub use fragment::Page;
pub use pdf::{extract_text_blocking, ExtractError};
pub use reconstruct::reconstruct_lines;
