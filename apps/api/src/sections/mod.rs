// Section Segmenter
// Implements: header classification over an ordered pattern table and the
// line fold that buckets résumé text into sections.

pub mod headers;
pub mod segmenter;

pub use segmenter::segment;
