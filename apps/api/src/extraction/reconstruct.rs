//! Reading-order reconstruction.
//!
//! Fragments are sorted top to bottom, clustered into rows whose vertical
//! positions chain within `LINE_TOLERANCE`, then ordered left to right. A
//! space is inferred wherever the horizontal gap after the previous
//! fragment's extent exceeds `WORD_GAP`.

use super::fragment::{Page, PositionedFragment};

/// Maximum vertical delta between fragments on the same visual line.
pub const LINE_TOLERANCE: f64 = 0.3;
/// Minimum horizontal gap that reads as a word break.
pub const WORD_GAP: f64 = 0.5;

/// Joins all pages into one text. Every page ends with a blank separator line.
pub fn reconstruct(pages: &[Page]) -> String {
    reconstruct_lines(pages).join("\n")
}

pub fn reconstruct_lines(pages: &[Page]) -> Vec<String> {
    let mut lines = Vec::new();
    for page in pages {
        lines.extend(page_lines(page));
        lines.push(String::new());
    }
    lines
}

fn page_lines(page: &Page) -> Vec<String> {
    let mut ordered: Vec<&PositionedFragment> = page.fragments.iter().collect();
    ordered.sort_by(|a, b| a.y().total_cmp(&b.y()).then(a.x().total_cmp(&b.x())));

    group_rows(ordered)
        .iter()
        .filter_map(|row| join_row(row))
        .collect()
}

fn group_rows(ordered: Vec<&PositionedFragment>) -> Vec<Vec<&PositionedFragment>> {
    let mut rows: Vec<Vec<&PositionedFragment>> = Vec::new();
    let mut last_y: Option<f64> = None;

    for fragment in ordered {
        let y = fragment.y();
        let same_row = last_y.is_some_and(|prev| (y - prev).abs() <= LINE_TOLERANCE);
        if !same_row {
            rows.push(Vec::new());
        }
        if let Some(row) = rows.last_mut() {
            row.push(fragment);
        }
        last_y = Some(y);
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.x().total_cmp(&b.x()));
    }
    rows
}

fn join_row(row: &[&PositionedFragment]) -> Option<String> {
    let mut line = String::new();
    let mut prev_end: Option<f64> = None;

    for fragment in row {
        let x = fragment.x();
        let gap_follows = prev_end.is_some_and(|end| x - end > WORD_GAP);
        if gap_follows && !line.is_empty() && !line.ends_with(char::is_whitespace) {
            line.push(' ');
        }
        line.push_str(&fragment.decoded_text());
        prev_end = Some(x + fragment.extent());
    }

    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f64, y: f64, width: f64) -> PositionedFragment {
        PositionedFragment::new(text, x, y).with_width(width)
    }

    #[test]
    fn test_gap_inserts_single_space() {
        let page = Page::new(vec![
            frag("Engineer", 4.0, 2.0, 3.0),
            frag("Software", 0.0, 2.0, 3.0),
        ]);
        assert_eq!(reconstruct(&[page]), "Software Engineer\n");
    }

    #[test]
    fn test_adjacent_fragments_concatenate() {
        let page = Page::new(vec![
            frag("Software", 0.0, 2.0, 3.0),
            frag("Engineer", 3.1, 2.0, 3.0),
        ]);
        assert_eq!(reconstruct(&[page]), "SoftwareEngineer\n");
    }

    #[test]
    fn test_no_double_space_after_trailing_whitespace() {
        let page = Page::new(vec![
            frag("Built%20", 0.0, 1.0, 2.0),
            frag("APIs", 5.0, 1.0, 2.0),
        ]);
        assert_eq!(reconstruct(&[page]), "Built APIs\n");
    }

    #[test]
    fn test_baseline_jitter_stays_on_one_line() {
        let page = Page::new(vec![
            frag("Senior", 0.0, 5.0, 2.5),
            frag("Developer", 3.5, 5.2, 4.0),
            frag("Acme", 0.0, 6.5, 2.0),
        ]);
        assert_eq!(reconstruct(&[page]), "Senior Developer\nAcme\n");
    }

    #[test]
    fn test_lines_ordered_top_to_bottom() {
        let page = Page::new(vec![
            frag("third", 0.0, 9.0, 2.0),
            frag("first", 0.0, 1.0, 2.0),
            frag("second", 0.0, 4.0, 2.0),
        ]);
        assert_eq!(reconstruct_lines(&[page]), vec!["first", "second", "third", ""]);
    }

    #[test]
    fn test_pages_separated_by_blank_line() {
        let pages = vec![
            Page::new(vec![frag("Page one", 0.0, 1.0, 4.0)]),
            Page::new(vec![frag("Page two", 0.0, 1.0, 4.0)]),
        ];
        assert_eq!(reconstruct(&pages), "Page one\n\nPage two\n");
    }

    #[test]
    fn test_empty_page_yields_only_separator() {
        assert_eq!(reconstruct_lines(&[Page::default()]), vec![String::new()]);
        assert_eq!(reconstruct(&[]), "");
    }

    #[test]
    fn test_whitespace_only_line_is_dropped() {
        let page = Page::new(vec![
            frag("%20%20", 0.0, 1.0, 1.0),
            frag("Skills", 0.0, 3.0, 2.0),
        ]);
        assert_eq!(reconstruct_lines(&[page]), vec!["Skills", ""]);
    }

    #[test]
    fn test_missing_positions_default_to_origin() {
        let page = Page::new(vec![
            PositionedFragment {
                text: "Header".to_string(),
                x: None,
                y: None,
                width: Some(3.0),
            },
            frag("Body", 0.0, 2.0, 2.0),
        ]);
        assert_eq!(reconstruct(&[page]), "Header\nBody\n");
    }

    #[test]
    fn test_unknown_width_uses_default_extent() {
        // 0.0 + 0.5 default extent leaves a 0.6 gap before x = 1.1.
        let page = Page::new(vec![
            PositionedFragment::new("A", 0.0, 0.0),
            PositionedFragment::new("B", 1.1, 0.0),
        ]);
        assert_eq!(reconstruct(&[page]), "A B\n");
    }

    #[test]
    fn test_output_is_deterministic() {
        let page = Page::new(vec![
            frag("b", 2.0, 1.0, 0.5),
            frag("a", 0.0, 1.0, 0.5),
            frag("c", 0.0, 1.0, 0.5),
            frag("d", 1.0, 3.0, 0.5),
        ]);
        let first = reconstruct(&[page.clone()]);
        for _ in 0..10 {
            assert_eq!(reconstruct(&[page.clone()]), first);
        }
    }
}
