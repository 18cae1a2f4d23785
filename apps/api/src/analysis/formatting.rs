use crate::models::resume::{ResumeSections, SectionName};

/// Glyphs that count as list markers anywhere in the text.
const BULLET_GLYPHS: [char; 4] = ['-', '•', '●', '*'];

/// Penalties for a missing core section.
const SECTION_PENALTIES: [(SectionName, i32); 3] = [
    (SectionName::Experience, 15),
    (SectionName::Education, 10),
    (SectionName::Skills, 10),
];

/// (exclusive upper bound in characters, penalty). First match wins.
const LENGTH_TIERS: [(usize, i32); 3] = [(300, 25), (500, 15), (800, 5)];

const NO_BULLETS_PENALTY: i32 = 10;
const CORE_SECTIONS_BONUS: i32 = 10;

/// Structural formatting score in [0, 100]. Starts at 100 and only moves
/// through the fixed penalties and the one bonus, clamped at the end.
pub fn formatting_score(full_text: &str, sections: &ResumeSections) -> u32 {
    let mut score: i32 = 100;

    for (name, penalty) in SECTION_PENALTIES {
        if !sections.has(name) {
            score -= penalty;
        }
    }

    let length = full_text.chars().count();
    if let Some((_, penalty)) = LENGTH_TIERS.iter().find(|(bound, _)| length < *bound) {
        score -= penalty;
    }

    if !full_text.contains(BULLET_GLYPHS) {
        score -= NO_BULLETS_PENALTY;
    }

    if sections.has(SectionName::Experience) && sections.has(SectionName::Skills) {
        score += CORE_SECTIONS_BONUS;
    }

    score.clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::segment;

    fn long_body(chars: usize) -> String {
        "x".repeat(chars)
    }

    #[test]
    fn test_empty_document_scores_floor_of_penalties() {
        let sections = ResumeSections::default();
        // 100 - 35 (sections) - 25 (length) - 10 (bullets)
        assert_eq!(formatting_score("", &sections), 30);
    }

    #[test]
    fn test_short_complete_resume() {
        let text = "Experience\nBuilt 3 systems serving 10000 users\nEducation\nBS Computer Science\nSkills\nPython, Go";
        let sections = segment(text);
        // 100 - 25 (length) - 10 (bullets) + 10 (bonus)
        assert_eq!(formatting_score(text, &sections), 75);
    }

    #[test]
    fn test_bonus_cannot_push_above_100() {
        let text = format!(
            "Experience\n- shipped things\nEducation\nBSc\nSkills\nRust\n{}",
            long_body(900)
        );
        let sections = segment(&text);
        assert_eq!(formatting_score(&text, &sections), 100);
    }

    #[test]
    fn test_length_tiers_use_character_counts() {
        // education missing keeps the result below the clamp
        let sections = ResumeSections::default()
            .with_line(SectionName::Experience, "a")
            .with_line(SectionName::Skills, "c");
        // 400 two-byte characters: 800 bytes but only 400 chars, so the <500 tier applies
        let text = format!("* {}", "é".repeat(398));
        assert_eq!(formatting_score(&text, &sections), 100 - 10 - 15 + 10);

        let text = format!("* {}", "x".repeat(598));
        assert_eq!(formatting_score(&text, &sections), 100 - 10 - 5 + 10);
    }

    #[test]
    fn test_any_bullet_glyph_avoids_penalty() {
        let sections = ResumeSections::default();
        let base = long_body(900);
        for glyph in BULLET_GLYPHS {
            let text = format!("{base}{glyph}");
            assert_eq!(formatting_score(&text, &sections), 65, "glyph {glyph}");
        }
        assert_eq!(formatting_score(&base, &sections), 55);
    }

    #[test]
    fn test_whitespace_only_section_counts_as_missing() {
        let sections = ResumeSections::default()
            .with_line(SectionName::Experience, "   ")
            .with_line(SectionName::Skills, "Rust");
        let text = format!("- {}", long_body(900));
        // experience and education missing, no bonus
        assert_eq!(formatting_score(&text, &sections), 75);
    }
}
