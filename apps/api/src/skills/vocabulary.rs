use serde::Serialize;

/// Skill names recognised in résumés and job descriptions.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Languages
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    // Frameworks
    "React",
    "Next.js",
    "Vue",
    "Angular",
    "Node.js",
    "Express",
    "FastAPI",
    "Django",
    "Flask",
    "Spring Boot",
    // Data stores
    "SQL",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Elasticsearch",
    // Infrastructure
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Terraform",
    "Git",
    "CI/CD",
    "Jenkins",
    "GitHub Actions",
    // ML / data
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "TensorFlow",
    "PyTorch",
    "Scikit-learn",
    "Data Science",
    "Pandas",
    "NumPy",
    "Matplotlib",
    // Soft skills
    "Communication",
    "Leadership",
    "Teamwork",
    "Problem Solving",
    "Agile",
    "Scrum",
];

/// Gap score when the job description names no vocabulary skill.
pub const DEFAULT_GAP_SCORE: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGapReport {
    pub score: u32, // 0 – 100
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub resume_skills: Vec<String>,
}

/// Vocabulary entries appearing in `text` as case-insensitive substrings,
/// in vocabulary order.
///
/// Plain substring lookup: "Java" is also found inside "JavaScript".
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

/// Compares the skills a job description asks for with those in the résumé.
pub fn analyze_gap(resume_text: &str, job_description: &str) -> SkillGapReport {
    let resume_skills = extract_skills(resume_text);
    let jd_skills = extract_skills(job_description);

    let (matching_skills, missing_skills): (Vec<String>, Vec<String>) = jd_skills
        .iter()
        .cloned()
        .partition(|skill| resume_skills.contains(skill));

    let score = if jd_skills.is_empty() {
        DEFAULT_GAP_SCORE
    } else {
        (matching_skills.len() as f64 / jd_skills.len() as f64 * 100.0).round() as u32
    };

    SkillGapReport {
        score,
        matching_skills,
        missing_skills,
        resume_skills,
    }
}
