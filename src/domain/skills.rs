use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Skills the extraction service reports that describe how someone works
/// rather than what they build. Everything else counts as technical.
static SOFT_SKILLS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "communication",
        "leadership",
        "teamwork",
        "collaboration",
        "problem solving",
        "critical thinking",
        "time management",
        "adaptability",
        "creativity",
        "work ethic",
        "attention to detail",
        "public speaking",
        "negotiation",
        "mentoring",
        "presentation",
        "conflict resolution",
        "decision making",
        "emotional intelligence",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillBuckets {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub all: Vec<String>,
}

/// Splits a flat skill list into technical/soft buckets, deduplicating
/// case-insensitively while preserving the extraction order.
pub fn categorize(skills: &[String]) -> SkillBuckets {
    let mut seen = HashSet::new();
    let mut buckets = SkillBuckets::default();

    for skill in skills {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if !seen.insert(key.clone()) {
            continue;
        }
        if SOFT_SKILLS.contains(key.as_str()) {
            buckets.soft.push(trimmed.to_string());
        } else {
            buckets.technical.push(trimmed.to_string());
        }
        buckets.all.push(trimmed.to_string());
    }

    buckets
}
