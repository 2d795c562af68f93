//! One-sentence explanations for skill-gap course matches.

use pathways_corpus::CourseRecord;

/// Generate the explanation for a course matched to a skill gap.
///
/// Exactly one sentence, chosen by the first rule that applies:
/// 1. A tag is an exact case-insensitive match for the skill.
/// 2. A tag and the skill contain one another (related tag, named).
/// 3. The course carries other tags alongside a looser association.
/// 4. The skill appears in the title or description.
/// 5. Pure semantic hit with no lexical overlap.
pub(crate) fn why_this_course(skill: &str, record: &CourseRecord) -> String {
    let needle = skill.to_lowercase();

    if record
        .skills
        .iter()
        .any(|tag| tag.to_lowercase() == needle)
    {
        return format!(
            "{} directly teaches {}, the exact skill you need to develop.",
            record.title, skill
        );
    }

    if let Some(tag) = record.skills.iter().find(|tag| {
        let tag = tag.to_lowercase();
        tag.contains(&needle) || needle.contains(&tag)
    }) {
        return format!(
            "{} covers {}, which is closely related to {}.",
            record.title, tag, skill
        );
    }

    if !record.skills.is_empty() {
        return format!(
            "{} builds {} alongside skills that support {}.",
            record.title,
            record.skills.join(", "),
            skill
        );
    }

    if record.title.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
    {
        return format!("{} focuses on {} throughout its curriculum.", record.title, skill);
    }

    format!(
        "{} aligns with {} based on its overall content and outcomes.",
        record.title, skill
    )
}
