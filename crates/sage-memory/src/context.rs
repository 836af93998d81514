use crate::models::EducatorProfile;

/// Render a profile into a natural-language context paragraph for prompt
/// injection.
///
/// Returns the empty string when no summarizable field holds data - callers
/// treat that as "nothing to inject", not as an error.
pub fn render_context(profile: &EducatorProfile) -> String {
    if !profile.has_teaching_context() {
        return String::new();
    }

    let mut parts = Vec::new();

    let subjects = &profile.teaching_subjects;
    let grades = &profile.grade_levels;

    if !subjects.is_empty() && !grades.is_empty() {
        parts.push(format!(
            "This teacher teaches {} to {} students",
            subjects.join(", "),
            grades.join(", ")
        ));
    } else if !subjects.is_empty() {
        parts.push(format!("This teacher teaches {}", subjects.join(", ")));
    } else if !grades.is_empty() {
        parts.push(format!(
            "This teacher works with {} students",
            grades.join(", ")
        ));
    }

    if !profile.teaching_style.is_empty() {
        parts.push(format!(
            "prefers {} teaching approaches",
            profile.teaching_style.join(", ")
        ));
    }

    if !profile.interests.is_empty() {
        parts.push(format!(
            "is interested in {}",
            profile.interests.join(", ")
        ));
    }

    if !profile.goals.is_empty() {
        parts.push(format!("Current goals: {}", profile.goals.join(", ")));
    }

    if !profile.preferred_tone.is_empty() {
        parts.push(format!(
            "Prefers communication that is {}",
            profile.preferred_tone
        ));
    }

    format!("EDUCATOR CONTEXT: {}.\n\n", parts.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_renders_empty_string() {
        assert_eq!(render_context(&EducatorProfile::default()), "");
    }

    #[test]
    fn test_tone_alone_renders_empty_string() {
        let profile = EducatorProfile {
            preferred_tone: "casual".to_string(),
            ..Default::default()
        };
        assert_eq!(render_context(&profile), "");
    }

    #[test]
    fn test_subjects_and_grades_combine_into_one_sentence() {
        let profile = EducatorProfile {
            teaching_subjects: vec!["Biology".to_string(), "Chemistry".to_string()],
            grade_levels: vec!["9th grade".to_string()],
            ..Default::default()
        };

        let context = render_context(&profile);
        assert!(context
            .contains("This teacher teaches Biology, Chemistry to 9th grade students"));
    }

    #[test]
    fn test_grades_only_sentence() {
        let profile = EducatorProfile {
            grade_levels: vec!["high school".to_string()],
            ..Default::default()
        };
        assert!(render_context(&profile).contains("This teacher works with high school students"));
    }

    #[test]
    fn test_all_fields_appear_verbatim() {
        let profile = EducatorProfile {
            teaching_subjects: vec!["Physics".to_string()],
            grade_levels: vec!["11th grade".to_string()],
            teaching_style: vec!["project-based".to_string()],
            interests: vec!["STEM education".to_string()],
            goals: vec!["improve engagement".to_string()],
            preferred_tone: "encouraging".to_string(),
            ..Default::default()
        };

        let context = render_context(&profile);

        assert!(context.starts_with("EDUCATOR CONTEXT: "));
        assert!(context.ends_with(".\n\n"));
        for expected in [
            "Physics",
            "11th grade",
            "project-based",
            "STEM education",
            "improve engagement",
            "encouraging",
        ] {
            assert!(context.contains(expected), "missing {expected}");
        }
    }
}
