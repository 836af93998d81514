use serde::{Deserialize, Serialize};

/// Target difficulty for generated material
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Capitalized label for prompt text
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

/// Quiz question format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    #[default]
    Mcq,
    Short,
}

impl QuizKind {
    pub fn label(&self) -> &'static str {
        match self {
            QuizKind::Mcq => "Multiple Choice",
            QuizKind::Short => "Short Answer",
        }
    }
}

/// Content adjustment direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdjustAction {
    Simplify,
    Expand,
}

impl AdjustAction {
    pub fn label(&self) -> &'static str {
        match self {
            AdjustAction::Simplify => "SIMPLIFY",
            AdjustAction::Expand => "EXPAND",
        }
    }
}

/// Administrative document templates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum AdminTemplate {
    ReminderEmail {
        subject: String,
        due: String,
        #[serde(default)]
        details: String,
    },
    CourseSummary {
        week: String,
        topics: String,
    },
    GradingRubric {
        assignment: String,
        criteria: String,
    },
}

/// One turn of a chat conversation, as supplied by the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_serde() {
        assert_eq!(
            serde_json::from_str::<Difficulty>(r#""advanced""#).unwrap(),
            Difficulty::Advanced
        );
        assert_eq!(
            serde_json::to_string(&Difficulty::Beginner).unwrap(),
            r#""beginner""#
        );
    }

    #[test]
    fn test_admin_template_tagged_serde() {
        let json = r#"{"template":"reminder_email","subject":"Lab 2","due":"Friday"}"#;
        let template: AdminTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(
            template,
            AdminTemplate::ReminderEmail {
                subject: "Lab 2".to_string(),
                due: "Friday".to_string(),
                details: String::new(),
            }
        );
    }
}
