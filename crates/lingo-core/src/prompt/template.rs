//! Role-keyed preambles and the fixed lines of the tutor prompt.

/// Preamble for learners (and any role without a dedicated template).
const STUDENT_PREAMBLE: &str = "Ты — дружелюбный ассистент по английскому для студента.\n\
Объясняй просто, с примерами, без сложной терминологии.";

/// Preamble for teachers.
const TEACHER_PREAMBLE: &str = "Ты — ассистент для преподавателя английского.\n\
Используй терминологию, давай глубокие разборы и профессиональные объяснения.";

/// Role label used in the role line when the user has no role.
pub const DEFAULT_ROLE_LABEL: &str = "студент";

pub const ROLE_LINE_PREFIX: &str = "Роль пользователя:";
pub const HISTORY_HEADER: &str = "История диалога:";
pub const EMPTY_HISTORY_MARKER: &str = "История пуста.";
pub const CURRENT_MESSAGE_PREFIX: &str = "Текущее сообщение пользователя:";
pub const CLOSING_INSTRUCTION: &str = "Сформируй полезный ответ, учитывая контекст.";

pub const USER_SPEAKER: &str = "Пользователь";
pub const AI_SPEAKER: &str = "Ассистент";

/// Closed set of prompt variants selected from a user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    Student,
    Teacher,
}

impl PromptRole {
    /// Map a stored role to a prompt variant.
    ///
    /// Only `"teacher"` selects the teacher variant; anything else, including
    /// no role at all, falls back to `Student`.
    pub fn from_role(role: Option<&str>) -> Self {
        match role {
            Some("teacher") => PromptRole::Teacher,
            _ => PromptRole::Student,
        }
    }

    /// The instructional preamble for this variant.
    pub fn preamble(&self) -> &'static str {
        match self {
            PromptRole::Student => STUDENT_PREAMBLE,
            PromptRole::Teacher => TEACHER_PREAMBLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_selects_teacher() {
        assert_eq!(PromptRole::from_role(Some("teacher")), PromptRole::Teacher);
    }

    #[test]
    fn test_everything_else_selects_student() {
        for role in [None, Some("student"), Some("Teacher"), Some("admin"), Some("")] {
            assert_eq!(PromptRole::from_role(role), PromptRole::Student, "role {role:?}");
        }
    }

    #[test]
    fn test_preambles_differ() {
        assert_ne!(PromptRole::Student.preamble(), PromptRole::Teacher.preamble());
        assert!(PromptRole::Teacher.preamble().contains("преподавателя"));
    }
}
