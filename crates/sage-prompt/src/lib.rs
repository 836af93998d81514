mod templates;
mod types;

pub use templates::{
    adjust_prompt, admin_prompt, chat_prompt, explain_prompt, flashcards_prompt, grading_prompt,
    help_prompt, ideas_prompt, lecture_prompt, quiz_prompt, slides_prompt, summarize_prompt,
    system_preamble,
};
pub use types::{AdjustAction, AdminTemplate, ChatTurn, Difficulty, QuizKind};
