use crate::types::{AdjustAction, AdminTemplate, ChatTurn, Difficulty, QuizKind};

/// Shared system preface for instructor-facing prompts
pub fn system_preamble() -> &'static str {
    "You are an AI teaching assistant for university-level courses. \
     Be accurate, practical, and helpful for instructors. Prefer clear structure, \
     concise explanations, and directly usable outputs."
}

/// Summarize source material for teachers
pub fn summarize_prompt(text: &str) -> String {
    format!(
        "{}\n\nTASK: Summarize the following text for teachers. Keep the key points, \
         terminology, and anything directly usable in class.\n\nTEXT:\n{}\n",
        system_preamble(),
        text.trim()
    )
}

/// Generate flashcards from source material
pub fn flashcards_prompt(text: &str) -> String {
    format!(
        "{}\n\nTASK: Make flashcards (Q&A pairs) for students based on the text below.\n\
         RULES:\n\
         - One card per line as `Q: ... | A: ...`\n\
         - Cover every major concept once\n\
         - Keep answers short and precise\n\n\
         TEXT:\n{}\n",
        system_preamble(),
        text.trim()
    )
}

/// Explain source material in simple terms
pub fn explain_prompt(text: &str) -> String {
    format!(
        "{}\n\nTASK: Explain the following text simply for students. Use plain language, \
         short sentences, and an example where it helps.\n\nTEXT:\n{}\n",
        system_preamble(),
        text.trim()
    )
}

/// Generate quiz questions and an answer key
pub fn quiz_prompt(topic: &str, difficulty: Difficulty, num_questions: u32, kind: QuizKind) -> String {
    format!(
        "{preamble}\n\n\
         TASK: Generate {n} {kind} questions for university students on the topic below.\n\n\
         REQUIREMENTS:\n\
         - Difficulty: {difficulty}\n\
         - Number each question\n\
         - For MCQ: Provide 4 options (A-D) and indicate the correct option\n\
         - For Short Answer: Provide a concise expected answer\n\
         - After questions, include an Answer Key section referencing question numbers\n\n\
         TOPIC:\n{topic}\n\n\
         OUTPUT FORMAT (Markdown):\n\
         ## Questions\n\
         1. Question text\n\
         ...\n\n\
         ## Answer Key\n\
         1. C - brief rationale\n\
         ...\n",
        preamble = system_preamble(),
        n = num_questions,
        kind = kind.label(),
        difficulty = difficulty.label(),
        topic = topic.trim(),
    )
}

/// Generate structured lecture content in Markdown
pub fn lecture_prompt(topic_or_text: &str, difficulty: Difficulty) -> String {
    format!(
        "{preamble}\n\n\
         TASK: Generate a well-structured lecture in Markdown for the given input. \
         Assume the audience is university students.\n\n\
         REQUIREMENTS:\n\
         - Target difficulty: {difficulty}\n\
         - Use clear section headings (##) and subheadings (###)\n\
         - Include learning objectives, key concepts, examples, and a brief summary\n\
         - Where relevant, include short code snippets (fenced with language)\n\
         - Keep it factual and actionable for instructors to use directly in class\n\n\
         INPUT:\n{input}\n\n\
         OUTPUT FORMAT (Markdown):\n\
         # Title\n\n\
         ## Learning Objectives\n\
         - objective 1\n\
         - objective 2\n\n\
         ## Key Concepts\n\
         - concept 1\n\n\
         ## Explanations and Examples\n\
         ### Concept A\n\
         Explanation...\n\n\
         ## Common Pitfalls\n\
         - pitfall 1 and how to avoid\n\n\
         ## Summary\n\
         Key takeaways...\n",
        preamble = system_preamble(),
        difficulty = difficulty.label(),
        input = topic_or_text.trim(),
    )
}

/// Convert lecture markdown into slide-ready content
pub fn slides_prompt(markdown_content: &str) -> String {
    format!(
        "{preamble}\n\n\
         TASK: Convert the provided lecture Markdown into slide-ready content.\n\
         RULES:\n\
         - Output a sequence of slides, each with a Title line and 3-6 concise bullet points\n\
         - No prose paragraphs; bullets only\n\
         - Keep bullets short and scannable\n\n\
         INPUT MARKDOWN:\n{src}\n\n\
         OUTPUT FORMAT:\n\
         Slide 1: Title text\n\
         - bullet\n\
         - bullet\n\n\
         Slide 2: Title text\n\
         - bullet\n",
        preamble = system_preamble(),
        src = markdown_content.trim(),
    )
}

/// Simplify or expand existing content
pub fn adjust_prompt(text: &str, action: AdjustAction) -> String {
    let instruction = match action {
        AdjustAction::Simplify => {
            "Simplify the content while preserving meaning. Use shorter sentences, clearer \
             wording, and keep all important details. Keep Markdown intact."
        }
        AdjustAction::Expand => {
            "Expand the content by adding helpful explanations, clarifications, and brief \
             examples where useful. Keep Markdown intact."
        }
    };

    format!(
        "{preamble}\n\n\
         ACTION: {action}\n\
         INSTRUCTION: {instruction}\n\n\
         CONTENT:\n{body}\n",
        preamble = system_preamble(),
        action = action.label(),
        instruction = instruction,
        body = text.trim(),
    )
}

/// Grade a student response, asking for strict JSON output
pub fn grading_prompt(question: &str, answer: &str, is_code: bool) -> String {
    let code_note = if is_code {
        "Focus on code correctness, common errors, and best practices."
    } else {
        "Focus on conceptual correctness and clarity."
    };

    format!(
        "{preamble}\n\n\
         TASK: Grade a student's response to a university-level question and provide \
         concise, constructive feedback.\n\n\
         GUIDELINES:\n\
         - Output JSON only\n\
         - Suggested grade as a percentage (0-100)\n\
         - 2-3 sentence feedback\n\
         - {code_note}\n\n\
         QUESTION:\n{q}\n\n\
         STUDENT_RESPONSE:\n{a}\n\n\
         OUTPUT JSON SCHEMA:\n\
         {{\n  \"grade\": 0-100,\n  \"feedback\": \"string\",\n  \
         \"detected_issues\": [\"short issue text\"],\n  \
         \"strengths\": [\"short strength text\"]\n}}\n",
        preamble = system_preamble(),
        code_note = code_note,
        q = question.trim(),
        a = answer.trim(),
    )
}

/// Administrative document templates: emails, summaries, rubrics
pub fn admin_prompt(template: &AdminTemplate) -> String {
    let base = system_preamble();
    match template {
        AdminTemplate::ReminderEmail {
            subject,
            due,
            details,
        } => format!(
            "{base}\n\n\
             Write a short, professional reminder email to students.\n\
             Context: {details}\n\
             Subject: {subject}\n\
             Due: {due}\n\n\
             Output format:\n\
             Subject: <subject line>\n\n\
             Dear Students,\n\
             <body in 3-5 short sentences>\n\n\
             Best regards,\nInstructor\n"
        ),
        AdminTemplate::CourseSummary { week, topics } => format!(
            "{base}\n\n\
             Generate a concise course summary for the specified week including key topics \
             and action items.\n\
             Week: {week}\n\
             Topics: {topics}\n\
             Format as bullet points."
        ),
        AdminTemplate::GradingRubric {
            assignment,
            criteria,
        } => format!(
            "{base}\n\n\
             Create a clear grading rubric table in Markdown with point allocations.\n\
             Assignment: {assignment}\n\
             Criteria: {criteria}\n\
             Include total 100 points and brief descriptors."
        ),
    }
}

/// Project or lab idea generation
pub fn ideas_prompt(topic: &str, level: Difficulty, variations: bool) -> String {
    format!(
        "{preamble}\n\n\
         TASK: Propose 5 practical project ideas for a course.\n\
         Topic: {topic}\n\
         Level: {level}\n\
         Include difficulty variations: {variations}\n\n\
         FORMAT:\n\
         1) Title - one sentence description; optional variations by difficulty\n\
         2) ...\n",
        preamble = system_preamble(),
        topic = topic.trim(),
        level = level.label(),
        variations = if variations { "Yes" } else { "No" },
    )
}

/// In-app mentor prompt for questions about the tool itself
pub fn help_prompt(question: &str) -> String {
    format!(
        "You are the in-app mentor for the Sage educator assistant.\n\
         Answer concisely and provide step-by-step guidance for this tool's features: \n\
         Content Generation, Grading & Feedback, Quiz Generator, Admin Tools, Project Ideas, \
         History, and Study Material Upload.\n\n\
         QUESTION: {q}\n\
         ANSWER:",
        q = question.trim(),
    )
}

/// How many trailing turns of history the chat prompt keeps
const CHAT_HISTORY_WINDOW: usize = 3;

/// Max characters of each history turn carried into the prompt
const CHAT_HISTORY_TRUNCATE: usize = 200;

/// Conversational chat prompt with a trailing history window.
///
/// Messages carrying an uploaded file (marked by the upload handler) get the
/// file-analysis persona instead of the general study-companion persona.
pub fn chat_prompt(message: &str, history: &[ChatTurn]) -> String {
    let msg = message.trim();
    let is_file_upload = msg.contains("File:") && msg.contains("Extracted content:");

    let mut context = String::new();
    if !history.is_empty() {
        context.push_str("CONVERSATION HISTORY:\n");
        let start = history.len().saturating_sub(CHAT_HISTORY_WINDOW);
        for entry in &history[start..] {
            let content: String = entry.content.chars().take(CHAT_HISTORY_TRUNCATE).collect();
            context.push_str(&format!("{}: {}...\n", entry.role.to_uppercase(), content));
        }
        context.push('\n');
    }

    if is_file_upload {
        format!(
            "You are Sage, an intelligent study companion. \
             A student has uploaded a file and you need to analyze its content.\n\n\
             INSTRUCTIONS:\n\
             1. Focus ONLY on the extracted content from the uploaded file\n\
             2. If the student asks a question, answer it based on the file content\n\
             3. If no specific question is asked, provide a comprehensive summary of the file\n\
             4. Identify key concepts, main topics, and important points\n\
             5. Use markdown formatting for better readability\n\
             6. Be specific and reference actual content from the file\n\n\
             {context}\
             FILE CONTENT AND USER REQUEST:\n{msg}\n\n\
             YOUR ANALYSIS:"
        )
    } else {
        format!(
            "You are Sage, an intelligent study companion for students. \
             You help students learn by:\n\
             - Answering questions about any topic\n\
             - Explaining concepts in simple terms\n\
             - Analyzing uploaded study materials\n\
             - Creating summaries and study aids\n\
             - Providing educational guidance\n\n\
             Be helpful, clear, and encouraging. Use examples when appropriate. \
             Format your responses with markdown for better readability.\n\n\
             {context}\
             STUDENT MESSAGE: {msg}\n\n\
             YOUR RESPONSE:"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_prompt_embeds_text() {
        let prompt = summarize_prompt("  The water cycle  ");
        assert!(prompt.contains("The water cycle"));
        assert!(prompt.contains("Summarize"));
        assert!(!prompt.contains("  The water cycle  "));
    }

    #[test]
    fn test_quiz_prompt_sections() {
        let prompt = quiz_prompt("Sorting algorithms", Difficulty::Advanced, 5, QuizKind::Mcq);
        assert!(prompt.contains("Generate 5 Multiple Choice questions"));
        assert!(prompt.contains("Difficulty: Advanced"));
        assert!(prompt.contains("## Answer Key"));
        assert!(prompt.contains("Sorting algorithms"));
    }

    #[test]
    fn test_grading_prompt_code_note() {
        let code = grading_prompt("Implement a stack", "fn push() {}", true);
        assert!(code.contains("code correctness"));

        let concept = grading_prompt("Define recursion", "A function calling itself", false);
        assert!(concept.contains("conceptual correctness"));
        assert!(concept.contains("\"grade\": 0-100"));
    }

    #[test]
    fn test_adjust_prompt_actions() {
        let simplified = adjust_prompt("Some dense text", AdjustAction::Simplify);
        assert!(simplified.contains("ACTION: SIMPLIFY"));

        let expanded = adjust_prompt("Some terse text", AdjustAction::Expand);
        assert!(expanded.contains("ACTION: EXPAND"));
        assert!(expanded.contains("Some terse text"));
    }

    #[test]
    fn test_admin_prompt_variants() {
        let email = admin_prompt(&AdminTemplate::ReminderEmail {
            subject: "Lab 2".to_string(),
            due: "Friday".to_string(),
            details: "Submit via portal".to_string(),
        });
        assert!(email.contains("Subject: Lab 2"));
        assert!(email.contains("Due: Friday"));

        let rubric = admin_prompt(&AdminTemplate::GradingRubric {
            assignment: "Project 1".to_string(),
            criteria: "correctness, style".to_string(),
        });
        assert!(rubric.contains("Assignment: Project 1"));
        assert!(rubric.contains("total 100 points"));
    }

    #[test]
    fn test_chat_prompt_keeps_trailing_history_window() {
        let history: Vec<ChatTurn> = (1..=5)
            .map(|i| ChatTurn {
                role: "user".to_string(),
                content: format!("message {}", i),
            })
            .collect();

        let prompt = chat_prompt("What is entropy?", &history);

        assert!(!prompt.contains("message 1"));
        assert!(!prompt.contains("message 2"));
        assert!(prompt.contains("message 3"));
        assert!(prompt.contains("message 5"));
        assert!(prompt.contains("What is entropy?"));
    }

    #[test]
    fn test_chat_prompt_file_upload_persona() {
        let msg = "File: notes.txt\nExtracted content: mitochondria are...";
        let prompt = chat_prompt(msg, &[]);
        assert!(prompt.contains("YOUR ANALYSIS:"));

        let plain = chat_prompt("Explain osmosis", &[]);
        assert!(plain.contains("YOUR RESPONSE:"));
    }
}
