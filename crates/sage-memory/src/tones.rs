//! Fixed catalog of response-tone personalities.

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub name: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
}

// Index 0 is the fallback used when an unknown tone is asked for an instruction.
pub const TONES: &[Tone] = &[
    Tone {
        name: "professional",
        description: "Clear, formal, and structured - perfect for academic settings",
        instruction: "Respond in a professional, clear, and well-structured manner suitable for academic environments. Use proper terminology and maintain a formal tone.",
    },
    Tone {
        name: "casual",
        description: "Friendly and conversational - like chatting with a colleague",
        instruction: "Respond in a friendly, conversational tone as if talking to a colleague over coffee. Keep it approachable and warm while remaining helpful.",
    },
    Tone {
        name: "enthusiastic",
        description: "Energetic and motivating - brings excitement to learning",
        instruction: "Respond with enthusiasm and energy! Use exclamation points, encouraging language, and show genuine excitement about the topic. Make learning feel exciting and achievable!",
    },
    Tone {
        name: "humorous",
        description: "Witty and fun - with jokes and personality",
        instruction: "Respond with wit, humor, and personality. Use analogies, light jokes, and entertaining examples. Make it fun while staying educational. Think of yourself as the cool teacher everyone loves!",
    },
    Tone {
        name: "concise",
        description: "Brief and to-the-point - no fluff, just facts",
        instruction: "Respond concisely and directly. Get straight to the point with minimal elaboration. Use bullet points when appropriate and avoid unnecessary details.",
    },
    Tone {
        name: "encouraging",
        description: "Supportive and motivating - builds confidence",
        instruction: "Respond in a supportive, encouraging manner that builds confidence. Acknowledge challenges, celebrate progress, and maintain a positive, can-do attitude.",
    },
    Tone {
        name: "socratic",
        description: "Question-based and thought-provoking - encourages critical thinking",
        instruction: "Respond by asking thoughtful questions that guide discovery. Encourage critical thinking and self-reflection. Help users arrive at insights themselves.",
    },
    Tone {
        name: "storyteller",
        description: "Narrative-driven with examples and analogies",
        instruction: "Respond by weaving information into stories, real-world examples, and vivid analogies. Make concepts memorable through narrative and imagery.",
    },
];

/// All catalog entries
pub fn all() -> &'static [Tone] {
    TONES
}

/// Look up a tone by name; trims and lowercases before matching
pub fn find(name: &str) -> Option<&'static Tone> {
    let name = name.trim().to_lowercase();
    TONES.iter().find(|tone| tone.name == name)
}

/// Catalog names, in catalog order
pub fn names() -> Vec<&'static str> {
    TONES.iter().map(|tone| tone.name).collect()
}

/// Description of a tone, or a placeholder for unknown names
pub fn description(name: &str) -> &'static str {
    find(name).map(|tone| tone.description).unwrap_or("Unknown tone")
}

/// Instruction text for prompt injection.
///
/// Unknown names fall back to the professional entry. The result is already
/// wrapped for prompt assembly (`TONE: ...\n\n`); empty only if the resolved
/// entry carries no instruction.
pub fn instruction(name: &str) -> String {
    let tone = find(name).unwrap_or(&TONES[0]);
    if tone.instruction.is_empty() {
        String::new()
    } else {
        format!("TONE: {}\n\n", tone.instruction)
    }
}
