//! Prompt construction for the AI student and the teaching evaluator.
//!
//! Everything here is pure: the same session state always renders the same
//! text. The teaching prompt is bounded (recent history window, capped
//! document preview); the evaluation prompt carries the whole transcript.

use super::{Message, TeachingSession};

/// Number of most recent messages rendered into a teaching prompt.
pub const DEFAULT_HISTORY_WINDOW: usize = 8;

/// Maximum characters of reference document shown in a teaching prompt.
pub const DEFAULT_DOCUMENT_PREVIEW_CHARS: usize = 4000;

const AI_STUDENT_RULES: &str = "\
You are a student learning from a human teacher.
You do NOT explain the topic.
You never lecture and never give full explanations.
You ask exactly ONE question per turn.
You are curious and sometimes slightly confused, so you probe what you do not understand.
Keep your response short: at most 3 sentences.";

const TURN_INSTRUCTIONS: &str = "\
You are a STUDENT being taught by a human.
Your goal is to TEST the teacher's understanding.

You MUST do ALL of the following in your response:
1. Restate in ONE sentence what you think the teacher is claiming.
2. Identify ONE missing detail, assumption, or vague part in the explanation.
3. Ask exactly ONE deep, specific question that would expose a misunderstanding.

Question rules:
- Your question MUST start with \"How\", \"Why\", or \"What happens if\".
- Your question MUST NOT be definitional.
- Your question MUST require reasoning, not memorization.

Forbidden behaviors:
- Do NOT explain the topic yourself.
- Do NOT agree without challenge.
- Do NOT paraphrase without questioning.

If you do not ask a deep question, your response is INVALID.";

const RESPONSE_FORMAT: &str = "\
Respond only as the AI student, in plain text (no JSON, no markdown headings).
Before responding, check: does my question force the teacher to THINK? If not, rewrite it.";

/// Appended to a prompt whose previous answer failed validation.
pub const CORRECTION_SUFFIX: &str = "\n\n### CORRECTION\n\
Your previous answer was REJECTED because it did not ask a deep question.\n\
Reply again with ONE question that starts with \"How\", \"Why\", or \"What happens if\" \
and ends with a question mark (?).";

/// Bounds applied when rendering a teaching prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeachingPromptLimits {
    pub history_window: usize,
    pub document_preview_chars: usize,
}

impl Default for TeachingPromptLimits {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            document_preview_chars: DEFAULT_DOCUMENT_PREVIEW_CHARS,
        }
    }
}

/// Builds the instruction sent to the generator for one teaching turn.
///
/// `latest_student_message` is placed last so it carries the most weight.
pub fn build_teaching_prompt(
    session: &TeachingSession,
    latest_student_message: &str,
    limits: &TeachingPromptLimits,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("### AI STUDENT RULES\n{}", AI_STUDENT_RULES));

    parts.push(format!(
        "### SESSION CONTEXT\nTopic: {}\nDifficulty: {}\nTeaching objective: {}",
        session.topic(),
        session.difficulty(),
        session.objective()
    ));

    if let Some(preview) = session
        .document_text()
        .map(|doc| document_preview(doc, limits.document_preview_chars))
        .filter(|preview| !preview.is_empty())
    {
        parts.push(format!("### DOCUMENT (preview)\n{}", preview));
    }

    parts.push(format!(
        "### RECENT CONVERSATION\n{}",
        recent_history(session.history(), limits.history_window)
    ));

    parts.push(format!("### INSTRUCTIONS for the AI\n{}", TURN_INSTRUCTIONS));

    parts.push(format!(
        "### QUESTION FOCUS ({})\n{}",
        session.question_stage(),
        session.question_stage().focus_instruction()
    ));

    parts.push(RESPONSE_FORMAT.to_string());

    parts.push(format!("### LATEST STUDENT MESSAGE\n{}", latest_student_message));

    parts.join("\n\n")
}

/// Builds the instruction asking the generator to grade the whole session.
pub fn build_evaluation_prompt(session: &TeachingSession) -> String {
    let transcript = session
        .history()
        .iter()
        .map(|m| format!("{}: {}", m.role.transcript_label(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert teacher evaluator.

A student tried to teach the following topic:
Topic: {topic}
Difficulty: {difficulty}
Objective: {objective}

Here is the teaching conversation:
{transcript}

Evaluate the student's teaching quality.

Return exactly ONE strict JSON object with these keys and nothing else:
- \"score\": integer from 0 to 100
- \"strengths\": list of strings
- \"weaknesses\": list of strings
- \"missed_concepts\": list of strings
- \"suggestions\": list of strings
- \"follow_up_questions\": list of strings

Rules:
- Be honest but constructive.
- Focus on clarity, correctness and depth.
- Do NOT include any text outside the JSON object.",
        topic = session.topic(),
        difficulty = session.difficulty(),
        objective = session.objective(),
        transcript = transcript,
    )
}

/// Appends the rejection notice used on a retry.
pub fn with_correction(prompt: &str) -> String {
    format!("{}{}", prompt, CORRECTION_SUFFIX)
}

fn recent_history(history: &[Message], window: usize) -> String {
    let start = history.len().saturating_sub(window);
    history[start..]
        .iter()
        .map(|m| {
            format!(
                "{}: {}",
                m.role.transcript_label(),
                m.content.replace('\n', " ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn document_preview(document: &str, max_chars: usize) -> String {
    document.trim().chars().take(max_chars).collect()
}
