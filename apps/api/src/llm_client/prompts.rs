// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Appended to prompts whose output is parsed as a JSON array.
pub const JSON_ARRAY_INSTRUCTION: &str = "\
    Respond with the JSON array only. \
    Do NOT include any text before or after the array. \
    Do NOT use markdown code fences.";

/// Appended to prompts whose output is read by a line-prefix parser.
pub const LABELLED_LINES_INSTRUCTION: &str = "\
    Keep the labels exactly as written, in capitals, each at the start of its own line. \
    Do NOT wrap the labels in markdown.";
