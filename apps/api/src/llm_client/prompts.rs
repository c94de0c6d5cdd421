// Shared prompt fragments. Each module that calls the model keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for plain single-line answers.
pub const PLAIN_ANSWER_SYSTEM: &str = "You are a precise assistant. \
    Answer with exactly the single line requested and nothing else.";
