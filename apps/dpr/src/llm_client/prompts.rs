// Cross-cutting prompt fragments. Each caller keeps its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps the model from padding the document with invented figures.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Only extract information that is present in or directly implied by the \
    description. Do NOT invent figures, names, or dates. Omit a field rather than guess it.";
