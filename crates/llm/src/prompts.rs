//! Prompt templates for the coordinator and polisher calls

/// Categories the coordinator chooses from
pub const CATEGORIES: [&str; 6] = [
    "emotional",
    "study",
    "motivation",
    "decision",
    "productivity",
    "general",
];

/// Prompt for the coordinator call: classify the request and draft an agent note
pub fn coordinator_prompt(text: &str, image_info: &str) -> String {
    format!(
        r#"
You are a multi-agent coordinator.
User message: {text}

Image info (if any): {image_info}

Determine which category fits best from:
{categories}.

Then generate a focused agent note:
- If emotional → give supportive strategies.
- If study → give study plan + timing.
- If decision → give pros/cons + next action.
- If productivity → give momentum steps.
- If general → give common-sense steps.

Return ONLY in this format:

CATEGORY: <one word>
AGENT_NOTE: <short paragraph>
"#,
        text = text,
        image_info = image_info,
        categories = CATEGORIES.join(", "),
    )
}

/// Prompt for the polisher call: rewrite the agent note as 5 steps and a tip
pub fn polisher_prompt(agent_note: &str) -> String {
    format!(
        r#"
You are a friendly polisher.

Using ONLY the agent note below, produce:

- 5 very simple, actionable steps (numbered 1–5)
- 1 helpful tip (one short line)

Rules:
- Very simple English
- Student-friendly tone
- DO NOT repeat prompt or agent note
- DO NOT output anything else

Agent info:
{agent_note}

Return in this exact format:

1) ...
2) ...
3) ...
4) ...
5) ...

Tip: ...
"#,
        agent_note = agent_note,
    )
}
