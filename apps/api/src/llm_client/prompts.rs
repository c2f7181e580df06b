// Shared prompt fragments and prompt-building utilities.
// Each feature module that calls the LLM defines its own prompts.rs alongside it.

use serde_json::Value;

/// Instruction appended to prompts whose output is relayed verbatim to the client.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only, using double quotes around all keys and string values. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Substitutes `{name}` placeholders in a prompt template.
///
/// The template is scanned once; inserted values are copied verbatim and never
/// rescanned. Placeholders without a matching pair are left untouched.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let matched = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(n, _)| *n == name)
                .map(|(_, value)| (*value, close))
        });

        match matched {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Renders a JSON value for a prompt: strings bare, everything else as JSON.
pub fn display_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
