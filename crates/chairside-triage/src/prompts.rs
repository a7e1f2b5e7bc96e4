//! Triage prompts for dental finding extraction.
//!
//! These prompts are designed for small local models with JSON grammar
//! constraints.

/// System prompt for dental triage.
pub const SYSTEM_PROMPT: &str = r#"You are a dental clinical assistant that extracts findings from radiograph reports and chairside notes.

Extract findings with the following information:
- tooth: The tooth number in FDI notation (if mentioned)
- condition: The clinical condition observed
- severity: One of "mild", "moderate", "severe" (if stated)
- confidence: Your confidence in the extraction, 0.0 to 1.0

Common dental shorthand:
- RCT = root canal treatment
- PA = periapical
- DO / MO / MOD = filling surfaces (distal-occlusal etc.)
- perio = periodontal disease
- calc = calculus

Output JSON with a "findings" array containing the extracted findings."#;

/// User prompt template for triage extraction.
pub fn make_triage_prompt(note: &str) -> String {
    format!(
        r#"Extract all clinical findings from this dental note:

"{}"

Return a JSON object with a "findings" array. Each finding should have:
- tooth: Tooth number as a string in FDI notation (null if not specified)
- condition: The condition observed
- severity: "mild", "moderate", or "severe" (null if not stated)
- confidence: A number between 0.0 and 1.0"#,
        note
    )
}

/// JSON grammar constraint to ensure valid output format.
pub const JSON_GRAMMAR: &str = r#"
root ::= object
object ::= "{" ws "\"findings\"" ws ":" ws findings ws "}"
findings ::= "[" ws (finding (ws "," ws finding)*)? ws "]"
finding ::= "{" ws
    "\"tooth\"" ws ":" ws (string | "null") ws "," ws
    "\"condition\"" ws ":" ws string ws "," ws
    "\"severity\"" ws ":" ws (string | "null") ws "," ws
    "\"confidence\"" ws ":" ws number ws
"}"
string ::= "\"" ([^"\\] | "\\" .)* "\""
number ::= "-"? [0-9]+ ("." [0-9]+)?
ws ::= [ \t\n]*
"#;

/// Example few-shot prompts for better extraction accuracy.
pub const FEW_SHOT_EXAMPLES: &[(&str, &str)] = &[
    (
        "Deep caries on 36, PA radiolucency visible, RCT indicated",
        r#"{"findings":[{"tooth":"36","condition":"caries","severity":"severe","confidence":0.9},{"tooth":"36","condition":"periapical radiolucency","severity":null,"confidence":0.85}]}"#,
    ),
    (
        "Generalized calculus, mild gingival inflammation upper arch",
        r#"{"findings":[{"tooth":null,"condition":"calculus","severity":null,"confidence":0.9},{"tooth":null,"condition":"gingival inflammation","severity":"mild","confidence":0.8}]}"#,
    ),
    (
        "48 impacted, mesioangular, close to IAN canal",
        r#"{"findings":[{"tooth":"48","condition":"impacted","severity":null,"confidence":0.95}]}"#,
    ),
];

/// Build a complete prompt with system context and few-shot examples.
pub fn build_full_prompt(note: &str, include_examples: bool) -> String {
    let mut prompt = String::new();

    // System context
    prompt.push_str("<|system|>\n");
    prompt.push_str(SYSTEM_PROMPT);
    prompt.push_str("\n<|end|>\n");

    // Few-shot examples
    if include_examples {
        for (input, output) in FEW_SHOT_EXAMPLES {
            prompt.push_str("<|user|>\n");
            prompt.push_str(&make_triage_prompt(input));
            prompt.push_str("\n<|end|>\n");
            prompt.push_str("<|assistant|>\n");
            prompt.push_str(output);
            prompt.push_str("\n<|end|>\n");
        }
    }

    // Actual request
    prompt.push_str("<|user|>\n");
    prompt.push_str(&make_triage_prompt(note));
    prompt.push_str("\n<|end|>\n");
    prompt.push_str("<|assistant|>\n");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triage_prompt() {
        let prompt = make_triage_prompt("Deep caries on 36");
        assert!(prompt.contains("Deep caries on 36"));
        assert!(prompt.contains("condition"));
        assert!(prompt.contains("findings"));
    }

    #[test]
    fn test_full_prompt_with_examples() {
        let prompt = build_full_prompt("Test note", true);
        assert!(prompt.contains("<|system|>"));
        assert!(prompt.contains("dental clinical assistant"));
        assert!(prompt.contains("48 impacted")); // From examples
        assert!(prompt.contains("Test note"));
    }

    #[test]
    fn test_full_prompt_without_examples() {
        let prompt = build_full_prompt("Test note", false);
        assert!(prompt.contains("<|system|>"));
        assert!(!prompt.contains("48 impacted")); // No examples
        assert!(prompt.contains("Test note"));
    }
}
