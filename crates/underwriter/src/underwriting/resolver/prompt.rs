const POLICY_PROMPT_HEADER: &str = r#"You are parsing a lending policy into structured JSON.
Return ONLY a JSON object with this exact structure (no prose, no markdown):

{
  "tiers": {
    "low":    {"dti_limit": 40, "employment_months": 12, "income_override": null},
    "medium": {"dti_limit": 30, "employment_months": 18, "income_override": null},
    "high":   {"dti_limit": 25, "employment_months": 24, "income_override": 150000}
  },
  "income_min": 35000,
  "auto_deny_credit": 600,
  "auto_deny_dti_excess": 5,
  "first_time_buyer_leniency": 5.0,
  "self_employed_months": 24
}

Fill numeric values using the policy text exactly. If high-risk has a special income override, set it; otherwise null.

POLICY TEXT:
---
"#;

const POLICY_PROMPT_FOOTER: &str = "\n---\n";

/// Build the fixed instruction sent to the text-understanding service.
pub fn policy_prompt(policy_text: &str) -> String {
    let mut prompt = String::with_capacity(
        POLICY_PROMPT_HEADER.len() + policy_text.len() + POLICY_PROMPT_FOOTER.len(),
    );
    prompt.push_str(POLICY_PROMPT_HEADER);
    prompt.push_str(policy_text);
    prompt.push_str(POLICY_PROMPT_FOOTER);
    prompt
}
