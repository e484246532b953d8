// LLM prompt constants for professional discovery and email drafting.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for discovery.
pub const DISCOVERY_SYSTEM: &str = "You are a helpful assistant that generates realistic \
    professional contact information for job networking. Always return valid JSON arrays.";

/// Discovery prompt. Placeholders: `{role}`, `{location}`, `{projects}`,
/// `{cv_summary}`, `{json_instruction}`.
pub const DISCOVERY_PROMPT_TEMPLATE: &str = r#"You are an AI assistant helping someone find professionals to network with for job opportunities.

User details:
- Target Role: {role}
- Preferred Location: {location}
- Projects/Achievements: {projects}
- CV Summary: {cv_summary}

Generate a list of 5-7 fictional but realistic professional contacts who would be relevant for networking in this field and location. These should be people the user could potentially reach out to for job opportunities or networking.

Return the result as a JSON array with this exact structure:
[
  {
    "name": "Full Name",
    "title": "Job Title",
    "company": "Company Name",
    "email": "email@company.com",
    "relevanceScore": 85
  }
]

relevanceScore is an integer from 0 to 100. Make sure the professionals are relevant to the role and location specified.

{json_instruction}"#;

/// System prompt for email drafting.
pub const EMAIL_SYSTEM: &str = "You are an expert at writing professional networking emails \
    that are warm, genuine, and effective.";

/// Email prompt. Placeholders: `{role}`, `{location}`, `{name}`, `{title}`,
/// `{company}`, `{projects}`, `{format_instruction}`.
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"Generate a professional networking email for the following scenario:

From: A job seeker looking for {role} positions in {location}
To: {name}, {title} at {company}
Projects/Achievements: {projects}

Write a concise, professional networking email (150-200 words) that:
1. Introduces the sender professionally
2. Mentions their interest in the field/role
3. Highlights 1-2 key achievements or projects
4. Asks for a brief informational chat or advice
5. Sounds genuine and not overly formal

Return in this format:
SUBJECT: [email subject line]
BODY: [email body]

{format_instruction}"#;

/// Fills `{key}` placeholders in a single left-to-right pass, so substituted
/// user text is never itself scanned for placeholders. Unknown keys are kept.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
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
