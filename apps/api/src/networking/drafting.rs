//! Email Drafting: one personalised outreach email per contact.
//!
//! The model answers in a `SUBJECT:` / `BODY:` line convention. Each part
//! falls back to a fixed template on its own when missing, and both do when
//! the generation call fails.

use tracing::warn;

use crate::llm_client::prompts::LABELLED_LINES_INSTRUCTION;
use crate::llm_client::{Completion, TextGenerator};
use crate::networking::models::{ApplicationRequest, EmailDraft, Professional};
use crate::networking::prompts::{render, EMAIL_PROMPT_TEMPLATE, EMAIL_SYSTEM};

const SUBJECT_LABEL: &str = "SUBJECT:";
const BODY_LABEL: &str = "BODY:";

/// Produces a usable draft for one contact. Never fails.
pub async fn draft_email(
    generator: &dyn TextGenerator,
    professional: &Professional,
    request: &ApplicationRequest,
) -> EmailDraft {
    let prompt = build_email_prompt(professional, request);

    match generator
        .complete(Completion::new(EMAIL_SYSTEM, &prompt))
        .await
    {
        Ok(text) => parse_draft(&text, professional, request),
        Err(e) => {
            warn!(to = %professional.email, "Email generation failed, using template: {e}");
            EmailDraft {
                subject: fallback_subject(request),
                body: fallback_body(professional, request),
            }
        }
    }
}

pub fn build_email_prompt(professional: &Professional, request: &ApplicationRequest) -> String {
    render(
        EMAIL_PROMPT_TEMPLATE,
        &[
            ("role", request.role.as_str()),
            ("location", request.location.as_str()),
            ("name", professional.name.as_str()),
            ("title", professional.title.as_str()),
            ("company", professional.company.as_str()),
            ("projects", request.projects_or("Various professional projects")),
            ("format_instruction", LABELLED_LINES_INSTRUCTION),
        ],
    )
}

/// Reads the labelled completion, filling whichever part is absent or blank
/// from the template.
pub fn parse_draft(text: &str, professional: &Professional, request: &ApplicationRequest) -> EmailDraft {
    let subject = labelled(text, SUBJECT_LABEL)
        .and_then(|rest| rest.lines().next())
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let body = labelled(text, BODY_LABEL)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if subject.is_none() || body.is_none() {
        warn!(
            to = %professional.email,
            has_subject = subject.is_some(),
            has_body = body.is_some(),
            "Completion missing labelled parts, filling from template"
        );
    }

    EmailDraft {
        subject: subject
            .map(str::to_string)
            .unwrap_or_else(|| fallback_subject(request)),
        body: body
            .map(str::to_string)
            .unwrap_or_else(|| fallback_body(professional, request)),
    }
}

/// Returns everything after `label` on the first line that starts with it.
fn labelled<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(label) {
            let start = offset + (line.len() - trimmed.len()) + label.len();
            return Some(&text[start..]);
        }
        offset += line.len();
    }
    None
}

pub fn fallback_subject(request: &ApplicationRequest) -> String {
    format!("Connecting about {} opportunities", request.role)
}

pub fn fallback_body(professional: &Professional, request: &ApplicationRequest) -> String {
    format!(
        "Hi {name},\n\n\
         I hope this email finds you well. I'm currently exploring opportunities in {role} \
         and came across your profile at {company}.\n\n\
         I'd love to learn more about your experience in the field and would appreciate any \
         insights you might have about opportunities in {location}.\n\n\
         Would you be open to a brief call?\n\n\
         Best regards",
        name = professional.name,
        role = request.role,
        company = professional.company,
        location = request.location,
    )
}
