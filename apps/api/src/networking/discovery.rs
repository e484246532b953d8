//! Professional Discovery: asks the LLM for networking contacts and validates
//! what comes back.
//!
//! Never fails outward: any generation or parse failure is logged and replaced
//! by `fallback_professionals()`. The fallback ignores role and location.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::json::extract_json_array;
use crate::llm_client::prompts::JSON_ARRAY_INSTRUCTION;
use crate::llm_client::{Completion, LlmError, TextGenerator};
use crate::networking::models::{ApplicationRequest, Professional};
use crate::networking::prompts::{render, DISCOVERY_PROMPT_TEMPLATE, DISCOVERY_SYSTEM};

/// Upper bound on contacts returned from one submission.
pub const MAX_PROFESSIONALS: usize = 10;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("no JSON array found in completion")]
    NoJsonArray,

    #[error("none of the {0} generated contacts passed validation")]
    NoValidContacts(usize),
}

/// Produces a non-empty list of contacts for a submission.
pub async fn discover_professionals(
    generator: &dyn TextGenerator,
    request: &ApplicationRequest,
) -> Vec<Professional> {
    match try_discover(generator, request).await {
        Ok(professionals) => {
            info!(
                "Discovered {} professionals for role '{}' in '{}'",
                professionals.len(),
                request.role,
                request.location
            );
            professionals
        }
        Err(e) => {
            warn!("Discovery fell back to sample contacts: {e}");
            fallback_professionals()
        }
    }
}

async fn try_discover(
    generator: &dyn TextGenerator,
    request: &ApplicationRequest,
) -> Result<Vec<Professional>, DiscoveryError> {
    let prompt = build_discovery_prompt(request);
    let text = generator
        .complete(Completion::new(DISCOVERY_SYSTEM, &prompt))
        .await?;
    parse_professionals(&text)
}

pub fn build_discovery_prompt(request: &ApplicationRequest) -> String {
    render(
        DISCOVERY_PROMPT_TEMPLATE,
        &[
            ("role", request.role.as_str()),
            ("location", request.location.as_str()),
            ("projects", request.projects_or("Not specified")),
            ("cv_summary", request.cv_text.as_str()),
            ("json_instruction", JSON_ARRAY_INSTRUCTION),
        ],
    )
}

/// Extracts and validates contacts from a completion. Invalid entries are
/// dropped; the call fails only when nothing usable remains.
pub fn parse_professionals(text: &str) -> Result<Vec<Professional>, DiscoveryError> {
    let items = extract_json_array(text).ok_or(DiscoveryError::NoJsonArray)?;
    let total = items.len();

    let professionals: Vec<Professional> = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match validate_contact(item) {
            Ok(professional) => Some(professional),
            Err(reason) => {
                warn!("Dropping generated contact #{idx}: {reason}");
                None
            }
        })
        .take(MAX_PROFESSIONALS)
        .collect();

    if professionals.is_empty() {
        return Err(DiscoveryError::NoValidContacts(total));
    }
    if total > MAX_PROFESSIONALS {
        debug!("Capped {total} generated contacts at {MAX_PROFESSIONALS}");
    }
    Ok(professionals)
}

/// Field-by-field check of one generated contact.
fn validate_contact(item: &Value) -> Result<Professional, String> {
    let object = item.as_object().ok_or("not a JSON object")?;

    let text_field = |key: &str| -> Result<String, String> {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| format!("missing or blank '{key}'"))
    };

    let email = text_field("email")?;
    if !email.contains('@') {
        return Err(format!("'{email}' is not an email address"));
    }

    let score = object
        .get("relevanceScore")
        .and_then(Value::as_f64)
        .ok_or("missing or non-numeric 'relevanceScore'")?;
    if !(0.0..=100.0).contains(&score) {
        return Err(format!("relevanceScore {score} outside 0-100"));
    }

    Ok(Professional {
        name: text_field("name")?,
        title: text_field("title")?,
        company: text_field("company")?,
        email,
        relevance_score: score.round() as u8,
    })
}

/// Fixed sample contacts used whenever generation or parsing fails.
pub fn fallback_professionals() -> Vec<Professional> {
    [
        ("Sarah Johnson", "Senior Recruiter", "Tech Corp", "sarah.j@techcorp.com", 92),
        ("Michael Chen", "Engineering Manager", "Innovation Labs", "m.chen@innovationlabs.com", 88),
        ("Emily Rodriguez", "HR Director", "StartUp Inc", "emily.r@startupinc.com", 85),
        ("David Park", "VP of Engineering", "Growth Systems", "david.park@growthsystems.com", 90),
        ("Jessica Taylor", "Talent Acquisition Lead", "Future Technologies", "j.taylor@futuretech.com", 87),
    ]
    .into_iter()
    .map(|(name, title, company, email, relevance_score)| Professional {
        name: name.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        email: email.to_string(),
        relevance_score,
    })
    .collect()
}
