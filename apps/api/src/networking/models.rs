use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One form submission. Built per request, never persisted.
///
/// Also the shape of `userData` in `POST /send-emails`; the client posts its
/// whole form state there, so unknown keys are ignored and `cvText` is absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub cv_text: String,
}

impl ApplicationRequest {
    /// Trims every field and rejects a blank role or location.
    pub fn normalized(self) -> Result<Self, AppError> {
        let role = self.role.trim().to_string();
        let location = self.location.trim().to_string();

        let missing: Vec<&str> = [("role", &role), ("location", &location)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            role,
            location,
            projects: self
                .projects
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            cv_text: self.cv_text,
        })
    }

    pub fn projects_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.projects.as_deref().unwrap_or(default)
    }
}

/// A networking contact produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub name: String,
    pub title: String,
    pub company: String,
    pub email: String,
    /// 0-100
    pub relevance_score: u8,
}

/// Subject and body of one outreach email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_professional_uses_camel_case_keys() {
        let professional = Professional {
            name: "Sarah Johnson".to_string(),
            title: "Senior Recruiter".to_string(),
            company: "Tech Corp".to_string(),
            email: "sarah.j@techcorp.com".to_string(),
            relevance_score: 92,
        };
        let value = serde_json::to_value(&professional).unwrap();
        assert_eq!(value["relevanceScore"], 92);
        assert!(value.get("relevance_score").is_none());
    }

    #[test]
    fn test_user_data_ignores_client_form_extras() {
        let json = serde_json::json!({
            "role": "Backend Engineer",
            "location": "Berlin",
            "projects": "Built a payments ledger",
            "cv": {}
        });
        let request: ApplicationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.role, "Backend Engineer");
        assert!(request.cv_text.is_empty());
    }

    #[test]
    fn test_normalized_trims_and_drops_blank_projects() {
        let request = ApplicationRequest {
            role: "  Data Scientist ".to_string(),
            location: "Lagos\n".to_string(),
            projects: Some("   ".to_string()),
            cv_text: String::new(),
        }
        .normalized()
        .unwrap();

        assert_eq!(request.role, "Data Scientist");
        assert_eq!(request.location, "Lagos");
        assert!(request.projects.is_none());
        assert_eq!(request.projects_or("Not specified"), "Not specified");
    }

    #[test]
    fn test_normalized_lists_every_missing_field() {
        let err = ApplicationRequest::default().normalized().unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("role"));
                assert!(msg.contains("location"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
