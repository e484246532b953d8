//! Axum route handlers for the networking workflow.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::networking::cv;
use crate::networking::discovery::discover_professionals;
use crate::networking::dispatch::{send_all, DispatchFailure};
use crate::networking::models::{ApplicationRequest, Professional};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FindProfessionalsResponse {
    pub professionals: Vec<Professional>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailsRequest {
    pub professionals: Option<Vec<Professional>>,
    pub user_data: Option<ApplicationRequest>,
}

#[derive(Debug, Serialize)]
pub struct SendEmailsResponse {
    pub success: bool,
    pub message: String,
    pub sent: usize,
    pub failed: Vec<DispatchFailure>,
}

/// Fields collected from the multipart submission before validation.
#[derive(Debug, Default)]
struct SubmissionForm {
    role: Option<String>,
    location: Option<String>,
    projects: Option<String>,
    cv: Option<Bytes>,
}

impl SubmissionForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = SubmissionForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "role" => form.role = Some(field.text().await?),
                "location" => form.location = Some(field.text().await?),
                "projects" => form.projects = Some(field.text().await?),
                "cv" => {
                    let has_file_name = field.file_name().is_some_and(|n| !n.is_empty());
                    let data = field.bytes().await?;
                    // Browsers post an empty, nameless part when no file was chosen.
                    if has_file_name || !data.is_empty() {
                        form.cv = Some(data);
                    }
                }
                other => debug!("Ignoring unexpected form field '{other}'"),
            }
        }

        Ok(form)
    }

    fn into_request(self) -> Result<ApplicationRequest, AppError> {
        let Some(cv) = self.cv else {
            let mut missing = vec!["cv"];
            if self.role.as_deref().map_or(true, |r| r.trim().is_empty()) {
                missing.insert(0, "role");
            }
            if self.location.as_deref().map_or(true, |l| l.trim().is_empty()) {
                missing.insert(missing.len() - 1, "location");
            }
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        ApplicationRequest {
            role: self.role.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            projects: self.projects,
            cv_text: cv::excerpt(&cv),
        }
        .normalized()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /find-professionals
///
/// Multipart form: `role`, `location`, `cv` (file) required; `projects` optional.
/// Always answers with at least one contact once the form is valid.
pub async fn handle_find_professionals(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FindProfessionalsResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let request = SubmissionForm::read(multipart).await?.into_request()?;

    info!(
        %request_id,
        role = %request.role,
        location = %request.location,
        cv_chars = request.cv_text.chars().count(),
        "Finding professionals"
    );

    let professionals = discover_professionals(state.generator.as_ref(), &request).await;

    Ok(Json(FindProfessionalsResponse { professionals }))
}

/// POST /send-emails
///
/// Drafts and hands one email per contact to the mail transport. Per-contact
/// failures are reported in `failed` without aborting the batch.
pub async fn handle_send_emails(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailsRequest>, JsonRejection>,
) -> Result<Json<SendEmailsResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let (Some(professionals), Some(user_data)) = (payload.professionals, payload.user_data) else {
        return Err(AppError::Validation(
            "Missing required data: professionals and userData".to_string(),
        ));
    };
    let request = user_data.normalized()?;

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        contacts = professionals.len(),
        role = %request.role,
        "Sending networking emails"
    );

    let report = send_all(
        state.generator.as_ref(),
        state.mailer.as_ref(),
        &professionals,
        &request,
    )
    .await;

    let message = if report.all_sent() {
        "Emails sent successfully".to_string()
    } else {
        format!(
            "Sent {} of {} emails; {} failed",
            report.sent,
            report.attempted,
            report.failures.len()
        )
    };

    Ok(Json(SendEmailsResponse {
        success: true,
        message,
        sent: report.sent,
        failed: report.failures,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(role: &str, location: &str, cv: Option<&str>) -> SubmissionForm {
        SubmissionForm {
            role: Some(role.to_string()),
            location: Some(location.to_string()),
            projects: Some(String::new()),
            cv: cv.map(|c| Bytes::from(c.to_string())),
        }
    }

    #[test]
    fn test_form_without_cv_is_rejected() {
        let err = form("SRE", "Dublin", None).into_request().unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Missing required fields: cv"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_form_missing_everything_lists_fields_in_order() {
        let err = SubmissionForm::default().into_request().unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Missing required fields: role, location, cv")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_form_with_blank_role_is_rejected() {
        let err = form("  ", "Dublin", Some("cv text")).into_request().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("role")));
    }

    #[test]
    fn test_form_builds_request_with_cv_excerpt() {
        let long_cv = "x".repeat(cv::CV_EXCERPT_CHARS * 2);
        let request = form(" SRE ", "Dublin", Some(&long_cv)).into_request().unwrap();
        assert_eq!(request.role, "SRE");
        assert!(request.projects.is_none());
        assert_eq!(request.cv_text.len(), cv::CV_EXCERPT_CHARS);
    }

    #[test]
    fn test_empty_cv_file_is_still_a_submission() {
        let request = form("SRE", "Dublin", Some("")).into_request().unwrap();
        assert!(request.cv_text.is_empty());
    }

    #[test]
    fn test_send_request_reads_camel_case_user_data() {
        let json = serde_json::json!({
            "professionals": [{
                "name": "A", "title": "B", "company": "C",
                "email": "a@b.com", "relevanceScore": 80
            }],
            "userData": {"role": "SRE", "location": "Dublin", "projects": "", "cv": {}}
        });
        let request: SendEmailsRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.professionals.unwrap().len(), 1);
        assert_eq!(request.user_data.unwrap().role, "SRE");
    }
}
