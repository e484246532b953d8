//! Dispatch loop: draft and hand off one email per contact, in order.
//!
//! Sends are isolated per contact. A failed send is recorded and the loop
//! moves on to the next contact.

use serde::Serialize;
use tracing::{error, info};

use crate::llm_client::TextGenerator;
use crate::mailer::{Mailer, OutboundEmail};
use crate::networking::drafting::draft_email;
use crate::networking::models::{ApplicationRequest, Professional};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DispatchFailure {
    pub email: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchReport {
    pub attempted: usize,
    pub sent: usize,
    pub failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    pub fn all_sent(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drafts and sends sequentially. Returns once every contact has been tried.
pub async fn send_all(
    generator: &dyn TextGenerator,
    mailer: &dyn Mailer,
    professionals: &[Professional],
    request: &ApplicationRequest,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for professional in professionals {
        report.attempted += 1;
        let draft = draft_email(generator, professional, request).await;

        let email = OutboundEmail {
            to: professional.email.clone(),
            subject: draft.subject,
            body: draft.body,
        };

        match mailer.send(&email).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                error!(to = %professional.email, "Failed to send networking email: {e}");
                report.failures.push(DispatchFailure {
                    email: professional.email.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Dispatch finished: {}/{} emails handed to transport",
        report.sent, report.attempted
    );
    report
}
