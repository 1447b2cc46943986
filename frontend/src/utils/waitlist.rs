use serde::{Deserialize, Serialize};

use crate::utils::api::Api;

/// Shown when the server rejects the request without saying why.
pub const GENERIC_ERROR: &str = "Failed to join waitlist";
/// Shown when the request never produced a readable answer.
pub const NETWORK_ERROR: &str = "Failed to join waitlist. Please try again.";

#[derive(Serialize)]
struct JoinWaitlistRequest<'a> {
    email: &'a str,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct WaitlistReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What came back from one submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Attempt {
    /// The server answered; `body` is `None` when it was not JSON.
    Responded { ok: bool, body: Option<WaitlistReply> },
    /// The request itself failed (offline, DNS, connection refused).
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Submitted,
    Errored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitStatus {
    pub is_submitting: bool,
    pub is_submitted: bool,
    pub error: Option<String>,
}

impl SubmitStatus {
    pub fn submitting() -> Self {
        Self { is_submitting: true, ..Self::default() }
    }

    pub fn submitted() -> Self {
        Self { is_submitted: true, ..Self::default() }
    }

    pub fn errored(message: impl Into<String>) -> Self {
        Self { error: Some(message.into()), ..Self::default() }
    }

    pub fn phase(&self) -> Phase {
        if self.is_submitting {
            Phase::Submitting
        } else if self.is_submitted {
            Phase::Submitted
        } else if self.error.is_some() {
            Phase::Errored
        } else {
            Phase::Idle
        }
    }

    /// An errored form stays editable so the user can retry.
    pub fn inputs_disabled(&self) -> bool {
        self.is_submitting || self.is_submitted
    }

    pub fn can_submit(&self, email: &str) -> bool {
        !email.is_empty() && !self.inputs_disabled()
    }

    pub fn button_label(&self) -> &'static str {
        match self.phase() {
            Phase::Submitting => "Joining...",
            Phase::Submitted => "Joined!",
            Phase::Idle | Phase::Errored => "Join Waitlist",
        }
    }
}

/// Maps the result of a submission attempt to the state shown to the user.
pub fn settle(attempt: Attempt) -> SubmitStatus {
    match attempt {
        Attempt::Responded { body: None, .. } => SubmitStatus::errored(NETWORK_ERROR),
        Attempt::Responded { ok: true, body: Some(_) } => SubmitStatus::submitted(),
        Attempt::Responded { ok: false, body: Some(reply) } => {
            SubmitStatus::errored(reply.error.unwrap_or_else(|| GENERIC_ERROR.to_string()))
        }
        Attempt::Failed(_) => SubmitStatus::errored(NETWORK_ERROR),
    }
}

/// The status to show when the form is submitted, or `None` when no request
/// may be sent: the field is empty, a request is in flight, or the address
/// was already accepted.
pub fn begin_submit(status: &SubmitStatus, email: &str) -> Option<SubmitStatus> {
    status.can_submit(email).then(SubmitStatus::submitting)
}

/// Applies a finished request to the form. A successful join clears the
/// input; a failure keeps what the user typed.
pub fn finish_submit(result: SubmitStatus, email: &str) -> (SubmitStatus, String) {
    let next_email = if result.is_submitted {
        String::new()
    } else {
        email.to_string()
    };
    (result, next_email)
}

/// Posts `email` to the waitlist endpoint. Never fails: every outcome is
/// folded into the returned status.
pub async fn join_waitlist(email: &str) -> SubmitStatus {
    let request = match Api::post("/api/waitlist").json(&JoinWaitlistRequest { email }) {
        Ok(request) => request,
        Err(e) => return settle(Attempt::Failed(e.to_string())),
    };
    let attempt = match request.send().await {
        Ok(response) => {
            let ok = response.ok();
            if !ok {
                log::warn!("Waitlist request returned status {}", response.status());
            }
            let body = response.json::<WaitlistReply>().await.ok();
            if let Some(message) = body.as_ref().and_then(|b| b.message.as_deref()) {
                log::info!("Waitlist: {}", message);
            }
            Attempt::Responded { ok, body }
        }
        Err(e) => {
            gloo_console::error!("Waitlist request failed:", e.to_string());
            Attempt::Failed(e.to_string())
        }
    };
    settle(attempt)
}
