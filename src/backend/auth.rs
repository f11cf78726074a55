use serde::Deserialize;
use uuid::Uuid;

use super::api::{
    make_request,
    ApiResponse,
};
use crate::core::TangochoError;

/// The authenticated identity as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Explicit session handle. Passed into the operations that stamp an owner
/// or gate writes, so nothing below the GUI reads ambient auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    identity: Identity,
}

impl AuthSession {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn owner_id(&self) -> &str {
        &self.identity.uid
    }

    pub fn display_label(&self) -> &str {
        self.identity
            .display_name
            .as_deref()
            .or(self.identity.email.as_deref())
            .unwrap_or(&self.identity.uid)
    }
}

#[derive(Debug, Deserialize)]
struct SessionState {
    #[serde(default)]
    identity: Option<Identity>,
}

/// Snapshot of the provider's current session; polled continuously by the
/// app rather than pushed.
pub async fn current_identity(base_url: &str) -> Result<Option<Identity>, TangochoError> {
    let response: ApiResponse<SessionState> =
        make_request(base_url, "currentIdentity", None).await?;

    Ok(response.into_result()?.identity)
}

/// Ask the provider for an interactive login URL. The caller opens it in the
/// user's browser; the identity poll picks up the completed session.
pub async fn begin_login(base_url: &str) -> Result<String, TangochoError> {
    let state = Uuid::new_v4();
    let params = serde_json::json!({ "state": state });

    let response: ApiResponse<String> =
        make_request(base_url, "beginLogin", Some(params)).await?;
    response.into_result()
}

pub async fn logout(base_url: &str) -> Result<(), TangochoError> {
    let response: ApiResponse<bool> = make_request(base_url, "logout", None).await?;
    response.into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_prefers_name_then_email_then_uid() {
        let mut identity = Identity {
            uid: "u1".to_string(),
            display_name: Some("Aoi".to_string()),
            email: Some("aoi@example.com".to_string()),
        };
        assert_eq!(AuthSession::new(identity.clone()).display_label(), "Aoi");

        identity.display_name = None;
        assert_eq!(AuthSession::new(identity.clone()).display_label(), "aoi@example.com");

        identity.email = None;
        assert_eq!(AuthSession::new(identity).display_label(), "u1");
    }
}
