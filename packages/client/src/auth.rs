//! Authentication and profile operations.

use serde::Serialize;

use sauti_record_models::{AuthResponse, User};

use crate::{ApiClient, ApiError};

/// Body for account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password, sent once over TLS and never stored client-side.
    pub password: String,
}

/// A partial profile edit. Unset fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProfilePatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New login email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ApiClient {
    /// Signs in, trying the admin endpoint first and falling back to the
    /// user endpoint when the admin endpoint rejects the credentials.
    ///
    /// On success the returned token is held for subsequent requests.
    /// Transport failures do not fall back — if the admin endpoint is
    /// unreachable, so is the user endpoint, and doubling the error
    /// would hide the real failure class.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract; a credential
    /// rejection carries the *user* endpoint's payload.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });

        let admin_attempt: Result<AuthResponse, ApiError> = self
            .execute_opts(
                self.http.post(self.url("/admin/login")).json(&body),
                true,
            )
            .await;

        let response = match admin_attempt {
            Ok(response) => response,
            Err(ApiError::ServerRejected { .. }) => {
                self.execute_opts(
                    self.http.post(self.url("/auth/login")).json(&body),
                    true,
                )
                .await?
            }
            Err(e) => return Err(e),
        };

        self.set_token(&response.token);
        Ok(response)
    }

    /// Creates an account. On success the returned token is held for
    /// subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .execute_opts(
                self.http.post(self.url("/auth/signup")).json(request),
                true,
            )
            .await?;
        self.set_token(&response.token);
        Ok(response)
    }

    /// Fetches the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.execute(self.http.get(self.url("/user"))).await
    }

    /// Applies a partial profile edit.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] per the failure contract.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<User, ApiError> {
        self.execute(self.http.patch(self.url("/user/profile")).json(patch))
            .await
    }
}
