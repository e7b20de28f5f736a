//! Signup submission.

use bookclub_core::signup::SignupRequest;

use super::BookclubClient;
use crate::error::Result;

impl BookclubClient {
    /// Submit a signup. The server answers with an empty 200 once it is queued.
    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/bookclubsignup"))
            .json(request)
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
