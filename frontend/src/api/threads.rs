use super::{
    client::{with_bearer, ApiClient},
    types::{ApiError, AskRequest, AskResponse, ThreadSummary},
};

impl ApiClient {
    pub async fn list_user_threads(
        &self,
        token: &str,
        user_id: i64,
    ) -> Result<Vec<ThreadSummary>, ApiError> {
        let url = self.endpoint(&format!("/threads/user/{}", user_id)).await;
        let response = self
            .send(with_bearer(self.http_client().get(url), token))
            .await?;
        Self::expect_json(response).await
    }

    pub async fn ask(&self, token: &str, request: &AskRequest) -> Result<AskResponse, ApiError> {
        let url = self.endpoint("/ask").await;
        let response = self
            .send(with_bearer(self.http_client().post(url).json(request), token))
            .await?;
        Self::expect_json(response).await
    }
}
