use super::{
    client::{path_segment, with_bearer, with_credentials, ApiClient},
    types::{
        ApiError, GuestAskRequest, GuestAskResponse, GuestStartResponse, GuestUpgradeResponse,
        UpgradeResult,
    },
};

impl ApiClient {
    pub async fn start_guest_session(&self, slug: &str) -> Result<GuestStartResponse, ApiError> {
        let url = self
            .endpoint(&format!("/guest/start/{}", path_segment(slug)))
            .await;
        let response = self
            .send(with_credentials(self.http_client().post(url)))
            .await?;
        Self::expect_json(response).await
    }

    pub async fn guest_ask(&self, request: &GuestAskRequest) -> Result<GuestAskResponse, ApiError> {
        let url = self.endpoint("/guest/ask").await;
        let response = self
            .send(with_credentials(self.http_client().post(url).json(request)))
            .await?;
        Self::expect_json(response).await
    }

    pub async fn upgrade_guest_session(&self, token: &str) -> Result<UpgradeResult, ApiError> {
        let url = self.endpoint("/guest/upgrade").await;
        let request = with_bearer(with_credentials(self.http_client().post(url)), token);
        let response = self.send(request).await?;
        let body: GuestUpgradeResponse = Self::expect_json(response).await?;
        Ok(body.into())
    }
}
