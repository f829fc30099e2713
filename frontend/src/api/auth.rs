use super::{
    client::{with_bearer, ApiClient},
    types::{ApiError, AuthResponse, LoginRequest, UserIdentity},
};

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("/auth/login").await;
        let response = self.send(self.http_client().post(url).json(request)).await?;
        Self::expect_json(response).await
    }

    pub async fn register(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("/auth/register").await;
        let response = self.send(self.http_client().post(url).json(request)).await?;
        Self::expect_json(response).await
    }

    pub async fn get_me(&self, token: &str) -> Result<UserIdentity, ApiError> {
        let url = self.endpoint("/auth/me").await;
        let response = self
            .send(with_bearer(self.http_client().get(url), token))
            .await?;
        Self::expect_json(response).await
    }
}
