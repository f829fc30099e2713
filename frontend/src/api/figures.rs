use super::{
    client::{path_segment, ApiClient},
    types::{ApiError, FigureSummary},
};

impl ApiClient {
    pub async fn get_figure(&self, slug: &str) -> Result<FigureSummary, ApiError> {
        let url = self
            .endpoint(&format!("/figures/{}", path_segment(slug)))
            .await;
        let response = self.send(self.http_client().get(url)).await?;
        Self::expect_json(response).await
    }

    pub async fn list_figures(&self) -> Result<Vec<FigureSummary>, ApiError> {
        let url = self.endpoint("/figures/").await;
        let response = self.send(self.http_client().get(url)).await?;
        Self::expect_json(response).await
    }
}
