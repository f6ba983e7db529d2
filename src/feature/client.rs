//! HTTP client for the hosted feature service.

use reqwest::Client;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::ParcelError;

use super::query::ParcelQuery;
use super::source::FeatureSource;
use super::types::{MapPoint, ParcelFeature, QueryResponse};

/// Client for one feature layer's `query` endpoint.
pub struct FeatureServiceClient {
    http: Client,
    query_url: Url,
}

impl FeatureServiceClient {
    /// Build a client for the configured layer.
    pub fn new(config: &ServiceConfig) -> Result<Self, ParcelError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let query_url = query_endpoint(&config.service_url)?;
        Ok(Self { http, query_url })
    }

    /// Execute a query and return the matched features.
    ///
    /// Zero matches is a normal outcome; only transport problems, HTTP
    /// failures, and in-band service errors are `Err`.
    pub async fn run(&self, query: &ParcelQuery) -> Result<Vec<ParcelFeature>, ParcelError> {
        let params = query.to_params();
        tracing::debug!(query = ?query.target(), "querying feature service");

        let response = self
            .http
            .get(self.query_url.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParcelError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body: QueryResponse = response.json().await?;
        if let Some(err) = body.error {
            return Err(ParcelError::Service {
                code: err.code,
                message: err.message,
            });
        }

        tracing::debug!(matches = body.features.len(), "feature service answered");
        Ok(body.features)
    }
}

#[async_trait::async_trait]
impl FeatureSource for FeatureServiceClient {
    async fn fetch_by_object_id(
        &self,
        object_id: i64,
    ) -> Result<Option<ParcelFeature>, ParcelError> {
        let features = self.run(&ParcelQuery::by_object_id(object_id)).await?;
        Ok(features.into_iter().next())
    }

    async fn fetch_at_point(&self, point: MapPoint) -> Result<Option<ParcelFeature>, ParcelError> {
        let features = self.run(&ParcelQuery::at_point(point)).await?;
        Ok(features.into_iter().next())
    }

    async fn search(&self, term: &str) -> Result<Vec<ParcelFeature>, ParcelError> {
        self.run(&ParcelQuery::matching(term)).await
    }
}

fn query_endpoint(service_url: &Url) -> Result<Url, ParcelError> {
    let mut url = service_url.clone();
    url.path_segments_mut()
        .map_err(|_| ParcelError::InvalidServiceUrl {
            url: service_url.to_string(),
            reason: "URL cannot carry a path".to_string(),
        })?
        .pop_if_empty()
        .push("query");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_endpoint_appends_query_segment() {
        let layer = Url::parse("https://host/ArcGIS/rest/services/Oahu/FeatureServer/0").unwrap();
        assert_eq!(
            query_endpoint(&layer).unwrap().as_str(),
            "https://host/ArcGIS/rest/services/Oahu/FeatureServer/0/query"
        );

        // Trailing slash must not produce an empty segment.
        let layer = Url::parse("https://host/FeatureServer/0/").unwrap();
        assert_eq!(
            query_endpoint(&layer).unwrap().as_str(),
            "https://host/FeatureServer/0/query"
        );
    }
}
