//! Concurrent subscription download.

use crate::error::FetchError;
use crate::middleware::RequestLogMiddleware;

use futures::future;
use reqwest::header::USER_AGENT;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

/// Build the HTTP client used for subscription requests.
pub fn build_client() -> ClientWithMiddleware {
    ClientBuilder::new(reqwest::Client::new())
        .with(RequestLogMiddleware)
        .build()
}

/// Download one provider's document.
///
/// The body is returned whatever the response status.
pub async fn fetch_one(
    client: &ClientWithMiddleware,
    provider: &str,
    user_agent: &str,
) -> Result<String, FetchError> {
    let url = Url::parse(provider).map_err(|source| FetchError::InvalidUrl {
        url: provider.to_string(),
        source,
    })?;

    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: provider.to_string(),
            source,
        })?;

    response.text().await.map_err(|source| FetchError::Body {
        url: provider.to_string(),
        source,
    })
}

/// Download every provider's document concurrently.
///
/// Waits for all requests. The result at index `i` belongs to `providers[i]`.
pub async fn fetch_all(
    client: &ClientWithMiddleware,
    providers: &[String],
    user_agent: &str,
) -> Vec<Result<String, FetchError>> {
    let futures = providers
        .iter()
        .map(|provider| fetch_one(client, provider, user_agent));

    future::join_all(futures).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_url_fails_before_sending() {
        let client = build_client();
        let result = tokio_test::block_on(fetch_one(&client, "not a url", "ua"));
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn results_follow_provider_order() {
        let client = build_client();
        let providers = vec!["::bad".to_string(), "also bad".to_string()];
        let results = fetch_all(&client, &providers, "ua").await;

        assert_eq!(results.len(), 2);
        for (result, provider) in results.iter().zip(&providers) {
            match result {
                Err(FetchError::InvalidUrl { url, .. }) => assert_eq!(url, provider),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }
}
