use crate::{ModelError, SourceError};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// Perform a GET request with query parameters, parse the JSON response.
/// Throws error on non-success status code.
pub async fn get_json<Q: Serialize + ?Sized, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &Q,
) -> Result<R, SourceError> {
    let response = client.get(url).query(query).send().await?;
    if response.status().is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(SourceError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Create a JSON POST request, parse the response.
/// Throws error on non-success status code.
pub async fn post_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
) -> Result<R, ModelError> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    if response.status().is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(ModelError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}
