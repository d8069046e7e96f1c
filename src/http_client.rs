use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::error::IngestError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> reqwest::Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
    })
}

/// GET `url` and return the body as text. Non-2xx responses are errors.
pub fn fetch_text(url: &str) -> Result<String, IngestError> {
    let fetch_err = |message: String| IngestError::Fetch {
        url: url.to_string(),
        message,
    };

    let client =
        http_client().map_err(|e| fetch_err(format!("failed to build http client: {e}")))?;
    let resp = client
        .get(url)
        .header(USER_AGENT, concat!("big5_dashboard/", env!("CARGO_PKG_VERSION")))
        .send()
        .map_err(|e| fetch_err(format!("request failed: {e}")))?;
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|e| fetch_err(format!("failed reading body: {e}")))?;
    if !status.is_success() {
        return Err(fetch_err(format!("http {status}")));
    }
    Ok(body)
}
