use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("weatherdash/", env!("CARGO_PKG_VERSION"));

/// Shared client for every outbound call. Nominatim rejects requests without
/// a user agent; no timeout is set beyond the transport default.
pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Send `request`, require a success status and parse the body as JSON.
/// `what` names the call in error messages, e.g. "Open-Meteo forecast".
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T> {
    let res = request
        .send()
        .await
        .with_context(|| format!("Failed to send request to {what}"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {what} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "{what} request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    serde_json::from_str(&body).with_context(|| format!("Failed to parse {what} JSON"))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

/// Strip a trailing slash so paths can be appended with `format!`.
pub(crate) fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_untouched() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundaries() {
        let body = "é".repeat(300);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        assert_eq!(base_url("https://api.open-meteo.com/"), "https://api.open-meteo.com");
        assert_eq!(base_url("http://127.0.0.1:1234"), "http://127.0.0.1:1234");
    }
}
