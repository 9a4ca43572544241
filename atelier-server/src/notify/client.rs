//! Messaging proxy client
//!
//! Thin reqwest wrapper over the WhatsApp send endpoint. One quirk is
//! handled here: when the proxy rejects a send because the template expects
//! a different number of body parameters, the expected count is parsed out
//! of the error detail and the send is retried once with the parameter list
//! resized to match. Every other failure is returned to the caller (who
//! logs and swallows it).

use serde::Serialize;

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    to: &'a str,
    template: &'a str,
    language: &'a str,
    components: Vec<Component>,
}

#[derive(Serialize)]
struct Component {
    #[serde(rename = "type")]
    kind: &'static str,
    parameters: Vec<Parameter>,
}

#[derive(Serialize)]
struct Parameter {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

#[derive(Clone)]
pub struct WhatsAppClient {
    http: reqwest::Client,
    base_url: String,
}

impl WhatsAppClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a template message. Retries once on a parameter-count mismatch,
    /// resized to whatever count the proxy reported.
    pub async fn send_template(
        &self,
        to: &str,
        template: &str,
        language: &str,
        params: Vec<String>,
    ) -> anyhow::Result<()> {
        match self.send_once(to, template, language, &params).await {
            Ok(()) => Ok(()),
            Err(SendFailure::ParamCountMismatch { expected, detail }) => {
                tracing::warn!(
                    template,
                    expected,
                    got = params.len(),
                    "Parameter count mismatch, resending with resized list: {detail}"
                );
                let resized = resize_params(params, expected);
                match self.send_once(to, template, language, &resized).await {
                    Ok(()) => Ok(()),
                    Err(failure) => Err(anyhow::anyhow!("{failure}")),
                }
            }
            Err(failure) => Err(anyhow::anyhow!("{failure}")),
        }
    }

    async fn send_once(
        &self,
        to: &str,
        template: &str,
        language: &str,
        params: &[String],
    ) -> Result<(), SendFailure> {
        let body = SendMessageRequest {
            to,
            template,
            language,
            components: vec![Component {
                kind: "body",
                parameters: params
                    .iter()
                    .map(|p| Parameter {
                        kind: "text",
                        text: p.clone(),
                    })
                    .collect(),
            }],
        };

        let response = self
            .http
            .post(format!("{}/api/whatsapp/send", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| SendFailure::Transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        if let Some(expected) = parse_expected_param_count(&detail) {
            return Err(SendFailure::ParamCountMismatch { expected, detail });
        }
        Err(SendFailure::Rejected { status, detail })
    }
}

#[derive(Debug)]
enum SendFailure {
    Transport(String),
    Rejected {
        status: reqwest::StatusCode,
        detail: String,
    },
    ParamCountMismatch {
        expected: usize,
        detail: String,
    },
}

impl std::fmt::Display for SendFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendFailure::Transport(e) => write!(f, "transport error: {e}"),
            SendFailure::Rejected { status, detail } => {
                write!(f, "proxy rejected send ({status}): {detail}")
            }
            SendFailure::ParamCountMismatch { expected, detail } => {
                write!(f, "parameter count mismatch (expected {expected}): {detail}")
            }
        }
    }
}

/// Parse the expected parameter count out of a proxy error detail, e.g.
/// `"number of localizable_params (5) does not match the expected number of
/// params (3)"`. Returns the first number following the word "expected".
fn parse_expected_param_count(detail: &str) -> Option<usize> {
    let lower = detail.to_lowercase();
    if !lower.contains("param") {
        return None;
    }
    let idx = lower.find("expected")?;
    let tail = &lower[idx..];
    let digits: String = tail
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Truncate or pad (with `"-"`) a parameter list to the expected length.
fn resize_params(mut params: Vec<String>, expected: usize) -> Vec<String> {
    params.truncate(expected);
    while params.len() < expected {
        params.push("-".to_string());
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expected_count_from_detail() {
        let detail = "body: number of localizable_params (5) does not match the expected number of params (3)";
        assert_eq!(parse_expected_param_count(detail), Some(3));
    }

    #[test]
    fn ignores_unrelated_errors() {
        assert_eq!(parse_expected_param_count("template not found"), None);
        assert_eq!(parse_expected_param_count("rate limit exceeded (429)"), None);
    }

    #[test]
    fn resize_truncates_and_pads() {
        let truncated = resize_params(vec!["a".into(), "b".into(), "c".into()], 2);
        assert_eq!(truncated, vec!["a", "b"]);

        let padded = resize_params(vec!["a".into()], 3);
        assert_eq!(padded, vec!["a", "-", "-"]);
    }
}
