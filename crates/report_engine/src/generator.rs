use std::sync::Arc;
use std::time::Duration;

use report_core::{
    is_headline_type, Attachment, DraftStyle, Headline, HeadlineResult, UserInput,
};
use report_logging::{report_info, report_warn};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::credential::CredentialStore;
use crate::prompt;
use crate::{FailureKind, GenerateError};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub endpoint: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl GeneratorSettings {
    /// Defaults, overridden by `GEMINI_ENDPOINT` and `GEMINI_MODEL` when set.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(endpoint) = env_non_empty("GEMINI_ENDPOINT") {
            settings.endpoint = endpoint;
        }
        if let Some(model) = env_non_empty("GEMINI_MODEL") {
            settings.model = model;
        }
        settings
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// The remote text generator behind the workflow. Each call is a single
/// request/response; failures are returned, never retried.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate_headlines(
        &self,
        input: &UserInput,
    ) -> Result<Vec<HeadlineResult>, GenerateError>;

    async fn more_headlines(
        &self,
        input: &UserInput,
        existing: &[HeadlineResult],
    ) -> Result<Vec<HeadlineResult>, GenerateError>;

    async fn write_draft(
        &self,
        input: &UserInput,
        headline: &Headline,
    ) -> Result<String, GenerateError>;

    async fn regenerate_draft(
        &self,
        previous: &str,
        feedback: &str,
    ) -> Result<String, GenerateError>;

    async fn change_draft_style(
        &self,
        base: &str,
        style: DraftStyle,
    ) -> Result<String, GenerateError>;
}

/// Talks to the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    settings: GeneratorSettings,
    credentials: Arc<dyn CredentialStore>,
}

impl GeminiGenerator {
    pub fn new(settings: GeneratorSettings, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            settings,
            credentials,
        }
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerateError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))
    }

    fn api_key(&self) -> Result<String, GenerateError> {
        match self.credentials.load() {
            Ok(Some(key)) => Ok(key),
            Ok(None) => Err(GenerateError::new(
                FailureKind::MissingCredential,
                "enter the Google AI API key in the settings",
            )),
            Err(err) => Err(GenerateError::new(
                FailureKind::MissingCredential,
                err.to_string(),
            )),
        }
    }

    /// Sends one prompt and returns the concatenated response text.
    async fn generate(
        &self,
        prompt: String,
        attachments: &[Attachment],
        response_schema: Option<Value>,
    ) -> Result<String, GenerateError> {
        let key = self.api_key()?;
        let client = self.build_client()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        );

        report_info!(
            "generateContent model={} prompt_chars={} attachments={} structured={}",
            self.settings.model,
            prompt.chars().count(),
            attachments.len(),
            response_schema.is_some()
        );

        let body = request_body(&prompt, attachments, response_schema);
        let response = client
            .post(url)
            .header("x-goog-api-key", key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let err = map_status_error(status.as_u16(), &text);
            report_warn!("generateContent failed: {}", err);
            return Err(err);
        }

        response_text(&text)
    }
}

#[async_trait::async_trait]
impl Generator for GeminiGenerator {
    async fn generate_headlines(
        &self,
        input: &UserInput,
    ) -> Result<Vec<HeadlineResult>, GenerateError> {
        let text = self
            .generate(
                prompt::headline_prompt(input),
                &input.attachments,
                Some(prompt::headline_schema()),
            )
            .await?;
        parse_headlines(&text)
    }

    async fn more_headlines(
        &self,
        input: &UserInput,
        existing: &[HeadlineResult],
    ) -> Result<Vec<HeadlineResult>, GenerateError> {
        let text = self
            .generate(
                prompt::more_headlines_prompt(input, existing),
                &input.attachments,
                Some(prompt::headline_schema()),
            )
            .await?;
        parse_headlines(&text)
    }

    async fn write_draft(
        &self,
        input: &UserInput,
        headline: &Headline,
    ) -> Result<String, GenerateError> {
        self.generate(
            prompt::draft_prompt(input, headline),
            &input.attachments,
            None,
        )
        .await
    }

    async fn regenerate_draft(
        &self,
        previous: &str,
        feedback: &str,
    ) -> Result<String, GenerateError> {
        self.generate(prompt::revision_prompt(previous, feedback), &[], None)
            .await
    }

    async fn change_draft_style(
        &self,
        base: &str,
        style: DraftStyle,
    ) -> Result<String, GenerateError> {
        self.generate(prompt::restyle_prompt(base, style), &[], None)
            .await
    }
}

fn request_body(prompt: &str, attachments: &[Attachment], response_schema: Option<Value>) -> Value {
    let mut parts = vec![json!({ "text": prompt })];
    parts.extend(attachments.iter().map(|attachment| {
        json!({
            "inlineData": {
                "mimeType": attachment.mime_type,
                "data": attachment.data,
            }
        })
    }));

    let mut body = json!({ "contents": [{ "parts": parts }] });
    if let Some(schema) = response_schema {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
    }
    body
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn response_text(body: &str) -> Result<String, GenerateError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| GenerateError::new(FailureKind::Schema, err.to_string()))?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(GenerateError::new(
            FailureKind::EmptyResponse,
            "the response contained no text, try again shortly",
        ));
    }
    Ok(text.to_string())
}

/// Parses a structured headline batch and checks it against the catalog.
pub fn parse_headlines(text: &str) -> Result<Vec<HeadlineResult>, GenerateError> {
    let json = strip_code_fence(text.trim());
    let results: Vec<HeadlineResult> = serde_json::from_str(json)
        .map_err(|err| GenerateError::new(FailureKind::Schema, err.to_string()))?;
    if results.is_empty() {
        return Err(GenerateError::new(
            FailureKind::Schema,
            "the response contained no headline categories",
        ));
    }
    if let Some(unknown) = results.iter().find(|result| !is_headline_type(&result.kind)) {
        return Err(GenerateError::new(
            FailureKind::Schema,
            format!("unknown headline type '{}'", unknown.kind),
        ));
    }
    Ok(results)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn map_status_error(status: u16, body: &str) -> GenerateError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"));

    if matches!(status, 400 | 401 | 403) && mentions_invalid_key(&message, body) {
        return GenerateError::new(FailureKind::InvalidCredential, message);
    }
    GenerateError::new(FailureKind::HttpStatus(status), message)
}

fn mentions_invalid_key(message: &str, body: &str) -> bool {
    message.contains("API key not valid") || body.contains("API_KEY_INVALID")
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_json_is_accepted() {
        let text = "```json\n[{\"type\":\"Question\",\"headlines\":[{\"title\":\"Why?\",\"strategy\":\"s\"}]}]\n```";
        let results = parse_headlines(text).unwrap();
        assert_eq!(results[0].kind, "Question");
        assert_eq!(results[0].headlines[0], Headline::new("Why?", "s"));
    }

    #[test]
    fn missing_strategy_is_a_schema_error() {
        let err = parse_headlines(r#"[{"type":"Question","headlines":[{"title":"Why?"}]}]"#)
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::Schema);
    }

    #[test]
    fn invalid_key_message_maps_to_credential_failure() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let err = map_status_error(400, body);
        assert_eq!(err.kind, FailureKind::InvalidCredential);
        assert!(err.message.starts_with("API key not valid"));
    }

    #[test]
    fn permission_denied_is_not_a_key_problem() {
        let body = r#"{"error":{"code":403,"message":"Permission denied on resource project demo.","status":"PERMISSION_DENIED"}}"#;
        let err = map_status_error(403, body);
        assert_eq!(err.kind, FailureKind::HttpStatus(403));
        assert_eq!(err.message, "Permission denied on resource project demo.");
    }

    #[test]
    fn invalid_key_reason_maps_to_credential_failure() {
        let body = r#"{"error":{"code":400,"message":"Bad request.","status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#;
        let err = map_status_error(400, body);
        assert_eq!(err.kind, FailureKind::InvalidCredential);
    }

    #[test]
    fn plain_status_error_keeps_code() {
        let err = map_status_error(502, "<html>bad gateway</html>");
        assert_eq!(err.kind, FailureKind::HttpStatus(502));
        assert_eq!(err.message, "request failed with status 502");
    }

    #[test]
    fn request_body_adds_schema_only_when_structured() {
        let attachment = Attachment {
            name: "a.pdf".into(),
            mime_type: "application/pdf".into(),
            data: "QUJD".into(),
        };
        let body = request_body("hi", &[attachment], None);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            body["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "application/pdf"
        );
        assert!(body.get("generationConfig").is_none());

        let body = request_body("hi", &[], Some(json!({"type": "ARRAY"})));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }
}
