//! Task suggestions from the Gemini `generateContent` REST endpoint.
//!
//! The client never fails loudly: any transport, status or parse problem is logged and
//! reported as `None`.

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use crate::config::SuggestionSettings;
use crate::model::Priority;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: String,
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
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SuggestionClient {
    http: reqwest::Client,
    settings: SuggestionSettings,
}

impl SuggestionClient {
    pub fn new(settings: SuggestionSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &SuggestionSettings {
        &self.settings
    }

    pub fn is_configured(&self) -> bool {
        self.settings
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// One request, no retry. `None` means "no suggestions available".
    #[tracing::instrument(skip(self, project_description), fields(model = %self.settings.model))]
    pub async fn suggest(
        &self,
        project_name: &str,
        project_description: &str,
    ) -> Option<Vec<Suggestion>> {
        match self.request(project_name, project_description).await {
            Ok(suggestions) => {
                info!(count = suggestions.len(), "received task suggestions");
                Some(suggestions)
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "task suggestion request failed");
                None
            }
        }
    }

    async fn request(
        &self,
        project_name: &str,
        project_description: &str,
    ) -> anyhow::Result<Vec<Suggestion>> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("no API key configured for suggestions"))?;

        let url = self.settings.endpoint_url();
        let body = serde_json::to_vec(&request_body(
            project_name,
            project_description,
            &self.settings,
        ))
        .context("failed encoding suggestion request")?;
        debug!(%url, bytes = body.len(), "sending suggestion request");

        let response = self
            .http
            .post(url.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", api_key)
            .body(body)
            .send()
            .await
            .with_context(|| format!("failed requesting {url}"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("failed reading suggestion response body")?;
        if !status.is_success() {
            anyhow::bail!(
                "suggestion API returned {status}: {}",
                truncate(&text, 200)
            );
        }

        parse_response(&text)
    }
}

fn prompt(project_name: &str, project_description: &str, settings: &SuggestionSettings) -> String {
    format!(
        "Generate a list of {min} to {max} concrete tasks for a project named \
         \"{project_name}\" whose description is: \"{project_description}\". Each task \
         must have a short title and a detailed description. Answer with JSON only.",
        min = settings.min_tasks,
        max = settings.max_tasks
    )
}

/// `generateContent` payload asking for a schema-constrained JSON array.
pub fn request_body(
    project_name: &str,
    project_description: &str,
    settings: &SuggestionSettings,
) -> Value {
    json!({
        "contents": [{
            "parts": [{
                "text": prompt(project_name, project_description, settings)
            }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "priority": {
                            "type": "STRING",
                            "description": "low, medium, or high"
                        }
                    },
                    "required": ["title", "description", "priority"]
                }
            }
        }
    })
}

/// Extracts the suggestion array from a `generateContent` response body.
pub fn parse_response(body: &str) -> anyhow::Result<Vec<Suggestion>> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).context("failed parsing generateContent response")?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .ok_or_else(|| anyhow!("response contained no candidate content"))?;

    parse_suggestions(&text)
}

/// Parses the model's JSON array text. Unknown priorities become `medium`; entries
/// without a title are dropped.
pub fn parse_suggestions(text: &str) -> anyhow::Result<Vec<Suggestion>> {
    let raw: Vec<RawSuggestion> =
        serde_json::from_str(text.trim()).context("failed parsing suggestion array")?;

    let suggestions = raw
        .into_iter()
        .filter_map(|item| {
            let title = item.title.trim();
            if title.is_empty() {
                warn!("dropping suggestion without a title");
                return None;
            }
            let priority = item.priority.parse::<Priority>().unwrap_or_else(|_| {
                warn!(priority = %item.priority, "unknown suggested priority; using medium");
                Priority::Medium
            });
            Some(Suggestion {
                title: title.to_string(),
                description: item.description.trim().to_string(),
                priority,
            })
        })
        .collect();

    Ok(suggestions)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_schema_and_prompt() {
        let settings = SuggestionSettings::default();
        let body = request_body("Cyberpunk Redesign", "Neon interface", &settings);

        let text = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .expect("prompt text");
        assert!(text.contains("\"Cyberpunk Redesign\""));
        assert!(text.contains("Neon interface"));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn parse_response_reads_first_candidate() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "[{\"title\":\"Shader Neon\",\"description\":\"Glow pass\","},
                        {"text": "\"priority\":\"high\"},{\"title\":\"Grid\",\"description\":\"\",\"priority\":\"urgent\"}]"}
                    ]
                }
            }]
        }"#;

        let suggestions = parse_response(body).expect("parse");
        assert_eq!(suggestions.len(), 2);
        assert_eq!(
            suggestions[0],
            Suggestion {
                title: "Shader Neon".to_string(),
                description: "Glow pass".to_string(),
                priority: Priority::High,
            }
        );
        assert_eq!(suggestions[1].priority, Priority::Medium);
    }

    #[test]
    fn parse_suggestions_drops_untitled_entries() {
        let suggestions = parse_suggestions(
            r#"[{"title":"  ","description":"x","priority":"low"},
                {"title":"Audit","description":"y","priority":"LOW"}]"#,
        )
        .expect("parse");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].title, "Audit");
        assert_eq!(suggestions[0].priority, Priority::Low);
    }

    #[test]
    fn empty_candidates_are_an_error() {
        assert!(parse_response(r#"{"candidates":[]}"#).is_err());
        assert!(parse_response("not json").is_err());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("éééé", 2), "éé…");
    }
}
