use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use wellsoulix_storage::{Attachment, Role};

use crate::ai_provider::{AiProviderTrait, GenerationRequest};
use crate::prompt;

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Google GenAI (Gemini) Provider
pub struct GoogleGenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    top_p: f32,
}

impl GoogleGenAiProvider {
    #[must_use]
    pub fn new(api_key: &str, model: &str, base_url: &str, temperature: f32, top_p: f32) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature,
            top_p,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request
            .history
            .iter()
            .map(|turn| Content {
                role: turn.role,
                parts: turn
                    .parts
                    .iter()
                    .map(|p| Part::Text {
                        text: p.text.clone(),
                    })
                    .collect(),
            })
            .collect();

        let mut parts = vec![Part::Text {
            text: prompt::user_prompt(&request.prompt, request.attachment.as_ref()),
        }];
        if let Some(Attachment::Image { data, mime_type }) = &request.attachment {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    data: strip_data_uri(data).to_string(),
                    mime_type: if mime_type.is_empty() {
                        DEFAULT_IMAGE_MIME.to_string()
                    } else {
                        mime_type.clone()
                    },
                },
            });
        }
        contents.push(Content {
            role: Role::User,
            parts,
        });

        GenerateContentRequest {
            contents,
            system_instruction: SystemInstruction {
                parts: vec![Part::Text {
                    text: prompt::system_instruction(request.mode),
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: self.top_p,
            },
        }
    }
}

#[async_trait]
impl AiProviderTrait for GoogleGenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = self.build_body(request);
        log::debug!(
            "Sending {} content turns to {} ({} mode)",
            body.contents.len(),
            self.model,
            request.mode
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Google AI")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Google AI API error ({status}): {error_text}");
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Google AI response")?;

        Ok(extract_text(parsed))
    }
}

/// Drop a `data:<mime>;base64,` prefix if present
fn strip_data_uri(data: &str) -> &str {
    match data.split_once(',') {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => data,
    }
}

/// Concatenate the text parts of the first candidate. A response without
/// text (e.g. a blocked prompt) yields an empty string.
fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: Role,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    data: String,
    mime_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_provider::HistoryTurn;
    use wellsoulix_storage::{Message, Mode};

    fn provider() -> GoogleGenAiProvider {
        GoogleGenAiProvider::new(
            "key",
            "gemini-3-flash-preview",
            "https://generativelanguage.googleapis.com/v1beta/",
            0.8,
            0.95,
        )
    }

    fn request(attachment: Option<Attachment>) -> GenerationRequest {
        GenerationRequest {
            prompt: "hello".to_string(),
            mode: Mode::Cheer,
            history: HistoryTurn::from_messages(&[Message::model("welcome", Mode::Cheer)]),
            attachment,
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            provider().endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_body_appends_user_turn_after_history() {
        let body = serde_json::to_value(provider().build_body(&request(None))).unwrap();

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0]["role"], "model");
        assert_eq!(contents[0]["parts"][0]["text"], "welcome");
        assert_eq!(contents[1]["role"], "user");
        assert_eq!(contents[1]["parts"][0]["text"], "hello");

        assert!((body["generationConfig"]["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("[Mode: Cheer]"));
    }

    #[test]
    fn test_body_inlines_image_without_data_uri_prefix() {
        let image = Attachment::Image {
            data: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            mime_type: "image/png".to_string(),
        };
        let body = serde_json::to_value(provider().build_body(&request(Some(image)))).unwrap();

        let parts = body["contents"][1]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], "hello");
        assert_eq!(parts[1]["inlineData"]["data"], "iVBORw0KGgo=");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
    }

    #[test]
    fn test_body_defaults_image_mime() {
        let image = Attachment::Image {
            data: "AAAA".to_string(),
            mime_type: String::new(),
        };
        let body = serde_json::to_value(provider().build_body(&request(Some(image)))).unwrap();
        let inline = &body["contents"][1]["parts"][1]["inlineData"];
        assert_eq!(inline["data"], "AAAA");
        assert_eq!(inline["mimeType"], "image/jpeg");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[Mode: Cheer] "},{"text":"Yay!"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response), "[Mode: Cheer] Yay!");
    }

    #[test]
    fn test_extract_text_empty_when_blocked() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(extract_text(response), "");
    }
}
