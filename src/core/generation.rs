use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::core::{
    http,
    textclean,
    ReflinksError,
};

pub const MODELS: [&str; 4] = ["gpt-4", "gpt-4o", "o4-mini", "gpt-3.5-turbo"];
pub const DEFAULT_MODEL: &str = "o4-mini";

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODELS_URL: &str = "https://api.openai.com/v1/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The three text fields the generation service can fill, each with its own
/// token budget, temperature, and prompt shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Description,
    Features,
    Capsules,
}

impl GenerationKind {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationKind::Description => "description",
            GenerationKind::Features => "features",
            GenerationKind::Capsules => "capsules",
        }
    }

    fn max_tokens(&self) -> u32 {
        match self {
            GenerationKind::Description => 60,
            GenerationKind::Features => 80,
            GenerationKind::Capsules => 32,
        }
    }

    fn temperature(&self) -> f64 {
        match self {
            GenerationKind::Description | GenerationKind::Features => 0.7,
            GenerationKind::Capsules => 0.8,
        }
    }

    /// Default prompt when the operator leaves the custom-prompt field empty.
    /// The capsule count is randomized per call; the cap is encoded only in
    /// the prompt text and never enforced on the result.
    pub fn build_prompt(&self, platform_name: &str, website: &str) -> String {
        match self {
            GenerationKind::Description => format!(
                "Write a single, concise sentence (max 25 words) summarizing the crypto platform: \
                 {platform_name}. Website: {website}"
            ),
            GenerationKind::Features => format!(
                "List 4 to 6 key features of the crypto platform: {platform_name}. \
                 Website: {website}. Each feature should be 3-8 words, comma-separated, and \
                 describe a real capability or benefit. Do NOT use numbers, bullets, or \
                 single-word tags."
            ),
            GenerationKind::Capsules => {
                let count = capsule_count(&mut rand::rng());
                format!(
                    "Generate {count} extremely concise, unique feature tags for the crypto \
                     platform: {platform_name}. Website: {website}. Each tag should be 1-3 words \
                     (prefer 1-2), comma-separated, and highlight distinctive or main features. \
                     DO NOT include numbers or bullet points, just comma-separated text."
                )
            }
        }
    }

    pub fn postprocess(&self, raw: &str) -> String {
        match self {
            GenerationKind::Description => raw.trim().to_string(),
            GenerationKind::Features | GenerationKind::Capsules => {
                textclean::normalize_generated_list(raw)
            }
        }
    }
}

/// 2 tags with probability 0.7, 3 with probability 0.3.
pub fn capsule_count(rng: &mut impl Rng) -> u32 {
    if rng.random::<f64>() < 0.7 {
        2
    } else {
        3
    }
}

// o4-mini rejects a temperature parameter and names its token budget
// differently. Service quirk, not business logic.
fn uses_completion_token_budget(model: &str) -> bool {
    model == "o4-mini"
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

fn build_request_body(model: &str, kind: GenerationKind, prompt: &str) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert("model".to_string(), serde_json::Value::String(model.to_string()));
    body.insert(
        "messages".to_string(),
        serde_json::json!([{ "role": "user", "content": prompt }]),
    );
    if uses_completion_token_budget(model) {
        body.insert("max_completion_tokens".to_string(), kind.max_tokens().into());
    } else {
        body.insert("max_tokens".to_string(), kind.max_tokens().into());
        body.insert("temperature".to_string(), serde_json::json!(kind.temperature()));
    }
    serde_json::Value::Object(body)
}

/// One synchronous completion call, post-processed for the target field.
pub fn generate(
    api_key: &str,
    model: &str,
    kind: GenerationKind,
    prompt: &str,
) -> Result<String, ReflinksError> {
    let client = http::client(REQUEST_TIMEOUT)?;
    let response = client
        .post(CHAT_COMPLETIONS_URL)
        .bearer_auth(api_key)
        .json(&build_request_body(model, kind, prompt))
        .send()?;

    if !response.status().is_success() {
        return Err(ReflinksError::Custom(format!(
            "Generation request failed: HTTP {}",
            response.status()
        )));
    }

    let parsed: ChatResponse = response.json()?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ReflinksError::Custom("Generation response had no choices".to_string()))?;
    Ok(kind.postprocess(&content))
}

/// Cheap credential check against the models endpoint.
pub fn validate_key(api_key: &str) -> Result<(), ReflinksError> {
    let client = http::client(REQUEST_TIMEOUT)?;
    let response = client.get(MODELS_URL).bearer_auth(api_key).send()?;
    if response.status().is_success() {
        Ok(())
    } else {
        Err(ReflinksError::Custom(format!("HTTP {}", response.status())))
    }
}
