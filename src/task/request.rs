//! Task requests and creation-payload assembly.
//!
//! A [`TaskRequest`] is the caller's intent: description, optional starting
//! URL, timeout budget, optional structured-output schema, and a bag of
//! typed advanced options. [`TaskRequest::to_payload`] validates the request
//! locally and assembles the JSON body for `POST /tasks` - optional fields
//! are omitted entirely when unset so server-side defaults are never
//! overridden.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use url::Url;

use crate::error::ValidationError;
use crate::schema::{self, SchemaSpec};

/// Default task timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
/// Minimum accepted task timeout.
pub const MIN_TIMEOUT_SECS: u64 = 10;
/// Maximum accepted task timeout.
pub const MAX_TIMEOUT_SECS: u64 = 3600;
/// Maximum task description length, per the API docs.
pub const MAX_DESCRIPTION_CHARS: usize = 20_000;

/// Stamped into `metadata.source` on every created task.
pub(crate) const METADATA_SOURCE: &str = "browser-use-client";

/// Appended to the description when structured output is requested.
const SCHEMA_INSTRUCTION_SUFFIX: &str = "\n\nIMPORTANT: Extract and return data in the exact JSON structure specified. Follow the schema strictly.";

/// Model identifiers the cloud service currently advertises.
///
/// Informational only: any string is accepted as a model id, these constants
/// just spare callers the typing.
pub mod models {
    pub const BROWSER_USE_2_0: &str = "browser-use-2.0";
    pub const BROWSER_USE_LLM: &str = "browser-use-llm";
    pub const CLAUDE_OPUS_4_5: &str = "claude-opus-4-5-20251101";
    pub const CLAUDE_SONNET_4_5: &str = "claude-sonnet-4-5-20250929";
    pub const GEMINI_3_FLASH_PREVIEW: &str = "gemini-3-flash-preview";
    pub const GEMINI_3_PRO_PREVIEW: &str = "gemini-3-pro-preview";
    pub const GEMINI_FLASH_LATEST: &str = "gemini-flash-latest";
    pub const GEMINI_FLASH_LITE_LATEST: &str = "gemini-flash-lite-latest";
    pub const GPT_4_1: &str = "gpt-4.1";
    pub const GPT_4_1_MINI: &str = "gpt-4.1-mini";
    pub const O3: &str = "o3";

    /// Used when no model is specified.
    pub const DEFAULT: &str = BROWSER_USE_2_0;
}

/// Tri-state vision capability switch.
///
/// Serializes to the wire values the API expects: `"auto"` as a string,
/// enabled/disabled as JSON booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisionMode {
    #[default]
    Auto,
    Enabled,
    Disabled,
}

impl Serialize for VisionMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            VisionMode::Auto => serializer.serialize_str("auto"),
            VisionMode::Enabled => serializer.serialize_bool(true),
            VisionMode::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// Advanced task options, all optional.
///
/// Every field follows the same serialization rule: included in the payload
/// only when set (or, for flags, only when `true`), so absent options never
/// override server-side defaults.
#[derive(Debug, Clone, Default)]
pub struct AdvancedOptions {
    /// Model to run the task with. Defaults to [`models::DEFAULT`].
    pub llm: Option<String>,

    /// Maximum number of agent steps (server default: 30, range 1-200).
    pub max_steps: Option<u32>,

    /// Run within an existing browser session to reuse its state.
    pub session_id: Option<String>,

    /// Restrict browsing to these domains.
    pub allowed_domains: Option<Vec<String>>,

    /// Secrets available to the agent during execution.
    pub secrets: Option<Map<String, Value>>,

    /// Operation vault ID for this task.
    pub op_vault_id: Option<String>,

    /// Highlight elements on the page during execution. Default: off.
    pub highlight_elements: bool,

    /// Flash mode for faster execution. Default: off.
    pub flash_mode: bool,

    /// Reasoning visualization. Default: off.
    pub thinking: bool,

    /// Judge the task result after completion. Default: off.
    pub judge: bool,

    /// Vision capabilities (auto / enabled / disabled).
    pub vision: Option<VisionMode>,

    /// Ground truth for the judge.
    pub judge_ground_truth: Option<String>,

    /// Model used for judging. Defaults server-side when unset.
    pub judge_llm: Option<String>,

    /// Additional system prompt instructions for the agent.
    pub system_prompt_extension: Option<String>,

    /// Caller metadata attached to the task. `source` is always stamped with
    /// this client's identifier and cannot be overridden.
    pub metadata: Option<Map<String, Value>>,
}

/// Caller intent for a single task submission.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    /// Natural-language description of what the agent should do
    /// (1-20,000 characters after trimming).
    pub description: String,

    /// URL where the browser should start.
    pub start_url: Option<String>,

    /// Wall-clock polling budget in seconds (10-3600).
    pub timeout_seconds: u64,

    /// Schema for structured output extraction.
    pub structured_output: Option<SchemaSpec>,

    /// Advanced options.
    pub advanced: AdvancedOptions,
}

impl TaskRequest {
    /// Create a request with default timeout and no options.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            start_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            structured_output: None,
            advanced: AdvancedOptions::default(),
        }
    }

    /// Validate this request and assemble the `POST /tasks` body.
    ///
    /// All validation is local; nothing is sent to the service if any field
    /// is out of range.
    pub fn to_payload(&self) -> Result<Value, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooLong);
        }

        let start_url = self
            .start_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        if let Some(url) = start_url {
            Url::parse(url).map_err(|_| ValidationError::InvalidStartUrl(url.to_string()))?;
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_seconds) {
            return Err(ValidationError::TimeoutOutOfRange(self.timeout_seconds));
        }

        let advanced = &self.advanced;
        let mut body = Map::new();
        let mut task_text = description.to_string();

        if let Some(url) = start_url {
            body.insert("startUrl".to_string(), json!(url));
        }
        if let Some(max_steps) = advanced.max_steps {
            body.insert("maxSteps".to_string(), json!(max_steps));
        }
        body.insert(
            "llm".to_string(),
            json!(advanced.llm.as_deref().unwrap_or(models::DEFAULT)),
        );
        if let Some(session_id) = advanced.session_id.as_deref().map(str::trim) {
            if !session_id.is_empty() {
                body.insert("sessionId".to_string(), json!(session_id));
            }
        }
        if let Some(domains) = &advanced.allowed_domains {
            body.insert("allowedDomains".to_string(), json!(domains));
        }
        if let Some(secrets) = &advanced.secrets {
            body.insert("secrets".to_string(), Value::Object(secrets.clone()));
        }
        if let Some(vault_id) = &advanced.op_vault_id {
            body.insert("opVaultId".to_string(), json!(vault_id));
        }
        if advanced.highlight_elements {
            body.insert("highlightElements".to_string(), json!(true));
        }
        if advanced.flash_mode {
            body.insert("flashMode".to_string(), json!(true));
        }
        if advanced.thinking {
            body.insert("thinking".to_string(), json!(true));
        }
        if let Some(vision) = advanced.vision {
            body.insert(
                "vision".to_string(),
                serde_json::to_value(vision).unwrap_or(Value::String("auto".to_string())),
            );
        }
        if let Some(extension) = &advanced.system_prompt_extension {
            body.insert("systemPromptExtension".to_string(), json!(extension));
        }
        if advanced.judge {
            body.insert("judge".to_string(), json!(true));
        }
        if let Some(ground_truth) = &advanced.judge_ground_truth {
            body.insert("judgeGroundTruth".to_string(), json!(ground_truth));
        }
        if let Some(judge_llm) = &advanced.judge_llm {
            body.insert("judgeLlm".to_string(), json!(judge_llm));
        }

        // Caller metadata first, then the source stamp, so the stamp wins.
        let mut metadata = advanced.metadata.clone().unwrap_or_default();
        metadata.insert("source".to_string(), json!(METADATA_SOURCE));
        body.insert("metadata".to_string(), Value::Object(metadata));

        if let Some(spec) = &self.structured_output {
            let canonical = schema::normalize(spec)?;
            body.insert("structuredOutput".to_string(), json!(canonical.to_string()));
            task_text.push_str(SCHEMA_INSTRUCTION_SUFFIX);
        }
        body.insert("task".to_string(), Value::String(task_text));

        Ok(Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaTemplate;

    #[test]
    fn minimal_request_builds_minimal_payload() {
        let payload = TaskRequest::new("Check the weather in Berlin")
            .to_payload()
            .unwrap();
        assert_eq!(payload["task"], json!("Check the weather in Berlin"));
        assert_eq!(payload["llm"], json!(models::DEFAULT));
        assert_eq!(payload["metadata"]["source"], json!(METADATA_SOURCE));
        // Absent options must be omitted, not sent as null.
        for key in [
            "startUrl",
            "maxSteps",
            "sessionId",
            "allowedDomains",
            "secrets",
            "opVaultId",
            "highlightElements",
            "flashMode",
            "thinking",
            "judge",
            "vision",
            "systemPromptExtension",
            "judgeGroundTruth",
            "judgeLlm",
            "structuredOutput",
        ] {
            assert!(payload.get(key).is_none(), "{key} should be omitted");
        }
    }

    #[test]
    fn description_is_trimmed_and_bounded() {
        assert_eq!(
            TaskRequest::new("   ").to_payload().unwrap_err(),
            ValidationError::EmptyDescription
        );

        let at_limit = "x".repeat(MAX_DESCRIPTION_CHARS);
        assert!(TaskRequest::new(at_limit).to_payload().is_ok());

        let over_limit = "x".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert_eq!(
            TaskRequest::new(over_limit).to_payload().unwrap_err(),
            ValidationError::DescriptionTooLong
        );
    }

    #[test]
    fn timeout_bounds_are_inclusive() {
        for (timeout, ok) in [(9, false), (10, true), (3600, true), (3601, false)] {
            let mut request = TaskRequest::new("task");
            request.timeout_seconds = timeout;
            let result = request.to_payload();
            if ok {
                assert!(result.is_ok(), "timeout {timeout} should be accepted");
            } else {
                assert_eq!(
                    result.unwrap_err(),
                    ValidationError::TimeoutOutOfRange(timeout)
                );
            }
        }
    }

    #[test]
    fn start_url_must_be_absolute() {
        let mut request = TaskRequest::new("task");
        request.start_url = Some("not a url".to_string());
        assert!(matches!(
            request.to_payload().unwrap_err(),
            ValidationError::InvalidStartUrl(_)
        ));

        request.start_url = Some("/relative/path".to_string());
        assert!(matches!(
            request.to_payload().unwrap_err(),
            ValidationError::InvalidStartUrl(_)
        ));

        request.start_url = Some("  https://example.com/start  ".to_string());
        let payload = request.to_payload().unwrap();
        assert_eq!(payload["startUrl"], json!("https://example.com/start"));
    }

    #[test]
    fn blank_start_url_is_ignored() {
        let mut request = TaskRequest::new("task");
        request.start_url = Some("   ".to_string());
        let payload = request.to_payload().unwrap();
        assert!(payload.get("startUrl").is_none());
    }

    #[test]
    fn flags_are_included_only_when_set() {
        let mut request = TaskRequest::new("task");
        request.advanced.highlight_elements = true;
        request.advanced.thinking = true;
        let payload = request.to_payload().unwrap();
        assert_eq!(payload["highlightElements"], json!(true));
        assert_eq!(payload["thinking"], json!(true));
        assert!(payload.get("flashMode").is_none());
        assert!(payload.get("judge").is_none());
    }

    #[test]
    fn vision_serializes_to_wire_values() {
        for (mode, expected) in [
            (VisionMode::Auto, json!("auto")),
            (VisionMode::Enabled, json!(true)),
            (VisionMode::Disabled, json!(false)),
        ] {
            let mut request = TaskRequest::new("task");
            request.advanced.vision = Some(mode);
            let payload = request.to_payload().unwrap();
            assert_eq!(payload["vision"], expected);
        }
    }

    #[test]
    fn session_id_is_trimmed_and_blank_dropped() {
        let mut request = TaskRequest::new("task");
        request.advanced.session_id = Some("  sess_42  ".to_string());
        let payload = request.to_payload().unwrap();
        assert_eq!(payload["sessionId"], json!("sess_42"));

        request.advanced.session_id = Some("   ".to_string());
        let payload = request.to_payload().unwrap();
        assert!(payload.get("sessionId").is_none());
    }

    #[test]
    fn metadata_source_cannot_be_overridden() {
        let mut metadata = Map::new();
        metadata.insert("source".to_string(), json!("caller-app"));
        metadata.insert("runId".to_string(), json!("r-7"));

        let mut request = TaskRequest::new("task");
        request.advanced.metadata = Some(metadata);
        let payload = request.to_payload().unwrap();
        assert_eq!(payload["metadata"]["source"], json!(METADATA_SOURCE));
        assert_eq!(payload["metadata"]["runId"], json!("r-7"));
    }

    #[test]
    fn structured_output_stringifies_schema_and_extends_description() {
        let mut request = TaskRequest::new("Scrape the article");
        request.structured_output = Some(SchemaSpec::Template(SchemaTemplate::Article));
        let payload = request.to_payload().unwrap();

        let schema_text = payload["structuredOutput"].as_str().unwrap();
        let schema: Value = serde_json::from_str(schema_text).unwrap();
        assert_eq!(schema["type"], json!("object"));
        assert!(schema["properties"].get("title").is_some());

        let task_text = payload["task"].as_str().unwrap();
        assert!(task_text.starts_with("Scrape the article"));
        assert!(task_text.contains("Follow the schema strictly"));
    }

    #[test]
    fn invalid_schema_fails_before_any_payload_is_built() {
        let mut request = TaskRequest::new("task");
        request.structured_output = Some(SchemaSpec::raw(json!({ "type": "object" })));
        assert_eq!(
            request.to_payload().unwrap_err(),
            ValidationError::ObjectWithoutProperties
        );
    }

    #[test]
    fn explicit_model_overrides_default() {
        let mut request = TaskRequest::new("task");
        request.advanced.llm = Some(models::GPT_4_1_MINI.to_string());
        request.advanced.judge = true;
        request.advanced.judge_llm = Some(models::O3.to_string());
        let payload = request.to_payload().unwrap();
        assert_eq!(payload["llm"], json!("gpt-4.1-mini"));
        assert_eq!(payload["judge"], json!(true));
        assert_eq!(payload["judgeLlm"], json!("o3"));
    }
}
