use rmcp::{
    handler::server::{
        router::tool::ToolRouter,
        router::prompt::PromptRouter,
        wrapper::Parameters,
    },
    model::*,
    tool, tool_handler, tool_router,
    prompt, prompt_handler, prompt_router,
    transport::stdio,
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::core::{Category, ConvoReadyError, MatcherConfig};
use crate::scenario::{extract_keywords, ProfileCorpus, ScenarioMatcher};
use crate::utils::preview;


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct DetectScenariosParams {
    #[schemars(description = "Free-text description of the situation (English or Spanish)")]
    pub text: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct MatchConfidenceParams {
    #[schemars(description = "Free-text description of the situation")]
    pub text: String,
    #[schemars(
        description = "Scenario names: 'restaurant', 'transport', 'shopping', 'hotel', 'health', 'work', 'social', 'housing', 'general'"
    )]
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct ExtractKeywordsParams {
    #[schemars(description = "Text to pull keywords from")]
    pub text: String,
    #[schemars(description = "Max keywords (default: 8)")]
    pub limit: Option<i32>,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedScenario {
    pub category: Category,
    pub label: String,
    pub score: f64,
    /// Display-only percentage, not a probability.
    pub confidence: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResponse {
    pub primary: Category,
    pub secondary: Option<Category>,
    pub fallback: bool,
    pub scenarios: Vec<RankedScenario>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub category: Category,
    pub label: String,
    pub has_profile: bool,
}


#[derive(Clone)]
pub struct ConvoReadyMcpServer {
    matcher: Arc<ScenarioMatcher>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl ConvoReadyMcpServer {

    pub fn new(matcher: Arc<ScenarioMatcher>) -> Self {
        Self {
            matcher,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }


    fn convert_error(err: ConvoReadyError) -> McpError {
        match err {
            ConvoReadyError::EmptyQuery => {
                McpError::invalid_params("Text is empty; ask the user to describe the situation", None)
            }
            ConvoReadyError::UnknownCategory(name) => McpError::invalid_params(
                format!("Unknown scenario: {}", name),
                Some(json!({ "category": name })),
            ),
            other => McpError::internal_error(other.to_string(), None),
        }
    }


    fn result_to_json<T: Serialize>(result: T) -> Result<String, McpError> {
        serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    pub fn detect(&self, text: &str) -> Result<DetectionResponse, ConvoReadyError> {
        let result = self.matcher.classify(text)?;
        let scenarios = result
            .matches()
            .iter()
            .map(|m| RankedScenario {
                category: m.category,
                label: m.category.label().to_string(),
                score: m.score,
                confidence: self.matcher.to_percent(m.score),
            })
            .collect();

        Ok(DetectionResponse {
            primary: result.primary(),
            secondary: result.secondary(),
            fallback: result.is_fallback(),
            scenarios,
        })
    }

    pub fn confidence(
        &self,
        text: &str,
        names: &[String],
    ) -> Result<BTreeMap<Category, u8>, ConvoReadyError> {
        let categories = names
            .iter()
            .map(|n| Category::parse(n))
            .collect::<Result<Vec<_>, _>>()?;
        self.matcher.confidence(text, &categories)
    }

    pub fn scenarios(&self) -> Vec<ScenarioInfo> {
        let profiled: Vec<Category> = self.matcher.index().profiles().iter().map(|(c, _)| *c).collect();
        Category::iter()
            .map(|category| ScenarioInfo {
                category,
                label: category.label().to_string(),
                has_profile: profiled.contains(&category),
            })
            .collect()
    }
}

#[tool_router]
impl ConvoReadyMcpServer {

    #[tool(description = "Rank scenarios for a free-text situation using tf-idf cosine similarity. Falls back to 'general' when nothing matches. Returns: {primary, secondary, fallback, scenarios: [{category, label, score, confidence}]}")]
    async fn detect_scenarios(
        &self,
        Parameters(params): Parameters<DetectScenariosParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("🔍 Detecting scenarios: '{}'", preview(&params.text, 50));

        let response = self.detect(&params.text).map_err(Self::convert_error)?;

        if response.fallback {
            info!("🌍 No scenario matched, using general");
        } else {
            info!("✅ Primary scenario: {}", response.primary);
        }

        let json = Self::result_to_json(&response)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Display confidence (0-100) of a text for specific scenarios. A UI heuristic (similarity x 200, capped), not a probability. Returns: {category: percent}")]
    async fn match_confidence(
        &self,
        Parameters(params): Parameters<MatchConfidenceParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            "📊 Confidence for {:?}: '{}'",
            params.categories,
            preview(&params.text, 30)
        );

        let scores = self
            .confidence(&params.text, &params.categories)
            .map_err(Self::convert_error)?;

        let json = Self::result_to_json(&scores)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Extract up to N salient English keywords from the text for prompt building. Returns: [keyword]")]
    async fn extract_keywords(
        &self,
        Parameters(params): Parameters<ExtractKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params
            .limit
            .map(|l| l.max(0) as usize)
            .unwrap_or(self.matcher.config().max_keywords);
        let keywords = extract_keywords(&params.text, limit);

        if keywords.is_empty() {
            warn!("⚠️ No keywords in '{}'", preview(&params.text, 30));
        }

        let json = Self::result_to_json(&keywords)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "List all scenarios with display labels. 'general' has no profile and is only used as fallback. Returns: [{category, label, has_profile}]")]
    async fn list_scenarios(&self) -> Result<CallToolResult, McpError> {
        let json = Self::result_to_json(self.scenarios())?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}


#[prompt_router]
impl ConvoReadyMcpServer {

    #[prompt(
        name = "scenario_guide",
        description = "How to pick practice content from scenario matches"
    )]
    async fn scenario_guide(&self) -> Result<GetPromptResult, McpError> {
        let guide = r#"# 🗣️ ConvoReady Scenario Tools

## 🔍 detect_scenarios
Call first with the learner's own description of the situation.
- Use `primary` for the main phrase list and dialogue.
- If `secondary` is set, blend in a few phrases from it.
- `fallback: true` means nothing matched: serve general survival phrases.
  This is a normal result, not an error.

## 📊 match_confidence
Badge values like "56% match". Display only; do not threshold on them.

## 🏷️ extract_keywords
Short keyword list to ground generated phrases in the learner's words.

## 📋 list_scenarios
Labels for every scenario.

If a tool rejects the text as empty, ask the learner for more detail."#;

        let messages = vec![
            PromptMessage::new_text(PromptMessageRole::Assistant, guide.to_string()),
        ];

        Ok(GetPromptResult {
            description: Some("Guide for ConvoReady scenario tools".to_string()),
            messages,
        })
    }
}


#[tool_handler]
#[prompt_handler]
impl ServerHandler for ConvoReadyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "convoready".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "ConvoReady scenario matcher - ranks a learner's free-text situation against \
                 restaurant, transport, shopping, hotel, health, work, social and housing \
                 profiles. Use detect_scenarios first; 'general' is the no-match fallback."
                    .to_string(),
            ),
        }
    }


    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                RawResource::new("config://convoready", "convoready-config".to_string())
                    .no_annotation(),
                RawResource::new("profiles://convoready", "convoready-profiles".to_string())
                    .no_annotation(),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match uri.as_str() {
            "config://convoready" => {
                let config = self.matcher.config();

                let content = serde_json::to_string_pretty(&json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "matcher": config,
                    "vocabulary_size": self.matcher.index().vocabulary_size(),
                    "tools": [
                        "detect_scenarios",
                        "match_confidence",
                        "extract_keywords",
                        "list_scenarios",
                    ],
                })).unwrap_or_default();

                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(content, uri)],
                })
            }
            "profiles://convoready" => {
                let content = serde_json::to_string_pretty(&json!({
                    "scenarios": self.scenarios(),
                })).unwrap_or_default();

                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(content, uri)],
                })
            }
            _ => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", uri),
                Some(json!({ "uri": uri })),
            )),
        }
    }
}


pub async fn run_server(config: MatcherConfig) -> anyhow::Result<()> {
    info!("🚀 Initializing ConvoReady MCP Server...");

    let corpus = ProfileCorpus::builtin();
    let matcher = ScenarioMatcher::new(&corpus, config)?;

    info!("✅ ConvoReady MCP Server ready");
    info!(
        "   📚 Profiles: {}, terms: {}",
        corpus.len(),
        matcher.index().vocabulary_size()
    );
    info!(
        "   🎚️ Threshold: {}, confidence scale: {}",
        matcher.config().min_similarity,
        matcher.config().confidence_scale
    );

    let server = ConvoReadyMcpServer::new(Arc::new(matcher));
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    fn server() -> ConvoReadyMcpServer {
        let matcher = ScenarioMatcher::builtin(MatcherConfig::default()).unwrap();
        ConvoReadyMcpServer::new(Arc::new(matcher))
    }

    #[test]
    fn test_detect_response() {
        let response = server().detect("The tap is broken and I have no hot water").unwrap();
        assert_eq!(response.primary, Category::Housing);
        assert!(!response.fallback);
        assert_eq!(response.scenarios[0].label, "🏠 Housing");
        assert!(response.scenarios[0].confidence >= 20);
    }

    #[test]
    fn test_detect_fallback_response() {
        let response = server().detect("xyzzy plugh qwertyuiop").unwrap();
        assert_eq!(response.primary, Category::General);
        assert!(response.fallback);
        assert_eq!(response.secondary, None);
        assert_eq!(response.scenarios.len(), 1);
        assert_eq!(response.scenarios[0].confidence, 0);
    }

    #[test]
    fn test_confidence_parses_names() {
        let s = server();
        let scores = s
            .confidence(
                "taking the bus to the airport",
                &["transport".to_string(), "General".to_string()],
            )
            .unwrap();
        assert!(scores[&Category::Transport] > 0);
        assert_eq!(scores[&Category::General], 0);

        let err = s
            .confidence("taking the bus", &["spaceship".to_string()])
            .unwrap_err();
        assert!(matches!(err, ConvoReadyError::UnknownCategory(_)));
    }

    #[test]
    fn test_scenarios_listing() {
        let scenarios = server().scenarios();
        assert_eq!(scenarios.len(), 9);
        assert!(scenarios.iter().filter(|s| s.has_profile).count() == 8);
        assert!(!scenarios.last().unwrap().has_profile);
    }

    #[test]
    fn test_empty_text_is_invalid_params() {
        let s = server();
        let result = tokio_test::block_on(s.detect_scenarios(Parameters(DetectScenariosParams {
            text: "   ".to_string(),
        })));
        assert_eq!(result.unwrap_err().code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_unknown_category_is_invalid_params() {
        let s = server();
        let result = tokio_test::block_on(s.match_confidence(Parameters(MatchConfidenceParams {
            text: "a room for tonight".to_string(),
            categories: vec!["hotel".to_string(), "moon".to_string()],
        })));
        assert_eq!(result.unwrap_err().code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_tools_succeed() {
        let s = server();
        let detect = tokio_test::block_on(s.detect_scenarios(Parameters(DetectScenariosParams {
            text: "I have a reservation, what time is breakfast".to_string(),
        })));
        assert!(detect.is_ok());

        let keywords = tokio_test::block_on(s.extract_keywords(Parameters(ExtractKeywordsParams {
            text: "my landlord never fixes the heater".to_string(),
            limit: Some(2),
        })));
        assert!(keywords.is_ok());

        assert!(tokio_test::block_on(s.list_scenarios()).is_ok());
    }
}
