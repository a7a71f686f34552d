// Pokemon lookup tools backed by PokeAPI

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::Context;
use pokeapi_sdk::{ListQuery, PokeApiClient, PokeApiResult, PokemonName, DEFAULT_LIST_LIMIT};
use serde::Deserialize;
use tracing::{debug, warn};

/// Relay an upstream outcome to the caller.
///
/// Success is pretty-printed JSON. HTTP-layer failures become an error-flagged
/// result; anything else escapes as an unexpected error.
fn relay(outcome: PokeApiResult<serde_json::Value>) -> Result<CallToolResult, ToolError> {
    match outcome {
        Ok(body) => {
            let json = serde_json::to_string_pretty(&body).context("Failed to render upstream response")?;
            Ok(CallToolResult::text(json))
        }
        Err(e) if e.is_upstream() => {
            warn!(error = %e, "PokeAPI request failed");
            Ok(CallToolResult::error(format!("PokeAPI error: {}", e.upstream_message())))
        }
        Err(e) => Err(anyhow::Error::new(e).context("PokeAPI client failure").into()),
    }
}

/// Tool to look up a single Pokemon
pub struct GetPokemonTool {
    client: PokeApiClient,
}

impl GetPokemonTool {
    pub fn new(client: PokeApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetPokemonArgs {
    name: String,
}

impl GetPokemonArgs {
    /// Validate raw arguments into a normalised name.
    fn parse(arguments: serde_json::Value) -> Result<PokemonName, ToolError> {
        if !arguments.is_object() {
            return Err(ToolError::invalid_params("Invalid pokemon arguments"));
        }
        let args: Self = serde_json::from_value(arguments)
            .map_err(|_| ToolError::invalid_params("Invalid pokemon arguments"))?;

        PokemonName::parse(&args.name)
            .map_err(|e| ToolError::invalid_params(format!("Invalid pokemon arguments: {}", e)))
    }
}

#[async_trait::async_trait]
impl Tool for GetPokemonTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_pokemon".to_string(),
            description: "Get information about a specific Pokémon.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("The name of the Pokémon (case-insensitive).")
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let name = GetPokemonArgs::parse(arguments)?;
        debug!(pokemon = %name, "get_pokemon");

        relay(self.client.pokemon().get(&name).await)
    }
}

/// Tool to list Pokemon page by page
pub struct ListPokemonTool {
    client: PokeApiClient,
}

impl ListPokemonTool {
    pub fn new(client: PokeApiClient) -> Self {
        Self { client }
    }
}

/// A pagination value as callers send it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageParam {
    Text(String),
    Number(serde_json::Number),
}

impl PageParam {
    /// `None` for the empty string, which counts as not supplied.
    fn into_value(self) -> Option<String> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text),
            Self::Number(n) => Some(n.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListPokemonArgs {
    #[serde(default)]
    limit: Option<PageParam>,
    #[serde(default)]
    offset: Option<PageParam>,
}

impl ListPokemonArgs {
    /// Validate raw arguments into a query.
    ///
    /// Missing, `null` and `""` all mean "not supplied": `limit` then falls
    /// back to the default page size and `offset` is left out of the query.
    /// `"0"` and `0` are explicit values.
    fn parse(arguments: serde_json::Value) -> Result<ListQuery, ToolError> {
        let args: Self = match arguments {
            serde_json::Value::Null => Self::default(),
            serde_json::Value::Object(_) => serde_json::from_value(arguments).map_err(|e| {
                ToolError::invalid_params(format!("Invalid list arguments: {}", e))
            })?,
            _ => return Err(ToolError::invalid_params("Invalid list arguments: expected an object")),
        };

        let limit = args
            .limit
            .and_then(PageParam::into_value)
            .unwrap_or_else(|| DEFAULT_LIST_LIMIT.to_string());

        let mut query = ListQuery::new(limit);
        if let Some(offset) = args.offset.and_then(PageParam::into_value) {
            query = query.with_offset(offset);
        }

        Ok(query)
    }
}

#[async_trait::async_trait]
impl Tool for ListPokemonTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_pokemon".to_string(),
            description: "List multiple Pokémon using an optional limit and offset.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "limit": json_schema_string("The maximum number of Pokémon to retrieve (default: 5)."),
                    "offset": json_schema_string("The number of Pokémon to skip before starting to collect the result set.")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let query = ListPokemonArgs::parse(arguments)?;
        debug!(limit = %query.limit, offset = ?query.offset, "list_pokemon");

        relay(self.client.pokemon().list(&query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client_for(server: &MockServer) -> PokeApiClient {
        PokeApiClient::builder()
            .base_url(format!("{}/api/v2", server.uri()))
            .build()
            .unwrap()
    }

    fn offline_client() -> PokeApiClient {
        PokeApiClient::builder()
            .base_url("http://127.0.0.1:9/api/v2")
            .build()
            .unwrap()
    }

    #[test]
    fn test_get_args_require_string_name() {
        for bad in [
            json!(null),
            json!("pikachu"),
            json!(["pikachu"]),
            json!({}),
            json!({"name": 25}),
            json!({"name": null}),
            json!({"Name": "pikachu"}),
        ] {
            assert!(
                matches!(GetPokemonArgs::parse(bad.clone()), Err(ToolError::InvalidParams(_))),
                "expected invalid params for {}",
                bad
            );
        }
    }

    #[test]
    fn test_get_args_reject_blank_name() {
        assert!(matches!(
            GetPokemonArgs::parse(json!({"name": "  "})),
            Err(ToolError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_get_args_lowercase() {
        let name = GetPokemonArgs::parse(json!({"name": "CharIZARD"})).unwrap();
        assert_eq!(name.as_str(), "charizard");
    }

    #[test]
    fn test_list_args_defaults() {
        assert_eq!(ListPokemonArgs::parse(json!(null)).unwrap(), ListQuery::new("5"));
        assert_eq!(ListPokemonArgs::parse(json!({})).unwrap(), ListQuery::new("5"));
        assert_eq!(
            ListPokemonArgs::parse(json!({"limit": "", "offset": ""})).unwrap(),
            ListQuery::new("5")
        );
        assert_eq!(
            ListPokemonArgs::parse(json!({"limit": null, "offset": null})).unwrap(),
            ListQuery::new("5")
        );
    }

    #[test]
    fn test_list_args_explicit_zero_is_kept() {
        let query = ListPokemonArgs::parse(json!({"limit": "3", "offset": "0"})).unwrap();
        assert_eq!(query, ListQuery::new("3").with_offset("0"));

        let query = ListPokemonArgs::parse(json!({"offset": 0})).unwrap();
        assert_eq!(query, ListQuery::new("5").with_offset("0"));
    }

    #[test]
    fn test_list_args_accept_numbers() {
        let query = ListPokemonArgs::parse(json!({"limit": 10, "offset": 20})).unwrap();
        assert_eq!(query.pairs(), vec![("limit", "10"), ("offset", "20")]);
    }

    #[test]
    fn test_list_args_reject_other_types() {
        for bad in [
            json!({"limit": true}),
            json!({"offset": ["1"]}),
            json!({"limit": {"n": 1}}),
            json!("limit=5"),
            json!([1, 2]),
        ] {
            assert!(
                matches!(ListPokemonArgs::parse(bad.clone()), Err(ToolError::InvalidParams(_))),
                "expected invalid params for {}",
                bad
            );
        }
    }

    #[test]
    fn test_manifest_limit_is_optional() {
        // The handler defaults `limit`, so the schema must not demand it.
        let schema = ListPokemonTool::new(offline_client()).schema();
        assert_eq!(schema.input_schema["required"], json!([]));
        assert_eq!(schema.input_schema["properties"]["limit"]["type"], "string");
        assert_eq!(schema.input_schema["properties"]["offset"]["type"], "string");
    }

    #[test]
    fn test_manifest_get_pokemon_requires_name() {
        let schema = GetPokemonTool::new(offline_client()).schema();
        assert_eq!(schema.name, "get_pokemon");
        assert_eq!(schema.input_schema["type"], "object");
        assert_eq!(schema.input_schema["required"], json!(["name"]));
    }

    #[tokio::test]
    async fn test_get_pokemon_lowercases_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 25, "name": "pikachu"})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetPokemonTool::new(client_for(&server));
        let result = tool.execute(json!({"name": "PiKaChU"})).await.unwrap();

        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn test_get_pokemon_pretty_prints_body() {
        let server = MockServer::start().await;
        let body = json!({
            "name": "ditto",
            "id": 132,
            "abilities": [{"ability": {"name": "limber"}, "is_hidden": false}],
            "height": 3
        });

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon/ditto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let tool = GetPokemonTool::new(client_for(&server));
        let result = tool.execute(json!({"name": "ditto"})).await.unwrap();
        let text = result.text_content();

        assert_eq!(result.is_error, None);
        assert_eq!(result.content.len(), 1);
        assert!(text.starts_with("{\n  \"name\": \"ditto\",\n  \"id\": 132,"));
        let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, body);
    }

    #[tokio::test]
    async fn test_get_pokemon_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon/notapokemon"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let tool = GetPokemonTool::new(client_for(&server));
        let result = tool.execute(json!({"name": "notapokemon"})).await.unwrap();

        assert!(result.is_error());
        assert_eq!(
            result.text_content(),
            "PokeAPI error: Request failed with status code 404"
        );
    }

    #[tokio::test]
    async fn test_upstream_message_takes_precedence() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "limit too large"})))
            .mount(&server)
            .await;

        let tool = ListPokemonTool::new(client_for(&server));
        let result = tool.execute(json!({"limit": "100000"})).await.unwrap();

        assert!(result.is_error());
        assert_eq!(result.text_content(), "PokeAPI error: limit too large");
    }

    #[tokio::test]
    async fn test_get_pokemon_invalid_args_skip_network() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let tool = GetPokemonTool::new(client_for(&server));
        let err = tool.execute(json!({"name": 7})).await.unwrap_err();

        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_list_pokemon_default_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon"))
            .and(query_param("limit", "5"))
            .respond_with(|req: &Request| {
                ResponseTemplate::new(200).set_body_json(json!({"query": req.url.query()}))
            })
            .expect(1)
            .mount(&server)
            .await;

        let tool = ListPokemonTool::new(client_for(&server));
        let result = tool.execute(json!({})).await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&result.text_content()).unwrap();

        assert_eq!(body["query"], "limit=5");
    }

    #[tokio::test]
    async fn test_list_pokemon_with_offset() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon"))
            .respond_with(|req: &Request| {
                ResponseTemplate::new(200).set_body_json(json!({"query": req.url.query()}))
            })
            .expect(1)
            .mount(&server)
            .await;

        let tool = ListPokemonTool::new(client_for(&server));
        let result = tool
            .execute(json!({"limit": "10", "offset": "20"}))
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&result.text_content()).unwrap();

        assert_eq!(body["query"], "limit=10&offset=20");
    }

    #[tokio::test]
    async fn test_non_json_success_is_relayed_as_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let tool = ListPokemonTool::new(client_for(&server));
        let result = tool.execute(json!(null)).await.unwrap();

        assert!(!result.is_error());
        assert_eq!(result.text_content(), "\"<html>maintenance</html>\"");
    }

    #[tokio::test]
    async fn test_empty_success_body_is_success_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon/ditto"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let tool = GetPokemonTool::new(client_for(&server));
        let result = tool.execute(json!({"name": "ditto"})).await.unwrap();

        assert!(!result.is_error());
        assert_eq!(result.text_content(), "\"\"");
    }

    #[tokio::test]
    async fn test_dot_segment_names_never_reach_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let tool = GetPokemonTool::new(client_for(&server));
        for name in [".", "..", " .. "] {
            let err = tool.execute(json!({"name": name})).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidParams(_)), "name {:?}", name);
        }
    }
}
