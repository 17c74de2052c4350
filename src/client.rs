//! Linear GraphQL client.
//!
//! Blocking reqwest against the Linear API. This is the only component
//! that talks to the network; everything it returns flows through the
//! `RemoteClient` trait so the core stays testable with a fake.

use serde_json::{Value, json};

use lnr_lib::error::{LnrError, Result};
use lnr_lib::model::{ConfigKey, Entity, EntityType};
use lnr_lib::remote::{ExistsCheck, RemoteClient};
use lnr_lib::ConfigStore;

pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";

const PAGE_SIZE: u32 = 100;

pub struct LinearClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    token: Option<String>,
}

/// GraphQL plumbing for one entity type: connection field for listing,
/// singular field for existence checks, node selection set, and an
/// optional client-side filter on the node `type` field (Linear serves
/// issue and project templates from one connection).
struct EntityQuery {
    connection: &'static str,
    singular: &'static str,
    fields: &'static str,
    type_filter: Option<&'static str>,
}

const fn query_for(entity_type: EntityType) -> EntityQuery {
    match entity_type {
        EntityType::Team => EntityQuery {
            connection: "teams",
            singular: "team",
            fields: "id name key",
            type_filter: None,
        },
        EntityType::Initiative => EntityQuery {
            connection: "initiatives",
            singular: "initiative",
            fields: "id name",
            type_filter: None,
        },
        EntityType::Project => EntityQuery {
            connection: "projects",
            singular: "project",
            fields: "id name",
            type_filter: None,
        },
        EntityType::Member => EntityQuery {
            connection: "users",
            singular: "user",
            fields: "id name displayName email",
            type_filter: None,
        },
        EntityType::IssueLabel => EntityQuery {
            connection: "issueLabels",
            singular: "issueLabel",
            fields: "id name color",
            type_filter: None,
        },
        EntityType::ProjectLabel => EntityQuery {
            connection: "projectLabels",
            singular: "projectLabel",
            fields: "id name color",
            type_filter: None,
        },
        EntityType::WorkflowState => EntityQuery {
            connection: "workflowStates",
            singular: "workflowState",
            fields: "id name type team { id }",
            type_filter: None,
        },
        EntityType::ProjectTemplate => EntityQuery {
            connection: "templates",
            singular: "template",
            fields: "id name type team { id }",
            type_filter: Some("project"),
        },
        EntityType::IssueTemplate => EntityQuery {
            connection: "templates",
            singular: "template",
            fields: "id name type team { id }",
            type_filter: Some("issue"),
        },
        EntityType::ProjectStatus => EntityQuery {
            connection: "projectStatuses",
            singular: "projectStatus",
            fields: "id name type",
            type_filter: None,
        },
    }
}

impl LinearClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self::with_endpoint(Some(token), DEFAULT_ENDPOINT.to_string())
    }

    #[must_use]
    pub fn with_endpoint(token: Option<String>, endpoint: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint,
            token,
        }
    }

    /// Build a client from the effective `api_token` config value.
    ///
    /// The token is optional at construction time so that commands which
    /// only touch local state (alias hits, literal ids) keep working
    /// without one; the first actual network call reports the missing
    /// token instead.
    #[must_use]
    pub fn from_config(config: &ConfigStore) -> Self {
        let token = config.get_effective(ConfigKey::ApiToken).map(|(v, _)| v);
        Self::with_endpoint(token, DEFAULT_ENDPOINT.to_string())
    }

    fn auth_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            LnrError::Config(format!(
                "no API token configured; run 'lnr config set api_token <token>' \
                 or set {}",
                ConfigKey::ApiToken.env_var()
            ))
        })
    }

    /// One GraphQL POST. Transport and HTTP failures become `Remote`;
    /// GraphQL-level errors are returned for the caller to interpret.
    fn post(&self, query: &str, variables: Value) -> Result<GraphqlResponse> {
        let token = self.auth_token()?;
        let body = json!({ "query": query, "variables": variables });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| LnrError::Remote(format!("request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LnrError::Remote(
                "authentication failed; check your API token".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(LnrError::Remote(format!("HTTP {status}")));
        }

        let payload: Value = response
            .json()
            .map_err(|e| LnrError::Remote(format!("invalid response body: {e}")))?;

        let errors: Vec<String> = payload
            .get("errors")
            .and_then(Value::as_array)
            .map(|errs| {
                errs.iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(GraphqlResponse {
            data: payload.get("data").cloned().unwrap_or(Value::Null),
            errors,
        })
    }
}

struct GraphqlResponse {
    data: Value,
    errors: Vec<String>,
}

impl RemoteClient for LinearClient {
    fn list_all(&self, entity_type: EntityType) -> Result<Vec<Entity>> {
        let q = query_for(entity_type);
        let query = format!(
            "query($after: String) {{ {conn}(first: {page}, after: $after) \
             {{ nodes {{ {fields} }} pageInfo {{ hasNextPage endCursor }} }} }}",
            conn = q.connection,
            page = PAGE_SIZE,
            fields = q.fields,
        );

        let mut entities = Vec::new();
        let mut after = Value::Null;

        loop {
            let response = self.post(&query, json!({ "after": after }))?;
            if let Some(message) = response.errors.first() {
                return Err(LnrError::Remote(message.clone()));
            }

            let connection = &response.data[q.connection];
            let nodes = connection["nodes"].as_array().cloned().unwrap_or_default();
            for node in nodes {
                if let Some(want) = q.type_filter {
                    let node_type = node.get("type").and_then(Value::as_str).unwrap_or("");
                    if !node_type.eq_ignore_ascii_case(want) {
                        continue;
                    }
                }
                entities.push(parse_entity(node)?);
            }

            let page = &connection["pageInfo"];
            if page["hasNextPage"].as_bool() != Some(true) {
                break;
            }
            after = page["endCursor"].clone();
        }

        tracing::debug!(entity_type = %entity_type, count = entities.len(), "remote listing fetched");
        Ok(entities)
    }

    fn validate_exists(&self, entity_type: EntityType, id: &str) -> Result<ExistsCheck> {
        let q = query_for(entity_type);
        let query = format!(
            "query($id: String!) {{ {field}(id: $id) {{ id name }} }}",
            field = q.singular,
        );

        let response = self.post(&query, json!({ "id": id }))?;
        // Linear reports an unknown id as a GraphQL error on an otherwise
        // successful response.
        if !response.errors.is_empty() {
            return Ok(ExistsCheck {
                valid: false,
                name: None,
            });
        }

        let node = &response.data[q.singular];
        match node.get("id").and_then(Value::as_str) {
            Some(_) => Ok(ExistsCheck {
                valid: true,
                name: node
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            None => Ok(ExistsCheck {
                valid: false,
                name: None,
            }),
        }
    }
}

/// Flatten nested `team { id }` to `teamId` and deserialize into the
/// shared `Entity` shape.
fn parse_entity(mut node: Value) -> Result<Entity> {
    if let Some(obj) = node.as_object_mut() {
        if let Some(team_id) = obj
            .get("team")
            .and_then(|team| team.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string)
        {
            obj.remove("team");
            obj.insert("teamId".to_string(), Value::String(team_id));
        }
    }
    serde_json::from_value(node).map_err(LnrError::Json)
}
