use async_trait::async_trait;
use anyhow::{anyhow, Context};
use colored::Colorize;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use thiserror::Error;
use crate::types::{
    AddProjectData, CloneProjectData, ErrorResponse, GraphQlError, GraphQlResponse, ProjectInfo,
    Region,
};

const ADD_PROJECT_MUTATION: &str = r#"
mutation addProject($schema: String!, $name: String!, $alias: String, $region: Region) {
  addProject(input: {
    name: $name,
    schema: $schema,
    alias: $alias,
    region: $region,
    clientMutationId: "static"
  }) {
    project { id name alias version region schema }
  }
}"#;

const CLONE_PROJECT_MUTATION: &str = r#"
mutation cloneProject($projectId: String!, $name: String, $includeData: Boolean!, $includeMutationCallbacks: Boolean!) {
  cloneProject(input: {
    projectId: $projectId,
    name: $name,
    includeData: $includeData,
    includeMutationCallbacks: $includeMutationCallbacks,
    clientMutationId: "static"
  }) {
    clonedProject { id name alias version region schema }
  }
}"#;

/// Validation errors reported by the system API in the GraphQL `errors` array.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{}", summarize(.errors))]
pub struct ApiError {
    pub errors: Vec<GraphQlError>,
}

fn summarize(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ApiFailure {
    /// The API understood the request and rejected it.
    #[error(transparent)]
    Rejected(#[from] ApiError),
    /// Transport, decoding or gateway failure.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// One user-facing error line produced from an [`ApiError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedError {
    pub location: Option<String>,
    pub message: String,
    pub code: Option<i64>,
    pub request_id: Option<String>,
}

/// Flattens API errors so that each schema error becomes its own entry.
pub fn parse_errors(error: &ApiError) -> Vec<ParsedError> {
    let mut parsed = Vec::new();
    for e in &error.errors {
        if e.schema_errors.is_empty() {
            parsed.push(ParsedError {
                location: None,
                message: e.message.clone(),
                code: e.code,
                request_id: e.request_id.clone(),
            });
            continue;
        }
        for se in &e.schema_errors {
            let location = match &se.field {
                Some(field) => format!("{}.{}", se.type_name, field),
                None => se.type_name.clone(),
            };
            parsed.push(ParsedError {
                location: Some(location),
                message: se.description.clone(),
                code: e.code,
                request_id: e.request_id.clone(),
            });
        }
    }
    parsed
}

pub fn generate_error_output(errors: &[ParsedError]) -> String {
    let mut lines = Vec::new();
    for e in errors {
        let mut line = match &e.location {
            Some(loc) => format!("  {} {}: {}", "✖".red(), loc.bold(), e.message),
            None => format!("  {} {}", "✖".red(), e.message),
        };
        if let Some(code) = e.code {
            line.push_str(&format!(" {}", format!("(code {})", code).dimmed()));
        }
        lines.push(line);
    }

    let mut seen = HashSet::new();
    let mut request_ids: Vec<&str> = errors.iter().filter_map(|e| e.request_id.as_deref()).collect();
    request_ids.retain(|id| seen.insert(*id));
    if !request_ids.is_empty() {
        lines.push(String::new());
        lines.push(format!("  Request ID: {}", request_ids.join(", ")));
    }
    lines.join("\n")
}

pub struct NewProject<'a> {
    pub name: &'a str,
    pub schema: &'a str,
    pub alias: Option<&'a str>,
    pub region: Option<Region>,
}

pub struct ProjectClone<'a> {
    pub source_project_id: &'a str,
    pub name: Option<&'a str>,
    pub include_data: bool,
    pub include_mutation_callbacks: bool,
}

/// Remote operations used by the commands.
#[async_trait]
pub trait SystemApi: Send + Sync {
    /// Downloads a schema from a remote URL.
    async fn fetch_schema(&self, url: &str) -> anyhow::Result<String>;

    async fn create_project(&self, project: NewProject<'_>) -> Result<ProjectInfo, ApiFailure>;

    async fn clone_project(&self, clone: ProjectClone<'_>) -> Result<ProjectInfo, ApiFailure>;
}

pub struct HttpApi {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpApi {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiFailure> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Could not reach {}", self.endpoint))?;
        handle_response(res).await
    }
}

async fn handle_response<T: DeserializeOwned>(res: Response) -> Result<T, ApiFailure> {
    let status = res.status();
    let text = res
        .text()
        .await
        .unwrap_or_else(|_| format!("HTTP Error: {}", status));

    // Rejected mutations come back with a null payload next to `errors`.
    if let Ok(parsed) = serde_json::from_str::<GraphQlResponse<serde_json::Value>>(&text) {
        if !parsed.errors.is_empty() {
            return Err(ApiError { errors: parsed.errors }.into());
        }
        if let Some(data) = parsed.data {
            return serde_json::from_value::<T>(data)
                .with_context(|| format!("Failed to parse response: {}", text))
                .map_err(ApiFailure::from);
        }
    }

    if status.is_success() {
        return Err(anyhow!("Failed to parse response: {}", text).into());
    }
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(parsed_err) => Err(anyhow!(parsed_err.error).into()),
        Err(_) => Err(anyhow!("HTTP {}: {}", status, text).into()),
    }
}

#[async_trait]
impl SystemApi for HttpApi {
    async fn fetch_schema(&self, url: &str) -> anyhow::Result<String> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Could not fetch schema from {}", url))?
            .error_for_status()
            .with_context(|| format!("Could not fetch schema from {}", url))?;
        res.text().await.context("Failed to read schema body")
    }

    async fn create_project(&self, project: NewProject<'_>) -> Result<ProjectInfo, ApiFailure> {
        let variables = serde_json::json!({
            "name": project.name,
            "schema": project.schema,
            "alias": project.alias,
            "region": project.region.map(|r| r.as_str()),
        });
        let data: AddProjectData = self.execute(ADD_PROJECT_MUTATION, variables).await?;
        Ok(data.add_project.project)
    }

    async fn clone_project(&self, clone: ProjectClone<'_>) -> Result<ProjectInfo, ApiFailure> {
        let variables = serde_json::json!({
            "projectId": clone.source_project_id,
            "name": clone.name,
            "includeData": clone.include_data,
            "includeMutationCallbacks": clone.include_mutation_callbacks,
        });
        let data: CloneProjectData = self.execute(CLONE_PROJECT_MUTATION, variables).await?;
        Ok(data.clone_project.cloned_project)
    }
}
