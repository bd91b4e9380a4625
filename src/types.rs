use serde::{Deserialize, Serialize};

/// Regions a project can be hosted in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Region {
    #[serde(rename = "EU_WEST_1")]
    #[value(name = "eu-west-1")]
    EuWest1,
    #[serde(rename = "US_WEST_2")]
    #[value(name = "us-west-2")]
    UsWest2,
    #[serde(rename = "AP_NORTHEAST_1")]
    #[value(name = "ap-northeast-1")]
    ApNortheast1,
}

impl Region {
    /// GraphQL enum literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::EuWest1 => "EU_WEST_1",
            Region::UsWest2 => "US_WEST_2",
            Region::ApNortheast1 => "AP_NORTHEAST_1",
        }
    }
}

/// Schema text together with where it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInfo {
    pub schema: String,
    pub source: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectInfo {
    #[serde(rename = "id")]
    pub project_id: String,
    pub name: String,
    pub schema: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub region: Option<String>,
}

fn default_version() -> i64 {
    1
}

/// Envelope of every response from the system endpoint.
#[derive(Deserialize, Debug)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GraphQlError {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
    #[serde(rename = "requestId", default)]
    pub request_id: Option<String>,
    #[serde(rename = "schemaErrors", default)]
    pub schema_errors: Vec<SchemaError>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SchemaError {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub field: Option<String>,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct AddProjectData {
    #[serde(rename = "addProject")]
    pub add_project: AddProjectPayload,
}

#[derive(Deserialize, Debug)]
pub struct AddProjectPayload {
    pub project: ProjectInfo,
}

#[derive(Deserialize, Debug)]
pub struct CloneProjectData {
    #[serde(rename = "cloneProject")]
    pub clone_project: CloneProjectPayload,
}

#[derive(Deserialize, Debug)]
pub struct CloneProjectPayload {
    #[serde(rename = "clonedProject")]
    pub cloned_project: ProjectInfo,
}

/// Body returned by the gateway for non-GraphQL failures.
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
