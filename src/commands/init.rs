use anyhow::Context;
use clap::Args;
use colored::Colorize;
use thiserror::Error;

use super::clone::{clone_project, CloneRequest};
use super::Environment;
use crate::api::{generate_error_output, parse_errors, ApiError, ApiFailure, HttpApi, NewProject, ParsedError, SystemApi};
use crate::config;
use crate::constants::{
    created_project_message, creating_project_message, invalid_schema_file_message,
    no_schema_found_message, project_already_exists_message, COULD_NOT_CREATE_PROJECT_MESSAGE,
    PROJECT_FILE_NAME, PROJECT_FILE_SUFFIX, SAMPLE_SCHEMA_URL, TWEET_HINT,
};
use crate::names::generate_name;
use crate::output::Output;
use crate::project_file::{
    is_valid_schema_file_path, project_info_to_contents, read_project_file,
    write_blank_project_file_with_info, write_project_file,
};
use crate::resolver::{project_file_path, FsResolver, Resolver};
use crate::types::{ProjectInfo, Region, SchemaInfo};

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Clone this existing project instead of creating a new one
    #[arg(long)]
    pub copy_project_id: Option<String>,
    /// Project file to write the clone to
    #[arg(long, requires = "copy_project_id")]
    pub project_file: Option<String>,
    /// What to copy when cloning: all, data or mutation-callbacks
    #[arg(long, requires = "copy_project_id")]
    pub copy_options: Option<String>,
    /// URL or local path of the schema for the new project
    #[arg(short, long, conflicts_with = "copy_project_id")]
    pub schema_url: Option<String>,
    /// Project name (a random one is generated when omitted)
    #[arg(short, long)]
    pub name: Option<String>,
    /// Project alias used in the endpoint URL
    #[arg(short, long, conflicts_with = "copy_project_id")]
    pub alias: Option<String>,
    /// Region to host the project in
    #[arg(short, long, value_enum, conflicts_with = "copy_project_id")]
    pub region: Option<Region>,
    /// Where to write the project file
    #[arg(short, long)]
    pub output_path: Option<String>,
}

impl InitArgs {
    pub fn into_request(self) -> anyhow::Result<InitRequest> {
        let expand = |p: Option<String>| non_empty(p).map(|p| config::expand_path(&p)).transpose();
        let output_path = expand(self.output_path)?;
        let name = non_empty(self.name);

        match non_empty(self.copy_project_id) {
            Some(source_project_id) => {
                let (include_data, include_mutation_callbacks) =
                    include_flags(self.copy_options.as_deref());
                Ok(InitRequest::Clone(CloneRequest {
                    source_project_id,
                    project_file: expand(self.project_file)?,
                    name,
                    output_path,
                    include_data,
                    include_mutation_callbacks,
                }))
            }
            None => {
                let schema_url = match non_empty(self.schema_url) {
                    Some(url) if url.starts_with("http") => Some(url),
                    other => expand(other)?,
                };
                Ok(InitRequest::Create(CreateRequest {
                    schema_url,
                    name,
                    alias: non_empty(self.alias),
                    region: self.region,
                    output_path,
                }))
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub enum InitRequest {
    Clone(CloneRequest),
    Create(CreateRequest),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateRequest {
    pub schema_url: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub region: Option<Region>,
    pub output_path: Option<String>,
}

impl CreateRequest {
    fn is_blank_project(&self) -> bool {
        self.schema_url.as_deref() == Some(SAMPLE_SCHEMA_URL)
    }
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("{}", project_already_exists_message(.0))]
    ProjectAlreadyExists(Vec<String>),
    #[error("{}", invalid_schema_file_message(.0))]
    InvalidSchemaPath(String),
    #[error("{}", no_schema_found_message())]
    NoSchemaFound,
    /// Structured validation errors from the system API.
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ApiFailure> for InitError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            ApiFailure::Rejected(e) => InitError::Api(e),
            ApiFailure::Transport(e) => InitError::Other(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    Created { info: ProjectInfo, path: String },
    Cloned { info: ProjectInfo, path: String },
    /// The API refused the project; the errors were reported to the user.
    Rejected(Vec<ParsedError>),
}

/// `(include_data, include_mutation_callbacks)` for a `--copy-options` value.
pub fn include_flags(copy_options: Option<&str>) -> (bool, bool) {
    let includes = copy_options.unwrap_or("all");
    let include_data = includes == "all" || includes == "data";
    let include_mutation_callbacks = includes == "all" || includes == "mutation-callbacks";
    (include_data, include_mutation_callbacks)
}

pub async fn init(request: InitRequest, env: &Environment<'_>) -> Result<InitOutcome, InitError> {
    match request {
        InitRequest::Clone(req) => {
            let (info, path) = clone_project(&req, env).await?;
            Ok(InitOutcome::Cloned { info, path })
        }
        InitRequest::Create(req) => create(req, env).await,
    }
}

async fn create(req: CreateRequest, env: &Environment<'_>) -> Result<InitOutcome, InitError> {
    let project_files = env.resolver.project_files(".")?;
    if !project_files.is_empty() && req.output_path.is_none() {
        return Err(InitError::ProjectAlreadyExists(project_files));
    }
    if let Some(output_path) = req.output_path.as_deref() {
        warn_if_replacing(output_path, env);
    }

    let name = req.name.clone().unwrap_or_else(generate_name);
    env.out.start_spinner(creating_project_message(&name));

    match create_and_write(&req, &name, env).await {
        Ok((info, path)) => {
            env.out.stop_spinner();
            let contents = project_info_to_contents(&info);
            env.out.write(created_project_message(&name, &info.project_id, &contents));
            env.out.detail(format!("  Project file: {}", path.dimmed()));
            if let Some(alias) = &info.alias {
                env.out.detail(format!("  Alias:        {}", alias.cyan()));
            }
            if let Some(region) = &info.region {
                env.out.detail(format!("  Region:       {}", region));
            }
            Ok(InitOutcome::Created { info, path })
        }
        Err(e) => {
            env.out.stop_spinner();
            env.out.write_error(format!("{}", COULD_NOT_CREATE_PROJECT_MESSAGE.red()));
            match e {
                InitError::Api(api_error) => {
                    let errors = parse_errors(&api_error);
                    env.out.write_error(generate_error_output(&errors));
                    Ok(InitOutcome::Rejected(errors))
                }
                other => Err(other),
            }
        }
    }
}

fn warn_if_replacing(output_path: &str, env: &Environment<'_>) {
    let path = project_file_path(env.resolver, Some(output_path));
    let Some(existing) = env.resolver.read(&path).ok().and_then(|c| read_project_file(&c)) else {
        return;
    };
    let version = existing
        .version
        .map(|v| format!(" (version {})", v))
        .unwrap_or_default();
    env.out.warn(format!(
        "{}",
        format!("{} belongs to project {}{} and will be replaced.", path, existing.project_id, version).yellow()
    ));
    env.out.debug(format!("replaced schema had {} lines", existing.schema.lines().count()));
}

async fn create_and_write(
    req: &CreateRequest,
    name: &str,
    env: &Environment<'_>,
) -> Result<(ProjectInfo, String), InitError> {
    let schema_url = req.schema_url.as_deref();
    if !is_valid_schema_file_path(schema_url) {
        return Err(InitError::InvalidSchemaPath(schema_url.unwrap_or_default().to_string()));
    }
    let schema = get_schema(schema_url, env.resolver, env.api).await?;
    env.out.debug(format!("schema loaded from {} ({} bytes)", schema.source, schema.schema.len()));

    let info = create_project_and_get_project_info(
        name,
        &schema,
        env.api,
        req.alias.as_deref(),
        req.region,
    )
    .await?;

    let path = if req.is_blank_project() {
        write_blank_project_file_with_info(&info, env.resolver, req.output_path.as_deref())?
    } else {
        write_project_file(&info, env.resolver, req.output_path.as_deref())?
    };
    Ok((info, path))
}

pub async fn create_project_and_get_project_info(
    name: &str,
    schema: &SchemaInfo,
    api: &dyn SystemApi,
    alias: Option<&str>,
    region: Option<Region>,
) -> Result<ProjectInfo, InitError> {
    let mut info = api
        .create_project(NewProject {
            name,
            schema: &schema.schema,
            alias,
            region,
        })
        .await?;
    if schema.source == SAMPLE_SCHEMA_URL {
        info.schema.push_str(TWEET_HINT);
    }
    Ok(info)
}

pub async fn get_schema(
    schema_url: Option<&str>,
    resolver: &dyn Resolver,
    api: &dyn SystemApi,
) -> Result<SchemaInfo, InitError> {
    match schema_url {
        Some(url) if url.starts_with("http") => Ok(SchemaInfo {
            schema: api.fetch_schema(url).await?,
            source: url.to_string(),
        }),
        Some(path) => Ok(SchemaInfo {
            schema: resolver.read(path)?,
            source: path.to_string(),
        }),
        None => {
            let schema_files: Vec<String> = resolver
                .read_directory(".")?
                .into_iter()
                .filter(|f| f.ends_with(PROJECT_FILE_SUFFIX))
                .collect();
            let file = schema_files
                .iter()
                .find(|f| f.as_str() == PROJECT_FILE_NAME)
                .or_else(|| schema_files.first())
                .ok_or(InitError::NoSchemaFound)?;
            Ok(SchemaInfo {
                schema: resolver.read(file)?,
                source: file.clone(),
            })
        }
    }
}

/// Handle `graphcool init`
pub async fn handle_init(args: InitArgs, out: &Output) -> anyhow::Result<()> {
    let request = args.into_request()?;

    let cfg = config::load_config().context("Could not load config file.")?;
    let token = cfg
        .auth_token()
        .context("You are not logged in. Please run `graphcool login` first.")?;
    let endpoint = cfg.system_endpoint();
    out.debug(format!("system endpoint: {}", endpoint));

    let api = HttpApi::new(endpoint, token);
    let resolver = FsResolver::current_dir();
    let env = Environment {
        resolver: &resolver,
        api: &api,
        out,
    };

    match init(request, &env).await {
        Ok(_) => Ok(()),
        Err(InitError::Other(e)) => Err(e),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Verbosity;
    use crate::resolver::testutil::MemoryResolver;
    use crate::types::{GraphQlError, SchemaError};
    use crate::api::ProjectClone;
    use async_trait::async_trait;
    use clap::Parser;
    use std::sync::Mutex;

    enum CreateMode {
        Echo,
        Reject,
        Fail,
    }

    struct MockApi {
        mode: CreateMode,
        clone_fails: bool,
        fetched_schema: String,
        fetches: Mutex<Vec<String>>,
        creates: Mutex<Vec<(String, String, Option<String>, Option<Region>)>>,
        clones: Mutex<Vec<(String, bool, bool)>>,
    }

    impl MockApi {
        fn new(mode: CreateMode) -> Self {
            Self {
                mode,
                clone_fails: false,
                fetched_schema: "type Remote { id: ID! }".to_string(),
                fetches: Mutex::new(Vec::new()),
                creates: Mutex::new(Vec::new()),
                clones: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.fetches.lock().unwrap().len()
                + self.creates.lock().unwrap().len()
                + self.clones.lock().unwrap().len()
        }
    }

    fn project(name: &str, schema: &str) -> ProjectInfo {
        ProjectInfo {
            project_id: "abc123".to_string(),
            name: name.to_string(),
            schema: schema.to_string(),
            alias: None,
            version: 1,
            region: None,
        }
    }

    #[async_trait]
    impl SystemApi for MockApi {
        async fn fetch_schema(&self, url: &str) -> anyhow::Result<String> {
            self.fetches.lock().unwrap().push(url.to_string());
            Ok(self.fetched_schema.clone())
        }

        async fn create_project(&self, p: NewProject<'_>) -> Result<ProjectInfo, ApiFailure> {
            self.creates.lock().unwrap().push((
                p.name.to_string(),
                p.schema.to_string(),
                p.alias.map(str::to_string),
                p.region,
            ));
            match self.mode {
                CreateMode::Echo => Ok(project(p.name, p.schema)),
                CreateMode::Reject => Err(ApiError {
                    errors: vec![GraphQlError {
                        code: Some(3019),
                        message: "The schema contains errors".to_string(),
                        request_id: Some("req-9".to_string()),
                        schema_errors: vec![SchemaError {
                            type_name: "User".to_string(),
                            field: Some("email".to_string()),
                            description: "Unknown type Emial".to_string(),
                        }],
                    }],
                }
                .into()),
                CreateMode::Fail => Err(anyhow::anyhow!("connection reset").into()),
            }
        }

        async fn clone_project(&self, c: ProjectClone<'_>) -> Result<ProjectInfo, ApiFailure> {
            self.clones.lock().unwrap().push((
                c.source_project_id.to_string(),
                c.include_data,
                c.include_mutation_callbacks,
            ));
            if self.clone_fails {
                return Err(anyhow::anyhow!("source project not found").into());
            }
            Ok(ProjectInfo {
                project_id: "clone456".to_string(),
                ..project(c.name.unwrap_or("Clone"), "type User { id: ID! }")
            })
        }
    }

    fn create(schema_url: Option<&str>, output_path: Option<&str>) -> InitRequest {
        InitRequest::Create(CreateRequest {
            schema_url: schema_url.map(str::to_string),
            name: Some("demo".to_string()),
            output_path: output_path.map(str::to_string),
            ..Default::default()
        })
    }

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: InitArgs,
    }

    #[test]
    fn test_include_flags() {
        assert_eq!(include_flags(None), (true, true));
        assert_eq!(include_flags(Some("all")), (true, true));
        assert_eq!(include_flags(Some("data")), (true, false));
        assert_eq!(include_flags(Some("mutation-callbacks")), (false, true));
        assert_eq!(include_flags(Some("nothing")), (false, false));
    }

    #[test]
    fn test_args_select_clone_mode() {
        let cli = TestCli::try_parse_from([
            "graphcool",
            "--copy-project-id",
            "src1",
            "--copy-options",
            "data",
            "--name",
            "copy",
        ])
        .unwrap();
        match cli.args.into_request().unwrap() {
            InitRequest::Clone(req) => {
                assert_eq!(req.source_project_id, "src1");
                assert_eq!(req.name.as_deref(), Some("copy"));
                assert!(req.include_data);
                assert!(!req.include_mutation_callbacks);
            }
            other => panic!("Expected clone request, got {:?}", other),
        }
    }

    #[test]
    fn test_args_select_create_mode() {
        let cli = TestCli::try_parse_from([
            "graphcool",
            "--schema-url",
            "https://example.com/schema.graphql",
            "--region",
            "us-west-2",
        ])
        .unwrap();
        match cli.args.into_request().unwrap() {
            InitRequest::Create(req) => {
                assert_eq!(req.schema_url.as_deref(), Some("https://example.com/schema.graphql"));
                assert_eq!(req.region, Some(Region::UsWest2));
            }
            other => panic!("Expected create request, got {:?}", other),
        }
    }

    #[test]
    fn test_args_reject_mixed_modes() {
        let res = TestCli::try_parse_from([
            "graphcool",
            "--copy-project-id",
            "src1",
            "--schema-url",
            "schema.graphql",
        ]);
        assert!(res.is_err());
        assert!(TestCli::try_parse_from(["graphcool", "--copy-options", "data"]).is_err());
    }

    #[tokio::test]
    async fn test_clone_mode_skips_create_flow() {
        let resolver = MemoryResolver::with_files(&[("project.graphcool", "# project: old")]);
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let (include_data, include_mutation_callbacks) = include_flags(Some("mutation-callbacks"));
        let outcome = init(
            InitRequest::Clone(CloneRequest {
                source_project_id: "src1".to_string(),
                project_file: None,
                name: None,
                output_path: Some("cloned.graphcool".to_string()),
                include_data,
                include_mutation_callbacks,
            }),
            &env,
        )
        .await
        .unwrap();

        assert_eq!(resolver.listings(), 0);
        assert!(resolver.reads().is_empty());
        assert!(api.fetches.lock().unwrap().is_empty());
        assert!(api.creates.lock().unwrap().is_empty());
        assert_eq!(
            *api.clones.lock().unwrap(),
            vec![("src1".to_string(), false, true)]
        );
        match outcome {
            InitOutcome::Cloned { info, path } => {
                assert_eq!(info.project_id, "clone456");
                assert_eq!(path, "cloned.graphcool");
            }
            other => panic!("Expected clone outcome, got {:?}", other),
        }
        let written = read_project_file(&resolver.get("cloned.graphcool").unwrap()).unwrap();
        assert_eq!(written.project_id, "clone456");
    }

    #[tokio::test]
    async fn test_clone_failure_propagates_unchanged() {
        let resolver = MemoryResolver::default();
        let api = MockApi {
            clone_fails: true,
            ..MockApi::new(CreateMode::Echo)
        };
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let err = init(
            InitRequest::Clone(CloneRequest {
                source_project_id: "gone".to_string(),
                project_file: None,
                name: None,
                output_path: None,
                include_data: true,
                include_mutation_callbacks: true,
            }),
            &env,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, InitError::Other(_)));
        assert!(err.to_string().contains("source project not found"));
        assert!(!out.is_spinning());
        assert!(!out.stderr().contains(COULD_NOT_CREATE_PROJECT_MESSAGE));
        assert!(resolver.get("project.graphcool").is_none());
    }

    #[test]
    fn test_args_treat_empty_strings_as_absent() {
        let cli = TestCli::try_parse_from(["graphcool", "--copy-project-id", "", "--name", ""]).unwrap();
        match cli.args.into_request().unwrap() {
            InitRequest::Create(req) => assert_eq!(req.name, None),
            other => panic!("Expected create request, got {:?}", other),
        }

        let cli = TestCli::try_parse_from(["graphcool", "--alias", "", "--output-path", ""]).unwrap();
        match cli.args.into_request().unwrap() {
            InitRequest::Create(req) => {
                assert_eq!(req.alias, None);
                assert_eq!(req.output_path, None);
            }
            other => panic!("Expected create request, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_existing_project_file_aborts_before_network() {
        let resolver = MemoryResolver::with_files(&[
            ("project.graphcool", "# project: old"),
            ("schema.graphql", "type A { id: ID! }"),
        ]);
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let err = init(create(Some("https://example.com/s.graphql"), None), &env)
            .await
            .unwrap_err();

        match err {
            InitError::ProjectAlreadyExists(files) => {
                assert_eq!(files, vec!["./project.graphcool".to_string()])
            }
            other => panic!("Expected ProjectAlreadyExists, got {:?}", other),
        }
        assert_eq!(api.calls(), 0);
        assert!(out.stdout().is_empty());
        assert!(out.stderr().is_empty());
    }

    #[tokio::test]
    async fn test_existing_project_file_allowed_with_output_path() {
        let resolver = MemoryResolver::with_files(&[
            ("project.graphcool", "# project: old"),
            ("schema.graphql", "type A { id: ID! }"),
        ]);
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let outcome = init(create(Some("schema.graphql"), Some("second.graphcool")), &env)
            .await
            .unwrap();
        assert!(matches!(outcome, InitOutcome::Created { ref path, .. } if path == "second.graphcool"));
        assert_eq!(resolver.get("project.graphcool").as_deref(), Some("# project: old"));
    }

    #[tokio::test]
    async fn test_replacing_existing_file_warns() {
        let resolver = MemoryResolver::with_files(&[
            ("project.graphcool", "# project: old1\n# version: 4\n\ntype Old { id: ID! }\n"),
            ("schema.graphql", "type A { id: ID! }"),
        ]);
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        init(create(Some("schema.graphql"), Some("project.graphcool")), &env)
            .await
            .unwrap();

        assert!(out.stderr().contains("old1 (version 4)"));
        let written = read_project_file(&resolver.get("project.graphcool").unwrap()).unwrap();
        assert_eq!(written.project_id, "abc123");
    }

    #[tokio::test]
    async fn test_remote_schema_fetched_once_without_local_reads() {
        let resolver = MemoryResolver::default();
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        init(create(Some("https://example.com/schema.graphql"), None), &env)
            .await
            .unwrap();

        assert_eq!(
            *api.fetches.lock().unwrap(),
            vec!["https://example.com/schema.graphql".to_string()]
        );
        assert!(resolver.reads().is_empty());
        assert_eq!(api.creates.lock().unwrap()[0].1, "type Remote { id: ID! }");
    }

    #[tokio::test]
    async fn test_sample_schema_appends_tweet_hint_once() {
        let resolver = MemoryResolver::default();
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let outcome = init(create(Some(SAMPLE_SCHEMA_URL), None), &env).await.unwrap();
        let InitOutcome::Created { info, path } = outcome else {
            panic!("Expected created outcome");
        };
        assert!(info.schema.ends_with(TWEET_HINT));
        assert_eq!(info.schema.matches("# type Tweet {").count(), 1);

        let contents = resolver.get(&path).unwrap();
        assert!(contents.starts_with("# Welcome to Graphcool!"));
        assert_eq!(read_project_file(&contents).unwrap().project_id, "abc123");
    }

    #[tokio::test]
    async fn test_tweet_hint_only_for_sample_source() {
        let api = MockApi::new(CreateMode::Echo);
        let schema = SchemaInfo {
            schema: "type A { id: ID! }".to_string(),
            source: "https://example.com/other.graphql".to_string(),
        };
        let info = create_project_and_get_project_info("demo", &schema, &api, None, None)
            .await
            .unwrap();
        assert_eq!(info.schema, "type A { id: ID! }");
    }

    #[tokio::test]
    async fn test_no_schema_found() {
        let resolver = MemoryResolver::with_files(&[("README.md", "hello")]);
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let err = init(create(None, None), &env).await.unwrap_err();
        assert!(matches!(err, InitError::NoSchemaFound));
        assert!(!out.is_spinning());
        assert!(out.stderr().contains(COULD_NOT_CREATE_PROJECT_MESSAGE));
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_discovery_prefers_canonical_file_and_records_it() {
        let resolver = MemoryResolver::with_files(&[
            ("other.graphcool", "type Other { id: ID! }"),
            ("project.graphcool", "type Main { id: ID! }"),
        ]);
        let api = MockApi::new(CreateMode::Echo);

        let schema = get_schema(None, &resolver, &api).await.unwrap();
        assert_eq!(schema.schema, "type Main { id: ID! }");
        assert_eq!(schema.source, "project.graphcool");
    }

    #[tokio::test]
    async fn test_discovery_falls_back_to_first_listed() {
        let resolver = MemoryResolver::with_files(&[
            ("b.graphcool", "type B { id: ID! }"),
            ("a.graphcool", "type A { id: ID! }"),
        ]);
        let api = MockApi::new(CreateMode::Echo);

        let schema = get_schema(None, &resolver, &api).await.unwrap();
        assert_eq!(schema.schema, "type B { id: ID! }");
        assert_eq!(schema.source, "b.graphcool");
    }

    #[tokio::test]
    async fn test_invalid_schema_path() {
        let resolver = MemoryResolver::default();
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let err = init(create(Some("schema.json"), None), &env).await.unwrap_err();
        assert!(matches!(err, InitError::InvalidSchemaPath(ref p) if p == "schema.json"));
        assert!(!out.is_spinning());
        assert!(resolver.reads().is_empty());
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_local_schema() {
        let resolver = MemoryResolver::with_files(&[("schema.graphql", "type User { id: ID! }")]);
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let outcome = init(create(Some("./schema.graphql"), None), &env).await.unwrap();

        assert!(matches!(outcome, InitOutcome::Created { ref path, .. } if path == "./project.graphcool"));
        let stdout = out.stdout();
        assert!(stdout.contains("abc123"));
        assert!(stdout.contains("type User { id: ID! }"));

        let written = read_project_file(&resolver.get("project.graphcool").unwrap()).unwrap();
        assert_eq!(written.project_id, "abc123");
        assert_eq!(written.schema, "type User { id: ID! }");
        assert!(!out.is_spinning());
    }

    #[tokio::test]
    async fn test_api_rejection_is_reported_not_raised() {
        let resolver = MemoryResolver::with_files(&[("schema.graphql", "type User { email: Emial }")]);
        let api = MockApi::new(CreateMode::Reject);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let outcome = init(create(Some("schema.graphql"), None), &env).await.unwrap();

        match outcome {
            InitOutcome::Rejected(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].location.as_deref(), Some("User.email"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        let stderr = out.stderr();
        assert!(stderr.contains(COULD_NOT_CREATE_PROJECT_MESSAGE));
        assert!(stderr.contains("Unknown type Emial"));
        assert!(resolver.get("project.graphcool").is_none());
        assert!(!out.is_spinning());
    }

    #[tokio::test]
    async fn test_unstructured_failure_propagates() {
        let resolver = MemoryResolver::with_files(&[("schema.graphql", "type User { id: ID! }")]);
        let api = MockApi::new(CreateMode::Fail);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let err = init(create(Some("schema.graphql"), None), &env).await.unwrap_err();
        assert!(matches!(err, InitError::Other(_)));
        assert!(err.to_string().contains("connection reset"));
        assert!(out.stderr().contains(COULD_NOT_CREATE_PROJECT_MESSAGE));
        assert!(!out.is_spinning());
    }

    #[tokio::test]
    async fn test_missing_local_schema_propagates() {
        let resolver = MemoryResolver::default();
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let err = init(create(Some("missing.graphql"), None), &env).await.unwrap_err();
        assert!(matches!(err, InitError::Other(_)));
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_generated_name_when_none_given() {
        let resolver = MemoryResolver::with_files(&[("schema.graphql", "type User { id: ID! }")]);
        let api = MockApi::new(CreateMode::Echo);
        let out = Output::capturing(Verbosity::Normal);
        let env = Environment { resolver: &resolver, api: &api, out: &out };

        let request = InitRequest::Create(CreateRequest {
            schema_url: Some("schema.graphql".to_string()),
            alias: Some("demo-alias".to_string()),
            region: Some(Region::EuWest1),
            ..Default::default()
        });
        init(request, &env).await.unwrap();

        let creates = api.creates.lock().unwrap();
        let (name, _, alias, region) = &creates[0];
        assert_eq!(name.split(' ').count(), 2);
        assert_eq!(alias.as_deref(), Some("demo-alias"));
        assert_eq!(*region, Some(Region::EuWest1));
    }
}
