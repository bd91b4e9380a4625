use anyhow::Result;

use super::Environment;
use crate::api::ProjectClone;
use crate::constants::{cloned_project_message, cloning_project_message};
use crate::project_file::write_project_file;
use crate::types::ProjectInfo;

#[derive(Debug, Clone, PartialEq)]
pub struct CloneRequest {
    pub source_project_id: String,
    /// Project file to write when no output path is given.
    pub project_file: Option<String>,
    pub name: Option<String>,
    pub output_path: Option<String>,
    pub include_data: bool,
    pub include_mutation_callbacks: bool,
}

/// Clones a remote project and writes its project file.
/// Returns the cloned project and the path of the written file.
pub async fn clone_project(req: &CloneRequest, env: &Environment<'_>) -> Result<(ProjectInfo, String)> {
    env.out.debug(format!(
        "clone {} (data: {}, mutation callbacks: {})",
        req.source_project_id, req.include_data, req.include_mutation_callbacks
    ));

    env.out.start_spinner(cloning_project_message(&req.source_project_id));
    let result = env
        .api
        .clone_project(ProjectClone {
            source_project_id: &req.source_project_id,
            name: req.name.as_deref(),
            include_data: req.include_data,
            include_mutation_callbacks: req.include_mutation_callbacks,
        })
        .await;
    env.out.stop_spinner();
    let info = result?;

    let target = req.output_path.as_deref().or(req.project_file.as_deref());
    let path = write_project_file(&info, env.resolver, target)?;

    env.out.write(cloned_project_message(&info.name, &info.project_id, &req.source_project_id));
    env.out.detail(format!("  Project file: {}", path));
    Ok((info, path))
}
