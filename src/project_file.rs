//! Reading and writing `project.graphcool` files.
//!
//! A project file is the schema prefixed by a comment header:
//!
//! ```text
//! # project: cj0abc123
//! # version: 1
//!
//! type User { id: ID! }
//! ```

use anyhow::{Context, Result};

use crate::constants::{PROJECT_FILE_SUFFIX, SCHEMA_FILE_SUFFIX};
use crate::resolver::{project_file_path, Resolver};
use crate::types::ProjectInfo;

const BLANK_PROJECT_INTRO: &str = "\
# Welcome to Graphcool!
#
# This file is the main config file for your project.
# Edit the types below and run `graphcool push` to apply the changes.
#
";

/// Identity and schema recovered from a project file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFile {
    pub project_id: String,
    pub version: Option<i64>,
    pub schema: String,
}

pub fn project_info_to_contents(info: &ProjectInfo) -> String {
    format!(
        "# project: {}\n# version: {}\n\n{}\n",
        info.project_id, info.version, info.schema
    )
}

pub fn blank_project_file_from_info(info: &ProjectInfo) -> String {
    format!("{}{}", BLANK_PROJECT_INTRO, project_info_to_contents(info))
}

/// Writes the full project file. Returns the path that was written.
pub fn write_project_file(
    info: &ProjectInfo,
    resolver: &dyn Resolver,
    output_path: Option<&str>,
) -> Result<String> {
    let path = project_file_path(resolver, output_path);
    resolver
        .write(&path, &project_info_to_contents(info))
        .with_context(|| format!("Failed to write project file {}", path))?;
    Ok(path)
}

/// Writes the project file for the sample-schema flow.
pub fn write_blank_project_file_with_info(
    info: &ProjectInfo,
    resolver: &dyn Resolver,
    output_path: Option<&str>,
) -> Result<String> {
    let path = project_file_path(resolver, output_path);
    resolver
        .write(&path, &blank_project_file_from_info(info))
        .with_context(|| format!("Failed to write project file {}", path))?;
    Ok(path)
}

/// Parses a project file written by either writer.
pub fn read_project_file(contents: &str) -> Option<ProjectFile> {
    let mut project_id = None;
    let mut version = None;
    let mut header_end = 0;

    for (idx, line) in contents.lines().enumerate() {
        if let Some(id) = line.strip_prefix("# project:") {
            project_id = Some(id.trim().to_string());
            header_end = idx + 1;
        } else if let Some(v) = line.strip_prefix("# version:") {
            version = v.trim().parse::<i64>().ok();
            header_end = idx + 1;
        } else if !line.starts_with('#') && !line.trim().is_empty() {
            break;
        }
    }

    let schema = contents
        .lines()
        .skip(header_end)
        .skip_while(|l| l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    project_id.map(|project_id| ProjectFile {
        project_id,
        version,
        schema,
    })
}

/// Whether an explicit `--schema-url` can be resolved at all.
pub fn is_valid_schema_file_path(path: Option<&str>) -> bool {
    match path {
        None => true,
        Some(p) if p.starts_with("http") => true,
        Some(p) => {
            let p = p.trim();
            !p.is_empty()
                && (p.ends_with(SCHEMA_FILE_SUFFIX) || p.ends_with(PROJECT_FILE_SUFFIX))
                && p != SCHEMA_FILE_SUFFIX
                && p != PROJECT_FILE_SUFFIX
        }
    }
}
