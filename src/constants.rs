use colored::Colorize;

pub const PROJECT_FILE_NAME: &str = "project.graphcool";
pub const PROJECT_FILE_SUFFIX: &str = ".graphcool";
pub const SCHEMA_FILE_SUFFIX: &str = ".graphql";

/// The bundled empty example schema.
pub const SAMPLE_SCHEMA_URL: &str = "https://graphqlbin.com/empty.graphql";

pub const TWEET_HINT: &str = "\n\n# type Tweet {\n#   text: String!\n# }";

pub const COULD_NOT_CREATE_PROJECT_MESSAGE: &str =
    "Whoops, something went wrong while creating the project.";

pub fn creating_project_message(name: &str) -> String {
    format!("Creating project {}...", name.bold())
}

pub fn cloning_project_message(source_project_id: &str) -> String {
    format!("Cloning project {}...", source_project_id.bold())
}

pub fn created_project_message(name: &str, project_id: &str, contents: &str) -> String {
    format!(
        "🎉 Created project {} (ID: {}) successfully.\n\n{}\n\n{}\n  {} Edit the schema in {} and run `graphcool push`\n  {} Open the console with `graphcool console`",
        name.bold(),
        project_id.cyan(),
        contents,
        "Here is what you can do next:".bold(),
        "1)".cyan(),
        PROJECT_FILE_NAME,
        "2)".cyan(),
    )
}

pub fn cloned_project_message(name: &str, project_id: &str, source_project_id: &str) -> String {
    format!(
        "{} Cloned {} into project {} (ID: {}).",
        "✔".green(),
        source_project_id.cyan(),
        name.bold(),
        project_id.cyan(),
    )
}

pub fn project_already_exists_message(project_files: &[String]) -> String {
    format!(
        "Found {} project file(s) in the current directory: {}\nUse --output-path to write the new project file somewhere else.",
        project_files.len(),
        project_files.join(", "),
    )
}

pub fn invalid_schema_file_message(path: &str) -> String {
    format!(
        "Invalid schema file: '{}'. Use a URL or a path ending in {} or {}.",
        path, SCHEMA_FILE_SUFFIX, PROJECT_FILE_SUFFIX
    )
}

pub fn no_schema_found_message() -> String {
    format!("No {} file found or specified", PROJECT_FILE_SUFFIX)
}
