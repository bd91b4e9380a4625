pub mod clone;
pub mod init;
pub mod login;
pub mod logout;

use crate::api::SystemApi;
use crate::output::Output;
use crate::resolver::Resolver;

/// Capabilities a command runs against, built once per invocation.
pub struct Environment<'a> {
    pub resolver: &'a dyn Resolver,
    pub api: &'a dyn SystemApi,
    pub out: &'a Output,
}
