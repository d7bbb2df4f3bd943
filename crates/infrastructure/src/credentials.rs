//! External-CLI credential provider.
//!
//! Obtains admin-level and regular-level secrets by running a
//! configured command line, the way a platform CLI exposes the keys of
//! a logged-in user. Acquisition is lazy: nothing runs until a key is
//! first requested, and a fetched key is cached for the provider's
//! lifetime. Failures (missing CLI, not logged in) are hard errors.

use async_trait::async_trait;
use gqlprobe_application::ports::{CredentialError, CredentialProvider};
use tokio::process::Command;
use tokio::sync::OnceCell;

/// One external command line producing a secret on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialCommand {
    /// Program to run.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl CredentialCommand {
    /// Creates a command from a program and its arguments.
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs the command and returns its trimmed stdout.
    async fn fetch(&self) -> Result<String, CredentialError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|error| CredentialError::Spawn(format!("{}: {error}", self.program)))?;

        if !output.status.success() {
            return Err(CredentialError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let key = String::from_utf8(output.stdout)
            .map_err(|error| CredentialError::InvalidOutput(error.to_string()))?
            .trim()
            .to_string();
        if key.is_empty() {
            return Err(CredentialError::InvalidOutput(
                "empty credential output".to_string(),
            ));
        }
        Ok(key)
    }
}

/// Credential provider backed by an external CLI.
#[derive(Debug)]
pub struct CliCredentialProvider {
    admin: CredentialCommand,
    regular: CredentialCommand,
    admin_key: OnceCell<String>,
    api_key: OnceCell<String>,
}

impl CliCredentialProvider {
    /// Creates a provider with one command per credential level.
    #[must_use]
    pub const fn new(admin: CredentialCommand, regular: CredentialCommand) -> Self {
        Self {
            admin,
            regular,
            admin_key: OnceCell::const_new(),
            api_key: OnceCell::const_new(),
        }
    }
}

#[async_trait]
impl CredentialProvider for CliCredentialProvider {
    async fn admin_key(&self) -> Result<String, CredentialError> {
        self.admin_key
            .get_or_try_init(|| self.admin.fetch())
            .await
            .cloned()
    }

    async fn api_key(&self) -> Result<String, CredentialError> {
        self.api_key
            .get_or_try_init(|| self.regular.fetch())
            .await
            .cloned()
    }
}
