use crate::cli::init::{self, InitOptions};
use std::env;
use std::fs;
use trellis::di::ServiceContainer;
use trellis::{TrellisError, TrellisResult};

pub async fn run(
    container: &ServiceContainer,
    name: String,
    options: InitOptions,
) -> TrellisResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| TrellisError::Path(format!("Failed to get current directory: {}", e)))?;
    let target = current_dir.join(&name);

    if target.exists() {
        return Err(TrellisError::Package(format!(
            "Directory '{}' already exists",
            name
        )));
    }
    fs::create_dir_all(&target)?;

    init::run_in_dir(
        container,
        &target,
        options,
        &crate::cli::prompt::DialoguerInput,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trellis::di::mocks::{MockConfigProvider, MockProcessRunner};

    fn container() -> ServiceContainer {
        ServiceContainer::with_providers(
            Arc::new(MockConfigProvider::default()),
            Arc::new(MockProcessRunner::new()),
        )
    }

    #[tokio::test]
    async fn test_new_rejects_existing_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("taken");
        fs::create_dir_all(&target).unwrap();

        // `new` resolves against the process working directory, so drive
        // the collision check through an absolute name.
        let result = run(
            &container(),
            target.to_string_lossy().into_owned(),
            InitOptions {
                template: None,
                yes: true,
            },
        )
        .await;

        assert!(result.unwrap_err().to_string().contains("already exists"));
    }
}
