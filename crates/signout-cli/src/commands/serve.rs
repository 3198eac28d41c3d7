//! The `signout serve` command.

use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(config_path: Option<PathBuf>, bind: Option<String>) -> Result<()> {
    let mut config = signout_server::load_config_from(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    config.validate()?;

    tracing::info!(
        "loaded config: cases from {}, page limit {}/{}",
        config.cases_file.display(),
        config.default_page_limit,
        config.max_page_limit
    );

    signout_server::serve(config).await
}
