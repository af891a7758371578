//! Build command - run the release pipeline

use crate::config::Config;
use crate::error::ForgeResult;
use crate::orchestration::DockerRuntime;
use crate::pipeline::{self, BuildContext};
use console::style;
use std::path::Path;
use tracing::debug;

/// Execute the build command
pub async fn execute(project: &Path, config: &Config) -> ForgeResult<()> {
    let ctx = BuildContext::resolve(project, config)?;
    debug!("Build context: {:?}", ctx);

    let runtime = DockerRuntime::new();
    let artifact = pipeline::run_build(&runtime, &ctx).await?;

    println!();
    println!(
        "{} Optimized artifact at {}",
        style("✓").green().bold(),
        style(artifact.path.display()).cyan()
    );
    println!("  sha256: {}", artifact.digest);
    Ok(())
}
