//! Status command - check external tools and the container runtime

use crate::config::Config;
use crate::error::ForgeResult;
use crate::orchestration::{ContainerRuntime, DockerRuntime};
use crate::pipeline::preflight::{self, REQUIRED_TOOLS, VALIDATOR_TOOL};
use console::{style, Emoji};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the status command
pub async fn execute(config: &Config) -> ForgeResult<()> {
    println!("{}", style("cwforge environment").bold().cyan());
    println!();

    let mut all_ok = true;

    println!("{}", style("Required tools:").bold());
    for tool in REQUIRED_TOOLS {
        if preflight::tool_available(tool.name).await {
            println!("  {} {}", CHECK, style(tool.name).green());
        } else {
            println!("  {} {} - {}", CROSS, style(tool.name).red(), tool.hint);
            all_ok = false;
        }
    }

    println!();
    println!("{}", style("Container runtime:").bold());
    let runtime = DockerRuntime::new();
    if runtime.is_available().await {
        println!("  {} {} daemon reachable", CHECK, runtime.runtime_name());
    } else {
        println!(
            "  {} {} daemon not reachable - start it before building",
            CROSS,
            runtime.runtime_name()
        );
        all_ok = false;
    }

    println!();
    println!("{}", style("Capability validator:").bold());
    if preflight::tool_available(VALIDATOR_TOOL).await {
        println!("  {} {}", CHECK, style(VALIDATOR_TOOL).green());
    } else {
        println!(
            "  {} {} - not installed, validation will be skipped. Install: cargo install cosmwasm-check",
            WARN,
            style(VALIDATOR_TOOL).yellow()
        );
    }

    println!();
    println!("{}", style("Build settings:").bold());
    println!("  image:        {}", config.optimizer.image);
    println!("  platform:     {}", config.optimizer.resolved_platform());
    println!("  capabilities: {}", config.artifact.capabilities.join(","));

    println!();
    if all_ok {
        println!("{}", style("All critical checks passed").green().bold());
    } else {
        println!(
            "{}",
            style("Some checks failed - see above for details").yellow().bold()
        );
    }

    Ok(())
}
