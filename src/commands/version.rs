//! Version command implementation

use anyhow::Result;

/// Version of the gilt binary, from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute the version command
pub fn execute() -> Result<()> {
    println!("{}", version_line());
    Ok(())
}

fn version_line() -> String {
    format!(
        "gilt {} ({}/{})",
        VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
