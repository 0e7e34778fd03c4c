//! Version command implementation
//!
//! Shows the crate version plus whatever build metadata was baked in at
//! compile time through `GB_COMMIT` and `GB_BUILD_TIME`.

use crate::cli::Output;
use anyhow::Result;

/// Build metadata reported by `gb version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub build_time: &'static str,
    pub platform: &'static str,
    pub arch: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GB_COMMIT").unwrap_or("unknown"),
            build_time: option_env!("GB_BUILD_TIME").unwrap_or("unknown"),
            platform: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

/// Execute the version command
pub async fn execute(output: &Output) -> Result<()> {
    let info = BuildInfo::current();

    output.header(&format!("gb v{}", info.version));
    output.key_value("Version:", info.version);
    output.key_value("Commit:", info.commit);
    output.key_value("Built:", info.build_time);
    output.key_value("Profile:", if cfg!(debug_assertions) { "debug" } else { "release" });
    output.key_value("Platform:", &format!("{}/{}", info.platform, info.arch));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_uses_package_version() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.commit.is_empty());
        assert!(!info.platform.is_empty());
    }
}
