//! Compile-time build metadata for the startup banner and `--version`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("EML_REPL_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("EML_REPL_BUILD_TIMESTAMP");

/// Long `--version` text: version plus commit and build time.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("EML_REPL_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("EML_REPL_BUILD_TIMESTAMP")
);

/// Banner line printed when the interactive view starts.
pub fn banner_line() -> String {
    format!("eml-repl v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_line_carries_version_and_build_fields() {
        let text = banner_line();
        assert!(text.starts_with("eml-repl v"));
        assert!(text.contains(VERSION));
        assert!(text.contains(GIT_COMMIT));
        assert!(text.contains(BUILD_TIMESTAMP));
    }

    #[test]
    fn long_version_lists_commit_and_build_time() {
        assert!(LONG_VERSION.starts_with(VERSION));
        assert!(LONG_VERSION.contains("\ncommit: "));
        assert!(LONG_VERSION.contains("\nbuilt: "));
    }
}
