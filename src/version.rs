// Build-time identity from Cargo.toml

/// Package version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// "name vX.Y.Z", as printed in the startup log line.
pub fn banner() -> String {
    format!("{} v{}", NAME, VERSION)
}
