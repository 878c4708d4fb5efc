//! CLI vs. template catalog version compatibility

use semver::Version;

/// Parse a version string, accepting an optional leading `v`
pub fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// Warn when the catalog was written for a newer CLI than the one running.
///
/// Versions that don't parse are not compared.
pub fn check_compatibility(
    cli_version: &str,
    catalog_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli = parse_version(cli_version)?;
    let catalog = parse_version(catalog_version)?;

    if cli >= catalog {
        return None;
    }

    Some(format!(
        "These templates need CLI version {} or newer, you are running {}. Update with: {}",
        catalog, cli, upgrade_command
    ))
}
