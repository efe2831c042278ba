use std::path::{Path, PathBuf};

/// Default root of the published catalog, relative to the working directory
pub const DEFAULT_CATALOG_ROOT: &str = "v1";

/// Default base URL for the GitHub REST API
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Repository whose releases feed the catalog
pub const DEFAULT_REPOSITORY: &str = "swiftwasm/swift";

/// Default toolchain manager program
pub const DEFAULT_TOOLCHAIN_MANAGER: &str = "swiftly";

/// Environment variable holding the optional GitHub bearer token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable naming an optional JSON log file
pub const LOG_FILE_ENV: &str = "SDK_CATALOG_LOG_FILE";

/// Returns the catalog root directory.
/// Uses $SDK_CATALOG_ROOT if set, otherwise ./v1.
pub fn catalog_root() -> PathBuf {
    catalog_root_with_env(std::env::var("SDK_CATALOG_ROOT").ok())
}

/// Returns the directory holding one catalog entry per release.
pub fn builds_dir() -> PathBuf {
    builds_dir_in(&catalog_root())
}

/// Returns the path to the tag-by-version table.
pub fn tag_table_path() -> PathBuf {
    tag_table_path_in(&catalog_root())
}

pub fn builds_dir_in(root: &Path) -> PathBuf {
    root.join("builds")
}

pub fn tag_table_path_in(root: &Path) -> PathBuf {
    root.join("tag-by-version.json")
}

/// Returns the GitHub API base URL, honoring $GITHUB_API_URL.
pub fn api_base_url() -> String {
    non_empty(std::env::var("GITHUB_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Returns the `owner/repo` pair whose releases are imported.
pub fn repository() -> String {
    non_empty(std::env::var("SDK_CATALOG_REPOSITORY").ok())
        .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string())
}

/// Returns the bearer token, if one is configured.
pub fn github_token() -> Option<String> {
    non_empty(std::env::var(TOKEN_ENV).ok())
}

/// Returns the toolchain manager program, honoring $SWIFTLY.
pub fn toolchain_manager() -> String {
    non_empty(std::env::var("SWIFTLY").ok())
        .unwrap_or_else(|| DEFAULT_TOOLCHAIN_MANAGER.to_string())
}

/// Returns the JSON log file path, if one is configured.
pub fn log_file() -> Option<PathBuf> {
    non_empty(std::env::var(LOG_FILE_ENV).ok()).map(PathBuf::from)
}

fn catalog_root_with_env(root: Option<String>) -> PathBuf {
    non_empty(root)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_ROOT))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_root_with_env_uses_override_when_set() {
        let root = catalog_root_with_env(Some("/srv/catalog/v1".to_string()));

        assert_eq!(root, PathBuf::from("/srv/catalog/v1"));
    }

    #[test]
    fn catalog_root_with_env_falls_back_to_v1() {
        assert_eq!(catalog_root_with_env(None), PathBuf::from("v1"));
        assert_eq!(
            catalog_root_with_env(Some("  ".to_string())),
            PathBuf::from("v1")
        );
    }

    #[test]
    fn catalog_paths_are_derived_from_root() {
        let root = PathBuf::from("v1");

        assert_eq!(builds_dir_in(&root), PathBuf::from("v1/builds"));
        assert_eq!(
            tag_table_path_in(&root),
            PathBuf::from("v1/tag-by-version.json")
        );
    }

    #[test]
    fn non_empty_treats_blank_values_as_absent() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("token".to_string())), Some("token".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
