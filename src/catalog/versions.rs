//! Component version extraction from release notes
//!
//! Release notes carry a table with one row per source component, e.g.
//!
//! ```text
//! | `apple/swift` | https://github.com/apple/swift/releases/tag/swift-6.1-RELEASE |
//! | `swiftwasm/swiftwasm-build` | https://github.com/swiftwasm/swiftwasm-build/commit/0123abc |
//! ```
//!
//! The trailing reference of each row is the component's version.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::release::Release;

/// Component key of the compiler itself; its version names the catalog file
pub const SWIFT_COMPONENT: &str = "swift";

/// Component key of the SwiftWasm build scripts
pub const SWIFTWASM_BUILD_COMPONENT: &str = "swiftwasm-build";

/// Component name -> version reference, in the order found in the notes
pub type ComponentVersions = IndexMap<String, String>;

/// A component every catalog entry must record
struct Component {
    key: &'static str,
    repository: &'static str,
    url_prefix: &'static str,
}

const REQUIRED_COMPONENTS: [Component; 2] = [
    Component {
        key: SWIFT_COMPONENT,
        repository: "apple/swift",
        url_prefix: "https://github.com/apple/swift/releases/tag/",
    },
    Component {
        key: SWIFTWASM_BUILD_COMPONENT,
        repository: "swiftwasm/swiftwasm-build",
        url_prefix: "https://github.com/swiftwasm/swiftwasm-build/commit/",
    },
];

static COMPONENT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    REQUIRED_COMPONENTS
        .iter()
        .map(|component| {
            let pattern = format!(
                r"^\| `{}` \| {}(.+) \|$",
                regex::escape(component.repository),
                regex::escape(component.url_prefix)
            );
            let regex =
                Regex::new(&pattern).expect("component pattern built from escaped literals");
            (component.key, regex)
        })
        .collect()
});

/// Extracts the required component versions from a release's notes.
///
/// Returns `None` unless every required component has a row; partial
/// provenance never produces a catalog entry.
pub fn extract_versions(release: &Release) -> Option<ComponentVersions> {
    let mut versions = ComponentVersions::new();

    for line in release.notes().lines() {
        for (key, pattern) in COMPONENT_PATTERNS.iter() {
            if let Some(captures) = pattern.captures(line) {
                versions.insert(key.to_string(), captures[1].to_string());
                break;
            }
        }
    }

    REQUIRED_COMPONENTS
        .iter()
        .all(|component| versions.contains_key(component.key))
        .then_some(versions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWIFT_ROW: &str =
        "| `apple/swift` | https://github.com/apple/swift/releases/tag/swift-6.1-RELEASE |";
    const BUILD_ROW: &str = "| `swiftwasm/swiftwasm-build` | \
                             https://github.com/swiftwasm/swiftwasm-build/commit/5b2e1a9c |";

    fn release_with_body(body: Option<&str>) -> Release {
        Release {
            tag_name: "swift-wasm-6.1-RELEASE".to_string(),
            body: body.map(str::to_string),
            assets: vec![],
        }
    }

    #[test]
    fn extracts_both_component_versions() {
        let body = format!(
            "## Components\n\n| Component | Version |\n|---|---|\n{}\n{}\n",
            SWIFT_ROW, BUILD_ROW
        );

        let versions = extract_versions(&release_with_body(Some(&body))).unwrap();

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[SWIFT_COMPONENT], "swift-6.1-RELEASE");
        assert_eq!(versions[SWIFTWASM_BUILD_COMPONENT], "5b2e1a9c");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let body = format!("{}\r\n{}\r\n", SWIFT_ROW, BUILD_ROW);

        let versions = extract_versions(&release_with_body(Some(&body))).unwrap();

        assert_eq!(versions[SWIFT_COMPONENT], "swift-6.1-RELEASE");
    }

    #[test]
    fn rejects_release_missing_build_component() {
        let body = format!("{}\n", SWIFT_ROW);

        assert_eq!(extract_versions(&release_with_body(Some(&body))), None);
    }

    #[test]
    fn rejects_release_missing_swift_component() {
        let body = format!("{}\n", BUILD_ROW);

        assert_eq!(extract_versions(&release_with_body(Some(&body))), None);
    }

    #[test]
    fn rejects_release_without_notes() {
        assert_eq!(extract_versions(&release_with_body(None)), None);
    }

    #[test]
    fn ignores_rows_that_are_not_anchored() {
        let body = format!("see {}\n  {}\n", SWIFT_ROW, BUILD_ROW);

        assert_eq!(extract_versions(&release_with_body(Some(&body))), None);
    }

    #[test]
    fn ignores_rows_pointing_at_another_url() {
        let body = format!(
            "| `apple/swift` | https://github.com/apple/swift/commit/abc |\n{}\n",
            BUILD_ROW
        );

        assert_eq!(extract_versions(&release_with_body(Some(&body))), None);
    }

    #[test]
    fn later_row_overrides_earlier_row() {
        let body = format!(
            "{}\n{}\n{}\n",
            SWIFT_ROW,
            BUILD_ROW,
            "| `apple/swift` | https://github.com/apple/swift/releases/tag/swift-6.1.1-RELEASE |"
        );

        let versions = extract_versions(&release_with_body(Some(&body))).unwrap();

        assert_eq!(versions[SWIFT_COMPONENT], "swift-6.1.1-RELEASE");
    }
}
