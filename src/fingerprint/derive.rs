//! Fingerprint derivation

use crate::fingerprint::error::ToolchainError;
use crate::fingerprint::toolchain::{InstalledToolchain, ToolchainManager};

/// Label prepended by swift.org builds to the otherwise identical banner
pub const VENDOR_LABEL: &str = "Apple";

/// Rewrites release tags the toolchain manager cannot resolve.
///
/// A tag starting with `prefix` and ending with `suffix` is replaced by what
/// lies between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

/// swiftly selects releases as `x.y.z`, not `swift-x.y.z-RELEASE`
pub const TAG_RULES: &[TagRule] = &[TagRule {
    prefix: "swift-",
    suffix: "-RELEASE",
}];

impl TagRule {
    fn apply<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix)?.strip_suffix(self.suffix)
    }
}

/// Returns the version reference the toolchain manager understands for `tag`
pub fn normalize_tag<'a>(tag: &'a str, rules: &[TagRule]) -> &'a str {
    rules
        .iter()
        .find_map(|rule| rule.apply(tag))
        .unwrap_or(tag)
}

/// Returns the fingerprint variants of a banner line
pub fn fingerprints_from_banner(banner: &str) -> Vec<String> {
    vec![banner.to_string(), format!("{} {}", VENDOR_LABEL, banner)]
}

/// Installs the toolchain for `tag`, reads its banner and uninstalls it.
///
/// The toolchain is uninstalled on every path, including a failed banner
/// query.
pub fn derive_fingerprints<M: ToolchainManager + ?Sized>(
    manager: &M,
    tag: &str,
) -> Result<Vec<String>, ToolchainError> {
    let version = normalize_tag(tag, TAG_RULES);

    let toolchain = InstalledToolchain::acquire(manager, version)?;
    let banner = toolchain.banner()?;
    toolchain.uninstall()?;

    Ok(fingerprints_from_banner(&banner))
}
