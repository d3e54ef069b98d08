//! Manifest schema and the built-in branding manifest
//!
//! A manifest declares everything one run does: the assets to download and
//! the ordered text patches to apply. Specs are plain data records built
//! once at run start and consumed in declared order; the substitution
//! logic never knows where they came from, so the patch list can be tested
//! against synthetic in-memory content.
//!
//! Two sources exist: the built-in manifest ([`Manifest::builtin`]), which
//! rebrands a RustDesk source tree, and a YAML file ([`Manifest::from_file`])
//! with the same shape:
//!
//! ```yaml
//! assets:
//!   - url: https://example.com/icon.ico
//!     dest: res/icon.ico
//!     description: Windows icon
//! patches:
//!   - target: src/config.rs
//!     pattern: 'X = "[^"]*";'
//!     replacement: 'X = "${RENDEZVOUS_SERVER}";'
//!     description: server address
//! ```
//!
//! Replacement templates may reference regex capture groups (`$1`) and may
//! embed `${RENDEZVOUS_SERVER}` / `${RS_PUB_KEY}` placeholders, which the
//! orchestrator materializes from [`Secrets`] before any patch is applied.
//!
//! Patterns are applied with dot-matches-newline semantics and are written
//! so that they also match the *already patched* text: re-running the
//! pipeline substitutes the patched text to itself and reports "nothing to
//! change" instead of corrupting or missing it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::secrets::Secrets;

/// Placeholder for the rendezvous server address in replacement templates.
pub const RENDEZVOUS_SERVER_PLACEHOLDER: &str = "${RENDEZVOUS_SERVER}";
/// Placeholder for the rendezvous public key in replacement templates.
pub const RS_PUB_KEY_PLACEHOLDER: &str = "${RS_PUB_KEY}";

/// Default base URL for the built-in branding assets.
pub const DEFAULT_ASSET_BASE: &str = "https://listenandresolve.com/rustdesk";

/// Declares one asset to fetch and where to put it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Source URL for the asset bytes.
    pub url: String,
    /// Destination path, relative to the target tree root.
    pub dest: PathBuf,
    /// Human-readable description used in outcome reporting.
    pub description: String,
}

/// Declares one text substitution.
///
/// Specs are applied in declared order; a later spec observes the effects
/// of earlier specs on the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSpec {
    /// Target file path, relative to the target tree root.
    pub target: PathBuf,
    /// Regex pattern, applied with `(?s)` (dot matches newline).
    pub pattern: String,
    /// Replacement template. May reference capture groups and secret
    /// placeholders.
    pub replacement: String,
    /// Human-readable description used in outcome reporting.
    pub description: String,
}

/// Full declaration of a run: assets first, then ordered patches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub assets: Vec<ResourceSpec>,
    #[serde(default)]
    pub patches: Vec<PatchSpec>,
}

impl Manifest {
    /// Load a manifest from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ManifestRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse a manifest from YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest =
            serde_yaml::from_str(content).map_err(|e| Error::ManifestParse {
                message: e.to_string(),
                hint: Some(
                    "expected top-level 'assets:' and 'patches:' lists; see the manifest schema"
                        .to_string(),
                ),
            })?;
        Ok(manifest)
    }

    /// Replace secret placeholders in every replacement template.
    ///
    /// Called exactly once, after secret validation and before any patch
    /// is applied.
    pub fn materialize(&mut self, secrets: &Secrets) {
        for patch in &mut self.patches {
            patch.replacement = expand_secrets(&patch.replacement, secrets);
        }
    }

    /// Check that every asset URL parses and every patch pattern compiles.
    ///
    /// Used as a preflight; has no side effects.
    pub fn validate(&self) -> Result<()> {
        for asset in &self.assets {
            url::Url::parse(&asset.url)?;
        }
        for patch in &self.patches {
            regex::Regex::new(&format!("(?s){}", patch.pattern)).map_err(|e| Error::Pattern {
                description: patch.description.clone(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// The built-in manifest: rebrand a RustDesk source tree.
    ///
    /// `base_url` is the location of the branding assets, without a
    /// trailing slash.
    pub fn builtin(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Manifest {
            assets: builtin_assets(base),
            patches: builtin_patches(base),
        }
    }
}

/// Replace secret placeholders in one template string.
pub fn expand_secrets(template: &str, secrets: &Secrets) -> String {
    template
        .replace(RENDEZVOUS_SERVER_PLACEHOLDER, &secrets.rendezvous_server)
        .replace(RS_PUB_KEY_PLACEHOLDER, &secrets.rs_pub_key)
}

fn builtin_assets(base: &str) -> Vec<ResourceSpec> {
    vec![
        ResourceSpec {
            url: format!("{}/icon.ico", base),
            dest: PathBuf::from("res/icon.ico"),
            description: "Windows icon 1".to_string(),
        },
        ResourceSpec {
            url: format!("{}/icon.ico", base),
            dest: PathBuf::from("flutter/windows/runner/resources/app-icon.ico"),
            description: "Windows icon 2".to_string(),
        },
        ResourceSpec {
            url: format!("{}/icon.svg", base),
            dest: PathBuf::from("flutter/assets/icon.svg"),
            description: "Windows icon 3".to_string(),
        },
        ResourceSpec {
            url: format!("{}/AppIcon.icns", base),
            dest: PathBuf::from("flutter/macos/Runner/AppIcon.icns"),
            description: "macOS icon".to_string(),
        },
        ResourceSpec {
            url: format!("{}/logo.png", base),
            dest: PathBuf::from("flutter/assets/logo.png"),
            description: "Logo image".to_string(),
        },
    ]
}

fn builtin_patches(base: &str) -> Vec<PatchSpec> {
    vec![
        // Swap the asset-bundled logo widget for one that loads the
        // branding logo over the network. The pattern ends at the first
        // closing brace in column zero, so it matches both the stock
        // widget and the replaced one.
        PatchSpec {
            target: PathBuf::from("flutter/lib/common.dart"),
            pattern: r"Widget loadLogo\(\) \{.*?\n\}".to_string(),
            replacement: format!(
                r#"Widget loadLogo() {{
    return Container(
    width: 300,
    height: 100,
    margin: EdgeInsets.only(left: 12, right: 12, top: 12),
    child: FadeInImage.assetNetwork(
      placeholder: 'assets/logo.png', // Placeholder image while loading
      image: '{}/client.gif', // URL of the logo
      fit: BoxFit.contain,
      imageErrorBuilder: (context, error, stackTrace) {{
        return Container(); // Handle image loading error
      }},
    ),
  );
}}"#,
                base
            ),
            description: "common.dart".to_string(),
        },
        PatchSpec {
            target: PathBuf::from("src/lang/en.rs"),
            pattern: r#""doc_mac_permission",\s*"[^"]*""#.to_string(),
            replacement: format!(r#""doc_mac_permission", "{}""#, base),
            description: "en.rs".to_string(),
        },
        // Force incoming-only connections. The alternation also matches
        // the seeded form so a second run is a no-op.
        PatchSpec {
            target: PathBuf::from("libs/hbb_common/src/config.rs"),
            pattern: concat!(
                r"pub static ref HARD_SETTINGS:\s*RwLock<HashMap<String,\s*String>>\s*=\s*",
                r"(?:Default::default\(\);|\{.*?RwLock::new\(m\)\s*\};)"
            )
            .to_string(),
            replacement: r#"pub static ref HARD_SETTINGS: RwLock<HashMap<String, String>> = {
        let mut m = HashMap::new();
        m.insert("conn-type".to_string(), "incoming".to_string());
        RwLock::new(m)
    };"#
            .to_string(),
            description: "config.rs (Incoming Mode Only)".to_string(),
        },
        PatchSpec {
            target: PathBuf::from("libs/hbb_common/src/config.rs"),
            pattern: r#"pub const RENDEZVOUS_SERVERS: &\[&str\] = &\["[^"]*"\];"#.to_string(),
            replacement: format!(
                r#"pub const RENDEZVOUS_SERVERS: &[&str] = &["{}"];"#,
                RENDEZVOUS_SERVER_PLACEHOLDER
            ),
            description: "config.rs (Rendezvous Server)".to_string(),
        },
        PatchSpec {
            target: PathBuf::from("libs/hbb_common/src/config.rs"),
            pattern: r#"pub const RS_PUB_KEY: &str = "[^"]*";"#.to_string(),
            replacement: format!(
                r#"pub const RS_PUB_KEY: &str = "{}";"#,
                RS_PUB_KEY_PLACEHOLDER
            ),
            description: "config.rs (Public Key)".to_string(),
        },
        // Disable the update check by blanking its endpoint. The optional
        // group matches the already-blanked constant on re-runs.
        PatchSpec {
            target: PathBuf::from("libs/hbb_common/src/lib.rs"),
            pattern: r#"const URL: &str = "(?:https://api\.rustdesk\.com/version/latest)?";"#
                .to_string(),
            replacement: r#"const URL: &str = "";"#.to_string(),
            description: "lib.rs (Disable check update)".to_string(),
        },
        PatchSpec {
            target: PathBuf::from("flutter/lib/desktop/pages/desktop_home_page.dart"),
            pattern: r"if \(isWindows && !?bind\.isDisableInstallation\(\)\) \{".to_string(),
            replacement: "if (isWindows && bind.isDisableInstallation()) {".to_string(),
            description: "desktop_home_page.dart (Delete install Windows)".to_string(),
        },
        PatchSpec {
            target: PathBuf::from("flutter/lib/desktop/pages/desktop_home_page.dart"),
            pattern: r"!?bind\.mainIsInstalledDaemon\(prompt: false\)".to_string(),
            replacement: "bind.mainIsInstalledDaemon(prompt: false)".to_string(),
            description: "desktop_home_page.dart (Delete install macOS)".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secrets() -> Secrets {
        Secrets {
            rendezvous_server: "rdv.example.com:21116".to_string(),
            rs_pub_key: "AAAApubkey=".to_string(),
        }
    }

    #[test]
    fn test_builtin_validates() {
        Manifest::builtin(DEFAULT_ASSET_BASE).validate().unwrap();
    }

    #[test]
    fn test_builtin_shape() {
        let manifest = Manifest::builtin(DEFAULT_ASSET_BASE);
        assert_eq!(manifest.assets.len(), 5);
        assert_eq!(manifest.patches.len(), 8);
        // Later patches on the same file observe earlier ones; ordering
        // is part of the contract.
        assert_eq!(
            manifest.patches[3].description,
            "config.rs (Rendezvous Server)"
        );
    }

    #[test]
    fn test_builtin_trims_trailing_slash() {
        let manifest = Manifest::builtin("https://example.com/brand/");
        assert_eq!(manifest.assets[0].url, "https://example.com/brand/icon.ico");
    }

    #[test]
    fn test_materialize_expands_placeholders() {
        let mut manifest = Manifest::builtin(DEFAULT_ASSET_BASE);
        manifest.materialize(&test_secrets());
        let server_patch = &manifest.patches[3];
        assert!(server_patch.replacement.contains("rdv.example.com:21116"));
        assert!(!server_patch.replacement.contains("${RENDEZVOUS_SERVER}"));
        let key_patch = &manifest.patches[4];
        assert!(key_patch.replacement.contains("AAAApubkey="));
    }

    #[test]
    fn test_expand_secrets_leaves_other_text() {
        let out = expand_secrets("a ${RS_PUB_KEY} b ${OTHER}", &test_secrets());
        assert_eq!(out, "a AAAApubkey= b ${OTHER}");
    }

    #[test]
    fn test_parse_yaml_manifest() {
        let yaml = r#"
assets:
  - url: https://example.com/icon.ico
    dest: res/icon.ico
    description: Windows icon
patches:
  - target: src/config.rs
    pattern: 'X = "[^"]*";'
    replacement: 'X = "new";'
    description: constant
"#;
        let manifest = Manifest::parse(yaml).unwrap();
        assert_eq!(manifest.assets.len(), 1);
        assert_eq!(manifest.patches.len(), 1);
        assert_eq!(manifest.patches[0].target, PathBuf::from("src/config.rs"));
        manifest.validate().unwrap();
    }

    #[test]
    fn test_parse_patches_only() {
        let yaml = r#"
patches:
  - target: a.txt
    pattern: 'x'
    replacement: 'y'
    description: flip
"#;
        let manifest = Manifest::parse(yaml).unwrap();
        assert!(manifest.assets.is_empty());
        assert_eq!(manifest.patches.len(), 1);
    }

    #[test]
    fn test_parse_error_has_hint() {
        let err = Manifest::parse("patches: 42").unwrap_err();
        let display = format!("{}", err);
        assert!(display.contains("Manifest parsing error"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let manifest = Manifest {
            assets: vec![],
            patches: vec![PatchSpec {
                target: PathBuf::from("a.txt"),
                pattern: "[unclosed".to_string(),
                replacement: String::new(),
                description: "broken".to_string(),
            }],
        };
        let err = manifest.validate().unwrap_err();
        assert!(format!("{}", err).contains("broken"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let manifest = Manifest {
            assets: vec![ResourceSpec {
                url: "not a url".to_string(),
                dest: PathBuf::from("x"),
                description: "asset".to_string(),
            }],
            patches: vec![],
        };
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Manifest::from_file(Path::new("/nonexistent/manifest.yaml")).unwrap_err();
        assert!(format!("{}", err).contains("Manifest read error"));
    }
}
