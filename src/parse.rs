//! Typed views over brew's JSON output
//!
//! `brew info --json=v2` and `brew tap-info --json` are the two JSON
//! surfaces this crate consumes. Absent optional fields are legitimate
//! `None`/empty states; malformed JSON or a missing required field is a
//! parse error for the caller to surface.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Version metadata for a formula
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Versions {
    #[serde(default)]
    pub stable: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub bottle: bool,
}

/// One installed version entry of a formula
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledVersion {
    pub version: String,
    #[serde(default)]
    pub installed_as_dependency: bool,
    #[serde(default)]
    pub installed_on_request: bool,
    #[serde(default)]
    pub time: Option<i64>,
}

/// Formula detail record from `brew info --json=v2`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaDetails {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub tap: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub versions: Versions,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub build_dependencies: Vec<String>,
    #[serde(default)]
    pub caveats: Option<String>,
    #[serde(default)]
    pub installed: Vec<InstalledVersion>,
}

impl FormulaDetails {
    /// Caveats with whitespace-only text treated as absent.
    pub fn caveats_text(&self) -> Option<&str> {
        self.caveats
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Cask detail record from `brew info --json=v2`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaskDetails {
    pub token: String,
    #[serde(default)]
    pub full_token: String,
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub caveats: Option<String>,
}

/// Top-level shape of `brew info --json=v2`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfoResponse {
    #[serde(default)]
    pub formulae: Vec<FormulaDetails>,
    #[serde(default)]
    pub casks: Vec<CaskDetails>,
}

impl InfoResponse {
    pub fn is_empty(&self) -> bool {
        self.formulae.is_empty() && self.casks.is_empty()
    }
}

/// Raw tap record as brew emits it
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTapDetails {
    name: String,
    #[serde(default)]
    user: String,
    #[serde(default)]
    repo: String,
    #[serde(default)]
    remote: Option<String>,
    #[serde(default)]
    official: bool,
    #[serde(default)]
    installed: bool,
    #[serde(default)]
    formula_names: Vec<String>,
    #[serde(default)]
    cask_tokens: Vec<String>,
}

/// Normalized tap record: empty content lists surface as `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapInfo {
    pub name: String,
    pub homepage: Option<String>,
    pub official: bool,
    pub installed: bool,
    pub included_formulae: Option<Vec<String>>,
    pub included_casks: Option<Vec<String>>,
}

impl TapInfo {
    pub fn number_of_packages(&self) -> usize {
        let formulae = self.included_formulae.as_ref().map_or(0, Vec::len);
        let casks = self.included_casks.as_ref().map_or(0, Vec::len);
        formulae + casks
    }

    /// Human summary of what the tap ships
    pub fn contents_description(&self) -> &'static str {
        let formulae = self.included_formulae.as_ref().map_or(0, Vec::len);
        let casks = self.included_casks.as_ref().map_or(0, Vec::len);
        match (formulae, casks) {
            (0, 0) => "None",
            (_, 0) => "Only Formulae",
            (0, _) => "Only Casks",
            (f, c) if f > c => "Mostly Formulae",
            (f, c) if f < c => "Mostly Casks",
            _ => "Formulae and Casks",
        }
    }
}

fn none_if_empty(names: Vec<String>) -> Option<Vec<String>> {
    if names.is_empty() { None } else { Some(names) }
}

/// The tap-info JSON carries a git remote, not a homepage; the page people
/// actually visit is that URL without the `.git` suffix.
fn homepage_from_remote(remote: Option<String>) -> Option<String> {
    remote.map(|url| url.strip_suffix(".git").map(str::to_string).unwrap_or(url))
}

/// Decode `brew info --json=v2` output.
pub fn parse_info(json: &str) -> Result<InfoResponse> {
    Ok(serde_json::from_str(json)?)
}

/// Decode `brew tap-info --json` output (an array, one record per tap).
pub fn parse_tap_info(json: &str) -> Result<Vec<TapInfo>> {
    let raw: Vec<RawTapDetails> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|tap| TapInfo {
            name: tap.name,
            homepage: homepage_from_remote(tap.remote),
            official: tap.official,
            installed: tap.installed,
            included_formulae: none_if_empty(tap.formula_names),
            included_casks: none_if_empty(tap.cask_tokens),
        })
        .collect())
}
