// Parsing tests for brew's JSON surfaces, using captured response shapes.

use spigot::parse::{parse_info, parse_tap_info};

const INFO_JSON: &str = r#"{
  "formulae": [
    {
      "name": "wget",
      "full_name": "wget",
      "tap": "homebrew/core",
      "desc": "Internet file retriever",
      "homepage": "https://www.gnu.org/software/wget/",
      "versions": { "stable": "1.24.5", "head": "HEAD", "bottle": true },
      "dependencies": ["libidn2", "openssl@3"],
      "build_dependencies": ["pkg-config"],
      "caveats": null,
      "installed": [
        {
          "version": "1.24.5",
          "installed_as_dependency": false,
          "installed_on_request": true,
          "time": 1718000000
        }
      ]
    }
  ],
  "casks": [
    {
      "token": "iterm2",
      "full_token": "iterm2",
      "name": ["iTerm2"],
      "desc": "Terminal emulator as alternative to Apple's Terminal app",
      "homepage": "https://iterm2.com/",
      "version": "3.5.3",
      "caveats": null
    }
  ]
}"#;

#[test]
fn info_v2_parses_formulae_and_casks() {
    let info = parse_info(INFO_JSON).unwrap();

    assert_eq!(info.formulae.len(), 1);
    let wget = &info.formulae[0];
    assert_eq!(wget.name, "wget");
    assert_eq!(wget.versions.stable.as_deref(), Some("1.24.5"));
    assert_eq!(wget.dependencies, vec!["libidn2", "openssl@3"]);
    assert_eq!(wget.caveats_text(), None);
    assert_eq!(wget.installed.len(), 1);
    assert!(wget.installed[0].installed_on_request);

    assert_eq!(info.casks.len(), 1);
    let iterm = &info.casks[0];
    assert_eq!(iterm.token, "iterm2");
    assert_eq!(iterm.version.as_deref(), Some("3.5.3"));
}

#[test]
fn caveats_survive_when_present() {
    let json = r#"{
      "formulae": [{
        "name": "postgresql@16",
        "caveats": "To start postgresql@16 now and restart at login:\n  brew services start postgresql@16"
      }]
    }"#;

    let info = parse_info(json).unwrap();
    let caveats = info.formulae[0].caveats_text().unwrap();
    assert!(caveats.contains("brew services start"));
}

#[test]
fn unknown_package_yields_empty_response() {
    let info = parse_info(r#"{"formulae": [], "casks": []}"#).unwrap();
    assert!(info.is_empty());
}

#[test]
fn extra_fields_are_tolerated() {
    // brew adds fields across releases; decoding must not depend on an
    // exact shape.
    let json = r#"{
      "formulae": [{
        "name": "jq",
        "license": "MIT",
        "ruby_source_checksum": { "sha256": "abc" },
        "versions": { "stable": "1.7.1", "bottle": true }
      }]
    }"#;
    let info = parse_info(json).unwrap();
    assert_eq!(info.formulae[0].name, "jq");
}

#[test]
fn malformed_info_is_an_error() {
    assert!(parse_info("").is_err());
    assert!(parse_info("[1, 2, 3]").is_err());
    assert!(parse_info(r#"{"formulae": [{"desc": "missing name"}]}"#).is_err());
}

const TAP_INFO_JSON: &str = r#"[
  {
    "name": "homebrew/services",
    "user": "homebrew",
    "repo": "services",
    "path": "/opt/homebrew/Library/Taps/homebrew/homebrew-services",
    "installed": true,
    "official": true,
    "formula_names": ["svc-a", "svc-b", "svc-c"],
    "formula_files": [],
    "cask_tokens": [],
    "cask_files": [],
    "command_files": [],
    "remote": "https://github.com/Homebrew/homebrew-services",
    "custom_remote": false,
    "private": false
  }
]"#;

#[test]
fn tap_info_extracts_exactly_the_claimed_fields() {
    let taps = parse_tap_info(TAP_INFO_JSON).unwrap();
    assert_eq!(taps.len(), 1);
    let tap = &taps[0];

    assert_eq!(tap.name, "homebrew/services");
    assert!(tap.official);
    assert!(tap.installed);
    assert_eq!(
        tap.homepage.as_deref(),
        Some("https://github.com/Homebrew/homebrew-services")
    );

    // Three formulae, no casks: the empty list is None, not an empty Some.
    assert_eq!(
        tap.included_formulae.as_deref().map(<[String]>::len),
        Some(3)
    );
    assert_eq!(tap.included_casks, None);
    assert_eq!(tap.number_of_packages(), 3);
}

#[test]
fn tap_remote_git_suffix_is_stripped_for_homepage() {
    let json = r#"[{
      "name": "someone/tools",
      "installed": true,
      "official": false,
      "formula_names": [],
      "cask_tokens": ["tool-app"],
      "remote": "https://github.com/someone/homebrew-tools.git"
    }]"#;

    let taps = parse_tap_info(json).unwrap();
    assert_eq!(
        taps[0].homepage.as_deref(),
        Some("https://github.com/someone/homebrew-tools")
    );
    assert_eq!(taps[0].contents_description(), "Only Casks");
}

#[test]
fn tap_info_round_trips_without_inventing_data() {
    let json = r#"[{
      "name": "bare/minimum",
      "installed": false,
      "official": false,
      "formula_names": [],
      "cask_tokens": []
    }]"#;

    let taps = parse_tap_info(json).unwrap();
    let tap = &taps[0];
    assert_eq!(tap.homepage, None);
    assert_eq!(tap.included_formulae, None);
    assert_eq!(tap.included_casks, None);
    assert_eq!(tap.number_of_packages(), 0);
}

#[test]
fn malformed_tap_info_is_an_error() {
    assert!(parse_tap_info("{}").is_err());
    assert!(parse_tap_info(r#"[{"official": true}]"#).is_err());
}
