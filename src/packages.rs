//! Installed package model
//!
//! Packages are identified by name and rebuilt wholesale on every refresh.
//! Name and version come from brew itself; install date and on-disk size
//! are read from the keg directory under the Cellar (or Caskroom), which is
//! where that metadata actually lives.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use walkdir::WalkDir;

use crate::brew;
use crate::config::SortOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Formula,
    Cask,
}

impl PackageKind {
    pub fn label(&self) -> &'static str {
        match self {
            PackageKind::Formula => "formula",
            PackageKind::Cask => "cask",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub kind: PackageKind,
    pub installed: bool,
    pub installed_on: Option<DateTime<Local>>,
    pub size_bytes: Option<u64>,
    pub caveats: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: PackageKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
            installed: true,
            installed_on: None,
            size_bytes: None,
            caveats: None,
        }
    }

    /// Directory holding this package's installed payload.
    pub fn keg_path(&self) -> PathBuf {
        let root = match self.kind {
            PackageKind::Formula => brew::cellar_path(),
            PackageKind::Cask => brew::caskroom_path(),
        };
        root.join(&self.name).join(&self.version)
    }

    /// Fill install date and size from the keg directory, when it exists.
    pub fn enrich_from_disk(&mut self) {
        let path = self.keg_path();
        let Ok(metadata) = std::fs::metadata(&path) else {
            return;
        };
        if let Ok(modified) = metadata.modified() {
            self.installed_on = Some(modified.into());
        }
        self.size_bytes = Some(directory_size(&path));
    }
}

/// Parse one `brew list --versions` line (`name v1 [v2 ...]`).
/// Multiple installed versions collapse to the last (newest) one.
pub fn parse_versions_line(line: &str, kind: PackageKind) -> Option<Package> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let version = parts.next_back()?;
    Some(Package::new(name, version, kind))
}

/// Total size of all files under a directory.
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Order a package list per the user's sorting preference.
pub fn sort_packages(packages: &mut [Package], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::Alphabetically => {
            packages.sort_by(|a, b| a.name.cmp(&b.name));
        }
        SortOrder::InstallDate => {
            // Newest installs first; packages without a date sink to the end.
            packages.sort_by(|a, b| b.installed_on.cmp(&a.installed_on));
        }
        SortOrder::Size => {
            packages.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn dated(name: &str, secs: u64, size: u64) -> Package {
        let mut package = Package::new(name, "1.0", PackageKind::Formula);
        package.installed_on =
            Some(DateTime::from(SystemTime::UNIX_EPOCH + Duration::from_secs(secs)));
        package.size_bytes = Some(size);
        package
    }

    #[test]
    fn parses_versions_line() {
        let package = parse_versions_line("wget 1.21.4", PackageKind::Formula).unwrap();
        assert_eq!(package.name, "wget");
        assert_eq!(package.version, "1.21.4");
        assert!(package.installed);
    }

    #[test]
    fn multiple_versions_take_the_newest() {
        let package = parse_versions_line("python@3.12 3.12.1 3.12.4", PackageKind::Formula)
            .unwrap();
        assert_eq!(package.version, "3.12.4");
    }

    #[test]
    fn blank_line_yields_nothing() {
        assert!(parse_versions_line("", PackageKind::Formula).is_none());
        assert!(parse_versions_line("   ", PackageKind::Cask).is_none());
    }

    #[test]
    fn sorts_alphabetically() {
        let mut packages = vec![dated("zsh", 2, 5), dated("bat", 1, 9)];
        sort_packages(&mut packages, SortOrder::Alphabetically);
        assert_eq!(packages[0].name, "bat");
    }

    #[test]
    fn sorts_newest_install_first() {
        let mut packages = vec![dated("old", 100, 1), dated("new", 5000, 1)];
        sort_packages(&mut packages, SortOrder::InstallDate);
        assert_eq!(packages[0].name, "new");
    }

    #[test]
    fn sorts_largest_first_with_unknown_sizes_last() {
        let mut packages = vec![
            dated("small", 1, 10),
            Package::new("unknown", "1.0", PackageKind::Formula),
            dated("big", 1, 10_000),
        ];
        sort_packages(&mut packages, SortOrder::Size);
        assert_eq!(packages[0].name, "big");
        assert_eq!(packages[2].name, "unknown");
    }

    #[test]
    fn none_keeps_original_order() {
        let mut packages = vec![dated("b", 1, 1), dated("a", 2, 2)];
        sort_packages(&mut packages, SortOrder::None);
        assert_eq!(packages[0].name, "b");
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn directory_size_sums_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a"), vec![0u8; 100]).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/b"), vec![0u8; 50]).unwrap();
        assert_eq!(directory_size(dir.path()), 150);
    }
}
