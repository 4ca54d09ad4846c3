//! Operations over the brew executable
//!
//! One module per user-facing operation. Each composes the process runner,
//! the JSON parser, and the state containers; rendering stays plain
//! terminal output.

pub mod config;
pub mod info;
pub mod install;
pub mod list;
pub mod search;
pub mod tap;
pub mod uninstall;
pub mod upgrade;

pub use info::info;
pub use install::install;
pub use list::list;
pub use search::search;
pub use tap::{tap, tap_info, untap};
pub use uninstall::uninstall;
pub use upgrade::{update, upgrade};

/// Lay names out in terminal columns, column-major like `ls`.
pub(crate) fn format_columns(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80);
    let cell = items.iter().map(String::len).max().unwrap_or(0) + 2;
    let columns = (width / cell).max(1);
    let rows = items.len().div_ceil(columns);

    let mut out = String::new();
    for row in 0..rows {
        for column in 0..columns {
            let index = row + column * rows;
            if let Some(item) = items.get(index) {
                out.push_str(item);
                if column + 1 < columns && index + rows < items.len() {
                    out.push_str(&" ".repeat(cell - item.len()));
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Nearest known name to a typo, if any candidate is close enough.
pub(crate) fn closest_match<'a>(
    target: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    candidates
        .into_iter()
        .map(|candidate| (strsim::jaro_winkler(target, candidate), candidate))
        .filter(|(score, _)| *score > 0.85)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, candidate)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_keep_every_item() {
        let items: Vec<String> = (0..7).map(|i| format!("pkg{i}")).collect();
        let out = format_columns(&items);
        for item in &items {
            assert!(out.contains(item.as_str()));
        }
    }

    #[test]
    fn empty_list_formats_to_nothing() {
        assert_eq!(format_columns(&[]), "");
    }

    #[test]
    fn suggests_near_misses_only() {
        let installed = ["wget", "ripgrep", "jq"];
        assert_eq!(
            closest_match("wgte", installed.iter().copied()),
            Some("wget".to_string())
        );
        assert_eq!(closest_match("kubernetes", installed.iter().copied()), None);
    }
}
