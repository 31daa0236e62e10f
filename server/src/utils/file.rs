//! File utility functions

use std::path::PathBuf;

/// Expand a path string to an absolute path.
///
/// Handles tilde expansion (`~` or `~/path` to the home directory), relative
/// paths (`.`, `..`, `./foo`, bare names) resolved against the current
/// working directory, and passes absolute paths through unchanged.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(expand_path("/etc/config"), PathBuf::from("/etc/config"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let result = expand_path("~/.facetgrid");
        assert!(result.is_absolute());
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".facetgrid"));
    }

    #[test]
    fn test_expand_path_tilde_only() {
        let result = expand_path("~");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(result, home);
        }
    }

    #[test]
    fn test_expand_path_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("./tables"), cwd.join("./tables"));
        assert_eq!(expand_path("tables"), cwd.join("tables"));
        assert_eq!(expand_path(".."), cwd.join(".."));
    }

    #[test]
    fn test_expand_path_trims_whitespace() {
        assert_eq!(expand_path("  /data/tables  "), PathBuf::from("/data/tables"));
    }

    #[test]
    fn test_expand_path_empty_returns_cwd() {
        let result = expand_path("");
        assert!(result.is_absolute());
        assert!(!result.as_os_str().is_empty());
    }
}
