//! Scaffold markers.
//!
//! A marker is a named anchor inside a generated file, written once as a
//! comment line when the file is created and found again by exact match on
//! every later injection. The sentinel text is an on-disk contract:
//!
//! ```text
//! <comment> +graft:scaffold:<owning path>:<marker name>
//! ```
//!
//! `<comment>` is `//` for C-family sources and `#` for everything else
//! (YAML, TOML, shell, Makefiles). The owning path always uses `/`.

use std::fmt;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Fixed prefix shared by every sentinel.
pub const MARKER_PREFIX: &str = "+graft:scaffold";

const SLASH_COMMENT_EXTENSIONS: &[&str] = &[
    "go", "rs", "c", "h", "cc", "cpp", "hpp", "java", "js", "ts", "proto",
];

/// Line comment token used to embed a sentinel into a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    Slash,
    Hash,
}

impl CommentStyle {
    pub fn for_path(path: &RelativePath) -> Self {
        match path.extension() {
            Some(ext) if SLASH_COMMENT_EXTENSIONS.contains(&ext) => Self::Slash,
            _ => Self::Hash,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Slash => "//",
            Self::Hash => "#",
        }
    }
}

/// A named anchor owned by one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    path: RelativePath,
    name: String,
}

impl Marker {
    /// Create a marker for `name` inside the file at `path`.
    ///
    /// Names must be non-empty and free of whitespace and `:`, otherwise the
    /// sentinel could not be matched back unambiguously.
    pub fn new(path: RelativePath, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::InvalidMarker {
                name,
                reason: "name cannot be empty".into(),
            });
        }
        if name.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(DomainError::InvalidMarker {
                name,
                reason: "name cannot contain whitespace or ':'".into(),
            });
        }
        Ok(Self { path, name })
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The exact sentinel line text, without indentation.
    pub fn sentinel(&self) -> String {
        format!(
            "{} {}:{}:{}",
            CommentStyle::for_path(&self.path).token(),
            MARKER_PREFIX,
            self.path.to_slash_string(),
            self.name
        )
    }

    /// True if `line` is this marker's sentinel, ignoring surrounding
    /// whitespace (markers are usually indented inside code blocks).
    pub fn matches(&self, line: &str) -> bool {
        line.trim() == self.sentinel()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sentinel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_marker_uses_slash_comment() {
        let m = Marker::new("cmd/main.go".into(), "imports").unwrap();
        assert_eq!(m.sentinel(), "// +graft:scaffold:cmd/main.go:imports");
    }

    #[test]
    fn yaml_marker_uses_hash_comment() {
        let m = Marker::new("config/rbac/role.yaml".into(), "rules").unwrap();
        assert_eq!(m.sentinel(), "# +graft:scaffold:config/rbac/role.yaml:rules");
    }

    #[test]
    fn matches_indented_line() {
        let m = Marker::new("main.go".into(), "builder").unwrap();
        assert!(m.matches("\t// +graft:scaffold:main.go:builder\r"));
        assert!(!m.matches("\t// +graft:scaffold:main.go:builder extra"));
        assert!(!m.matches("// +graft:scaffold:cmd/main.go:builder"));
    }

    #[test]
    fn rejects_bad_names() {
        assert!(Marker::new("main.go".into(), "").is_err());
        assert!(Marker::new("main.go".into(), "two words").is_err());
        assert!(Marker::new("main.go".into(), "a:b").is_err());
    }
}
