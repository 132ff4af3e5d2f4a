use std::collections::HashSet;

use crate::domain::{entities::fragment::Fragment, error::DomainError};

/// Declarative description of an update to an existing file.
///
/// The path is a pattern resolved by the orchestrator; markers are declared
/// by name and bound to the resolved path at injection time. Every declared
/// marker must be present in the target even when no fragment is emitted
/// for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InserterSpec {
    path_pattern: String,
    markers: Vec<String>,
    fragments: Vec<Fragment>,
}

impl InserterSpec {
    pub fn new(path_pattern: impl Into<String>) -> Self {
        Self {
            path_pattern: path_pattern.into(),
            markers: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// Declare a marker owned by the target file.
    pub fn with_marker(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.markers.contains(&name) {
            self.markers.push(name);
        }
        self
    }

    /// Register a fragment; registration order is insertion order.
    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    pub fn with_fragments(mut self, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        self.fragments.extend(fragments);
        self
    }

    pub fn path_pattern(&self) -> &str {
        &self.path_pattern
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Emitted fragments for one marker, in registration order.
    pub fn fragments_for<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a Fragment> {
        self.fragments
            .iter()
            .filter(move |f| f.marker() == marker && f.is_emitted())
    }

    /// Every fragment must target a declared marker.
    pub fn validate(&self) -> Result<(), DomainError> {
        let declared: HashSet<&str> = self.markers.iter().map(String::as_str).collect();
        for fragment in &self.fragments {
            if !declared.contains(fragment.marker()) {
                return Err(DomainError::InvalidMarker {
                    name: fragment.marker().to_string(),
                    reason: format!(
                        "fragment targets a marker not declared for '{}'",
                        self.path_pattern
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_for_filters_by_marker_and_flag() {
        let spec = InserterSpec::new("cmd/main.go")
            .with_marker("imports")
            .with_marker("builder")
            .with_fragment(Fragment::new("imports", "a"))
            .with_fragment(Fragment::new("builder", "b"))
            .with_fragment(Fragment::new("imports", "c").when(false))
            .with_fragment(Fragment::new("imports", "d"));

        let imports: Vec<_> = spec
            .fragments_for("imports")
            .map(|f| f.lines()[0].as_str())
            .collect();
        assert_eq!(imports, ["a", "d"]);
    }

    #[test]
    fn duplicate_marker_declarations_collapse() {
        let spec = InserterSpec::new("x.go").with_marker("a").with_marker("a");
        assert_eq!(spec.markers().len(), 1);
    }

    #[test]
    fn validate_rejects_undeclared_marker() {
        let spec = InserterSpec::new("x.go")
            .with_marker("a")
            .with_fragment(Fragment::new("b", "text"));
        assert!(matches!(
            spec.validate(),
            Err(DomainError::InvalidMarker { .. })
        ));
    }
}
