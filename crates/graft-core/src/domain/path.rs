//! Path pattern resolution.
//!
//! Patterns use `%[...]` placeholders:
//!
//! | Placeholder | Value |
//! |-------------|-------|
//! | `%[group]` | resource group, lower-cased |
//! | `%[version]` | resource version |
//! | `%[kind]` | resource kind, lower-cased |
//! | `%[Kind]` | resource kind as written |
//! | `%[plural]` | resource plural |
//! | `%[package-name]` | safe package name of the group |
//! | `%[domain]` | resource domain |
//! | `%[project-name]` | project name |
//!
//! A segment made only of `%[group]` disappears in single-group projects and
//! for core resources, so `api/%[group]/v1` becomes `api/v1` rather than
//! `api//v1`. Inside a longer segment `%[group]` is always substituted:
//! `config/samples/%[group]_%[version]_%[kind].yaml` names the group in
//! every layout.

use std::path::{Component, Path};

use crate::domain::{
    entities::{common::RelativePath, project::ProjectContext, resource::ResourceDescriptor},
    error::DomainError,
};

const GROUP_SEGMENT: &str = "%[group]";
const PROJECT_NAME: &str = "%[project-name]";
const RESOURCE_PLACEHOLDERS: &[&str] = &[
    "%[group]",
    "%[version]",
    "%[kind]",
    "%[Kind]",
    "%[plural]",
    "%[package-name]",
    "%[domain]",
];

/// Resolve `pattern` into a concrete project-relative path.
///
/// Pure: the same inputs always give the same path.
pub fn resolve_path(
    pattern: &str,
    resource: Option<&ResourceDescriptor>,
    project: Option<&ProjectContext>,
) -> Result<RelativePath, DomainError> {
    let fail = |reason: String| DomainError::PathResolution {
        pattern: pattern.to_string(),
        reason,
    };

    if resource.is_none() {
        if let Some(p) = RESOURCE_PLACEHOLDERS.iter().find(|p| pattern.contains(**p)) {
            return Err(fail(format!("{p} used without a resource")));
        }
    }
    if project.is_none() && pattern.contains(PROJECT_NAME) {
        return Err(fail(format!("{PROJECT_NAME} used without a project")));
    }

    let multi_group = project.is_some_and(ProjectContext::is_multi_group);
    let keep_group = multi_group && resource.is_some_and(ResourceDescriptor::has_group);

    let mut segments = Vec::new();
    for segment in pattern.split('/') {
        if segment == GROUP_SEGMENT && !keep_group {
            continue;
        }
        let mut value = segment.to_string();
        if let Some(resource) = resource {
            value = resource.replace(&value);
        }
        if let Some(project) = project {
            value = value.replace(PROJECT_NAME, project.project_name());
        }
        segments.push(value);
    }

    let resolved = segments.join("/");
    if let Some(start) = resolved.find("%[") {
        let end = resolved[start..]
            .find(']')
            .map_or(resolved.len(), |i| start + i + 1);
        return Err(fail(format!(
            "unknown placeholder '{}'",
            &resolved[start..end]
        )));
    }
    if resolved.trim_matches('/').is_empty() {
        return Err(fail("resolves to an empty path".into()));
    }
    if resolved.starts_with('/') || Path::new(&resolved).is_absolute() {
        return Err(fail(format!("resolves to absolute path '{resolved}'")));
    }
    if Path::new(&resolved)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(fail(format!("'{resolved}' escapes the project root")));
    }

    RelativePath::try_new(resolved)
        .map_err(|p| fail(format!("resolves to absolute path '{}'", p.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cronjob() -> ResourceDescriptor {
        ResourceDescriptor::builder()
            .group("batch")
            .version("v1")
            .kind("CronJob")
            .domain("tutorial.io")
            .build()
            .unwrap()
    }

    fn project(multi: bool) -> ProjectContext {
        ProjectContext::new("tutorial.io/project", "tutorial.io").with_multi_group(multi)
    }

    #[test]
    fn single_group_drops_group_segment() {
        let path = resolve_path(
            "api/%[group]/%[version]/%[kind]_types.go",
            Some(&cronjob()),
            Some(&project(false)),
        )
        .unwrap();
        assert_eq!(path.to_slash_string(), "api/v1/cronjob_types.go");
    }

    #[test]
    fn embedded_group_is_substituted_in_single_group_projects() {
        let path = resolve_path(
            "config/samples/%[group]_%[version]_%[kind].yaml",
            Some(&cronjob()),
            Some(&project(false)),
        )
        .unwrap();
        assert_eq!(path.to_slash_string(), "config/samples/batch_v1_cronjob.yaml");
    }

    #[test]
    fn multi_group_keeps_group_segment() {
        let path = resolve_path(
            "api/%[group]/%[version]/%[kind]_types.go",
            Some(&cronjob()),
            Some(&project(true)),
        )
        .unwrap();
        assert_eq!(path.to_slash_string(), "api/batch/v1/cronjob_types.go");
    }

    #[test]
    fn multi_group_core_resource_drops_group_segment() {
        let core = ResourceDescriptor::builder()
            .version("v1")
            .kind("Pod")
            .build()
            .unwrap();
        let path = resolve_path(
            "api/%[group]/%[version]/%[kind]_types.go",
            Some(&core),
            Some(&project(true)),
        )
        .unwrap();
        assert_eq!(path.to_slash_string(), "api/v1/pod_types.go");
    }

    #[test]
    fn substitutes_project_name() {
        let path = resolve_path(
            "config/charts/%[project-name]/.helmignore",
            None,
            Some(&project(false)),
        )
        .unwrap();
        assert_eq!(path.to_slash_string(), "config/charts/project/.helmignore");
    }

    #[test]
    fn kind_placeholders_keep_or_lower_case() {
        let path = resolve_path("%[Kind]/%[kind].go", Some(&cronjob()), None).unwrap();
        assert_eq!(path.to_slash_string(), "CronJob/cronjob.go");
    }

    #[test]
    fn resource_placeholder_without_resource_fails() {
        let err = resolve_path("api/%[version]/x.go", None, Some(&project(false))).unwrap_err();
        assert!(matches!(err, DomainError::PathResolution { .. }));
    }

    #[test]
    fn unknown_placeholder_fails() {
        let err = resolve_path("api/%[flavour]/x.go", Some(&cronjob()), None).unwrap_err();
        match err {
            DomainError::PathResolution { reason, .. } => assert!(reason.contains("%[flavour]")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_and_absolute_results_fail() {
        assert!(resolve_path("%[group]", Some(&cronjob()), None).is_err());
        assert!(resolve_path("/etc/passwd", None, None).is_err());
        assert!(resolve_path("../outside.go", None, None).is_err());
    }

    proptest! {
        #[test]
        fn resolution_is_pure(
            group in "[a-z]{0,8}",
            kind in "[A-Z][a-zA-Z]{0,10}",
            multi in any::<bool>(),
        ) {
            let resource = ResourceDescriptor::builder()
                .group(group)
                .version("v1")
                .kind(kind)
                .build()
                .unwrap();
            let project = project(multi);
            let pattern = "api/%[group]/%[version]/%[kind]_types.go";

            let first = resolve_path(pattern, Some(&resource), Some(&project)).unwrap();
            let second = resolve_path(pattern, Some(&resource), Some(&project)).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert!(!first.to_slash_string().contains("//"));
        }
    }
}
