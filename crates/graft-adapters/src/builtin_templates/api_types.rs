//! The `<kind>_types.go` schema file for a new API.

use graft_core::{
    application::ports::TemplateBuilder,
    domain::{ExistencePolicy, Facet, Facets, TemplateSpec},
    error::GraftResult,
};

/// Path pattern; the group segment drops out in single-group projects.
pub const TYPES_PATH: &str = "api/%[group]/%[version]/%[kind]_types.go";

/// Scaffolds the API types. Existing types are user-owned, so the default
/// policy refuses to replace them.
#[derive(Debug, Clone, Default)]
pub struct TypesTemplate {
    force: bool,
}

impl TypesTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl TemplateBuilder for TypesTemplate {
    fn name(&self) -> &str {
        "types"
    }

    fn required_facets(&self) -> &[Facet] {
        &[Facet::Boilerplate, Facet::Resource]
    }

    fn template(&self, _facets: &Facets) -> GraftResult<TemplateSpec> {
        Ok(TemplateSpec::parameterized(TYPES_PATH, TYPES_TEMPLATE)
            .with_policy(ExistencePolicy::Error)
            .with_force(self.force))
    }
}

const TYPES_TEMPLATE: &str = r#"{{boilerplate}}

package {{resource.version}}

import (
	metav1 "k8s.io/apimachinery/pkg/apis/meta/v1"
)

// EDIT THIS FILE!  THIS IS SCAFFOLDING FOR YOU TO OWN!
// NOTE: json tags are required.  Any new fields you add must have json tags for the fields to be serialized.

// {{resource.kind}}Spec defines the desired state of {{resource.kind}}
type {{resource.kind}}Spec struct {
	// INSERT ADDITIONAL SPEC FIELDS - desired state of cluster
	// Important: Run "make" to regenerate code after modifying this file

	// Foo is an example field of {{resource.kind}}. Edit {{lower resource.kind}}_types.go to remove/update
	Foo string `json:"foo,omitempty"`
}

type {{resource.kind}}Phase string

// These are the valid phases of {{resource.kind}}.
const (
	{{resource.kind}}Pending {{resource.kind}}Phase = "Pending"
	{{resource.kind}}Unknown {{resource.kind}}Phase = "Unknown"
	{{resource.kind}}Active  {{resource.kind}}Phase = "Active"
)

// {{resource.kind}}Status defines the observed state of {{resource.kind}}
type {{resource.kind}}Status struct {
	// Phase represents the current phase of {{resource.kind}}.
	//+kubebuilder:default:=Unknown
	Phase {{resource.kind}}Phase `json:"phase,omitempty"`
	// Represents the observations of a {{resource.kind}}'s current state.
	// {{resource.kind}}.status.conditions.type are: "Available", "Progressing", and "Degraded"
	// {{resource.kind}}.status.conditions.status are one of True, False, Unknown.
	// {{resource.kind}}.status.conditions.reason the value should be a CamelCase string and producers of specific
	// condition types may define expected values and meanings for this field, and whether the values
	// are considered a guaranteed API.
	// {{resource.kind}}.status.conditions.Message is a human readable message indicating details about the transition.

	Conditions []metav1.Condition `json:"conditions,omitempty" patchStrategy:"merge" patchMergeKey:"type" protobuf:"bytes,1,rep,name=conditions"`
}

//+kubebuilder:object:root=true
//+kubebuilder:subresource:status
{{#if resource.cluster_scoped}}{{#if resource.irregular_plural}}//+kubebuilder:resource:path={{resource.plural}},scope=Cluster
{{else}}//+kubebuilder:resource:scope=Cluster
{{/if}}{{else}}{{#if resource.irregular_plural}}//+kubebuilder:resource:path={{resource.plural}}
{{/if}}{{/if}}

// {{resource.kind}} is the Schema for the {{resource.plural}} API
type {{resource.kind}} struct {
	metav1.TypeMeta   `json:",inline"`
	metav1.ObjectMeta `json:"metadata,omitempty"`

	Spec   {{resource.kind}}Spec   `json:"spec,omitempty"`
	Status {{resource.kind}}Status `json:"status,omitempty"`
}

//+kubebuilder:object:root=true

// {{resource.kind}}List contains a list of {{resource.kind}}
type {{resource.kind}}List struct {
	metav1.TypeMeta `json:",inline"`
	metav1.ListMeta `json:"metadata,omitempty"`
	Items           []{{resource.kind}} `json:"items"`
}

func init() {
	SchemeBuilder.Register(&{{resource.kind}}{}, &{{resource.kind}}List{})
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HandlebarsRenderer;
    use graft_core::{
        application::ports::TemplateRenderer,
        domain::{RenderContext, ResourceDescriptor},
    };

    fn render(resource: &ResourceDescriptor) -> String {
        let ctx = RenderContext::new()
            .with_boilerplate("")
            .with_resource(resource, None);
        HandlebarsRenderer::new().render(TYPES_TEMPLATE, &ctx).unwrap()
    }

    fn cronjob() -> graft_core::domain::ResourceDescriptorBuilder {
        ResourceDescriptor::builder()
            .group("batch")
            .version("v1")
            .kind("CronJob")
    }

    #[test]
    fn default_resource_has_no_scope_annotations() {
        let out = render(&cronjob().build().unwrap());
        assert!(out.contains("package v1"));
        assert!(out.contains("type CronJobSpec struct {"));
        assert!(out.contains("Edit cronjob_types.go"));
        assert!(out.contains("`json:\"foo,omitempty\"`"));
        assert!(!out.contains("kubebuilder:resource:"));
    }

    #[test]
    fn cluster_scoped_resource_is_annotated() {
        let out = render(&cronjob().cluster_scoped(true).build().unwrap());
        assert!(out.contains("//+kubebuilder:resource:scope=Cluster\n"));
        assert!(!out.contains("path="));
    }

    #[test]
    fn irregular_plural_is_annotated() {
        let out = render(&cronjob().plural("cronjobz").build().unwrap());
        assert!(out.contains("//+kubebuilder:resource:path=cronjobz\n"));
        assert!(!out.contains("scope=Cluster"));
    }

    #[test]
    fn both_predicates_share_one_annotation() {
        let out = render(
            &cronjob()
                .plural("cronjobz")
                .cluster_scoped(true)
                .build()
                .unwrap(),
        );
        assert!(out.contains("//+kubebuilder:resource:path=cronjobz,scope=Cluster\n"));
    }

    #[test]
    fn error_policy_unless_forced() {
        let facets = Facets::new();
        let spec = TypesTemplate::new().template(&facets).unwrap();
        assert_eq!(spec.policy(), ExistencePolicy::Error);
        assert!(!spec.force());
        assert!(TypesTemplate::new().with_force(true).template(&facets).unwrap().force());
    }
}
