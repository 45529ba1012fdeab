//! Declaration lowering for the structured-document backend.
//!
//! Field order per kind is fixed so output is stable:
//!
//! - `Resource`: `type`, `name`, `token`, `logicalName`, `attributes`, then `options` when the resource has any.
//! - `LocalVariable` / `OutputVariable`: `type`, `name`, `logicalName`, `value`.
//! - `ConfigVariable`: `type`, `configType`, `name`, `logicalName`, then `defaultValue` when declared.

use indexmap::IndexMap;

use infragen_core::ir::{Attribute, ConfigVariable, LocalVariable, OutputVariable, PackageRef, Resource};
use infragen_core::lower::{NodeLowering, lower_expr};
use infragen_core::vocab::tags::TagId;

use super::JsonLowering;
use crate::backend::document::{Document, Record};

impl NodeLowering for JsonLowering {
    type Declaration = Document;

    fn resource(&self, resource: &Resource) -> Document {
        let options = (!resource.options.is_empty()).then(|| self.attribute_map(&resource.options));

        Record::tagged(TagId::Resource)
            .field("name", resource.name.as_str())
            .field("token", resource.token.as_str())
            .field("logicalName", resource.logical_name())
            .field("attributes", self.attribute_map(&resource.inputs))
            .field_if("options", options)
            .into()
    }

    fn local_variable(&self, variable: &LocalVariable) -> Document {
        Record::tagged(TagId::LocalVariable)
            .field("name", variable.name.as_str())
            .field("logicalName", variable.logical_name())
            .field("value", lower_expr(self, &variable.definition))
            .into()
    }

    fn output_variable(&self, output: &OutputVariable) -> Document {
        Record::tagged(TagId::OutputVariable)
            .field("name", output.name.as_str())
            .field("logicalName", output.logical_name())
            .field("value", lower_expr(self, &output.value))
            .into()
    }

    fn config_variable(&self, config: &ConfigVariable) -> Document {
        let default_value = config.default_value.as_ref().map(|e| lower_expr(self, e));

        Record::tagged(TagId::ConfigVariable)
            .field("configType", config.config_type.as_str())
            .field("name", config.name.as_str())
            .field("logicalName", config.logical_name())
            .field_if("defaultValue", default_value)
            .into()
    }
}

impl JsonLowering {
    /// Attributes keyed by name, in declaration order. A repeated name keeps its first position.
    fn attribute_map(&self, attributes: &[Attribute]) -> IndexMap<String, Document> {
        attributes
            .iter()
            .map(|attr| (attr.name.clone(), lower_expr(self, &attr.value)))
            .collect()
    }
}

/// `{"name": ..., "version": ...}`; an unpinned version is written as `null`.
pub(super) fn lower_package(package: &PackageRef) -> Document {
    Record::new()
        .field("name", package.name.as_str())
        .field("version", package.version.as_deref())
        .into()
}
