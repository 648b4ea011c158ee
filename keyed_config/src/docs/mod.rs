//! Key documentation generated from a schema.
//!
//! [`describe`] walks a schema with the same prefix rules as the
//! materializer and reports, for every value property, the keys it is read
//! from.

use crate::{
    CandidateKeys, ConfigResult, DefaultOverrides, EngineSettings, KeyGenerator, NodeId, Property,
    Schema, ValueProperty,
};

mod ir;

pub use ir::{ConfigDocs, KeyDoc};

/// Current IR schema version.
pub const DOCS_IR_VERSION: &str = "1.0";

/// Label used in place of a list index.
const ANY_INDEX: &str = "*";

/// Document every key read when materializing `root`.
///
/// # Errors
///
/// Returns [`crate::ConfigError::UnknownNode`] when a property refers to a
/// model outside `schema`.
///
/// # Examples
///
/// ```
/// use keyed_config::{
///     ConfigModel, EngineSettings, Schema, SubConfigListProperty, ValueProperty, ValueType,
///     docs::describe,
/// };
///
/// let mut builder = Schema::builder();
/// let server = builder.add(
///     ConfigModel::new("Server").property(ValueProperty::new("port", ValueType::Unsigned)),
/// );
/// let root = builder.add(
///     ConfigModel::new("App").property(SubConfigListProperty::new("servers", server).prefix("servers")),
/// );
/// let docs = describe(&builder.build(), root, &EngineSettings::default()).expect("schema is valid");
/// let port = docs.entries.iter().find(|e| e.path == "servers[*].port").expect("port documented");
/// assert_eq!(port.keys, ["servers[*].port", "servers.port"]);
/// ```
pub fn describe(
    schema: &Schema,
    root: NodeId,
    settings: &EngineSettings,
) -> ConfigResult<ConfigDocs> {
    let model = schema.node(root)?;
    let mut walker = Walker {
        schema,
        fallback: settings.fallback_generator(),
        entries: Vec::new(),
    };
    walker.walk(root, &KeyGenerator::empty(), &DefaultOverrides::new(), "")?;
    Ok(ConfigDocs {
        ir_version: DOCS_IR_VERSION.to_owned(),
        type_name: model.type_name().to_owned(),
        entries: walker.entries,
    })
}

struct Walker<'a> {
    schema: &'a Schema,
    fallback: Option<KeyGenerator>,
    entries: Vec<KeyDoc>,
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}.{name}")
    }
}

impl Walker<'_> {
    fn walk(
        &mut self,
        node: NodeId,
        key_generator: &KeyGenerator,
        defaults: &DefaultOverrides,
        path: &str,
    ) -> ConfigResult<()> {
        let model = self.schema.node(node)?;
        let node_keys = key_generator.append(model.prefixes());
        for property in model.properties() {
            match property {
                Property::Value(value) => {
                    let default = value
                        .effective_default(defaults.get(&value.info.name))
                        .map(str::to_owned);
                    self.document(value, &node_keys, default, path);
                }
                Property::Sub(sub) => {
                    let base = if sub.reset_prefix {
                        KeyGenerator::empty()
                    } else {
                        node_keys.clone()
                    };
                    let child_path = join_path(path, &sub.info.name);
                    self.walk(
                        sub.node,
                        &base.append(&sub.prefixes),
                        &sub.default_values,
                        &child_path,
                    )?;
                }
                Property::SubList(list) => {
                    let size = list.size_property();
                    let default = size.default.clone();
                    self.document(&size, &node_keys, default, path);
                    let base = if list.reset_prefix {
                        KeyGenerator::empty()
                    } else {
                        node_keys.clone()
                    };
                    let item_keys = base.append(&list.prefixes).append_bracketed(ANY_INDEX);
                    let item_path = format!("{}[{ANY_INDEX}]", join_path(path, &list.info.name));
                    self.walk(list.node, &item_keys, &DefaultOverrides::new(), &item_path)?;
                }
            }
        }
        Ok(())
    }

    fn document(
        &mut self,
        property: &ValueProperty,
        node_keys: &KeyGenerator,
        default: Option<String>,
        path: &str,
    ) {
        let empty = KeyGenerator::empty();
        let generator = if property.reset_prefix {
            &empty
        } else {
            node_keys
        };
        let keys = CandidateKeys::build(
            generator,
            &property.lookup_keys(),
            self.fallback.as_ref(),
            property.fallback_key.as_deref(),
        );
        self.entries.push(KeyDoc {
            path: join_path(path, &property.info.name),
            keys: keys.into(),
            value_type: property.value_type.to_string(),
            default,
            description: property.info.description.clone(),
            required: property.required,
            encrypted: property.decryptor.is_some(),
        });
    }
}

#[cfg(test)]
mod tests;
