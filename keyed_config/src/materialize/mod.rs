//! Recursive materialization of configuration models.
//!
//! [`Materializer::materialize`] walks a model's properties in declaration
//! order. Value properties resolve through their candidate keys, nested
//! configurations recurse with an extended [`KeyGenerator`], and lists
//! resolve their size before building a [`SubConfigurationList`] whose items
//! recurse with an indexed generator.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::resolve::{ResolutionContext, ValueResolution};
use crate::{
    Attributes, CandidateKeys, ConfigError, ConfigInstance, ConfigModel, ConfigResult,
    ConfigSource, ConverterRegistry, CreateItem, Decryptor, DecryptorRegistry, DefaultOverrides,
    DefaultValue, EngineSettings, KeyGenerator, NodeId, Property, PropertyAccessor, PropertyValue,
    ResolutionMode, Schema, SubConfigListProperty, SubConfigProperty, SubConfigurationList,
    TypeConverter, ValueProperty, merge_attributes,
};

mod builder;

pub use builder::MaterializerBuilder;

struct Engine {
    schema: Arc<Schema>,
    context: Arc<ResolutionContext>,
    settings: EngineSettings,
    fallback: Option<KeyGenerator>,
}

/// Binds schema models to values from a source.
///
/// Cloning is cheap; clones share the schema, source and registries.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use keyed_config::{ConfigModel, MapSource, Materializer, Schema, ValueProperty, ValueType};
///
/// let mut builder = Schema::builder();
/// let root = builder.add(
///     ConfigModel::new("App")
///         .prefix("app")
///         .property(ValueProperty::new("port", ValueType::Unsigned).default_value("8080")),
/// );
/// let source: MapSource = [("app.port", "9000")].into_iter().collect();
/// let materializer = Materializer::builder(Arc::new(builder.build()), Arc::new(source)).build();
/// let app = materializer.materialize(root)?;
/// assert_eq!(app.get::<u16>("port")?, Some(9000));
/// # Ok::<(), std::sync::Arc<keyed_config::ConfigError>>(())
/// ```
#[derive(Clone)]
pub struct Materializer {
    engine: Arc<Engine>,
}

impl fmt::Debug for Materializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Materializer")
            .field("models", &self.engine.schema.len())
            .field("settings", &self.engine.settings)
            .finish_non_exhaustive()
    }
}

impl Materializer {
    /// Start configuring a materializer over `schema` and `source`.
    #[must_use]
    pub fn builder(schema: Arc<Schema>, source: Arc<dyn ConfigSource>) -> MaterializerBuilder {
        MaterializerBuilder::new(schema, source)
    }

    fn from_parts(
        schema: Arc<Schema>,
        source: Arc<dyn ConfigSource>,
        converters: ConverterRegistry,
        decryptors: DecryptorRegistry,
        settings: EngineSettings,
    ) -> Self {
        let fallback = settings.fallback_generator();
        Self {
            engine: Arc::new(Engine {
                schema,
                context: Arc::new(ResolutionContext::new(source, converters, decryptors)),
                settings,
                fallback,
            }),
        }
    }

    /// Schema the materializer binds.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.engine.schema
    }

    /// Active engine settings.
    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.engine.settings
    }

    /// Materialize `root` with no outer prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AbstractNode`] for an abstract root before any
    /// lookup, and otherwise the first resolution error.
    pub fn materialize(&self, root: NodeId) -> ConfigResult<ConfigInstance> {
        self.materialize_with(root, &KeyGenerator::empty())
    }

    /// Materialize `root` under `key_generator`.
    ///
    /// # Errors
    ///
    /// See [`Materializer::materialize`].
    pub fn materialize_with(
        &self,
        root: NodeId,
        key_generator: &KeyGenerator,
    ) -> ConfigResult<ConfigInstance> {
        let model = self.instantiable(root)?;
        let mut instance = ConfigInstance::new(model.type_name());
        self.populate_root(model, key_generator, &mut instance)?;
        Ok(instance)
    }

    /// Materialize `root` into caller-provided storage.
    ///
    /// List containers already present on `target` are kept; their sizes are
    /// still resolved again.
    ///
    /// # Errors
    ///
    /// See [`Materializer::materialize`].
    pub fn materialize_into<A: PropertyAccessor>(
        &self,
        root: NodeId,
        key_generator: &KeyGenerator,
        target: &mut A,
    ) -> ConfigResult<()> {
        let model = self.instantiable(root)?;
        self.populate_root(model, key_generator, target)
    }

    /// Materialize `root` and bind the result to `T` via serde.
    ///
    /// # Errors
    ///
    /// Returns materialization errors and [`ConfigError::Deserialize`].
    pub fn materialize_as<T: DeserializeOwned>(&self, root: NodeId) -> ConfigResult<T> {
        self.materialize(root)?.deserialize()
    }

    fn instantiable(&self, root: NodeId) -> ConfigResult<&ConfigModel> {
        let model = self.engine.schema.node(root)?;
        if model.is_abstract() {
            return Err(ConfigError::AbstractNode {
                type_name: model.type_name().to_owned(),
            }
            .shared());
        }
        Ok(model)
    }

    fn populate_root<A: PropertyAccessor>(
        &self,
        model: &ConfigModel,
        key_generator: &KeyGenerator,
        target: &mut A,
    ) -> ConfigResult<()> {
        debug!(
            type_name = model.type_name(),
            mode = ?self.engine.settings.mode,
            "materializing configuration"
        );
        self.populate(
            model,
            key_generator,
            &DefaultOverrides::new(),
            &Attributes::new(),
            target,
        )?;
        debug!(type_name = model.type_name(), "materialized configuration");
        Ok(())
    }

    fn build_node(
        &self,
        node: NodeId,
        key_generator: &KeyGenerator,
        defaults: &DefaultOverrides,
        attributes: &Attributes,
    ) -> ConfigResult<ConfigInstance> {
        let model = self.engine.schema.node(node)?;
        let mut instance = ConfigInstance::new(model.type_name());
        self.populate(model, key_generator, defaults, attributes, &mut instance)?;
        Ok(instance)
    }

    fn populate<A: PropertyAccessor>(
        &self,
        model: &ConfigModel,
        key_generator: &KeyGenerator,
        defaults: &DefaultOverrides,
        attributes: &Attributes,
        target: &mut A,
    ) -> ConfigResult<()> {
        let node_keys = key_generator.append(model.prefixes());
        let merged = merge_attributes(attributes, model.attributes());
        for property in model.properties() {
            match property {
                Property::Value(value) => {
                    let over = defaults.get(&value.info.name);
                    let bound = self.bind_value(value, &node_keys, over, &merged)?;
                    target.set_value(&value.info.name, bound);
                }
                Property::Sub(sub) => {
                    let child = self.build_sub(sub, &node_keys, &merged)?;
                    target.set_sub(&sub.info.name, child);
                }
                Property::SubList(list) => {
                    self.bind_list(list, &node_keys, &merged, target)?;
                }
            }
        }
        Ok(())
    }

    fn bind_value(
        &self,
        property: &ValueProperty,
        node_keys: &KeyGenerator,
        over: Option<&DefaultValue>,
        attributes: &Attributes,
    ) -> ConfigResult<PropertyValue> {
        let empty = KeyGenerator::empty();
        let generator = if property.reset_prefix {
            &empty
        } else {
            node_keys
        };
        let candidates = CandidateKeys::build(
            generator,
            &property.lookup_keys(),
            self.engine.fallback.as_ref(),
            property.fallback_key.as_deref(),
        );
        let resolution = ValueResolution::new(
            property,
            candidates,
            property.effective_default(over),
            merge_attributes(attributes, &property.info.attributes),
        );
        PropertyValue::bind(resolution, &self.engine.context, self.engine.settings.mode)
    }

    fn build_sub(
        &self,
        property: &SubConfigProperty,
        node_keys: &KeyGenerator,
        attributes: &Attributes,
    ) -> ConfigResult<ConfigInstance> {
        let child_keys = base(node_keys, property.reset_prefix).append(&property.prefixes);
        self.build_node(
            property.node,
            &child_keys,
            &property.default_values,
            &merge_attributes(attributes, &property.info.attributes),
        )
    }

    fn bind_list<A: PropertyAccessor>(
        &self,
        property: &SubConfigListProperty,
        node_keys: &KeyGenerator,
        attributes: &Attributes,
        target: &mut A,
    ) -> ConfigResult<()> {
        let size_property = property.size_property();
        let size = self.bind_value(&size_property, node_keys, None, attributes)?;
        target.set_value(&size_property.info.name, size);
        if target.get_sub_list(&property.info.name).is_some() {
            return Ok(());
        }
        let list_keys = base(node_keys, property.reset_prefix).append(&property.prefixes);
        let list = SubConfigurationList::build(
            Arc::new(self.clone()),
            property,
            list_keys,
            merge_attributes(attributes, &property.info.attributes),
        )?;
        target.set_sub_list(&property.info.name, list);
        Ok(())
    }
}

fn base(node_keys: &KeyGenerator, reset_prefix: bool) -> KeyGenerator {
    if reset_prefix {
        KeyGenerator::empty()
    } else {
        node_keys.clone()
    }
}

impl CreateItem for Materializer {
    fn create_item(
        &self,
        node: NodeId,
        key_generator: &KeyGenerator,
        defaults: &DefaultOverrides,
        attributes: &Attributes,
    ) -> ConfigResult<ConfigInstance> {
        self.build_node(node, key_generator, defaults, attributes)
    }
}
