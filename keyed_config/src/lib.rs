//! Core crate for the `keyed_config` configuration engine.
//!
//! A [`Schema`] describes configuration types as models whose properties are
//! plain values, nested configurations, or lists of nested configurations.
//! The [`Materializer`] binds a model to a flat key/value [`ConfigSource`]:
//! every value property computes an ordered set of candidate keys from the
//! prefixes collected on the way down (see [`KeyGenerator`]) and takes the
//! first key the source answers, falling back to declared defaults.
//!
//! ```
//! use std::sync::Arc;
//! use keyed_config::{
//!     ConfigModel, MapSource, Materializer, Schema, SubConfigListProperty, ValueProperty,
//!     ValueType,
//! };
//!
//! let mut builder = Schema::builder();
//! let server = builder.add(
//!     ConfigModel::new("Server").property(ValueProperty::new("port", ValueType::Unsigned)),
//! );
//! let root = builder.add(
//!     ConfigModel::new("App")
//!         .prefix("app")
//!         .property(SubConfigListProperty::new("servers", server).prefix("servers").default_size(2)),
//! );
//! let source: MapSource = [
//!     ("app.servers[0].port", "8080"),
//!     ("app.servers.port", "9000"),
//! ]
//! .into_iter()
//! .collect();
//! let app = Materializer::builder(Arc::new(builder.build()), Arc::new(source))
//!     .build()
//!     .materialize(root)?;
//! let servers = app.list("servers")?.unwrap_or_default();
//! assert_eq!(servers.len(), 2);
//! assert_eq!(servers[0].get::<u16>("port")?, Some(8080));
//! assert_eq!(servers[1].get::<u16>("port")?, Some(9000));
//! # Ok::<(), std::sync::Arc<keyed_config::ConfigError>>(())
//! ```

mod error;
mod instance;
mod key;
mod list;
mod materialize;
mod schema;
mod settings;
mod source;

pub mod convert;
pub mod decrypt;
pub mod docs;
pub mod resolve;
pub mod result_ext;

pub use convert::{ConversionFailure, ConverterRegistry, StandardConverter, TypeConverter};
pub use decrypt::{Decryptor, DecryptorRegistry};
pub use error::{ConfigError, ConfigResult};
pub use instance::{ConfigInstance, PropertyAccessor, PropertyValue, checked_size};
pub use key::{CandidateKeys, KEY_SEPARATOR, KeyGenerator};
pub use list::{CreateItem, SubConfigurationList};
pub use materialize::{Materializer, MaterializerBuilder};
pub use result_ext::ConfigResultExt;
pub use schema::{
    Attributes, ConfigModel, DefaultOverrides, DefaultValue, LIST_SIZE_SUFFIX, NodeId, Property,
    PropertyInfo, Schema, SchemaBuilder, SubConfigListProperty, SubConfigProperty, ValueProperty,
    ValueType, list_size_name, merge_attributes,
};
pub use settings::{EngineSettings, ResolutionMode, SETTINGS_ENV_PREFIX};
pub use source::{ConfigSource, FigmentSource, LayeredSource, MapSource};
