//! Stored value properties and their resolution timing.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::resolve::{ResolutionContext, ValueResolution};
use crate::{ConfigResult, ResolutionMode};

#[derive(Clone, Debug, PartialEq)]
enum Binding {
    Static(Option<Value>),
    Dynamic,
}

/// A value property as stored on an instance.
///
/// Static values were resolved once when the instance was built; dynamic
/// values re-run their [`ValueResolution`] on every [`PropertyValue::get`].
#[derive(Clone)]
pub struct PropertyValue {
    resolution: Arc<ValueResolution>,
    context: Arc<ResolutionContext>,
    binding: Binding,
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyValue")
            .field("property", &self.resolution.property())
            .field("candidates", &self.resolution.candidates().as_slice())
            .field("binding", &self.binding)
            .finish()
    }
}

impl PropertyValue {
    /// Bind `resolution` according to `mode`.
    ///
    /// Static binding resolves immediately; dynamic binding only records the
    /// resolution.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors in [`ResolutionMode::Static`].
    pub fn bind(
        resolution: ValueResolution,
        context: &Arc<ResolutionContext>,
        mode: ResolutionMode,
    ) -> ConfigResult<Self> {
        let binding = match mode {
            ResolutionMode::Static => Binding::Static(resolution.resolve(context)?),
            ResolutionMode::Dynamic => Binding::Dynamic,
        };
        Ok(Self {
            resolution: Arc::new(resolution),
            context: Arc::clone(context),
            binding,
        })
    }

    /// Current typed value, `None` when absent.
    ///
    /// # Errors
    ///
    /// Dynamic values report resolution errors here.
    pub fn get(&self) -> ConfigResult<Option<Value>> {
        match &self.binding {
            Binding::Static(value) => Ok(value.clone()),
            Binding::Dynamic => self.resolution.resolve(&self.context),
        }
    }

    /// Whether the value is re-resolved on every read.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self.binding, Binding::Dynamic)
    }

    /// The captured resolution.
    #[must_use]
    pub fn resolution(&self) -> &ValueResolution {
        &self.resolution
    }

    /// Current value rendered back to its raw form.
    ///
    /// # Errors
    ///
    /// Returns resolution or rendering errors.
    pub fn render(&self) -> ConfigResult<Option<String>> {
        self.get()?
            .map(|value| self.resolution.render(&self.context, &value))
            .transpose()
    }
}
