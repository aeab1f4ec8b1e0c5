//! Ordered descriptor sets and request-scoped bindings.

use super::{ParamSpec, ParamValue};
use crate::geo::GeocodeMode;
use crate::query::QueryParams;
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Ordered descriptors for one endpoint.
///
/// Positional arguments bind in declaration order. A set is immutable and may
/// be shared between concurrent requests; values are held by [`Bindings`].
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    specs: Vec<ParamSpec>,
}

impl ParamSet {
    /// Create a set from descriptors in positional order.
    #[must_use]
    pub fn new(specs: Vec<ParamSpec>) -> Self {
        Self { specs }
    }

    /// Descriptors in positional order.
    #[must_use]
    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if the set has no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Look up a descriptor by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|spec| spec.name() == name)
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.specs
            .iter()
            .position(|spec| spec.name() == name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    /// Verify that every dependency names an earlier descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] for a missing or forward dependency.
    pub fn check_dependencies(&self) -> Result<()> {
        for (index, spec) in self.specs.iter().enumerate() {
            if let Some(dep) = spec.dependency() {
                let position = self.position(dep)?;
                if position >= index {
                    return Err(Error::UnknownParameter(format!(
                        "{} depends on {dep}, which is not declared before it",
                        spec.name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Start a binding with every descriptor at its default.
    #[must_use]
    pub fn bind(&self) -> Bindings<'_> {
        Bindings {
            set: self,
            values: self.specs.iter().map(|s| s.default_value().cloned()).collect(),
        }
    }

    /// Bind positional arguments over the defaults.
    ///
    /// `None` entries keep the default. Fewer arguments than descriptors is fine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if more arguments than descriptors are given.
    pub fn bind_args<I>(&self, args: I) -> Result<Bindings<'_>>
    where
        I: IntoIterator<Item = Option<ParamValue>>,
    {
        let mut bindings = self.bind();
        for (index, arg) in args.into_iter().enumerate() {
            if index >= self.specs.len() {
                return Err(Error::InvalidParameter(format!(
                    "Expected at most {} arguments",
                    self.specs.len()
                )));
            }
            if let Some(value) = arg {
                bindings.values[index] = Some(value);
            }
        }
        Ok(bindings)
    }
}

/// Request-scoped values for a [`ParamSet`].
#[derive(Debug, Clone)]
pub struct Bindings<'a> {
    set: &'a ParamSet,
    values: Vec<Option<ParamValue>>,
}

impl<'a> Bindings<'a> {
    /// The descriptor set these values belong to.
    #[must_use]
    pub const fn set(&self) -> &'a ParamSet {
        self.set
    }

    /// Assign a value. `None` leaves the current value untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] for an undeclared name.
    pub fn set_value(&mut self, name: &str, raw: Option<ParamValue>) -> Result<()> {
        let index = self.set.position(name)?;
        if let Some(value) = raw {
            self.values[index] = Some(value);
        }
        Ok(())
    }

    /// Clear a value, including its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] for an undeclared name.
    pub fn unset(&mut self, name: &str) -> Result<()> {
        let index = self.set.position(name)?;
        self.values[index] = None;
        Ok(())
    }

    /// Current unformatted value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] for an undeclared name.
    pub fn raw(&self, name: &str) -> Result<Option<&ParamValue>> {
        let index = self.set.position(name)?;
        Ok(self.values[index].as_ref())
    }

    /// Current wire value: the formatted value when both exist, else the raw value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] for an undeclared name or dependency.
    pub fn value(&self, name: &str) -> Result<Option<ParamValue>> {
        self.value_at(self.set.position(name)?)
    }

    /// Decide whether the named value should be sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the value is missing but required or breaks a rule.
    pub fn meets_inclusion_conditions(&self, name: &str) -> Result<bool> {
        self.included_at(self.set.position(name)?)
    }

    /// Validated wire value of a parameter read outside assembly, e.g. for a path.
    ///
    /// Returns `None` for an optional parameter without a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the value is missing but required or breaks a rule.
    pub fn checked(&self, name: &str) -> Result<Option<ParamValue>> {
        let index = self.set.position(name)?;
        if self.included_at(index)? {
            self.value_at(index)
        } else {
            Ok(None)
        }
    }

    /// Validated wire value that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when there is no value or it breaks a rule.
    pub fn require(&self, name: &str) -> Result<ParamValue> {
        self.checked(name)?.ok_or_else(|| {
            let description = self.set.get(name).map_or("", ParamSpec::description);
            Error::InvalidParameter(format!("Entered no value...{description}"))
        })
    }

    fn value_at(&self, index: usize) -> Result<Option<ParamValue>> {
        let spec = &self.set.specs[index];
        let Some(value) = self.values[index].as_ref() else {
            return Ok(None);
        };
        let dependency = self.dependency_at(index)?;
        Ok(Some(spec.format(value, dependency.as_ref())))
    }

    fn dependency_at(&self, index: usize) -> Result<Option<ParamValue>> {
        let spec = &self.set.specs[index];
        match spec.dependency() {
            None => Ok(None),
            Some(dep) => {
                let position = self.set.position(dep)?;
                if position >= index {
                    return Err(Error::UnknownParameter(dep.to_string()));
                }
                self.value_at(position)
            }
        }
    }

    fn included_at(&self, index: usize) -> Result<bool> {
        let dependency = self.dependency_at(index)?;
        self.set.specs[index]
            .meets_inclusion_conditions(self.values[index].as_ref(), dependency.as_ref())
    }

    /// Assemble the keyed values into query parameters.
    ///
    /// Keyless descriptors never appear. When `mode` is given, descriptors
    /// that do not take part in it are dropped without being validated.
    /// Assembly stops at the first invalid value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for the first value that fails validation.
    pub fn assemble(&self, mode: Option<GeocodeMode>) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        for (index, spec) in self.set.specs.iter().enumerate() {
            if !spec.has_key() {
                continue;
            }
            if !spec.participates(mode) {
                tracing::trace!(param = spec.name(), ?mode, "parameter gated out by geocode mode");
                continue;
            }
            if !self.included_at(index)? {
                continue;
            }
            let dependency = self.dependency_at(index)?;
            let Some(key) = spec.resolve_key(dependency.as_ref()) else {
                continue;
            };
            if let Some(value) = self.value_at(index)? {
                params.push(key, value);
            }
        }
        Ok(params)
    }

    /// Assemble the keyed values into a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for the first value that fails validation.
    pub fn assemble_body(&self, mode: Option<GeocodeMode>) -> Result<Map<String, Value>> {
        Ok(self.assemble(mode)?.into_json_map())
    }
}
