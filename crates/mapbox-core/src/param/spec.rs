//! Parameter descriptors.
//!
//! A [`ParamSpec`] is immutable configuration: how one input value is
//! defaulted, validated, formatted and keyed on the wire. Values themselves
//! live in request-scoped [`Bindings`](super::Bindings).

use super::ParamValue;
use crate::geo::{GeoScope, GeocodeMode};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Validation rule. Receives the value and the resolved dependency value, if any.
pub type Rule = Arc<dyn Fn(&ParamValue, Option<&ParamValue>) -> bool + Send + Sync>;

/// Output formatter. Receives the value and the resolved dependency value, if any.
pub type Formatter = Arc<dyn Fn(&ParamValue, Option<&ParamValue>) -> ParamValue + Send + Sync>;

/// Output key derivation from the resolved dependency value.
pub type KeyDeriver = Arc<dyn Fn(Option<&ParamValue>) -> Option<String> + Send + Sync>;

/// How a descriptor is keyed in the assembled output.
#[derive(Clone)]
pub enum OutputKey {
    /// Never serialized; read by path builders and dependents only
    Omit,
    /// Serialized under a fixed key
    Fixed(String),
    /// Key computed from the dependency's resolved value
    Derived(KeyDeriver),
}

impl fmt::Debug for OutputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Omit => write!(f, "Omit"),
            Self::Fixed(key) => f.debug_tuple("Fixed").field(key).finish(),
            Self::Derived(_) => write!(f, "Derived(..)"),
        }
    }
}

/// Descriptor of a single input parameter.
#[derive(Clone)]
pub struct ParamSpec {
    name: String,
    description: String,
    required: bool,
    key: OutputKey,
    default: Option<ParamValue>,
    rules: Vec<Rule>,
    formatter: Option<Formatter>,
    depends_on: Option<String>,
    scope: GeoScope,
}

impl ParamSpec {
    fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            key: OutputKey::Omit,
            default: None,
            rules: Vec::new(),
            formatter: None,
            depends_on: None,
            scope: GeoScope::BOTH,
        }
    }

    /// A parameter that must carry a value once bound.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, true)
    }

    /// A parameter that is skipped when it has no value.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, false)
    }

    /// Serialize under the parameter's own name.
    #[must_use]
    pub fn keyed(mut self) -> Self {
        self.key = OutputKey::Fixed(self.name.clone());
        self
    }

    /// Serialize under an explicit key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = OutputKey::Fixed(key.into());
        self
    }

    /// Derive the output key from the dependency's resolved value.
    #[must_use]
    pub fn with_derived_key<F>(mut self, derive: F) -> Self
    where
        F: Fn(Option<&ParamValue>) -> Option<String> + Send + Sync + 'static,
    {
        self.key = OutputKey::Derived(Arc::new(derive));
        self
    }

    /// Initial value used until a caller supplies one.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Add a validation rule over the value alone.
    #[must_use]
    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&ParamValue) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(move |value, _| rule(value)));
        self
    }

    /// Add a validation rule that also sees the dependency's resolved value.
    #[must_use]
    pub fn with_dependent_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&ParamValue, Option<&ParamValue>) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Set the output formatter.
    #[must_use]
    pub fn with_formatter<F>(mut self, format: F) -> Self
    where
        F: Fn(&ParamValue) -> ParamValue + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(move |value, _| format(value)));
        self
    }

    /// Set an output formatter that also sees the dependency's resolved value.
    #[must_use]
    pub fn with_dependent_formatter<F>(mut self, format: F) -> Self
    where
        F: Fn(&ParamValue, Option<&ParamValue>) -> ParamValue + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(format));
        self
    }

    /// Declare a dependency on an earlier parameter of the same set.
    #[must_use]
    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.depends_on = Some(name.into());
        self
    }

    /// Restrict the parameter to the given geocode modes.
    #[must_use]
    pub const fn with_scope(mut self, scope: GeoScope) -> Self {
        self.scope = scope;
        self
    }

    /// Only include in forward geocoding requests.
    #[must_use]
    pub const fn forward_only(self) -> Self {
        self.with_scope(GeoScope::FORWARD_ONLY)
    }

    /// Only include in reverse geocoding requests.
    #[must_use]
    pub const fn reverse_only(self) -> Self {
        self.with_scope(GeoScope::REVERSE_ONLY)
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable description, embedded in validation errors.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether a value is mandatory.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }

    /// Output key configuration.
    #[must_use]
    pub const fn output_key(&self) -> &OutputKey {
        &self.key
    }

    /// Returns true if the parameter ever appears in assembled output.
    #[must_use]
    pub const fn has_key(&self) -> bool {
        !matches!(self.key, OutputKey::Omit)
    }

    /// Name of the parameter this one depends on.
    #[must_use]
    pub fn dependency(&self) -> Option<&str> {
        self.depends_on.as_deref()
    }

    /// Geocode modes the parameter takes part in.
    #[must_use]
    pub const fn scope(&self) -> GeoScope {
        self.scope
    }

    /// Returns true if the parameter is kept for a request of the given mode.
    ///
    /// Requests without a classification keep every parameter.
    #[must_use]
    pub fn participates(&self, mode: Option<GeocodeMode>) -> bool {
        mode.map_or(true, |mode| self.scope.participates(mode))
    }

    /// Compute the wire value for `value`.
    #[must_use]
    pub fn format(&self, value: &ParamValue, dependency: Option<&ParamValue>) -> ParamValue {
        match &self.formatter {
            Some(format) => format(value, dependency),
            None => value.clone(),
        }
    }

    /// Resolve the output key, if the parameter has one.
    #[must_use]
    pub fn resolve_key(&self, dependency: Option<&ParamValue>) -> Option<String> {
        match &self.key {
            OutputKey::Omit => None,
            OutputKey::Fixed(key) => Some(key.clone()),
            OutputKey::Derived(derive) => derive(dependency),
        }
    }

    /// Decide whether a value should be sent.
    ///
    /// Optional parameters without a value are skipped. Otherwise the value
    /// must be present and satisfy every rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when a required value is missing or a rule fails.
    pub fn meets_inclusion_conditions(
        &self,
        value: Option<&ParamValue>,
        dependency: Option<&ParamValue>,
    ) -> Result<bool> {
        let Some(value) = value else {
            if self.required {
                return Err(self.invalid("no value"));
            }
            return Ok(false);
        };

        if self.rules.iter().all(|rule| rule(value, dependency)) {
            Ok(true)
        } else {
            Err(self.invalid(&value.to_string()))
        }
    }

    fn invalid(&self, shown: &str) -> Error {
        Error::InvalidParameter(format!("Entered {shown}...{}", self.description))
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("key", &self.key)
            .field("default", &self.default)
            .field("rules", &self.rules.len())
            .field("formatter", &self.formatter.is_some())
            .field("depends_on", &self.depends_on)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit() -> ParamSpec {
        ParamSpec::optional("limit", "Maximum number of results, between 1 and 10.")
            .keyed()
            .with_rule(|v| v.as_f64().is_some_and(|n| (1.0..=10.0).contains(&n)))
            .with_formatter(|v| v.as_f64().map_or_else(|| v.clone(), |n| n.trunc().into()))
    }

    #[test]
    fn optional_without_value_is_skipped() {
        let spec = ParamSpec::optional("bbox", "Bounding box");
        assert!(!spec.meets_inclusion_conditions(None, None).unwrap());
    }

    #[test]
    fn required_without_value_fails() {
        let spec = ParamSpec::required("query", "Search text.");
        let err = spec.meets_inclusion_conditions(None, None).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.to_string().contains("Search text."));
    }

    #[test]
    fn failing_rule_embeds_value_and_description() {
        let err = limit()
            .meets_inclusion_conditions(Some(&11.into()), None)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Entered 11..."));
        assert!(message.contains("Maximum number of results, between 1 and 10."));
    }

    #[test]
    fn passing_rules_include_value() {
        assert!(limit()
            .meets_inclusion_conditions(Some(&5.into()), None)
            .unwrap());
    }

    #[test]
    fn format_applies_formatter() {
        assert_eq!(limit().format(&7.9.into(), None), ParamValue::Number(7.0));
        let plain = ParamSpec::optional("language", "Language");
        assert_eq!(plain.format(&"en".into(), None), "en".into());
    }

    #[test]
    fn key_resolution() {
        assert_eq!(ParamSpec::optional("a", "").resolve_key(None), None);
        assert_eq!(
            ParamSpec::optional("a", "").keyed().resolve_key(None),
            Some("a".to_string())
        );
        assert_eq!(
            ParamSpec::optional("a", "").with_key("b").resolve_key(None),
            Some("b".to_string())
        );

        let derived = ParamSpec::optional("contours", "")
            .depends_on("contourType")
            .with_derived_key(|dep| {
                dep.and_then(ParamValue::as_str)
                    .map(|unit| format!("contours_{unit}"))
            });
        assert_eq!(
            derived.resolve_key(Some(&"meters".into())),
            Some("contours_meters".to_string())
        );
        assert!(derived.has_key());
    }

    #[test]
    fn dependent_rule_sees_dependency() {
        let spec = ParamSpec::optional("value", "Value within the unit's range.").with_dependent_rule(
            |v, dep| {
                let max = if dep.and_then(ParamValue::as_str) == Some("meters") {
                    100_000.0
                } else {
                    60.0
                };
                v.as_f64().is_some_and(|n| n <= max)
            },
        );
        assert!(spec
            .meets_inclusion_conditions(Some(&90.into()), Some(&"meters".into()))
            .unwrap());
        assert!(spec
            .meets_inclusion_conditions(Some(&90.into()), Some(&"minutes".into()))
            .is_err());
    }

    #[test]
    fn participation_follows_scope() {
        let spec = ParamSpec::optional("autocomplete", "").forward_only();
        assert!(spec.participates(None));
        assert!(spec.participates(Some(GeocodeMode::Forward)));
        assert!(!spec.participates(Some(GeocodeMode::Reverse)));
    }

    #[test]
    fn debug_does_not_require_closures() {
        let rendered = format!("{:?}", limit());
        assert!(rendered.contains("limit"));
    }
}
