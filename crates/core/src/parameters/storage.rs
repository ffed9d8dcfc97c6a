//! Parameter Storage Types
//!
//! Provides the value type and the `ParameterStore` used for robot tuning.
//! Values are looked up by short upper-case names (`LNCH_DELAY`,
//! `AUTO_DRV_TIME`, ...) and read into typed blocks at startup.

use core::fmt;

use super::error::ParameterError;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 32;

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Parse text as a value of the same type as `self`
    ///
    /// Booleans accept `0`/`1`/`true`/`false`. Returns `None` if the text
    /// does not parse as this type.
    pub fn parse_like(&self, text: &str) -> Option<ParamValue> {
        let text = text.trim();
        match self {
            ParamValue::Bool(_) => match text {
                "1" | "true" => Some(ParamValue::Bool(true)),
                "0" | "false" => Some(ParamValue::Bool(false)),
                _ => None,
            },
            ParamValue::Int(_) => text.parse().ok().map(ParamValue::Int),
            ParamValue::Float(_) => text
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ParamValue::Float),
        }
    }

    /// Read as `f32` (integers widen, booleans are 0/1)
    pub fn as_f32(&self) -> f32 {
        match *self {
            ParamValue::Bool(v) => {
                if v {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Int(v) => v as f32,
            ParamValue::Float(v) => v,
        }
    }

    /// Read as `bool` (non-zero numbers are true)
    pub fn as_bool(&self) -> bool {
        match *self {
            ParamValue::Bool(v) => v,
            ParamValue::Int(v) => v != 0,
            ParamValue::Float(v) => v != 0.0,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Parameter store for robot tuning
///
/// Values may only be set for names that were registered first. Iteration
/// follows registration order.
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
}

fn param_key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    let mut key = String::<PARAM_NAME_LEN>::new();
    key.push_str(name).map_err(|_| ParameterError::InvalidConfig)?;
    Ok(key)
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(&param_key(name).ok()?)
    }

    /// Get a numeric parameter, or `default` if absent
    pub fn get_f32(&self, name: &str, default: f32) -> f32 {
        self.get(name).map(ParamValue::as_f32).unwrap_or(default)
    }

    /// Get a boolean parameter, or `default` if absent
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.get(name).map(ParamValue::as_bool).unwrap_or(default)
    }

    /// Set parameter value
    ///
    /// The parameter must already be registered.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = param_key(name)?;
        let slot = self
            .parameters
            .get_mut(&key)
            .ok_or(ParameterError::Unknown)?;
        *slot = value;
        Ok(())
    }

    /// Set a registered parameter from text, keeping its registered type
    pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<ParamValue, ParameterError> {
        let current = *self.get(name).ok_or(ParameterError::Unknown)?;
        let value = current
            .parse_like(text)
            .ok_or(ParameterError::TypeMismatch)?;
        self.set(name, value)?;
        Ok(value)
    }

    /// Register a new parameter with its default value
    ///
    /// If the parameter already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
    ) -> Result<(), ParameterError> {
        let key = param_key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key, default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Iterate over all parameters as (name, value) pairs
    pub fn iter_all(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.parameters
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Get parameter count
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
