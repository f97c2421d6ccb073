//! Incoming command requests.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A request addressed to a named command, carrying string parameters the
/// way a form submission would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRequest {
    command: String,
    params: BTreeMap<String, String>,
}

impl CommandRequest {
    /// Create a request for `command` with no parameters.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add or replace a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Name of the addressed command.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Raw parameter value, if present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Parameter value, trimmed, which must be present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the parameter is missing or blank.
    pub fn required_param(&self, name: &str) -> Result<&str> {
        match self.param(name).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            Some(_) => Err(Error::invalid_parameter(name, "must not be blank")),
            None => Err(Error::invalid_parameter(name, "is required")),
        }
    }

    /// Parameter parsed as a car identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the parameter is missing or not
    /// an integer.
    pub fn id_param(&self, name: &str) -> Result<i64> {
        let raw = self.required_param(name)?;
        raw.parse()
            .map_err(|_| Error::invalid_parameter(name, format!("'{raw}' is not a valid id")))
    }
}
