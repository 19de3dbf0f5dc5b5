// Path: crates/api/src/services/dispatch.rs

//! An explicit, validated table mapping versioned method names to handlers.
//!
//! A service builds its table once at construction. Building fails if any
//! method name is malformed or registered twice, so a service that was
//! constructed successfully can never dispatch ambiguously.

use crate::services::MethodIntent;
use crate::state::StateAccess;
use mno_types::error::{ServiceError, TransactionError};
use std::collections::BTreeMap;

/// A method handler: decodes `params`, operates on the ledger, and returns the
/// JSON-encoded result.
pub type MethodHandler<S> =
    fn(&S, &mut dyn StateAccess, &[u8]) -> Result<Vec<u8>, TransactionError>;

struct MethodEntry<S> {
    intent: MethodIntent,
    handler: MethodHandler<S>,
}

/// Checks that `name` has the form `<name>@v<version>`, where `<name>` is an
/// ASCII identifier starting with a letter and `<version>` is a positive
/// decimal integer without leading zeros.
pub fn validate_method_name(name: &str) -> Result<(), ServiceError> {
    let invalid = || ServiceError::InvalidMethodName(name.to_string());

    let (base, version) = name.split_once('@').ok_or_else(invalid)?;

    let mut chars = base.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid());
    }

    let digits = version.strip_prefix('v').ok_or_else(invalid)?;
    let well_formed = !digits.is_empty()
        && !digits.starts_with('0')
        && digits.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }
    Ok(())
}

/// Collects method registrations and validates them into a [`MethodTable`].
pub struct MethodTableBuilder<S> {
    service_id: String,
    entries: Vec<(String, MethodEntry<S>)>,
}

impl<S> MethodTableBuilder<S> {
    /// Registers one method.
    pub fn method(
        mut self,
        name: impl Into<String>,
        intent: MethodIntent,
        handler: MethodHandler<S>,
    ) -> Self {
        self.entries
            .push((name.into(), MethodEntry { intent, handler }));
        self
    }

    /// Validates every registration and produces the table.
    pub fn build(self) -> Result<MethodTable<S>, ServiceError> {
        if self.entries.is_empty() {
            return Err(ServiceError::EmptyTable(self.service_id));
        }
        let mut methods = BTreeMap::new();
        for (name, entry) in self.entries {
            validate_method_name(&name)?;
            if methods.contains_key(&name) {
                return Err(ServiceError::DuplicateMethod(name));
            }
            methods.insert(name, entry);
        }
        Ok(MethodTable {
            service_id: self.service_id,
            methods,
        })
    }
}

/// A validated mapping from method name to intent and handler.
pub struct MethodTable<S> {
    service_id: String,
    methods: BTreeMap<String, MethodEntry<S>>,
}

impl<S> MethodTable<S> {
    /// Starts building a table for the service with the given id.
    pub fn builder(service_id: impl Into<String>) -> MethodTableBuilder<S> {
        MethodTableBuilder {
            service_id: service_id.into(),
            entries: Vec::new(),
        }
    }

    /// Returns the intent of `method`, if it is registered.
    pub fn intent(&self, method: &str) -> Option<MethodIntent> {
        self.methods.get(method).map(|e| e.intent)
    }

    /// Returns the registered method names in ascending order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Invokes the handler registered for `method`.
    pub fn dispatch(
        &self,
        service: &S,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        let entry = self.methods.get(method).ok_or_else(|| {
            TransactionError::Unsupported(format!(
                "Service '{}' does not support method '{}'",
                self.service_id, method
            ))
        })?;
        tracing::debug!(
            target: "dispatch",
            service = %self.service_id,
            method,
            intent = ?entry.intent,
            "dispatching service call"
        );
        (entry.handler)(service, state, params)
    }
}
