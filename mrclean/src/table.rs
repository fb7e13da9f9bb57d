//! Explicit dispatch from a type to its generated function.
//!
//! Generated code normally relies on method resolution: the inherent
//! `sanitized_to_string` of a tagged type shadows the root placeholder. Code
//! that only holds a `&dyn Any`, or that wants to check for a generated
//! function before calling it, uses a [`SanitizerTable`] instead. The generated
//! `register_sanitizations` function fills one in.

use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    fmt,
};

use thiserror::Error;

use crate::{GenerationMode, NOT_GENERATED_MESSAGE};

type SanitizeFn = Box<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;

struct Entry {
    type_name: &'static str,
    sanitize: SanitizeFn,
}

/// No generated function exists for the receiver's type.
///
/// Only release tables produce this; debug tables fall back to `Debug`
/// formatting instead.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("{}", NOT_GENERATED_MESSAGE)]
pub struct NotGenerated {
    /// Rust type name of the receiver.
    pub type_name: &'static str,
}

/// Lookup table from `TypeId` to a generated `sanitized_to_string`.
///
/// ```rust
/// use mrclean::{GenerationMode, SanitizerTable};
///
/// struct Account {
///     id: u64,
/// }
///
/// impl Account {
///     fn sanitized_to_string(&self) -> String {
///         format!("Account(id = {})", self.id)
///     }
/// }
///
/// let mut table = SanitizerTable::new(GenerationMode::Debug);
/// table.register::<Account>(Account::sanitized_to_string);
///
/// assert_eq!(table.sanitize_any(&Account { id: 7 }), Some("Account(id = 7)".to_string()));
/// ```
pub struct SanitizerTable {
    mode: GenerationMode,
    entries: HashMap<TypeId, Entry>,
}

impl SanitizerTable {
    pub fn new(mode: GenerationMode) -> Self {
        Self {
            mode,
            entries: HashMap::new(),
        }
    }

    pub const fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Registers the generated function for `T`, replacing any previous one.
    pub fn register<T: Any>(&mut self, sanitize: fn(&T) -> String) -> &mut Self {
        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                type_name: type_name::<T>(),
                sanitize: Box::new(move |value: &dyn Any| value.downcast_ref::<T>().map(sanitize)),
            },
        );
        self
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the registered types, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.values().map(|entry| entry.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Runs the generated function for `value`, if one is registered.
    pub fn sanitize_any(&self, value: &dyn Any) -> Option<String> {
        let entry = self.entries.get(&value.type_id())?;
        (entry.sanitize)(value)
    }

    /// Renders `value` through its generated function.
    ///
    /// Without one, a debug table returns the `Debug` representation and a
    /// release table returns [`NotGenerated`].
    pub fn sanitized_to_string<T>(&self, value: &T) -> Result<String, NotGenerated>
    where
        T: Any + fmt::Debug,
    {
        if let Some(rendered) = self.sanitize_any(value) {
            return Ok(rendered);
        }
        match self.mode {
            GenerationMode::Debug => Ok(format!("{value:?}")),
            GenerationMode::Release => Err(NotGenerated {
                type_name: type_name::<T>(),
            }),
        }
    }

    /// Like [`Self::sanitized_to_string`], but panics with
    /// [`NOT_GENERATED_MESSAGE`] where that returns an error. This matches the
    /// release-mode root placeholder.
    pub fn sanitize_or_panic<T>(&self, value: &T) -> String
    where
        T: Any + fmt::Debug,
    {
        match self.sanitized_to_string(value) {
            Ok(rendered) => rendered,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Debug for SanitizerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizerTable")
            .field("mode", &self.mode)
            .field("registered", &self.registered_types())
            .finish()
    }
}
