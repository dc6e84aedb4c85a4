use std::{any::Any, collections::BTreeMap, fmt};

/// A type-erased value recorded for a flag.
pub(crate) type Value = Box<dyn Payload>;

pub(crate) trait Payload: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug> Payload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The flags satisfied by one call to [`Interpreter::interpret`](crate::Interpreter::interpret),
/// keyed by flag name.
///
/// A flag may be recorded with a null value: presence, runnable and consumer flags always are.
/// Use [`Interpretation::has`] to tell "recorded null" from "never given".
#[derive(Default)]
pub struct Interpretation {
    values: BTreeMap<String, Option<Value>>,
}

impl Interpretation {
    pub(crate) fn record(&mut self, name: &str, value: Option<Value>) {
        self.values.insert(name.to_string(), value);
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value recorded for `name`.
    ///
    /// `None` if the flag was never given, was recorded as null, or holds a value of a type
    /// other than `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        let value = self.values.get(name)?.as_deref()?;
        value.as_any().downcast_ref::<T>()
    }

    /// Like [`Interpretation::get`], but falls back to `default` when the flag was never given.
    ///
    /// A flag recorded as null still yields `None`, not `default`.
    pub fn get_or<T: Any + Clone>(&self, name: &str, default: T) -> Option<T> {
        if self.has(name) {
            self.get::<T>(name).cloned()
        } else {
            Some(default)
        }
    }

    /// Names of all recorded flags, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}
