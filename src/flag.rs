use std::{any::Any, fmt, str::FromStr};

use crate::{interpretation::Value, Error, Result};

/// A named unit the [`Interpreter`](crate::Interpreter) looks for among the tokens.
///
/// A flag is known by two identifiers: its `name`, under which the value is recorded in the
/// [`Interpretation`](crate::Interpretation), and its `short` token. Either one may be used on
/// the command line, after one or two prefixes.
///
/// What happens when the flag is met depends on how it was constructed:
///
/// | constructor | takes argument | recorded value |
/// |---|---|---|
/// | [`Flag::new`] | no | null |
/// | [`Flag::runnable`] | no | null |
/// | [`Flag::supplier`] | no | whatever the closure returns |
/// | [`Flag::consumer`] | yes | null |
/// | [`Flag::function`], [`Flag::parsed`] | yes | the parsed value |
/// | [`Flag::collection`] | yes | the first element whose `Display` equals the argument |
/// | [`Flag::map`] | yes | the value of the first key whose `Display` equals the argument |
pub struct Flag {
    name: String,
    short: String,
    description: String,
    required: bool,
    kind: Kind,
}

enum Kind {
    Presence,
    Runnable(Box<dyn Fn() -> anyhow::Result<()>>),
    Supplier(Box<dyn Fn() -> anyhow::Result<Value>>),
    Consumer(Box<dyn Fn(&str) -> anyhow::Result<()>>),
    Function(Box<dyn Fn(&str) -> anyhow::Result<Value>>),
    Collection(Vec<Choice>),
    Map(Vec<Choice>),
}

struct Choice {
    key: String,
    value: Box<dyn Fn() -> Value>,
}

impl Flag {
    /// A flag whose only meaning is whether it is present.
    pub fn new(name: impl Into<String>, short: impl Into<String>) -> Flag {
        Flag::with_kind(name, short, Kind::Presence)
    }

    /// Runs `f` when the flag is present.
    pub fn runnable<F>(name: impl Into<String>, short: impl Into<String>, f: F) -> Flag
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        Flag::with_kind(name, short, Kind::Runnable(Box::new(f)))
    }

    /// Records the value produced by `f` when the flag is present.
    ///
    /// The value is always recorded as is, so a closure returning `Option<T>` records the
    /// `Option` itself and cannot produce the null marker. Use [`Flag::runnable`] for that.
    pub fn supplier<T, F>(name: impl Into<String>, short: impl Into<String>, f: F) -> Flag
    where
        T: Any + fmt::Debug,
        F: Fn() -> anyhow::Result<T> + 'static,
    {
        let supply = move || f().map(|it| Box::new(it) as Value);
        Flag::with_kind(name, short, Kind::Supplier(Box::new(supply)))
    }

    /// Hands the argument of the flag to `f`.
    pub fn consumer<F>(name: impl Into<String>, short: impl Into<String>, f: F) -> Flag
    where
        F: Fn(&str) -> anyhow::Result<()> + 'static,
    {
        Flag::with_kind(name, short, Kind::Consumer(Box::new(f)))
    }

    /// Transforms the argument of the flag with `f` and records the result.
    ///
    /// As with [`Flag::supplier`], a returned `None` is recorded as an `Option` value, not as
    /// the null marker.
    pub fn function<T, F>(name: impl Into<String>, short: impl Into<String>, f: F) -> Flag
    where
        T: Any + fmt::Debug,
        F: Fn(&str) -> anyhow::Result<T> + 'static,
    {
        let parse = move |arg: &str| f(arg).map(|it| Box::new(it) as Value);
        Flag::with_kind(name, short, Kind::Function(Box::new(parse)))
    }

    /// [`Flag::function`] with [`str::parse`] as the transform.
    pub fn parsed<T>(name: impl Into<String>, short: impl Into<String>) -> Flag
    where
        T: FromStr + Any + fmt::Debug,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        Flag::function(name, short, |arg| Ok(arg.parse::<T>()?))
    }

    /// Accepts only arguments equal to the `Display` form of one of `items`.
    ///
    /// Matching is case-sensitive, and the first matching element in iteration order wins.
    pub fn collection<T, I>(name: impl Into<String>, short: impl Into<String>, items: I) -> Flag
    where
        T: fmt::Display + Clone + Any + fmt::Debug,
        I: IntoIterator<Item = T>,
    {
        let choices = items.into_iter().map(|item| Choice::new(item.to_string(), item)).collect();
        Flag::with_kind(name, short, Kind::Collection(choices))
    }

    /// Accepts only arguments equal to the `Display` form of one of the keys of `entries`, and
    /// records the associated value.
    ///
    /// Keys are tried in iteration order, so pass an ordered map (or a `Vec` of pairs) when
    /// several keys render the same.
    pub fn map<K, V, I>(name: impl Into<String>, short: impl Into<String>, entries: I) -> Flag
    where
        K: fmt::Display,
        V: Clone + Any + fmt::Debug,
        I: IntoIterator<Item = (K, V)>,
    {
        let choices = entries.into_iter().map(|(key, value)| Choice::new(key.to_string(), value));
        Flag::with_kind(name, short, Kind::Map(choices.collect()))
    }

    fn with_kind(name: impl Into<String>, short: impl Into<String>, kind: Kind) -> Flag {
        Flag {
            name: name.into(),
            short: short.into(),
            description: String::new(),
            required: false,
            kind,
        }
    }

    /// Marks the flag as required: it must be given, or filled by a positional token.
    pub fn required(mut self) -> Flag {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Flag {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    /// Free-form text for help renderers, the interpreter never looks at it.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn expects_argument(&self) -> bool {
        match self.kind {
            Kind::Presence | Kind::Runnable(_) | Kind::Supplier(_) => false,
            Kind::Consumer(_) | Kind::Function(_) | Kind::Collection(_) | Kind::Map(_) => true,
        }
    }

    /// Produces the value recorded for this flag, `None` being the null marker.
    ///
    /// `arg` is `Some` exactly when [`Flag::expects_argument`] is true. Errors from caller
    /// closures are returned as is; the interpreter decides what to wrap.
    pub(crate) fn resolve(&self, arg: Option<&str>) -> anyhow::Result<Option<Value>> {
        match &self.kind {
            Kind::Presence => Ok(None),
            Kind::Runnable(run) => run().map(|()| None),
            Kind::Supplier(supply) => supply().map(Some),
            Kind::Consumer(consume) => consume(self.argument(arg)?).map(|()| None),
            Kind::Function(parse) => parse(self.argument(arg)?).map(Some),
            Kind::Collection(choices) | Kind::Map(choices) => {
                Ok(Some(pick(choices, self.argument(arg)?)?))
            }
        }
    }

    fn argument<'a>(&self, arg: Option<&'a str>) -> Result<&'a str> {
        arg.ok_or_else(|| Error::MissingArgument { flag: self.name.clone() })
    }
}

impl Choice {
    fn new<T: Clone + Any + fmt::Debug>(key: String, value: T) -> Choice {
        Choice { key, value: Box::new(move || Box::new(value.clone()) as Value) }
    }
}

fn pick(choices: &[Choice], arg: &str) -> Result<Value> {
    match choices.iter().find(|choice| choice.key == arg) {
        Some(choice) => Ok((choice.value)()),
        None => Err(Error::NonMatchingArgument {
            argument: arg.to_string(),
            candidates: choices.iter().map(|choice| choice.key.clone()).collect(),
        }),
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = |choices: &[Choice]| choices.iter().map(|it| it.key.clone()).collect::<Vec<_>>();
        match self {
            Kind::Presence => f.write_str("Presence"),
            Kind::Runnable(_) => f.write_str("Runnable"),
            Kind::Supplier(_) => f.write_str("Supplier"),
            Kind::Consumer(_) => f.write_str("Consumer"),
            Kind::Function(_) => f.write_str("Function"),
            Kind::Collection(choices) => f.debug_tuple("Collection").field(&keys(choices)).finish(),
            Kind::Map(choices) => f.debug_tuple("Map").field(&keys(choices)).finish(),
        }
    }
}
