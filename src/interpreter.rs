use std::{
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use crate::{tokens::Tokens, Error, Flag, Interpretation, Result};

/// Matches command line tokens against a set of registered [`Flag`]s.
///
/// A token starting with the prefix (or the prefix twice) names a flag by either of its
/// identifiers; the prefix length only decides how much is stripped. A token without the prefix
/// fills the earliest registered required flag that is still unsatisfied, or is dropped if there
/// is none. Unknown flags are dropped too.
///
/// ```
/// use flagterp::{Flag, Interpreter};
///
/// let interpreter = Interpreter::new([
///     Flag::parsed::<u32>("jobs", "j").required(),
///     Flag::new("verbose", "v"),
/// ]);
/// let res = interpreter.interpret(["--verbose", "4"]).unwrap();
/// assert_eq!(res.get::<u32>("jobs"), Some(&4));
/// assert!(res.has("verbose"));
/// ```
pub struct Interpreter {
    prefix: String,
    double_prefix: String,
    table: HashMap<String, Rc<Flag>>,
    required: Vec<Rc<Flag>>,
    registered: Vec<Rc<Flag>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::with_prefix("-", [])
    }
}

impl Interpreter {
    pub fn new(flags: impl IntoIterator<Item = Flag>) -> Interpreter {
        Interpreter::with_prefix("-", flags)
    }

    pub fn with_prefix(
        prefix: impl Into<String>,
        flags: impl IntoIterator<Item = Flag>,
    ) -> Interpreter {
        let prefix = prefix.into();
        let mut res = Interpreter {
            double_prefix: prefix.repeat(2),
            prefix,
            table: HashMap::new(),
            required: Vec::new(),
            registered: Vec::new(),
        };
        res.extend(flags);
        res
    }

    /// Adds `flag` under both its name and its short token.
    ///
    /// Each of the two entries independently replaces whatever flag held it before, so an
    /// earlier flag stays reachable through the identifier that did not collide. A replaced
    /// required flag stays in the required list and can then only be satisfied positionally.
    pub fn register(&mut self, flag: Flag) {
        let flag = Rc::new(flag);
        self.table.insert(flag.name().to_string(), Rc::clone(&flag));
        self.table.insert(flag.short().to_string(), Rc::clone(&flag));
        if flag.is_required() {
            self.required.push(Rc::clone(&flag));
        }
        self.registered.push(flag);
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registered flags still reachable through at least one identifier, in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> + '_ {
        self.registered
            .iter()
            .filter(move |flag| self.table.values().any(|it| Rc::ptr_eq(it, *flag)))
            .map(|flag| &**flag)
    }

    pub fn interpret<I>(&self, args: I) -> Result<Interpretation>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut tokens = Tokens::new(args.into_iter().map(Into::into).collect());
        let mut pending: VecDeque<Rc<Flag>> = self.required.iter().cloned().collect();
        let mut res = Interpretation::default();

        while let Some(arg) = tokens.next() {
            tracing::trace!(%arg, "token");
            let ident = if let Some(ident) = arg.strip_prefix(self.double_prefix.as_str()) {
                ident.to_string()
            } else if let Some(ident) = arg.strip_prefix(self.prefix.as_str()) {
                ident.to_string()
            } else if let Some(flag) = pending.pop_front() {
                tracing::debug!(%arg, flag = flag.name(), "positional argument");
                tokens.push_back(arg);
                flag.name().to_string()
            } else {
                tracing::debug!(%arg, "dropping superfluous argument");
                continue;
            };
            self.interpret_flag(&ident, &mut tokens, &mut pending, &mut res)?;
        }

        if !pending.is_empty() {
            let flags = pending.iter().map(|flag| flag.name().to_string()).collect();
            return Err(Error::MissingRequiredFlags { flags });
        }
        Ok(res)
    }

    fn interpret_flag(
        &self,
        ident: &str,
        tokens: &mut Tokens,
        pending: &mut VecDeque<Rc<Flag>>,
        res: &mut Interpretation,
    ) -> Result<()> {
        let flag = match self.table.get(ident) {
            Some(it) => it,
            None => {
                tracing::debug!(flag = ident, "dropping unknown flag");
                return Ok(());
            }
        };

        let value = if flag.expects_argument() {
            let arg = tokens.next_value(ident)?;
            flag.resolve(Some(arg.as_str()))
        } else {
            flag.resolve(None)
        };
        let value = value.map_err(|err| match err.downcast::<Error>() {
            Ok(it) => it,
            Err(source) => Error::CallbackFailed { flag: flag.name().to_string(), source },
        })?;

        res.record(flag.name(), value);
        if let Some(idx) = pending.iter().position(|it| Rc::ptr_eq(it, flag)) {
            pending.remove(idx);
        }
        Ok(())
    }
}

impl Extend<Flag> for Interpreter {
    fn extend<T: IntoIterator<Item = Flag>>(&mut self, iter: T) {
        for flag in iter {
            self.register(flag)
        }
    }
}

impl FromIterator<Flag> for Interpreter {
    fn from_iter<T: IntoIterator<Item = Flag>>(iter: T) -> Interpreter {
        Interpreter::new(iter)
    }
}
