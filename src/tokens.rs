use crate::{Error, Result};

/// Cursor over the raw argument vector.
///
/// Arguments are kept reversed so that taking the next one is a `pop`, and stepping the cursor
/// back is a `push`.
pub(crate) struct Tokens {
    rargs: Vec<String>,
}

impl Tokens {
    pub(crate) fn new(mut args: Vec<String>) -> Self {
        args.reverse();
        Self { rargs: args }
    }

    pub(crate) fn next(&mut self) -> Option<String> {
        self.rargs.pop()
    }

    pub(crate) fn push_back(&mut self, arg: String) {
        self.rargs.push(arg)
    }

    pub(crate) fn next_value(&mut self, flag: &str) -> Result<String> {
        self.next().ok_or_else(|| Error::MissingArgument { flag: flag.to_string() })
    }
}
