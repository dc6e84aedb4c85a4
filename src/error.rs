use thiserror::Error;

/// Everything that can make [`Interpreter::interpret`](crate::Interpreter::interpret) fail.
///
/// Unknown flags and superfluous positional tokens are not errors, they are dropped.
#[derive(Debug, Error)]
pub enum Error {
    /// A flag that takes an argument was the last token.
    #[error("expected a value for `{flag}`")]
    MissingArgument { flag: String },

    /// Required flags that were neither given nor filled positionally, in registration order.
    #[error("missing required flags: {}", quoted(.flags))]
    MissingRequiredFlags { flags: Vec<String> },

    /// The argument of a collection or map flag matched none of its candidates.
    #[error("invalid option `{argument}`, allowed options are {{{}}}", .candidates.join(", "))]
    NonMatchingArgument { argument: String, candidates: Vec<String> },

    /// A caller-supplied closure failed with an error of its own.
    #[error("failed to interpret argument for flag `{flag}`")]
    CallbackFailed {
        flag: String,
        #[source]
        source: anyhow::Error,
    },
}

fn quoted(names: &[String]) -> String {
    names.iter().map(|it| format!("`{it}`")).collect::<Vec<_>>().join(", ")
}
