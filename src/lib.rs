//! Interprets an array of command line tokens against a set of registered flags.
//!
//! Flags are built with the constructors on [`Flag`], handed to an [`Interpreter`], and every
//! call to [`Interpreter::interpret`] yields a fresh [`Interpretation`] to query by flag name.
//!
//! ```
//! use flagterp::{Flag, Interpreter};
//!
//! let interpreter = Interpreter::new([
//!     Flag::parsed::<String>("input", "i").required(),
//!     Flag::collection("format", "f", ["json", "toml"]),
//!     Flag::new("dry-run", "n"),
//! ]);
//!
//! let res = interpreter.interpret(["data.txt", "-f", "toml"]).unwrap();
//! assert_eq!(res.get::<String>("input").map(String::as_str), Some("data.txt"));
//! assert_eq!(res.get::<&str>("format"), Some(&"toml"));
//! assert!(!res.has("dry-run"));
//!
//! let err = interpreter.interpret(["-f", "yaml"]).unwrap_err();
//! assert_eq!(err.to_string(), "invalid option `yaml`, allowed options are {json, toml}");
//! ```
//!
//! Caller closures return [`anyhow::Result`]. Failures that are not already an [`Error`] are
//! reported as [`Error::CallbackFailed`], with the original error as the source.

mod error;
mod flag;
mod interpretation;
mod interpreter;
mod tokens;

pub use crate::{error::Error, flag::Flag, interpretation::Interpretation, interpreter::Interpreter};

pub type Result<T, E = Error> = std::result::Result<T, E>;
