//! cli::handler
//!
//! Handler registration types.
//!
//! A [`Handler`] is one row of the static command table: the identifier that
//! places it in the hierarchy, its documentation, its ordered parameter
//! names and the function that runs it. Everything the parser needs is
//! derived from these four fields once at startup.

use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::config::Config;
use crate::core::introspect::{introspect, Signature};
use crate::core::naming::path_of_identifier;
use crate::core::types::{CommandPath, TypeError};
use crate::ui::output::Verbosity;

/// Function signature every command implements.
pub type HandlerFn = fn(&Context, &Arguments) -> Result<()>;

/// One registered command.
#[derive(Clone, Copy)]
pub struct Handler {
    /// Underscore-joined path, e.g. `dev_init`.
    pub identifier: &'static str,
    /// First line is the description; `name: text` lines document parameters.
    pub documentation: &'static str,
    /// Positional parameters in declaration order.
    pub parameters: &'static [&'static str],
    /// The command body.
    pub run: HandlerFn,
}

impl Handler {
    /// Declare a handler.
    pub const fn new(
        identifier: &'static str,
        documentation: &'static str,
        parameters: &'static [&'static str],
        run: HandlerFn,
    ) -> Self {
        Self {
            identifier,
            documentation,
            parameters,
            run,
        }
    }

    /// Location of this handler in the command tree.
    pub fn path(&self) -> Result<CommandPath, TypeError> {
        path_of_identifier(self.identifier)
    }

    /// Description and argument specs derived from the documentation.
    pub fn signature(&self) -> Signature {
        introspect(self.documentation, self.parameters)
    }

    /// Run the handler.
    pub fn call(&self, ctx: &Context, args: &Arguments) -> Result<()> {
        (self.run)(ctx, args)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("identifier", &self.identifier)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Argument values bound to a handler's parameters, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(Vec<(String, String)>);

impl Arguments {
    /// Wrap already ordered `(name, value)` pairs.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// Value of the named parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the named parameter, or an error naming it.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| anyhow!("missing argument '{name}'"))
    }

    /// All pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Execution context handed to every handler.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory of the invocation.
    pub cwd: PathBuf,
    /// Output verbosity from the global flags.
    pub verbosity: Verbosity,
    /// Merged configuration.
    pub config: Config,
}
