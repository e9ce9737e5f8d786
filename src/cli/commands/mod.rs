//! cli::commands
//!
//! The command table and handlers.
//!
//! # Architecture
//!
//! Each handler is a plain function taking the execution context and its
//! bound arguments. [`HANDLERS`] lists them in registration order; the
//! identifier of each entry decides where it appears in the CLI
//! (`dev_init` becomes `bowl dev init`) and the order of the table decides
//! the order of help listings.

mod bowl;
mod completion;
mod dev;
mod init;

use crate::cli::handler::Handler;

/// Every command, in registration order.
pub const HANDLERS: &[Handler] = &[
    Handler::new("bowl", bowl::DOCUMENTATION, &[], bowl::bowl),
    Handler::new("init", init::DOCUMENTATION, &[], init::init),
    Handler::new("dev_init", dev::INIT_DOCUMENTATION, &[], dev::init),
    Handler::new("dev_pytest", dev::PYTEST_DOCUMENTATION, &[], dev::pytest),
    Handler::new(
        "completion",
        completion::DOCUMENTATION,
        &["shell"],
        completion::completion,
    ),
];
