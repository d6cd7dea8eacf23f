//! Subprocess execution for the TeX toolchain.
//!
//! Every tool invocation (engines, bib tools, `fc-list`, viewers) goes through
//! [`CommandSpec`] so arguments are passed argv-style and never through a shell.
//! [`ProcessRunner`] is the seam the compile driver and doctor are written
//! against; [`NativeRunner`] is the production implementation.

pub mod command_spec;
pub mod error;
pub mod native;
pub mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use native::NativeRunner;
pub use process::{ProcessOutput, ProcessRunner};
