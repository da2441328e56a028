//! Desktop shell for the AkTools market-data backend.
//!
//! The shell starts the backend once, shows a loading document while both the
//! backend and the loading document come up, and swaps in the main
//! application once both are ready. Window-toolkit code sits behind the
//! `desktop` feature; the supervision core builds and tests without it.

#![cfg_attr(not(feature = "desktop"), allow(dead_code))]

mod app_constants;
mod app_types;
mod backend_config;
mod backend_output;
mod backend_process;
mod error;
mod exit_cleanup;
mod exit_state;
mod launch_plan;
mod logging;
mod menu_actions;
mod presentation;
mod readiness;
mod runtime_paths;
mod shell_locale;
mod status;
mod supervisor;

#[cfg(feature = "desktop")]
mod app_runtime;
#[cfg(feature = "desktop")]
mod exit_events;
#[cfg(feature = "desktop")]
mod main_window;
#[cfg(feature = "desktop")]
mod menu_handler;
#[cfg(feature = "desktop")]
mod menu_setup;
#[cfg(feature = "desktop")]
mod startup_loading;
#[cfg(feature = "desktop")]
mod startup_task;
#[cfg(feature = "desktop")]
mod window_actions;

#[cfg(test)]
mod test_support;

pub(crate) use app_constants::*;
pub(crate) use app_types::ShellState;
pub(crate) use logging::{
    append_backend_log, append_shutdown_log, append_startup_log, append_window_log,
};

#[cfg(feature = "desktop")]
pub use app_runtime::run;
