//! Command handlers for the `keg` CLI, one module per subcommand.

pub mod audit;
pub mod completion;
pub mod fetch;
pub mod info;
pub mod install;
pub mod list;
pub mod test_cmd;
pub mod uninstall;
pub mod upgrade;
pub mod version;
