pub mod conditions;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod exec;
pub mod logging;
pub mod output;
pub mod process;
pub mod rules;

pub use dispatch::{collect_actions, Action, ActionMap, IGNORE};
pub use engine::RifleMan;
