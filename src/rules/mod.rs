//! Rule data model, grammar and loading.

pub mod parser;
pub mod store;
pub mod types;

pub use parser::{parse_condition, parse_rule, parse_rules};
pub use store::RuleStore;
pub use types::{Condition, PredicateKind, Rule};
