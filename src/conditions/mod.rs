//! Condition predicates and the lookups behind them.

pub mod evaluator;
pub mod executables;
pub mod mime;
pub mod shebang;

pub use evaluator::ConditionEvaluator;
pub use executables::ExecutableIndex;
pub use mime::{MimeResolver, GENERIC_MIMETYPE};
pub use shebang::{extract_shebang, SHEBANG_LIMIT};
