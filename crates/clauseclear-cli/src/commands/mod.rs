//! Command implementations.

pub mod analyze;
pub mod evaluate;
pub mod hybrid;
pub mod index;
pub mod kb;
pub mod search;
pub mod segment;

pub use self::analyze::execute_analyze;
pub use self::evaluate::execute_evaluate;
pub use self::hybrid::execute_hybrid;
pub use self::index::execute_index;
pub use self::kb::execute_kb;
pub use self::search::{execute_query, execute_search};
pub use self::segment::execute_segment;
