//! # Attribute System
//!
//! Every card column a query can mention is an [`Attribute`]. The attribute
//! system provides:
//!
//! - **Schema**: which attributes exist, whether each is numeric or
//!   categorical, and which operators and statistics each accepts
//! - **Values**: a typed, borrowed view of one card field ([`AttrValue`])
//! - **Filtering**: OR-combined clause groups applied in two phases around
//!   collapsing
//!
//! ## Attribute Kinds
//!
//! | Kind | Examples | Operators | Statistics |
//! |------|----------|-----------|------------|
//! | `Numeric` | `amount`, `cmc`, `usd` | `= != < <= > >=` | all |
//! | `Categorical` | `name`, `set`, `foil` | `= != ? !?` | `unique` |
//!
//! ## Usage
//!
//! ```ignore
//! let group = FilterGroup::new(
//!     Attribute::Usd,
//!     vec![FilterClause::new(FilterOp::Ge, Operand::Number(10.0))],
//! );
//! if group.matches(&card) { ... }
//! ```

mod filter;
mod spec;
mod value;

pub use filter::{apply, FilterClause, FilterGroup, FilterOp, FilterPhase, Operand};
pub use spec::{Attribute, AttributeKind, AttributeSpec, Statistic, ATTRIBUTES};
pub use value::{compare_optional, AttrValue};
