//! MRFM Units - Physical Quantities, Unit Systems and Conversion
//!
//! Provides unit-aware quantities with dimensional analysis over a shared
//! unit database, and named unit systems that pick the base unit used for
//! each base dimension.
//!
//! Units resolve by symbol, long name or alias, with SI prefixes in either
//! form ("mT", "attonewton"), and combine into expressions such as
//! `kg*m/s^2` or `meter / second ** 2`.
//!
//! ```
//! use mrfmsim_units::{Format, UnitRegistry};
//!
//! let ureg = UnitRegistry::new().with_default_format(Format::SHORT_PRETTY);
//! let speed = ureg.quantity(1.0, "m/s").unwrap();
//! assert_eq!(ureg.format(&speed), "1.0 m/s");
//! ```

pub mod dimension;
mod error;
mod format;
mod parse;
mod prefix;
mod quantity;
mod registry;
pub mod system;
mod unit;
mod units;

pub use dimension::Dimension;
pub use error::UnitError;
pub use format::{Format, Style};
pub use parse::{parse_quantity_string, parse_unit};
pub use prefix::{Prefix, PREFIXES};
pub use quantity::{Quantity, QuantityDisplay};
pub use registry::UnitRegistry;
pub use system::{BaseUnit, BaseUnitRule, System, SystemDefinition};
pub use unit::{Unit, UnitTerm};
pub use units::{si_base_units, UnitTable, UNITS};
