//! mrfmsim - Unit registry for magnetic resonance force microscopy
//!
//! MRFM experiments mix attonewton forces, nanometer lengths and millitesla
//! fields. [`MrfmUnitRegistry`] measures everything in a base-unit system
//! built for those scales (microampere, nanometer, microgram, kelvin,
//! second), prints quantities in abbreviated pretty form, and reads record
//! fields together with the unit their descriptor declares.
//!
//! ```
//! use mrfmsim::MrfmUnitRegistry;
//!
//! let ureg = MrfmUnitRegistry::new().unwrap();
//! let field = ureg.quantity(1.0, "T").unwrap();
//! assert_eq!(field.bm(), 1000.0);
//!
//! let m = ureg.unit("m").unwrap();
//! let s = ureg.unit("s").unwrap();
//! assert_eq!(format!("{}", 1.0 * m / s), "1.0 m/s");
//! ```

mod attr;
mod quantity;
mod registry;
pub mod system;

pub use attr::{Attr, AttrError};
pub use quantity::{MrfmQuantity, MrfmUnit};
pub use registry::MrfmUnitRegistry;
pub use system::{BaseDimension, BaseUnitEntry, MRFMSIM, MRFMSIM_BASE_UNITS, MRFMSIM_SYSTEM};

pub use mrfmsim_core::{FieldDescriptor, Record, RecordSchema, DynamicRecord, Value};
pub use mrfmsim_units::{Format, SystemDefinition, Unit, UnitError, UnitRegistry};
