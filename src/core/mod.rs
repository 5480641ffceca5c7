pub mod convert;
pub mod csv_loader;
pub mod imei;
pub mod normalize;
pub mod range;
pub mod spec;

pub use crate::domain::model::{CanonicalPort, ImeiChange, ImeiList, Notation, PortList};
pub use crate::utils::error::Result;
