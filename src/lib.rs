pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub mod app;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::EngineConfig;

pub use crate::core::convert::{
    extract_board_and_slot, format_port_strs_for_api, format_ports_for_api, port_to_alpha,
    port_to_decimal,
};
pub use crate::core::csv_loader::{expand_imeis_if_csv, expand_ports_if_csv, looks_like_csv};
pub use crate::core::imei::{expand_imeis, plan_imei_changes};
pub use crate::core::normalize::normalize_port;
pub use crate::core::range::expand_range;
pub use crate::core::spec::{expand_ports, parse_port_spec, AllPorts, PortSpecParser};
pub use domain::model::{CanonicalPort, ImeiChange, ImeiList, Notation, PortList};
pub use utils::error::{PortSpecError, Result};
