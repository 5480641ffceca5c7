// Domain layer: port/IMEI value types. No I/O here.

pub mod model;
