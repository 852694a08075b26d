pub mod format_util;
pub mod geo_util;
pub mod location_sample;
pub mod network_info;
