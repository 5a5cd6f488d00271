/// Version tag of the process-chain document sent to the backend
pub const PROCESS_CHAIN_VERSION: &str = "1";
/// Color table applied to normalized-difference results
pub const NDVI_COLOR_TABLE: &str = "ndvi";
/// Metadata field holding a raster's north-south resolution
pub const RESOLUTION_FIELD: &str = "nsres";
