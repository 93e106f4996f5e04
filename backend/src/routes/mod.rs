//! Response shapes for each dashboard view.

pub mod hotspots;
pub mod strategy;

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        assert_eq!(super::hotspots::GET_HEXBINS, "get_hexbins");
        assert_eq!(super::hotspots::GET_GAPS, "get_gaps");
        assert_eq!(super::strategy::GET_PRIORITY_ZONES, "get_priority_zones");
        assert_eq!(super::strategy::GET_TIMING_WINDOWS, "get_timing_windows");
    }
}
