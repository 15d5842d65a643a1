//! BPF (Berkeley Packet Filter) filter builders

/// ARP filter
///
/// Captures all ARP packets; the production default for the engine.
pub fn arp_filter() -> String {
    "arp".to_string()
}

/// ARP traffic to or from a specific MAC address
///
/// Used to scope a capture to a designated test address.
pub fn arp_host_filter(mac: &str) -> String {
    format!("arp and (ether src {} or ether dst {})", mac, mac)
}

/// Filter for specific source MAC address
pub fn src_mac_filter(mac: &str) -> String {
    format!("ether src {}", mac)
}

/// Filter for specific destination MAC address
pub fn dst_mac_filter(mac: &str) -> String {
    format!("ether dst {}", mac)
}

/// Combine multiple filters with AND logic
pub fn combine_filters(filters: &[&str]) -> String {
    if filters.is_empty() {
        return String::new();
    }

    filters
        .iter()
        .map(|f| format!("({})", f))
        .collect::<Vec<_>>()
        .join(" and ")
}
