//! Network interface discovery, the local binding, and the persistent
//! send channel

use crate::{Error, MacAddr};
use pnet_datalink::{self, Channel, DataLinkSender};
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

/// The local node's identity on one interface.
///
/// Immutable for the engine's lifetime. Incoming requests are matched
/// against `ip`, and outgoing replies are sourced from both fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceBinding {
    /// Local IPv4 address
    pub ip: Ipv4Addr,
    /// Local hardware address
    pub mac: MacAddr,
}

impl fmt::Display for InterfaceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ip, self.mac)
    }
}

/// Network interface
#[derive(Debug, Clone)]
pub struct Interface {
    /// Interface name (e.g., "eth0", "en0")
    pub name: String,
    /// Interface index
    pub index: u32,
    /// MAC address, if the interface has one
    pub mac_address: Option<MacAddr>,
    /// Is interface up?
    pub is_up: bool,
    /// Is this a loopback interface?
    pub is_loopback: bool,
}

impl From<&pnet_datalink::NetworkInterface> for Interface {
    fn from(iface: &pnet_datalink::NetworkInterface) -> Self {
        let mac_address = iface
            .mac
            .map(|mac| MacAddr([mac.0, mac.1, mac.2, mac.3, mac.4, mac.5]));

        Self {
            name: iface.name.clone(),
            index: iface.index,
            mac_address,
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

impl Interface {
    /// Get interface by name
    pub fn by_name(name: &str) -> Result<Self, Error> {
        let interfaces = pnet_datalink::interfaces();
        interfaces
            .iter()
            .find(|i| i.name == name)
            .map(Interface::from)
            .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))
    }

    /// List all available interfaces
    pub fn list_all() -> Vec<Self> {
        pnet_datalink::interfaces()
            .iter()
            .map(Interface::from)
            .collect()
    }

    /// Find the default interface (first up, non-loopback)
    pub fn find_default() -> Result<Self, Error> {
        Self::list_all()
            .into_iter()
            .find(Interface::is_capture_capable)
            .ok_or_else(|| Error::Capture("No suitable default interface found".to_string()))
    }

    /// Check whether this interface is usable for live capture
    pub fn is_capture_capable(&self) -> bool {
        self.is_up && !self.is_loopback
    }

    /// Get the first IPv4 address of this interface
    pub fn get_ipv4(&self) -> Option<Ipv4Addr> {
        let interfaces = pnet_datalink::interfaces();
        let interface = interfaces
            .into_iter()
            .find(|iface| iface.name == self.name)?;

        for ip_network in interface.ips {
            if let ipnetwork::IpNetwork::V4(ipv4_net) = ip_network {
                return Some(ipv4_net.ip());
            }
        }

        None
    }

    /// Resolve the local binding for this interface.
    ///
    /// Fails closed: running the engine without a defined local IP and
    /// MAC would make the dispatch rules meaningless, so a missing
    /// address is a fatal configuration error rather than a default.
    pub fn binding(&self) -> Result<InterfaceBinding, Error> {
        let mac = self.mac_address.ok_or_else(|| {
            Error::InterfaceConfig(format!("interface '{}' has no MAC address", self.name))
        })?;
        let ip = self.get_ipv4().ok_or_else(|| {
            Error::InterfaceConfig(format!("interface '{}' has no IPv4 address", self.name))
        })?;

        Ok(InterfaceBinding { ip, mac })
    }

    /// Create a persistent sender for this interface
    pub fn create_sender(&self) -> Result<Arc<Mutex<Box<dyn DataLinkSender>>>, Error> {
        let interfaces = pnet_datalink::interfaces();
        let interface = interfaces
            .into_iter()
            .find(|iface| iface.name == self.name)
            .ok_or_else(|| Error::Interface(format!("Interface {} not found", self.name)))?;

        let (tx, _) = match pnet_datalink::channel(&interface, Default::default()) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => return Err(Error::Interface("Unsupported channel type".to_string())),
            Err(e) => return Err(Error::Interface(format!("Failed to create channel: {}", e))),
        };

        Ok(Arc::new(Mutex::new(tx)))
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mac_address {
            Some(mac) => write!(f, "{} ({})", self.name, mac),
            None => write!(f, "{} (no MAC)", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake(name: &str, is_up: bool, is_loopback: bool) -> Interface {
        Interface {
            name: name.to_string(),
            index: 0,
            mac_address: None,
            is_up,
            is_loopback,
        }
    }

    #[test]
    fn test_nonexistent_interface() {
        let result = Interface::by_name("nonexistent_interface_xyz");
        assert!(matches!(result, Err(Error::InterfaceNotFound(_))));
    }

    #[test]
    fn test_list_all_has_loopback() {
        // Every system this runs on should at least have loopback
        let interfaces = Interface::list_all();
        assert!(!interfaces.is_empty());
        assert!(interfaces.iter().any(|i| i.is_loopback));
    }

    #[test]
    fn test_capture_capable() {
        assert!(fake("eth0", true, false).is_capture_capable());
        assert!(!fake("lo", true, true).is_capture_capable());
        assert!(!fake("eth1", false, false).is_capture_capable());
    }

    #[test]
    fn test_binding_requires_mac() {
        let iface = fake("fake0", true, false);
        assert!(matches!(iface.binding(), Err(Error::InterfaceConfig(_))));
    }

    #[test]
    fn test_binding_display() {
        let binding = InterfaceBinding {
            ip: Ipv4Addr::new(10, 0, 0, 5),
            mac: MacAddr([0xaa; 6]),
        };
        assert_eq!(format!("{}", binding), "10.0.0.5 (aa:aa:aa:aa:aa:aa)");
    }
}
