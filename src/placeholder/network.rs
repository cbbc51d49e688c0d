//! Network interface lookups backing `@{IP.<interface>}` placeholders.

use std::net::IpAddr;

/// Enumerates the addresses bound to a network interface.
pub trait InterfaceLookup: Send + Sync {
    /// Returns the addresses bound to `interface` in OS order, or `None` if no
    /// interface with that name exists.
    fn addresses(&self, interface: &str) -> Option<Vec<IpAddr>>;
}

/// Reads the operating system's interface table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

#[cfg(unix)]
impl InterfaceLookup for SystemInterfaces {
    fn addresses(&self, interface: &str) -> Option<Vec<IpAddr>> {
        use nix::ifaddrs::getifaddrs;
        use std::net::{SocketAddrV4, SocketAddrV6};

        let entries = match getifaddrs() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to enumerate network interfaces: {}", e);
                return None;
            }
        };

        let mut found = false;
        let mut addresses = Vec::new();
        for entry in entries.filter(|e| e.interface_name == interface) {
            found = true;
            let Some(storage) = entry.address else {
                continue;
            };
            if let Some(v4) = storage.as_sockaddr_in() {
                addresses.push(IpAddr::V4(*SocketAddrV4::from(*v4).ip()));
            } else if let Some(v6) = storage.as_sockaddr_in6() {
                addresses.push(IpAddr::V6(*SocketAddrV6::from(*v6).ip()));
            }
        }

        found.then_some(addresses)
    }
}

#[cfg(not(unix))]
impl InterfaceLookup for SystemInterfaces {
    fn addresses(&self, interface: &str) -> Option<Vec<IpAddr>> {
        log::warn!(
            "Network interface lookup is not supported on this platform: {}",
            interface
        );
        None
    }
}

/// A fixed interface table.
#[derive(Debug, Clone, Default)]
pub struct StaticInterfaces {
    interfaces: Vec<(String, Vec<IpAddr>)>,
}

impl StaticInterfaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an interface with its addresses.
    pub fn with_interface(mut self, name: impl Into<String>, addresses: Vec<IpAddr>) -> Self {
        self.interfaces.push((name.into(), addresses));
        self
    }
}

impl InterfaceLookup for StaticInterfaces {
    fn addresses(&self, interface: &str) -> Option<Vec<IpAddr>> {
        self.interfaces
            .iter()
            .find(|(name, _)| name == interface)
            .map(|(_, addresses)| addresses.clone())
    }
}
