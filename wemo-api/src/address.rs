//! The device a batch of commands is sent to

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ApiError, Result};
use crate::service::Service;

/// Port most Wemo firmware serves its local web services on
///
/// Some units answer on 49152 or higher instead.
pub const DEFAULT_PORT: u16 = 49153;

/// IPv4 address and TCP port of a Wemo device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetAddress {
    ip: Ipv4Addr,
    port: u16,
}

impl TargetAddress {
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self { ip, port }
    }

    /// Validate a dotted-quad address and a port string
    pub fn parse(ip: &str, port: &str) -> Result<Self> {
        let ip = parse_ip(ip)?;
        let port = port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| ApiError::InvalidPort(port.to_string()))?;
        Ok(Self { ip, port })
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Control URL for `service` on this device
    pub fn control_url(&self, service: Service) -> String {
        format!("http://{}:{}/{}", self.ip, self.port, service.info().endpoint)
    }
}

impl fmt::Display for TargetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    let octet = r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
    Regex::new(&format!(r"\A{o}\.{o}\.{o}\.{o}\z", o = octet))
        .expect("address pattern is valid")
});

/// Validate a dotted-quad IPv4 address
///
/// Octets may carry leading zeros (`192.168.001.010`); they are read as
/// decimal, never octal.
pub fn parse_ip(ip: &str) -> Result<Ipv4Addr> {
    let invalid = || ApiError::InvalidAddress(ip.to_string());
    let caps = DOTTED_QUAD.captures(ip).ok_or_else(invalid)?;

    let mut octets = [0u8; 4];
    for (octet, group) in octets.iter_mut().zip(1..=4) {
        *octet = caps[group].parse::<u8>().map_err(|_| invalid())?;
    }
    Ok(Ipv4Addr::from(octets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_control_url() {
        let target = TargetAddress::parse("192.168.1.40", "49153").unwrap();
        assert_eq!(
            target.control_url(Service::BasicEvent),
            "http://192.168.1.40:49153/upnp/control/basicevent1"
        );
        assert_eq!(target.to_string(), "192.168.1.40:49153");
    }

    #[rstest]
    #[case("192.168.1")]
    #[case("192.168.1.256")]
    #[case("192.168.1.0010")]
    #[case(" 192.168.1.4")]
    #[case("192.168.1.xxx")]
    #[case("wemo.local")]
    #[case("")]
    fn test_rejects_bad_ip(#[case] ip: &str) {
        match TargetAddress::parse(ip, "49153") {
            Err(ApiError::InvalidAddress(bad)) => assert_eq!(bad, ip),
            other => panic!("Expected InvalidAddress, got {:?}", other),
        }
    }

    #[rstest]
    #[case("0")]
    #[case("65536")]
    #[case("http")]
    #[case("-1")]
    fn test_rejects_bad_port(#[case] port: &str) {
        assert!(matches!(
            TargetAddress::parse("10.0.0.2", port),
            Err(ApiError::InvalidPort(_))
        ));
    }

    #[rstest]
    #[case("192.168.001.010", Ipv4Addr::new(192, 168, 1, 10))]
    #[case("010.000.000.099", Ipv4Addr::new(10, 0, 0, 99))]
    #[case("255.255.255.255", Ipv4Addr::new(255, 255, 255, 255))]
    fn test_leading_zero_octets_are_decimal(#[case] ip: &str, #[case] expected: Ipv4Addr) {
        let target = TargetAddress::parse(ip, "49153").unwrap();
        assert_eq!(target.ip(), expected);
        assert_eq!(
            target.control_url(Service::BasicEvent),
            format!("http://{}:49153/upnp/control/basicevent1", expected)
        );
    }

    #[test]
    fn test_accessors() {
        let target = TargetAddress::new(Ipv4Addr::new(10, 0, 0, 7), DEFAULT_PORT);
        assert_eq!(target.ip(), Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(target.port(), 49153);
    }
}
