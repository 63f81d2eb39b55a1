/// UPnP services exposed by Wemo devices that this crate talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// basicevent service - power state, night light, signal strength, friendly name
    BasicEvent,
}

/// Contains the endpoint and service URI information for a UPnP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// The HTTP control path for this service (relative to the device base URL)
    pub endpoint: &'static str,

    /// The UPnP service URI used in SOAP requests
    pub service_uri: &'static str,
}

impl Service {
    /// Get the name of this service as a string
    pub fn name(&self) -> &'static str {
        match self {
            Service::BasicEvent => "basicevent",
        }
    }

    /// Get the service information (endpoint and URI) for this service
    pub fn info(&self) -> ServiceInfo {
        match self {
            Service::BasicEvent => ServiceInfo {
                endpoint: "upnp/control/basicevent1",
                service_uri: "urn:Belkin:service:basicevent:1",
            },
        }
    }
}
