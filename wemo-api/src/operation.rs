//! The nine basicevent operations and their fixed SOAP action table

use std::fmt;

use crate::service::Service;

/// A device action supported by the Wemo `basicevent` service
///
/// Each variant maps to exactly one `(action, argument)` pair; see
/// [`Operation::action`] and [`Operation::argument`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read the relay state
    QueryState,
    /// Switch the relay on
    On,
    /// Switch the relay off
    Off,
    /// Read the night-light dim level
    QueryNightLight,
    /// Switch the night light on
    NightLightOn,
    /// Switch the night light off
    NightLightOff,
    /// Read the Wi-Fi signal strength
    QuerySignalStrength,
    /// Read the device's friendly name
    QueryFriendlyName,
    /// Rename the device
    ChangeFriendlyName { name: String },
}

impl Operation {
    /// The UPnP service every operation belongs to
    pub const SERVICE: Service = Service::BasicEvent;

    /// The SOAP action name for this operation
    pub fn action(&self) -> &'static str {
        match self {
            Operation::QueryState => "GetBinaryState",
            Operation::On | Operation::Off => "SetBinaryState",
            Operation::QueryNightLight => "GetNightLightStatus",
            Operation::NightLightOn | Operation::NightLightOff => "SetNightLightStatus",
            Operation::QuerySignalStrength => "GetSignalStrength",
            Operation::QueryFriendlyName => "GetFriendlyName",
            Operation::ChangeFriendlyName { .. } => "ChangeFriendlyName",
        }
    }

    /// The argument element carried in the request and echoed in the reply
    pub fn argument(&self) -> &'static str {
        match self {
            Operation::QueryState | Operation::On | Operation::Off => "BinaryState",
            Operation::QueryNightLight | Operation::NightLightOn | Operation::NightLightOff => {
                "DimValue"
            }
            Operation::QuerySignalStrength => "SignalStrength",
            Operation::QueryFriendlyName | Operation::ChangeFriendlyName { .. } => "FriendlyName",
        }
    }

    /// Short upper-case label used in result lines and logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::QueryState => "GETSTATE",
            Operation::On => "ON",
            Operation::Off => "OFF",
            Operation::QueryNightLight => "GETNIGHTLIGHT",
            Operation::NightLightOn => "NIGHTLIGHT_ON",
            Operation::NightLightOff => "NIGHTLIGHT_OFF",
            Operation::QuerySignalStrength => "GETSIGNALSTRENGTH",
            Operation::QueryFriendlyName => "GETFRIENDLYNAME",
            Operation::ChangeFriendlyName { .. } => "CHANGEFRIENDLYNAME",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved user command, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// The operation to perform
    pub operation: Operation,
    /// The token this request was resolved from
    pub token: String,
}

impl CommandRequest {
    pub fn new(operation: Operation, token: impl Into<String>) -> Self {
        Self {
            operation,
            token: token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Operation::QueryState, "GetBinaryState", "BinaryState")]
    #[case(Operation::On, "SetBinaryState", "BinaryState")]
    #[case(Operation::Off, "SetBinaryState", "BinaryState")]
    #[case(Operation::QueryNightLight, "GetNightLightStatus", "DimValue")]
    #[case(Operation::NightLightOn, "SetNightLightStatus", "DimValue")]
    #[case(Operation::NightLightOff, "SetNightLightStatus", "DimValue")]
    #[case(Operation::QuerySignalStrength, "GetSignalStrength", "SignalStrength")]
    #[case(Operation::QueryFriendlyName, "GetFriendlyName", "FriendlyName")]
    #[case(
        Operation::ChangeFriendlyName { name: "Desk".to_string() },
        "ChangeFriendlyName",
        "FriendlyName"
    )]
    fn test_action_table(
        #[case] operation: Operation,
        #[case] action: &str,
        #[case] argument: &str,
    ) {
        assert_eq!(operation.action(), action);
        assert_eq!(operation.argument(), argument);
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Operation::NightLightOn.to_string(), "NIGHTLIGHT_ON");
        let rename = Operation::ChangeFriendlyName { name: "Porch".to_string() };
        assert_eq!(format!("{}", rename), "CHANGEFRIENDLYNAME");
    }
}
