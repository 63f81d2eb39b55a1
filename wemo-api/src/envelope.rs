//! Request side of the SOAP translation

use std::borrow::Cow;

use quick_xml::escape::escape;

use crate::operation::{CommandRequest, Operation};

/// A ready-to-send SOAP request: header value plus XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapEnvelope {
    /// Value of the `SOAPAction` HTTP header, quotes included
    pub soap_action: String,
    /// Complete SOAP 1.1 document
    pub body: String,
}

/// The text placed inside the argument element
fn argument_value(operation: &Operation) -> Cow<'_, str> {
    match operation {
        Operation::On => Cow::Borrowed("1"),
        Operation::Off => Cow::Borrowed("0"),
        // Night-light levels run the other way: 0 is fully on, 2 is off.
        Operation::NightLightOn => Cow::Borrowed("0"),
        Operation::NightLightOff => Cow::Borrowed("2"),
        Operation::ChangeFriendlyName { name } => escape(name.as_str()),
        Operation::QueryState
        | Operation::QueryNightLight
        | Operation::QuerySignalStrength
        | Operation::QueryFriendlyName => Cow::Borrowed(""),
    }
}

impl SoapEnvelope {
    /// Build the envelope for one operation
    pub fn for_operation(operation: &Operation) -> Self {
        let service_uri = Operation::SERVICE.info().service_uri;
        let action = operation.action();
        let argument = operation.argument();
        let payload = format!(
            "<{argument}>{value}</{argument}>",
            argument = argument,
            value = argument_value(operation)
        );

        Self {
            soap_action: soap_client::soap_action(service_uri, action),
            body: soap_client::envelope(service_uri, action, &payload),
        }
    }
}

/// Build the SOAP request for a resolved command
pub fn build_envelope(request: &CommandRequest) -> SoapEnvelope {
    SoapEnvelope::for_operation(&request.operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Operation::QueryState, "GetBinaryState", "<BinaryState></BinaryState>")]
    #[case(Operation::On, "SetBinaryState", "<BinaryState>1</BinaryState>")]
    #[case(Operation::Off, "SetBinaryState", "<BinaryState>0</BinaryState>")]
    #[case(Operation::QueryNightLight, "GetNightLightStatus", "<DimValue></DimValue>")]
    #[case(Operation::NightLightOn, "SetNightLightStatus", "<DimValue>0</DimValue>")]
    #[case(Operation::NightLightOff, "SetNightLightStatus", "<DimValue>2</DimValue>")]
    #[case(Operation::QuerySignalStrength, "GetSignalStrength", "<SignalStrength></SignalStrength>")]
    #[case(Operation::QueryFriendlyName, "GetFriendlyName", "<FriendlyName></FriendlyName>")]
    #[case(
        Operation::ChangeFriendlyName { name: "Kitchen Light".to_string() },
        "ChangeFriendlyName",
        "<FriendlyName>Kitchen Light</FriendlyName>"
    )]
    fn test_envelope_per_operation(
        #[case] operation: Operation,
        #[case] action: &str,
        #[case] payload: &str,
    ) {
        let envelope = build_envelope(&CommandRequest::new(operation, "test"));

        assert_eq!(
            envelope.soap_action,
            format!("\"urn:Belkin:service:basicevent:1#{}\"", action)
        );
        let expected = format!(
            "<u:{action} xmlns:u=\"urn:Belkin:service:basicevent:1\">{payload}</u:{action}>",
            action = action,
            payload = payload
        );
        assert!(
            envelope.body.contains(&expected),
            "body {} should contain {}",
            envelope.body,
            expected
        );
    }

    #[test]
    fn test_envelope_skeleton() {
        let envelope = SoapEnvelope::for_operation(&Operation::QueryState);
        assert!(envelope.body.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(envelope.body.contains(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">"#
        ));
        assert!(envelope.body.contains("<s:Body>"));
    }

    #[test]
    fn test_rename_value_is_escaped() {
        let operation = Operation::ChangeFriendlyName {
            name: "Tom & Jerry <3".to_string(),
        };
        let envelope = SoapEnvelope::for_operation(&operation);
        assert!(envelope
            .body
            .contains("<FriendlyName>Tom &amp; Jerry &lt;3</FriendlyName>"));
    }
}
