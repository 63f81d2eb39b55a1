//! Response side of the SOAP translation
//!
//! Wemo replies echo the argument element of the action, e.g.
//! `<BinaryState>1</BinaryState>`. The value is captured as word characters
//! and spaces only; anything else yields an empty result rather than an error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::operation::Operation;

static CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(BinaryState|SignalStrength|FriendlyName|DimValue)>([\w ]+?)</")
        .expect("content pattern is valid")
});

/// How the reply's value element is located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagMatching {
    /// Only the element named by the operation's argument counts
    #[default]
    Expected,
    /// The first of any known element counts, regardless of operation
    Any,
}

/// Capture the raw value for `operation` from a reply body
pub fn extract_value<'a>(
    operation: &Operation,
    body: &'a str,
    matching: TagMatching,
) -> Option<&'a str> {
    CONTENT
        .captures_iter(body)
        .find(|caps| match matching {
            TagMatching::Any => true,
            TagMatching::Expected => &caps[1] == operation.argument(),
        })
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Translate a reply body into the result text for `operation`
pub fn interpret_response(operation: &Operation, body: &str) -> String {
    interpret_response_with(operation, body, TagMatching::default())
}

/// [`interpret_response`] with an explicit tag matching mode
pub fn interpret_response_with(
    operation: &Operation,
    body: &str,
    matching: TagMatching,
) -> String {
    let raw = match extract_value(operation, body, matching) {
        Some(raw) => raw,
        None => {
            warn!(
                operation = %operation,
                expected = operation.argument(),
                "no recognised value in device response"
            );
            ""
        }
    };

    let translated = match operation {
        Operation::QueryState | Operation::On | Operation::Off => match raw {
            "1" => "On",
            "0" => "Off",
            other => other,
        },
        Operation::QueryNightLight | Operation::NightLightOn | Operation::NightLightOff => {
            match raw {
                "0" => "On",
                "1" => "Dim",
                "2" => "Off",
                other => other,
            }
        }
        Operation::QuerySignalStrength
        | Operation::QueryFriendlyName
        | Operation::ChangeFriendlyName { .. } => raw,
    };
    translated.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn envelope(inner: &str) -> String {
        format!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body>{}</s:Body></s:Envelope>"#,
            inner
        )
    }

    #[rstest]
    #[case(Operation::On, "<BinaryState>1</BinaryState>", "On")]
    #[case(Operation::Off, "<BinaryState>0</BinaryState>", "Off")]
    #[case(Operation::QueryState, "<BinaryState>1</BinaryState>", "On")]
    #[case(Operation::QueryState, "<BinaryState>8</BinaryState>", "8")]
    #[case(Operation::QueryNightLight, "<DimValue>0</DimValue>", "On")]
    #[case(Operation::QueryNightLight, "<DimValue>1</DimValue>", "Dim")]
    #[case(Operation::QueryNightLight, "<DimValue>2</DimValue>", "Off")]
    #[case(Operation::NightLightOff, "<DimValue>2</DimValue>", "Off")]
    #[case(Operation::QuerySignalStrength, "<SignalStrength>87</SignalStrength>", "87")]
    #[case(Operation::QueryFriendlyName, "<FriendlyName>Living Room</FriendlyName>", "Living Room")]
    fn test_interpret(#[case] operation: Operation, #[case] body: &str, #[case] expected: &str) {
        assert_eq!(interpret_response(&operation, body), expected);
    }

    #[test]
    fn test_interpret_full_envelope() {
        let body = envelope(
            r#"<u:GetBinaryStateResponse xmlns:u="urn:Belkin:service:basicevent:1"><BinaryState>0</BinaryState></u:GetBinaryStateResponse>"#,
        );
        assert_eq!(interpret_response(&Operation::QueryState, &body), "Off");
    }

    #[test]
    fn test_rename_passes_name_through() {
        let operation = Operation::ChangeFriendlyName {
            name: "Porch".to_string(),
        };
        assert_eq!(
            interpret_response(&operation, "<FriendlyName>Porch</FriendlyName>"),
            "Porch"
        );
    }

    #[rstest]
    #[case(TagMatching::Expected)]
    #[case(TagMatching::Any)]
    fn test_unexpected_tag_yields_empty(#[case] matching: TagMatching) {
        let result = interpret_response_with(
            &Operation::QuerySignalStrength,
            "<UnexpectedTag>42</UnexpectedTag>",
            matching,
        );
        assert_eq!(result, "");
    }

    #[test]
    fn test_non_word_value_yields_empty() {
        assert_eq!(
            interpret_response(&Operation::QueryState, "<BinaryState>1|0|12</BinaryState>"),
            ""
        );
    }

    #[test]
    fn test_expected_matching_skips_other_tags() {
        let body = "<FriendlyName>Lamp</FriendlyName><BinaryState>1</BinaryState>";
        assert_eq!(interpret_response(&Operation::QueryState, body), "On");
        assert_eq!(
            interpret_response_with(&Operation::QueryState, body, TagMatching::Any),
            "Lamp"
        );
    }

    #[test]
    fn test_extract_value() {
        let body = "<SignalStrength>100</SignalStrength>";
        assert_eq!(
            extract_value(&Operation::QuerySignalStrength, body, TagMatching::Expected),
            Some("100")
        );
        assert_eq!(
            extract_value(&Operation::QueryState, body, TagMatching::Expected),
            None
        );
    }
}
