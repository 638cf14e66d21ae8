// Output layer: renders the upload outcome on stdout in a fixed line
// format. Writers are passed in so the report can be checked in tests.

use crate::api::{ResponseJson, UploadOutcome};
use std::io::{self, Write};

pub const USAGE: &str = "Usage: image_upload <image_path> <token> <parentId>";

pub const JSON_DECODE_FAILED: &str = "Failed to decode JSON response";

pub fn print_usage(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", USAGE)
}

/// Print status, raw body and, when the body parses, its JSON form.
/// The parsed body is re-serialized as compact JSON, so
/// `{"id": "abc123"}` prints as `Response JSON: {"id":"abc123"}`.
pub fn print_outcome(out: &mut impl Write, outcome: &UploadOutcome) -> io::Result<()> {
    writeln!(out, "Status Code: {}", outcome.status)?;
    writeln!(out, "Response Content: {}", outcome.body_text())?;
    match outcome.json() {
        ResponseJson::Parsed(value) => writeln!(out, "Response JSON: {}", value),
        ResponseJson::Undecodable => writeln!(out, "{}", JSON_DECODE_FAILED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(status: u16, body: &str) -> String {
        let outcome = UploadOutcome { status, body: body.as_bytes().to_vec() };
        let mut buf = Vec::new();
        print_outcome(&mut buf, &outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn created_with_json_body() {
        assert_eq!(
            render(201, r#"{"id": "abc123"}"#),
            "Status Code: 201\n\
             Response Content: {\"id\": \"abc123\"}\n\
             Response JSON: {\"id\":\"abc123\"}\n"
        );
    }

    #[test]
    fn non_json_body_prints_fallback() {
        assert_eq!(
            render(200, "not-json"),
            "Status Code: 200\nResponse Content: not-json\nFailed to decode JSON response\n"
        );
    }

    #[test]
    fn usage_line() {
        let mut buf = Vec::new();
        print_usage(&mut buf).unwrap();
        assert_eq!(buf, b"Usage: image_upload <image_path> <token> <parentId>\n");
    }
}
