//! Generate command: one request in, one response out.

use std::path::Path as FsPath;

use anyhow::Result;
use log::info;

use super::common::{parse_request, read_input, run_request, write_output};
use super::wire::CallResponse;

/// Answer a request. Failures become an `INTERNAL` response.
pub fn respond(request_text: &str) -> CallResponse {
    let request = match parse_request(request_text) {
        Ok(request) => request,
        Err(err) => return CallResponse::internal(format!("{err:#}")),
    };

    match run_request(&request) {
        Ok(output) => {
            info!(
                "Generated {} lines, {} polygons",
                output.lines.len(),
                output.polygons.len()
            );
            CallResponse::ok(&output)
        }
        Err(err) => CallResponse::internal(err.to_string()),
    }
}

/// Execute the generate command. Returns whether the response status is OK.
pub fn cmd_generate(input: Option<&FsPath>, output: Option<&FsPath>) -> Result<bool> {
    let request_text = read_input(input)?;
    let response = respond(&request_text);

    let mut json = serde_json::to_string_pretty(&response)?;
    json.push('\n');
    write_output(output, &json)?;

    Ok(response.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_response_has_lines() {
        let response = respond(
            r#"{
                "pattern": "PLUGIN::CuraEnginePattern@0.1.0::HILBERT",
                "settings": {"infill_line_distance": "0.25"},
                "infill_areas": [{"outline": [
                    {"x": 0, "y": 0}, {"x": 1000, "y": 0},
                    {"x": 1000, "y": 1000}, {"x": 0, "y": 1000}
                ]}]
            }"#,
        );
        assert!(response.is_ok());
        assert_eq!(response.message, None);
        assert_eq!(response.poly_lines.len(), 15);
        assert!(response.polygons.is_empty());
    }

    #[test]
    fn unknown_pattern_is_internal() {
        let response = respond(
            r#"{"pattern": "FOO", "settings": {"infill_line_distance": "0.25"}, "infill_areas": []}"#,
        );
        assert_eq!(response.status, "INTERNAL");
        assert_eq!(response.message.as_deref(), Some("Pattern: FOO is unknown"));
        assert!(response.poly_lines.is_empty());
    }

    #[test]
    fn malformed_request_is_internal() {
        let response = respond("{");
        assert_eq!(response.status, "INTERNAL");
        assert!(response.message.unwrap().starts_with("request is not a valid CallRequest"));
    }
}
