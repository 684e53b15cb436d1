//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path as FsPath;

use anyhow::{Context, Result};
use log::{debug, error, info};

use infill_pattern_core::{make_infill_generator, InfillOutput, InfillSettings};

use super::wire::CallRequest;

/// Read the whole input, from stdin when the path is missing or `-`.
pub fn read_input(path: Option<&FsPath>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            info!("Loading: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            info!("Reading request from stdin...");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Write to a file, or to stdout when no path is given.
pub fn write_output(path: Option<&FsPath>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Parse a request from JSON text.
pub fn parse_request(text: &str) -> Result<CallRequest> {
    serde_json::from_str(text).context("request is not a valid CallRequest")
}

/// Resolve settings and pattern, then generate.
///
/// Settings and registry failures come back as errors; a generator that
/// cannot fill the given outlines logs a warning and returns empty output.
pub fn run_request(request: &CallRequest) -> infill_pattern_core::Result<InfillOutput> {
    let settings = InfillSettings::from_map(&request.settings).inspect_err(|err| {
        error!("Could not read settings: {err}");
    })?;

    let generator = make_infill_generator(&request.pattern, settings.line_distance).inspect_err(|err| {
        error!("Could not create infill generator: {err}");
    })?;

    let outlines = request.outlines();
    debug!(
        "{} outline rings, line distance {}",
        outlines.len(),
        settings.line_distance
    );
    Ok(generator.generate(&outlines))
}
