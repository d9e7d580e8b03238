//! JSON I/O handling for the CLI
//!
//! - Output: one JSON object per command on stdout
//! - Payload input: raw bytes on stdin when `--data` is absent

use std::io::{self, Read, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Read a whole payload from stdin
pub fn read_payload() -> CliResult<Vec<u8>> {
    let mut payload = Vec::new();
    io::stdin().lock().read_to_end(&mut payload)?;
    Ok(payload)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout().lock(), data)
}

fn write_response_to<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_envelope() {
        let mut out = Vec::new();
        write_response_to(&mut out, json!({"size": 21})).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["size"], 21);
    }
}
