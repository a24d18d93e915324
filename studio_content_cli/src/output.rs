//! Output writers for `studio-content`.

use std::io::Write;

use serde_json::Value;
use studio_content::ContentValue;
use studio_content::mapper::Record;

use crate::error::CliError;

/// Render `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write>(out: &mut W, value: &Value) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// JSON for an optional record: the flattened record or `null`.
pub fn record_json(record: Option<Record>) -> Value {
    record.map_or(Value::Null, |found| found.into_value().to_json())
}

/// JSON array of flattened records, in store order.
pub fn records_json(records: Vec<Record>) -> Value {
    Value::Array(
        records
            .into_iter()
            .map(|record| ContentValue::from(record).to_json())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use studio_content::ContentMap;

    use super::*;

    fn record(id: &str, title: &str) -> Record {
        let mut fields = ContentMap::new();
        fields.insert("title".into(), ContentValue::from(title));
        Record::new(id, fields)
    }

    #[test]
    fn missing_records_render_as_null() {
        assert_eq!(record_json(None), Value::Null);
    }

    #[test]
    fn records_render_with_their_id() {
        assert_eq!(
            records_json(vec![record("a", "Alpha"), record("b", "Beta")]),
            json!([{"id": "a", "title": "Alpha"}, {"id": "b", "title": "Beta"}])
        );
    }

    #[test]
    fn json_ends_with_a_newline() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"ok": true})).expect("write succeeds");
        let text = String::from_utf8(buffer).expect("output is UTF-8");
        assert_eq!(text, "{\n  \"ok\": true\n}\n");
    }
}
