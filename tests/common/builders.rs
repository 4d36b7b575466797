//! Test builders — ergonomic constructors for `Record` and source text.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use jobpatra_core::Record;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] fixtures.
///
/// ```rust
/// let record = RecordBuilder::new("Wipro")
///     .state("Karnataka")
///     .city("Bengaluru")
///     .roles(&["Developer"])
///     .build();
/// ```
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            record: Record {
                company: Some(company.into()),
                ..Record::default()
            },
        }
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.record.state = Some(state.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.record.city = Some(city.into());
        self
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.record.sector = Some(sector.into());
        self
    }

    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.record.roles = Some(roles.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.record.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Source text
// ---------------------------------------------------------------------------

/// Render records as a JS-literal block with single-quoted strings,
/// unquoted keys, one record per line, and trailing commas.
///
/// String values must not contain `'` or `\`.
pub fn js_block(name: &str, records: &[Record]) -> String {
    let mut out = format!("window.{name} = [\n");
    for record in records {
        let value = serde_json::to_value(record).expect("record serializes");
        out.push_str("  ");
        push_js_value(&mut out, &value);
        out.push_str(",\n");
    }
    out.push_str("];\n");
    out
}

fn push_js_value(out: &mut String, value: &serde_json::Value) {
    match value {
        serde_json::Value::String(s) => {
            out.push('\'');
            out.push_str(s);
            out.push('\'');
        }
        serde_json::Value::Array(items) => {
            out.push('[');
            for item in items {
                push_js_value(out, item);
                out.push_str(", ");
            }
            out.push(']');
        }
        serde_json::Value::Object(map) => {
            out.push_str("{ ");
            for (key, item) in map {
                out.push_str(key);
                out.push_str(": ");
                push_js_value(out, item);
                out.push_str(", ");
            }
            out.push('}');
        }
        other => out.push_str(&other.to_string()),
    }
}
