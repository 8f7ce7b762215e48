use super::CsvError;

/// One parsed record and the line it started on (1-based).
pub(super) struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Quote a field when it contains a separator, a quote or a line break, or
/// when it has whitespace at either edge.
pub(super) fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) || value.trim() != value {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub(super) fn write_record(buffer: &mut String, fields: &[&str]) {
    let escaped: Vec<String> = fields.iter().map(|field| escape_field(field)).collect();
    buffer.push_str(&escaped.join(","));
    buffer.push('\n');
}

/// Split CSV text into records. Quoted fields may contain separators,
/// doubled quotes and line breaks and are kept verbatim. Unquoted fields are
/// trimmed. Blank lines are skipped.
pub(super) fn parse_records(text: &str) -> Result<Vec<Record>, CsvError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() && !quoted => {
                field.clear();
                in_quotes = true;
                quoted = true;
            }
            '"' => {
                return Err(CsvError::InvalidRow {
                    line,
                    reason: "unexpected quote inside an unquoted field".to_string(),
                })
            }
            ',' => {
                fields.push(finish_field(&mut field, quoted));
                quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(finish_field(&mut field, quoted));
                quoted = false;
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            ' ' | '\t' if quoted => {}
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CsvError::InvalidRow {
            line: record_line,
            reason: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(finish_field(&mut field, quoted));
        push_record(&mut records, record_line, fields);
    }

    Ok(records)
}

fn finish_field(field: &mut String, quoted: bool) -> String {
    let value = std::mem::take(field);
    if quoted {
        value
    } else {
        value.trim().to_string()
    }
}

fn push_record(records: &mut Vec<Record>, line: usize, fields: Vec<String>) {
    let blank = fields.iter().all(|f| f.trim().is_empty());
    if !blank {
        records.push(Record { line, fields });
    }
}
