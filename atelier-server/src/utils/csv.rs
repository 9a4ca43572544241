//! Minimal CSV support
//!
//! Hand-rolled, comma-delimited, quote-aware parser for bulk import/export.
//! Quote handling is limited to toggling in/out of a quoted section; there
//! is no escaped-quote syntax. Matches the import dialogs' expectations.

/// Parse CSV text into rows of fields. Handles CRLF and LF line endings,
/// skips fully empty lines.
pub fn parse(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for line in input.lines() {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_line(line));
    }

    rows
}

/// Split one line on commas outside of quoted sections.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Serialize rows to CSV text. Fields containing commas, quotes or newlines
/// are wrapped in quotes (inner quotes are dropped, mirroring the parser).
pub fn write(rows: &[Vec<String>]) -> String {
    let mut out = String::new();

    for row in rows {
        let line: Vec<String> = row.iter().map(|f| encode_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

fn encode_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', ""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_rows() {
        let rows = parse("name,phone,role\nAisha,600111222,tailor\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["name", "phone", "role"]);
        assert_eq!(rows[1], vec!["Aisha", "600111222", "tailor"]);
    }

    #[test]
    fn quoted_field_keeps_comma() {
        let rows = parse("\"Lopez, Maria\",600333444,admin");
        assert_eq!(rows[0][0], "Lopez, Maria");
        assert_eq!(rows[0][1], "600333444");
    }

    #[test]
    fn skips_empty_lines() {
        let rows = parse("a,b\n\n\nc,d\n");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn trims_whitespace_around_fields() {
        let rows = parse(" a , b ,c");
        assert_eq!(rows[0], vec!["a", "b", "c"]);
    }

    #[test]
    fn write_quotes_fields_with_commas() {
        let csv = write(&[vec!["Lopez, Maria".to_string(), "tailor".to_string()]]);
        assert_eq!(csv, "\"Lopez, Maria\",tailor\n");
    }

    #[test]
    fn write_then_parse_round_trips_commas() {
        let rows = vec![vec!["a,b".to_string(), "c".to_string()]];
        let parsed = parse(&write(&rows));
        assert_eq!(parsed, rows);
    }
}
