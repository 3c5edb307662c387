/// Splits CSV text into rows of fields.
///
/// Quoting follows RFC 4180: a quote outside a quoted section opens one, `""` inside a
/// quoted section is a literal quote, and commas / line breaks inside quotes are data.
/// `\n`, `\r\n` and a bare `\r` all end a row. A final row made of a single empty field
/// (what a trailing newline leaves behind) is discarded.
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    let mut scanner = Scanner::default();
    let mut chars = text.strip_prefix('\u{feff}').unwrap_or(text).chars().peekable();

    while let Some(ch) = chars.next() {
        if scanner.in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    scanner.field.push('"');
                } else {
                    scanner.in_quotes = false;
                }
            } else {
                scanner.field.push(ch);
            }
            continue;
        }

        match ch {
            '"' => scanner.in_quotes = true,
            ',' => scanner.end_field(),
            '\n' => scanner.end_row(),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                scanner.end_row();
            }
            other => scanner.field.push(other),
        }
    }

    scanner.finish()
}

#[derive(Default)]
struct Scanner {
    in_quotes: bool,
    field: String,
    row: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Scanner {
    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn end_row(&mut self) {
        self.end_field();
        self.rows.push(std::mem::take(&mut self.row));
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        self.end_row();
        if matches!(self.rows.last(), Some(last) if last.len() == 1 && last[0].is_empty()) {
            self.rows.pop();
        }
        self.rows
    }
}
