use serde::Serialize;

use staffdesk::error::AppError;

/// Writes results either as aligned text or as JSON documents.
pub(crate) struct Output {
    json: bool,
}

impl Output {
    pub(crate) fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints `value` as JSON, or the text produced by `render`.
    pub(crate) fn emit<T, F>(&self, value: &T, render: F)
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        if self.json {
            match serde_json::to_string_pretty(value) {
                Ok(body) => println!("{}", body),
                Err(err) => eprintln!("error: failed to encode output: {}", err),
            }
        } else {
            println!("{}", render(value));
        }
    }

    /// Prints `rows` as a table, or a placeholder when empty.
    pub(crate) fn table<T, F>(&self, rows: &[T], empty: &str, render_row: F)
    where
        T: Serialize,
        F: Fn(&T) -> String,
    {
        self.emit(&rows, |rows| {
            if rows.is_empty() {
                empty.to_string()
            } else {
                rows.iter().map(&render_row).collect::<Vec<_>>().join("\n")
            }
        });
    }

    pub(crate) fn error(&self, err: &AppError) {
        if self.json {
            let body = serde_json::to_string(&err.to_response())
                .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", err.code()));
            eprintln!("{}", body);
        } else {
            eprintln!("error: {}", err);
        }
    }
}
