use std::fmt;

/// Resposta de um comando, renderizada como texto para o usuário.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(String),
    Null,
    Array(Vec<Reply>),
}

impl Reply {
    pub fn ok() -> Reply {
        Reply::Simple("OK".into())
    }

    /// Helper: cria um Reply::Bulk a partir de &str.
    pub fn bulk(s: &str) -> Reply {
        Reply::Bulk(s.to_string())
    }

    /// Helper: cria um Array de Bulk strings.
    pub fn array_from_strings<I>(items: I) -> Reply
    where
        I: IntoIterator<Item = String>,
    {
        Reply::Array(items.into_iter().map(Reply::Bulk).collect())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_reply(self))
    }
}

/// Formata um reply para exibição humana.
fn format_reply(reply: &Reply) -> String {
    match reply {
        Reply::Simple(s) => s.clone(),
        Reply::Error(s) => format!("(error) {s}"),
        Reply::Integer(n) => format!("(integer) {n}"),
        Reply::Bulk(s) => format!("{s:?}"),
        Reply::Null => "(nil)".into(),
        Reply::Array(items) => {
            if items.is_empty() {
                return "(empty array)".into();
            }
            let mut lines = Vec::new();
            for (i, item) in items.iter().enumerate() {
                lines.push(format!("{}) {}", i + 1, format_reply(item)));
            }
            lines.join("\n")
        }
    }
}
