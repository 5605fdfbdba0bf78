//! Free-text search terms for content listing.

/// A parsed `?search=` value.
///
/// The raw string is split on whitespace and commas; a double-quoted segment
/// is kept together as one phrase. Terms are lower-cased. An item matches when
/// every term is a substring of at least one searchable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Returns `None` when the input holds no terms (empty, blank, or only separators).
    pub fn parse(raw: &str) -> Option<Self> {
        let mut terms = Vec::new();
        let mut current = String::new();
        let mut quoted = false;

        for c in raw.chars() {
            match c {
                '"' => {
                    quoted = !quoted;
                    flush(&mut terms, &mut current);
                }
                c if !quoted && (c.is_whitespace() || c == ',') => {
                    flush(&mut terms, &mut current);
                }
                '\0' => {}
                c => current.push(c),
            }
        }
        flush(&mut terms, &mut current);

        if terms.is_empty() {
            None
        } else {
            Some(Self { terms })
        }
    }

    /// Lower-cased terms, in input order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Every term must occur (case-insensitively) in at least one field.
    /// Both sides are upper-cased, as the database search does.
    pub fn matches(&self, fields: &[&str]) -> bool {
        let fields: Vec<String> = fields.iter().map(|f| f.to_uppercase()).collect();
        self.terms.iter().all(|term| {
            let term = term.to_uppercase();
            fields.iter().any(|field| field.contains(term.as_str()))
        })
    }
}

fn flush(terms: &mut Vec<String>, current: &mut String) {
    let term = current.trim();
    if !term.is_empty() {
        terms.push(term.to_lowercase());
    }
    current.clear();
}
