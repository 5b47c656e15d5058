//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Portuguese head-count label: `1 pessoa`, `3 pessoas`.
///
/// Usage in templates: `{{ size|pessoas }}`
#[askama::filter_fn]
pub fn pessoas(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let value = value.to_string();
    let label = if value.trim() == "1" { "pessoa" } else { "pessoas" };
    Ok(format!("{value} {label}"))
}

#[cfg(test)]
mod tests {
    use askama::Template;

    use crate::filters;

    #[derive(Template)]
    #[template(source = "{{ n|pessoas }}", ext = "txt")]
    struct Count {
        n: u8,
    }

    #[test]
    fn test_pessoas() {
        assert_eq!(Count { n: 1 }.render().ok().as_deref(), Some("1 pessoa"));
        assert_eq!(Count { n: 4 }.render().ok().as_deref(), Some("4 pessoas"));
    }
}
