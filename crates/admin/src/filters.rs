//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

fn counted(value: &impl Display, singular: &str, plural: &str) -> String {
    let value = value.to_string();
    let label = if value.trim() == "1" { singular } else { plural };
    format!("{value} {label}")
}

/// `1 pessoa`, `3 pessoas`.
///
/// Usage in templates: `{{ count|pessoas }}`
#[askama::filter_fn]
pub fn pessoas(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(counted(&value, "pessoa", "pessoas"))
}

/// `1 criança`, `2 crianças`.
///
/// Usage in templates: `{{ count|criancas }}`
#[askama::filter_fn]
pub fn criancas(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(counted(&value, "criança", "crianças"))
}

#[cfg(test)]
mod tests {
    use askama::Template;

    use crate::filters;

    #[derive(Template)]
    #[template(source = "{{ a|pessoas }} / {{ b|criancas }}", ext = "txt")]
    struct Counts {
        a: u32,
        b: u32,
    }

    #[test]
    fn test_plural_labels() {
        let out = Counts { a: 1, b: 2 }.render().ok();
        assert_eq!(out.as_deref(), Some("1 pessoa / 2 crianças"));
        let out = Counts { a: 0, b: 1 }.render().ok();
        assert_eq!(out.as_deref(), Some("0 pessoas / 1 criança"));
    }
}
