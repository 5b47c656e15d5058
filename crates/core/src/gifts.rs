//! Built-in gift suggestions and sort-order helpers.

use crate::models::{Gift, GiftSuggestion};

/// Suggestions shown when the `gifts` table cannot be read.
pub const FALLBACK_GIFTS: [&str; 8] = [
    "Roupinhas (tamanho 1-2 anos)",
    "Brinquedos educativos",
    "Livros infantis",
    "Fraldas (tamanho G ou GG)",
    "Produtos de higiene infantil",
    "Brinquedos de banho",
    "Pelúcias macias",
    "Blocos de montar grandes",
];

/// [`FALLBACK_GIFTS`] as suggestions without descriptions.
#[must_use]
pub fn fallback_suggestions() -> Vec<GiftSuggestion> {
    FALLBACK_GIFTS.iter().copied().map(GiftSuggestion::from).collect()
}

/// Sort order for a gift appended after `existing`: one past the current
/// maximum, or 1 when there are none.
#[must_use]
pub fn next_sort_order(existing: &[Gift]) -> i32 {
    existing
        .iter()
        .map(|g| g.sort_order)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Trim a free-text description, mapping blank input to `None`.
#[must_use]
pub fn normalize_description(description: &str) -> Option<String> {
    let trimmed = description.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::GiftId;

    fn gift(sort_order: i32) -> Gift {
        Gift {
            id: GiftId::new(sort_order.to_string()),
            name: format!("Gift {sort_order}"),
            description: None,
            is_active: true,
            sort_order,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_fallback_has_eight_items() {
        let gifts = fallback_suggestions();
        assert_eq!(gifts.len(), 8);
        assert_eq!(gifts[0].name, "Roupinhas (tamanho 1-2 anos)");
        assert_eq!(gifts[7].name, "Blocos de montar grandes");
        assert!(gifts.iter().all(|g| g.description.is_none()));
    }

    #[test]
    fn test_next_sort_order() {
        assert_eq!(next_sort_order(&[]), 1);
        assert_eq!(next_sort_order(&[gift(3), gift(9), gift(2)]), 10);
    }

    #[test]
    fn test_normalize_description() {
        assert_eq!(normalize_description("   "), None);
        assert_eq!(
            normalize_description(" tamanho M "),
            Some("tamanho M".to_string())
        );
    }
}
