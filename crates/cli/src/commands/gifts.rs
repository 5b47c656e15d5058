//! Gift table seeding.

use invite_core::NewGift;
use invite_core::gifts::{FALLBACK_GIFTS, next_sort_order};

/// Insert the built-in suggestions after any existing gifts.
///
/// Without `force`, a table that already has gifts is left alone.
///
/// # Errors
///
/// Returns an error if the backend is unreachable or an insert fails.
pub async fn seed(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = super::gateway()?;
    let gifts = gateway.gifts();

    let existing = gifts.list_all().await?;
    if !existing.is_empty() && !force {
        tracing::info!(
            count = existing.len(),
            "gifts table already has rows, skipping (use --force to append)"
        );
        return Ok(());
    }

    let first = next_sort_order(&existing);
    for (sort_order, name) in (first..).zip(FALLBACK_GIFTS) {
        let gift = gifts
            .create(&NewGift {
                name: name.to_string(),
                description: None,
                is_active: true,
                sort_order,
            })
            .await?;
        tracing::info!(id = %gift.id, name = %gift.name, sort_order, "gift inserted");
    }

    tracing::info!(count = FALLBACK_GIFTS.len(), "gifts seeded");
    Ok(())
}
