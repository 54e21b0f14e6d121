//! Promotion matching and discount computation (pure)

use shared::models::{AppliedPromoCode, CartItem, PromoCode};
use shared::money::percentage_of;

use super::PromotionError;

/// Whether a cart line falls inside the code's scope
pub fn matches_scope(promo: &PromoCode, item: &CartItem) -> bool {
    promo.scope_type.target_of(item) == Some(promo.target_id)
}

/// Sum of `price * quantity` over the lines the code applies to
///
/// Saturates instead of overflowing; carts are bounds-checked before they
/// reach the evaluator.
pub fn eligible_sum(promo: &PromoCode, items: &[CartItem]) -> i64 {
    items
        .iter()
        .filter(|item| matches_scope(promo, item))
        .map(|item| item.line_total().unwrap_or(i64::MAX))
        .fold(0, i64::saturating_add)
}

/// Expiry and usage checks, in that order
///
/// Expiry is strict: a code expiring exactly at `now` is still usable.
pub fn check_usable(promo: &PromoCode, now: i64) -> Result<(), PromotionError> {
    if promo.is_expired_at(now) {
        return Err(PromotionError::Expired(promo.code.clone()));
    }
    if promo.is_exhausted() {
        return Err(PromotionError::Exhausted(promo.code.clone()));
    }
    Ok(())
}

/// Discount snapshot for the cart, or `NotApplicable` when nothing matches
pub fn compute_discount(
    promo: &PromoCode,
    items: &[CartItem],
) -> Result<AppliedPromoCode, PromotionError> {
    let eligible = eligible_sum(promo, items);
    if eligible == 0 {
        return Err(PromotionError::NotApplicable(promo.code.clone()));
    }

    Ok(AppliedPromoCode {
        code: promo.code.clone(),
        percentage: promo.percentage,
        scope_type: promo.scope_type,
        target_id: promo.target_id,
        discount_amount: percentage_of(eligible, promo.percentage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ScopeType;

    const CAT_A: i64 = 100;
    const CAT_B: i64 = 200;
    const COLLECTION: i64 = 300;

    fn promo(scope_type: ScopeType, target_id: i64, percentage: f64) -> PromoCode {
        PromoCode {
            id: 1,
            code: "SAVE10".into(),
            percentage,
            scope_type,
            target_id,
            target_name: "target".into(),
            max_uses: 5,
            uses: 0,
            expiry: None,
            active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn item(product_id: i64, price: i64, quantity: i64, category_id: Option<i64>) -> CartItem {
        CartItem {
            product_id,
            name: format!("p{product_id}"),
            price,
            image: None,
            color: "Black".into(),
            size: "M".into(),
            quantity,
            category_id,
            collection_id: Some(COLLECTION),
        }
    }

    #[test]
    fn test_category_scope_discount() {
        let cart = vec![item(1, 1000, 2, Some(CAT_A))];
        let applied = compute_discount(&promo(ScopeType::Category, CAT_A, 10.0), &cart).unwrap();
        assert_eq!(applied.discount_amount, 200);
        assert_eq!(applied.code, "SAVE10");
        assert_eq!(applied.scope_type, ScopeType::Category);
    }

    #[test]
    fn test_non_matching_scope_is_not_applicable() {
        let cart = vec![item(1, 1000, 2, Some(CAT_A))];
        let err = compute_discount(&promo(ScopeType::Category, CAT_B, 10.0), &cart).unwrap_err();
        assert!(matches!(err, PromotionError::NotApplicable(_)));
    }

    #[test]
    fn test_only_eligible_lines_count() {
        let cart = vec![
            item(1, 1000, 2, Some(CAT_A)),
            item(2, 700, 1, Some(CAT_B)),
            item(3, 150, 3, None),
        ];
        assert_eq!(eligible_sum(&promo(ScopeType::Category, CAT_A, 10.0), &cart), 2000);
        assert_eq!(eligible_sum(&promo(ScopeType::Product, 2, 10.0), &cart), 700);
        assert_eq!(eligible_sum(&promo(ScopeType::Collection, COLLECTION, 10.0), &cart), 2000 + 700 + 450);
    }

    #[test]
    fn test_eligible_sum_saturates_on_overflow() {
        let cart = vec![
            item(1, i64::MAX / 2, 3, Some(CAT_A)),
            item(2, 1000, 1, Some(CAT_A)),
        ];
        assert_eq!(eligible_sum(&promo(ScopeType::Category, CAT_A, 10.0), &cart), i64::MAX);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // 15 * 10% = 1.5 -> 2
        let cart = vec![item(1, 15, 1, Some(CAT_A))];
        let applied = compute_discount(&promo(ScopeType::Category, CAT_A, 10.0), &cart).unwrap();
        assert_eq!(applied.discount_amount, 2);
    }

    #[test]
    fn test_free_items_make_code_not_applicable() {
        let cart = vec![item(1, 0, 4, Some(CAT_A))];
        let err = compute_discount(&promo(ScopeType::Category, CAT_A, 50.0), &cart).unwrap_err();
        assert!(matches!(err, PromotionError::NotApplicable(_)));
    }

    #[test]
    fn test_usability_checks() {
        let mut code = promo(ScopeType::Category, CAT_A, 10.0);
        assert!(check_usable(&code, 1_000).is_ok());

        code.expiry = Some(999);
        assert!(matches!(check_usable(&code, 1_000), Err(PromotionError::Expired(_))));

        code.expiry = Some(1_000);
        assert!(check_usable(&code, 1_000).is_ok());

        code.expiry = None;
        code.uses = code.max_uses;
        assert!(matches!(check_usable(&code, 1_000), Err(PromotionError::Exhausted(_))));
    }

    #[test]
    fn test_expired_wins_over_exhausted() {
        let mut code = promo(ScopeType::Category, CAT_A, 10.0);
        code.expiry = Some(0);
        code.uses = code.max_uses;
        assert!(matches!(check_usable(&code, 1), Err(PromotionError::Expired(_))));
    }
}
