//! GA4 analytics items for Wake checkout lines.

use commerce_apps_core::AnalyticsItem;

use super::types::CheckoutProduct;

/// GA4 item for a checkout line.
#[must_use]
pub fn item_to_analytics_item(
    item: &CheckoutProduct,
    coupon: Option<&str>,
    index: usize,
) -> AnalyticsItem {
    AnalyticsItem {
        item_id: format!("{}_{}", item.product_id, item.product_variant_id),
        item_name: item.name.clone(),
        item_brand: item.brand.clone(),
        item_variant: Some(item.product_variant_id.to_string()),
        coupon: coupon.map(str::to_string),
        discount: Some(item.price - item.ajusted_price),
        price: Some(item.price),
        index: Some(index),
        quantity: item.quantity,
        ..Default::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_item_to_analytics_item() {
        let item = CheckoutProduct {
            product_id: 10,
            product_variant_id: 20,
            name: Some("Caneca".to_string()),
            brand: Some("Acme".to_string()),
            quantity: 2,
            price: Decimal::from(50),
            ajusted_price: Decimal::from(45),
            ..Default::default()
        };

        let analytics = item_to_analytics_item(&item, Some("PROMO10"), 3);
        assert_eq!(analytics.item_id, "10_20");
        assert_eq!(analytics.item_variant.as_deref(), Some("20"));
        assert_eq!(analytics.discount, Some(Decimal::from(5)));
        assert_eq!(analytics.index, Some(3));

        let value = serde_json::to_value(&analytics).unwrap();
        assert_eq!(value["discount"], json!(5.0));
        assert_eq!(value["coupon"], "PROMO10");
        assert_eq!(value["quantity"], 2);
    }

    #[test]
    fn test_decoded_line_without_coupon() {
        let item: CheckoutProduct = serde_json::from_value(json!({
            "productId": 1,
            "productVariantId": 2,
            "quantity": 1,
            "price": 10,
            "ajustedPrice": 10
        }))
        .unwrap();

        let analytics = item_to_analytics_item(&item, None, 0);
        assert_eq!(analytics.item_id, "1_2");
        assert_eq!(analytics.coupon, None);
        assert_eq!(analytics.discount, Some(Decimal::ZERO));
        assert_eq!(analytics.index, Some(0));
    }
}
