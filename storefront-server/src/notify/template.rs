//! Order confirmation rendering

use shared::models::{Order, PaymentMethod};
use shared::money::format_minor;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub text: String,
}

pub fn render_order_confirmation(order: &Order, store_name: &str, currency: &str) -> RenderedMessage {
    let subject = format!("Order Confirmation - #{}", order.order_number);

    let greeting = match order.orderer.name.trim() {
        "" => "there",
        name => name,
    };

    // Writing into a String cannot fail
    let mut text = String::new();
    let _ = writeln!(text, "Hi {greeting},");
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "Thank you for shopping with {store_name}. Your order #{} was received.",
        order.order_number
    );
    let _ = writeln!(text);

    for item in &order.items {
        let _ = writeln!(
            text,
            "- {} ({} / {}) x{}  {} {}",
            item.name,
            item.size,
            item.color,
            item.quantity,
            format_minor(item.price * item.quantity),
            currency
        );
    }
    let _ = writeln!(text);

    if let Some(promo) = &order.promo_code {
        let _ = writeln!(
            text,
            "Promo code {} ({}% off): -{} {}",
            promo.code,
            promo.percentage,
            format_minor(promo.discount_amount),
            currency
        );
    }
    let _ = writeln!(text, "Total: {} {}", format_minor(order.total_price), currency);
    let _ = writeln!(text, "Payment: {}", order.payment_method.label());
    if order.payment_method == PaymentMethod::Instapay
        && let Some(username) = &order.instapay_username
    {
        let _ = writeln!(text, "Instapay username: {username}");
    }
    let _ = writeln!(text);

    let _ = writeln!(text, "Name: {}", order.orderer.name);
    if let Some(phone) = &order.orderer.phone {
        let _ = writeln!(text, "Phone: {phone}");
    }
    let address = order.shipping_address.one_line();
    if !address.is_empty() {
        let _ = writeln!(text, "Shipping to: {address}");
    }

    RenderedMessage { subject, text }
}
