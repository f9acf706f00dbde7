//! Server-rendered pages.
//!
//! Templates are compiled into the binary. The only substitution is the
//! publishable key, which Stripe.js needs to tokenize cards.

use axum::extract::State;
use axum::response::Html;

use super::handlers::PaymentAppState;

const HOMEPAGE: &str = include_str!("../../../../templates/homepage.html");
const SUBSCRIPTION_PAGE: &str = include_str!("../../../../templates/subscription.html");
const CHARGE_PAGE: &str = include_str!("../../../../templates/charge.html");

const PUBLIC_KEY_PLACEHOLDER: &str = "{{stripe_public_key}}";

/// GET / - Landing page
pub async fn homepage() -> Html<&'static str> {
    Html(HOMEPAGE)
}

/// GET /subscription - Subscription, coupon and cancellation forms
pub async fn subscription_page(State(state): State<PaymentAppState>) -> Html<String> {
    Html(render(SUBSCRIPTION_PAGE, &state.public_key))
}

/// GET /charge - One-off purchase form
pub async fn charge_page(State(state): State<PaymentAppState>) -> Html<String> {
    Html(render(CHARGE_PAGE, &state.public_key))
}

fn render(template: &str, public_key: &str) -> String {
    template.replace(PUBLIC_KEY_PLACEHOLDER, &escape_html(public_key))
}

/// Escapes text for use inside an HTML attribute or a quoted script string.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
