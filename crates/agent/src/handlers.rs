//! One response builder per [`Intent`]. Handlers never fail: every outcome,
//! including "not found" and "out of stock", is a user-facing message.

use shopbot_core::matcher::{first_integer, IntegerLiteral};
use shopbot_core::{format_price, Cart, Catalog};
use tracing::info;

use crate::intent::Intent;

pub const PRODUCT_INFO_NOT_FOUND: &str = "I couldn't find information about that product.";
pub const PRODUCT_NOT_FOUND: &str = "I couldn't find that product.";
pub const EMPTY_CHECKOUT: &str = "Your cart is empty. Add some products before checking out!";
pub const QUANTITY_TOO_LARGE: &str = "That quantity is too large to add to your cart.";
pub const NOTHING_TO_RECOMMEND: &str = "We don't have any products to recommend right now.";

pub const HELP_MESSAGE: &str = "Here are some commands you can use:
- \"show products\" to list available products
- \"tell me about <product_name>\" for product details
- \"add <quantity> <product_name>\" to add to cart
- \"show cart\" to view your cart
- \"checkout\" to complete the purchase
- \"exit\" to quit the chatbot";

/// Everything a handler may read or mutate during one turn.
pub struct TurnContext<'a> {
    pub catalog: &'a Catalog,
    pub cart: &'a mut Cart,
    pub store_name: &'a str,
}

pub fn dispatch(intent: Intent, context: TurnContext<'_>, query: &str) -> String {
    match intent {
        Intent::Greeting => greeting(context.store_name),
        Intent::ListProducts => list_products(context.catalog),
        Intent::ProductInfo => product_info(context.catalog, query),
        Intent::Recommend => recommend(context.catalog),
        Intent::ShowCart => show_cart(context.cart),
        Intent::AddToCart => add_to_cart(context.catalog, context.cart, query),
        Intent::Checkout => checkout(context.cart),
        Intent::Help => help(),
    }
}

pub fn greeting(store_name: &str) -> String {
    format!("Hello! Welcome to {store_name}. How can I help you today?")
}

pub fn list_products(catalog: &Catalog) -> String {
    let mut rendered = String::from("Here are our available products:\n");
    for product in catalog.products() {
        rendered.push_str(&format!(
            "- {}: {} ({})\n",
            product.name,
            format_price(product.price),
            product.availability_label()
        ));
    }
    rendered
}

pub fn product_info(catalog: &Catalog, query: &str) -> String {
    match catalog.find_in_text(query) {
        Some(product) => format!(
            "{}: {}\nPrice: {}",
            product.name,
            product.description,
            format_price(product.price)
        ),
        None => PRODUCT_INFO_NOT_FOUND.to_string(),
    }
}

pub fn recommend(catalog: &Catalog) -> String {
    match catalog.most_expensive() {
        Some(product) => format!(
            "I recommend our {}! {}\nPrice: {}",
            product.name,
            product.description,
            format_price(product.price)
        ),
        None => NOTHING_TO_RECOMMEND.to_string(),
    }
}

pub fn show_cart(cart: &Cart) -> String {
    cart.display()
}

/// Adds the first whole-word product match. The quantity is the first number
/// anywhere in the query, even one that sits after a different product name.
pub fn add_to_cart(catalog: &Catalog, cart: &mut Cart, query: &str) -> String {
    let Some(product) = catalog.find_whole_word_in_text(query) else {
        return PRODUCT_NOT_FOUND.to_string();
    };

    if !product.available {
        info!(
            event_name = "cart.add.rejected",
            product_id = %product.id,
            reason = "out_of_stock",
            "add to cart rejected"
        );
        return format!("Sorry, {} is currently out of stock.", product.name);
    }

    let quantity = match first_integer(query) {
        None => 1,
        Some(IntegerLiteral::Value(0)) => {
            info!(
                event_name = "cart.add.rejected",
                product_id = %product.id,
                reason = "zero_quantity",
                "add to cart rejected"
            );
            return format!("Please add at least one {}.", product.name);
        }
        Some(IntegerLiteral::Value(quantity)) => quantity,
        Some(IntegerLiteral::Overflow) => {
            info!(
                event_name = "cart.add.rejected",
                product_id = %product.id,
                reason = "quantity_overflow",
                "add to cart rejected"
            );
            return QUANTITY_TOO_LARGE.to_string();
        }
    };

    if cart.quantity_of(&product.id).checked_add(quantity).is_none() {
        info!(
            event_name = "cart.add.rejected",
            product_id = %product.id,
            reason = "cart_quantity_overflow",
            "add to cart rejected"
        );
        return QUANTITY_TOO_LARGE.to_string();
    }

    cart.add_item(product, quantity);
    info!(
        event_name = "cart.item.added",
        product_id = %product.id,
        quantity,
        cart_quantity = cart.quantity_of(&product.id),
        "item added to cart"
    );

    format!("Added {quantity} {}(s) to your cart.\n{}", product.name, cart.display())
}

pub fn checkout(cart: &mut Cart) -> String {
    if cart.is_empty() {
        return EMPTY_CHECKOUT.to_string();
    }

    let total = cart.total();
    let line_count = cart.len();
    cart.clear();
    info!(
        event_name = "cart.checkout.completed",
        line_count,
        total = %total,
        "checkout completed"
    );

    format!(
        "Thank you for your purchase! Your total was {}. Your order will be processed shortly.",
        format_price(total)
    )
}

pub fn help() -> String {
    HELP_MESSAGE.to_string()
}
