use shopbot_core::config::DEFAULT_STORE_NAME;
use shopbot_core::matcher::normalize;
use shopbot_core::{Cart, Catalog};
use tracing::debug;

use crate::handlers::{self, TurnContext};
use crate::intent::{Intent, IntentRouter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

/// One shopper's conversation: an immutable catalog and the cart it fills.
#[derive(Clone, Debug)]
pub struct SalesSession {
    catalog: Catalog,
    cart: Cart,
    router: IntentRouter,
    store_name: String,
}

impl Default for SalesSession {
    fn default() -> Self {
        Self::new(Catalog::storefront())
    }
}

impl SalesSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            router: IntentRouter::standard(),
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }

    pub fn with_store_name(mut self, store_name: impl Into<String>) -> Self {
        self.store_name = store_name.into();
        self
    }

    pub fn with_router(mut self, router: IntentRouter) -> Self {
        self.router = router;
        self
    }

    pub fn respond(&mut self, input: &str) -> String {
        self.reply(input).text
    }

    pub fn reply(&mut self, input: &str) -> Reply {
        let normalized = normalize(input);
        let intent = self.router.classify(&normalized, &self.catalog);
        debug!(event_name = "session.intent.routed", intent = intent.as_str(), "input routed");

        let context = TurnContext {
            catalog: &self.catalog,
            cart: &mut self.cart,
            store_name: &self.store_name,
        };
        let text = handlers::dispatch(intent, context, &normalized);

        Reply { intent, text }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }
}
