use shopbot_core::matcher::contains_any;
use shopbot_core::Catalog;

pub const GREETING_WORDS: &[&str] = &["hello", "hi", "hey"];
pub const LIST_PRODUCTS_PHRASES: &[&str] = &["what products", "show products", "list products"];
pub const PRODUCT_INFO_PHRASES: &[&str] = &["tell me about", "information about"];
pub const RECOMMEND_PHRASES: &[&str] = &["recommend"];
pub const SHOW_CART_PHRASES: &[&str] = &["show cart", "view cart", "my cart"];
pub const ADD_KEYWORD: &str = "add";
pub const CHECKOUT_PHRASES: &[&str] = &["checkout", "complete purchase", "buy"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    ListProducts,
    ProductInfo,
    Recommend,
    ShowCart,
    AddToCart,
    Checkout,
    Help,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::ListProducts => "list_products",
            Self::ProductInfo => "product_info",
            Self::Recommend => "recommend",
            Self::ShowCart => "show_cart",
            Self::AddToCart => "add_to_cart",
            Self::Checkout => "checkout",
            Self::Help => "help",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type IntentPredicate = fn(&str, &Catalog) -> bool;

/// One entry of the priority chain: when `predicate` holds, `intent` wins.
#[derive(Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    predicate: IntentPredicate,
}

impl IntentRule {
    pub fn new(intent: Intent, predicate: IntentPredicate) -> Self {
        Self { intent, predicate }
    }

    pub fn matches(&self, normalized_text: &str, catalog: &Catalog) -> bool {
        (self.predicate)(normalized_text, catalog)
    }
}

impl std::fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRule").field("intent", &self.intent).finish_non_exhaustive()
    }
}

/// Ordered rule table. The first matching rule decides; nothing matching means [`Intent::Help`].
#[derive(Clone, Debug)]
pub struct IntentRouter {
    rules: Vec<IntentRule>,
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::standard()
    }
}

impl IntentRouter {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// Greeting, list, info, recommend, cart, add, checkout; in that order.
    pub fn standard() -> Self {
        Self::new(vec![
            IntentRule::new(Intent::Greeting, |text, _| contains_any(text, GREETING_WORDS)),
            IntentRule::new(Intent::ListProducts, |text, _| {
                contains_any(text, LIST_PRODUCTS_PHRASES)
            }),
            IntentRule::new(Intent::ProductInfo, |text, _| contains_any(text, PRODUCT_INFO_PHRASES)),
            IntentRule::new(Intent::Recommend, |text, _| contains_any(text, RECOMMEND_PHRASES)),
            IntentRule::new(Intent::ShowCart, |text, _| contains_any(text, SHOW_CART_PHRASES)),
            IntentRule::new(Intent::AddToCart, |text, catalog| {
                text.contains(ADD_KEYWORD) && catalog.mentions_any_product(text)
            }),
            IntentRule::new(Intent::Checkout, |text, _| contains_any(text, CHECKOUT_PHRASES)),
        ])
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// `normalized_text` must already be lower-cased.
    pub fn classify(&self, normalized_text: &str, catalog: &Catalog) -> Intent {
        self.rules
            .iter()
            .find(|rule| rule.matches(normalized_text, catalog))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Help)
    }
}

#[cfg(test)]
mod tests {
    use shopbot_core::matcher::normalize;
    use shopbot_core::Catalog;

    use super::{Intent, IntentRouter};

    fn classify(text: &str) -> Intent {
        IntentRouter::standard().classify(&normalize(text), &Catalog::storefront())
    }

    #[test]
    fn rule_table_has_fixed_priority_order() {
        let order =
            IntentRouter::standard().rules().iter().map(|rule| rule.intent).collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                Intent::Greeting,
                Intent::ListProducts,
                Intent::ProductInfo,
                Intent::Recommend,
                Intent::ShowCart,
                Intent::AddToCart,
                Intent::Checkout,
            ]
        );
    }

    #[test]
    fn greeting_outranks_cart_view() {
        assert_eq!(classify("hi, show me the cart"), Intent::Greeting);
        assert_eq!(classify("Hey, show cart please"), Intent::Greeting);
    }

    #[test]
    fn greeting_keywords_match_inside_other_words() {
        assert_eq!(classify("recommend something"), Intent::Greeting);
        assert_eq!(classify("which products? list products"), Intent::Greeting);
        assert_eq!(classify("this is my cart?"), Intent::Greeting);
        assert_eq!(classify("they want to checkout"), Intent::Greeting);
        assert_eq!(classify("Hello"), Intent::Greeting);
    }

    #[test]
    fn routes_each_intent_phrase() {
        let cases = [
            ("What products do you have?", Intent::ListProducts),
            ("show products", Intent::ListProducts),
            ("list products", Intent::ListProducts),
            ("Tell me about Wireless Earbuds", Intent::ProductInfo),
            ("information about the camera", Intent::ProductInfo),
            ("what do you recommend", Intent::Recommend),
            ("view cart", Intent::ShowCart),
            ("what's in my cart", Intent::ShowCart),
            ("add 3 fitness tracker", Intent::AddToCart),
            ("checkout", Intent::Checkout),
            ("complete purchase", Intent::Checkout),
            ("I want to buy now", Intent::Checkout),
            ("what is the weather", Intent::Help),
            ("", Intent::Help),
        ];

        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "routing `{text}`");
        }
    }

    #[test]
    fn add_requires_a_known_product_name() {
        assert_eq!(classify("add a laptop"), Intent::Help);
        assert_eq!(classify("add a laptop and buy it"), Intent::Checkout);
        assert_eq!(classify("add portable charger"), Intent::AddToCart);
    }

    #[test]
    fn product_info_outranks_add() {
        assert_eq!(classify("tell me about adding a fitness tracker"), Intent::ProductInfo);
    }

    #[test]
    fn custom_rule_tables_are_respected() {
        let router = IntentRouter::new(vec![super::IntentRule::new(Intent::Checkout, |text, _| {
            text.contains("pay")
        })]);
        let catalog = Catalog::storefront();

        assert_eq!(router.classify("pay now", &catalog), Intent::Checkout);
        assert_eq!(router.classify("hello", &catalog), Intent::Help);
    }
}
