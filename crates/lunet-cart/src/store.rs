//! Session cart store.
//!
//! Line items are aggregated by `(product, variant)` identity; quantities
//! drive removal (an item can never persist with quantity zero). All
//! arithmetic is `Decimal` in the storage unit — conversion to a display
//! currency happens at the presentation boundary, not here.

use rust_decimal::Decimal;

use lunet_core::{MappedProduct, MappedVariant};

/// Identity of a cart line: product plus optional variant. `None` is the
/// single "default" slot for products sold without variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartKey {
    pub product_id: i64,
    pub variant_id: Option<i64>,
}

/// One aggregated line in the cart.
///
/// Invariant: `quantity >= 1` for as long as the item is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub key: CartKey,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Notification emitted to subscribers after a mutation has been fully
/// applied. No-op calls (missing key, zero-quantity add, unchanged update)
/// emit nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded { key: CartKey },
    QuantityUpdated { key: CartKey, quantity: u32 },
    ItemRemoved { key: CartKey },
    Cleared,
}

/// Handle returned by [`Cart::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The session cart.
///
/// Constructed empty per session and mutated only through the operations
/// below; each operation is atomic with respect to observable state.
/// Single-threaded by contract — a multi-threaded host must serialize all
/// mutating operations behind one `Mutex` around the whole store.
#[derive(Default)]
pub struct Cart {
    /// Insertion order preserved for display.
    items: Vec<CartItem>,
    subscribers: Vec<(SubscriptionId, Box<dyn Fn(&CartEvent)>)>,
    next_subscription: u64,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Cart::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` units of a product (or one of its variants).
    ///
    /// An existing line with the same identity key has its quantity
    /// incremented; otherwise a new line is appended with the unit price
    /// resolved from the variant when given, else the product, under
    /// sale-if-lower-else-regular precedence. Adding zero units is a no-op.
    pub fn add_item(
        &mut self,
        product: &MappedProduct,
        variant: Option<&MappedVariant>,
        quantity: u32,
    ) {
        if quantity == 0 {
            return;
        }

        let key = CartKey {
            product_id: product.id,
            variant_id: variant.map(|v| v.id),
        };

        if let Some(item) = self.items.iter_mut().find(|item| item.key == key) {
            item.quantity = item.quantity.saturating_add(quantity);
            let event = CartEvent::QuantityUpdated {
                key,
                quantity: item.quantity,
            };
            self.notify(&event);
            return;
        }

        let unit_price = variant
            .and_then(MappedVariant::effective_price)
            .or_else(|| product.effective_price())
            .unwrap_or_else(|| {
                tracing::warn!(
                    product_id = product.id,
                    variant_id = ?key.variant_id,
                    "no parseable price for cart line; storing zero unit price"
                );
                Decimal::ZERO
            });

        self.items.push(CartItem {
            key,
            quantity,
            unit_price,
        });
        self.notify(&CartEvent::ItemAdded { key });
    }

    /// Replaces the stored quantity for `key`.
    ///
    /// Zero removes the line entirely — delete-on-zero is the contract, not
    /// an edge case. Unknown keys are a no-op.
    pub fn update_quantity(&mut self, key: CartKey, quantity: u32) {
        if quantity == 0 {
            self.remove_item(key);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|item| item.key == key) else {
            return;
        };
        if item.quantity == quantity {
            return;
        }
        item.quantity = quantity;
        self.notify(&CartEvent::QuantityUpdated { key, quantity });
    }

    /// Removes the line for `key`. A missing key is a no-op, never an error.
    pub fn remove_item(&mut self, key: CartKey) {
        let Some(position) = self.items.iter().position(|item| item.key == key) else {
            return;
        };
        self.items.remove(position);
        self.notify(&CartEvent::ItemRemoved { key });
    }

    /// Empties the cart. A no-op when already empty.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.notify(&CartEvent::Cleared);
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of `unit_price * quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum()
    }

    /// Registers a callback invoked after every observable mutation.
    pub fn subscribe(&mut self, callback: impl Fn(&CartEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Deregisters a subscription. Returns `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&self, event: &CartEvent) {
        for (_, callback) in &self.subscribers {
            callback(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use lunet_core::{StockStatus, VariantAttributes};

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn make_product(id: i64, regular: &str, sale: Option<&str>) -> MappedProduct {
        MappedProduct {
            id,
            name: format!("Produit {id}"),
            slug: format!("produit-{id}"),
            sku: None,
            price: regular.to_owned(),
            regular_price: regular.to_owned(),
            sale_price: sale.map(str::to_owned),
            stock_status: StockStatus::InStock,
        }
    }

    fn make_variant(id: i64, parent: i64, regular: &str, sale: Option<&str>) -> MappedVariant {
        MappedVariant {
            id,
            parent_product_id: parent,
            sku: format!("VAR-{id}"),
            attributes: VariantAttributes::default(),
            price: regular.to_owned(),
            regular_price: regular.to_owned(),
            sale_price: sale.map(str::to_owned),
            stock_quantity: None,
            stock_status: StockStatus::InStock,
        }
    }

    fn key(product_id: i64, variant_id: Option<i64>) -> CartKey {
        CartKey {
            product_id,
            variant_id,
        }
    }

    #[test]
    fn add_item_same_key_aggregates_quantity() {
        let mut cart = Cart::new();
        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 2);
        cart.add_item(&product, None, 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn add_item_distinct_variants_create_distinct_lines() {
        let mut cart = Cart::new();
        let product = make_product(1, "149.90", None);
        let v1 = make_variant(101, 1, "149.90", None);
        let v2 = make_variant(102, 1, "169.90", None);
        cart.add_item(&product, Some(&v1), 1);
        cart.add_item(&product, Some(&v2), 1);
        cart.add_item(&product, None, 1);

        assert_eq!(cart.items().len(), 3);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn add_item_resolves_variant_sale_price_when_lower() {
        let mut cart = Cart::new();
        let product = make_product(1, "200.00", None);
        let variant = make_variant(101, 1, "149.90", Some("119.90"));
        cart.add_item(&product, Some(&variant), 1);
        assert_eq!(cart.items()[0].unit_price, dec("119.90"));
    }

    #[test]
    fn add_item_ignores_sale_price_not_lower() {
        let mut cart = Cart::new();
        let product = make_product(1, "200.00", None);
        let variant = make_variant(101, 1, "149.90", Some("149.90"));
        cart.add_item(&product, Some(&variant), 1);
        assert_eq!(cart.items()[0].unit_price, dec("149.90"));
    }

    #[test]
    fn add_item_falls_back_to_product_price_when_variant_unparsable() {
        let mut cart = Cart::new();
        let product = make_product(1, "99.00", Some("79.00"));
        let variant = make_variant(101, 1, "", None);
        cart.add_item(&product, Some(&variant), 1);
        assert_eq!(cart.items()[0].unit_price, dec("79.00"));
    }

    #[test]
    fn add_item_zero_quantity_is_a_no_op() {
        let mut cart = Cart::new();
        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_replaces_not_increments() {
        let mut cart = Cart::new();
        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 2);
        cart.update_quantity(key(1, None), 7);
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn update_quantity_zero_removes_item() {
        let mut cart = Cart::new();
        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 2);
        cart.update_quantity(key(1, None), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn update_quantity_unknown_key_is_a_no_op() {
        let mut cart = Cart::new();
        cart.update_quantity(key(9, Some(99)), 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_item_unknown_key_leaves_items_unchanged() {
        let mut cart = Cart::new();
        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 2);
        cart.remove_item(key(1, Some(101)));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();
        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn items_preserve_insertion_order() {
        let mut cart = Cart::new();
        let p1 = make_product(1, "10.00", None);
        let p2 = make_product(2, "20.00", None);
        let p3 = make_product(3, "30.00", None);
        cart.add_item(&p2, None, 1);
        cart.add_item(&p3, None, 1);
        cart.add_item(&p1, None, 1);
        let ids: Vec<i64> = cart.items().iter().map(|i| i.key.product_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn total_price_matches_independent_recomputation() {
        let mut cart = Cart::new();
        let p1 = make_product(1, "19.90", None);
        let p2 = make_product(2, "149.90", Some("119.90"));
        cart.add_item(&p1, None, 3);
        cart.add_item(&p2, None, 2);
        cart.update_quantity(key(1, None), 5);
        cart.remove_item(key(2, None));
        cart.add_item(&p2, None, 1);

        let expected: Decimal = cart
            .items()
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum();
        assert_eq!(cart.total_price(), expected);
        assert_eq!(cart.total_price(), dec("19.90") * Decimal::from(5u32) + dec("119.90"));
    }

    #[test]
    fn repeated_additions_accumulate_without_drift() {
        let mut cart = Cart::new();
        let product = make_product(1, "0.10", None);
        for _ in 0..100 {
            cart.add_item(&product, None, 1);
        }
        assert_eq!(cart.total_price(), dec("10.00"));
    }

    #[test]
    fn subscribers_receive_one_event_per_mutation() {
        let events: Rc<RefCell<Vec<CartEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut cart = Cart::new();
        cart.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 2); // ItemAdded
        cart.add_item(&product, None, 1); // QuantityUpdated(3)
        cart.update_quantity(key(1, None), 0); // ItemRemoved
        cart.remove_item(key(1, None)); // no-op, no event
        cart.clear(); // empty, no event

        let events = events.borrow();
        assert_eq!(
            *events,
            vec![
                CartEvent::ItemAdded { key: key(1, None) },
                CartEvent::QuantityUpdated {
                    key: key(1, None),
                    quantity: 3
                },
                CartEvent::ItemRemoved { key: key(1, None) },
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let events: Rc<RefCell<Vec<CartEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut cart = Cart::new();
        let id = cart.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        assert!(cart.unsubscribe(id));
        assert!(!cart.unsubscribe(id));

        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn update_to_same_quantity_emits_no_event() {
        let events: Rc<RefCell<Vec<CartEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut cart = Cart::new();
        let product = make_product(1, "149.90", None);
        cart.add_item(&product, None, 2);
        cart.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        cart.update_quantity(key(1, None), 2);
        assert!(events.borrow().is_empty());
    }
}
