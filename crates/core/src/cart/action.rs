//! Cart actions and the reducer that applies them.

use crate::{
    cart::{CartItem, CartState},
    products::{CartProduct, ProductId},
};

/// A mutation of the cart.
#[derive(Clone, Debug, PartialEq)]
pub enum CartAction {
    /// Add one unit of the product, merging with an existing line.
    Add(CartProduct),

    /// Drop the product's line.
    Remove(ProductId),

    /// Set the product's quantity; zero or below drops the line.
    SetQuantity(ProductId, i64),

    /// Empty the cart.
    Clear,

    /// Replace the cart with a previously persisted one.
    Load(CartState),
}

/// Applies `action` to `state` and returns the new state.
///
/// Every action is total: unknown product ids are no-ops. The total is recomputed from
/// the resulting lines, including for [`CartAction::Load`].
pub fn reduce(state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::Add(product) => add(state, product),
        CartAction::Remove(id) => {
            let mut items = state.into_items();
            items.retain(|item| item.id != id);

            CartState::with_recomputed_total(items)
        }
        CartAction::SetQuantity(id, quantity) => set_quantity(state, id, quantity),
        CartAction::Clear => CartState::new(),
        CartAction::Load(prior) => CartState::from_items(prior.into_items()),
    }
}

fn add(state: CartState, product: CartProduct) -> CartState {
    let mut items = state.into_items();

    if let Some(item) = items.iter_mut().find(|item| item.id == product.id) {
        item.quantity = item.quantity.saturating_add(1);
    } else {
        items.push(CartItem::from_product(product));
    }

    CartState::with_recomputed_total(items)
}

fn set_quantity(state: CartState, id: ProductId, quantity: i64) -> CartState {
    let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
    let mut items = state.into_items();

    if quantity == 0 {
        items.retain(|item| item.id != id);
    } else if let Some(item) = items.iter_mut().find(|item| item.id == id) {
        item.quantity = quantity;
    }

    CartState::with_recomputed_total(items)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn widget() -> CartProduct {
        CartProduct::new(1, "Widget", Decimal::TEN)
    }

    #[test]
    fn add_appends_snapshot_with_quantity_one() {
        let state = reduce(
            CartState::new(),
            CartAction::Add(widget().with_category("tools")),
        );

        assert_eq!(state.len(), 1);

        let item = state.item(ProductId::new(1));
        assert_eq!(item.map(CartItem::name), Some("Widget"));
        assert_eq!(item.map(CartItem::quantity), Some(1));
        assert_eq!(item.and_then(CartItem::category), Some("tools"));
        assert_eq!(state.total(), Decimal::TEN);
    }

    #[test]
    fn add_twice_merges_into_one_line() {
        let state = reduce(CartState::new(), CartAction::Add(widget()));
        let state = reduce(state, CartAction::Add(widget()));

        assert_eq!(state.len(), 1);
        assert_eq!(state.quantity_of(ProductId::new(1)), 2);
        assert_eq!(state.total(), Decimal::new(20, 0));
    }

    #[test]
    fn add_keeps_snapshot_of_first_add() {
        let state = reduce(CartState::new(), CartAction::Add(widget()));
        let repriced = CartProduct::new(1, "Widget v2", Decimal::new(99, 0));
        let state = reduce(state, CartAction::Add(repriced));

        assert_eq!(state.item(ProductId::new(1)).map(CartItem::name), Some("Widget"));
        assert_eq!(state.total(), Decimal::new(20, 0));
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let state = reduce(CartState::new(), CartAction::Add(widget()));
        let after = reduce(state.clone(), CartAction::Remove(ProductId::new(77)));

        assert_eq!(after, state);
    }

    #[test]
    fn remove_drops_line_and_recomputes_total() {
        let state = CartState::from_items([
            CartItem::new(1, "Widget", Decimal::new(5, 0), 2),
            CartItem::new(2, "Gadget", Decimal::new(3, 0), 1),
        ]);

        let state = reduce(state, CartAction::Remove(ProductId::new(2)));

        assert!(!state.contains(ProductId::new(2)));
        assert_eq!(state.total(), Decimal::new(10, 0));
    }

    #[test]
    fn set_quantity_zero_drops_line() {
        let state = CartState::from_items([
            CartItem::new(1, "Widget", Decimal::new(5, 0), 2),
            CartItem::new(2, "Gadget", Decimal::new(3, 0), 1),
        ]);

        let state = reduce(state, CartAction::SetQuantity(ProductId::new(1), 0));

        assert_eq!(
            state.items(),
            &[CartItem::new(2, "Gadget", Decimal::new(3, 0), 1)]
        );
        assert_eq!(state.total(), Decimal::new(3, 0));
    }

    #[test]
    fn set_quantity_negative_is_clamped_to_removal() {
        let state = reduce(CartState::new(), CartAction::Add(widget()));
        let state = reduce(state, CartAction::SetQuantity(ProductId::new(1), -4));

        assert!(state.is_empty());
        assert_eq!(state.total(), Decimal::ZERO);
    }

    #[test]
    fn set_quantity_updates_existing_line_only() {
        let state = reduce(CartState::new(), CartAction::Add(widget()));
        let state = reduce(state, CartAction::SetQuantity(ProductId::new(1), 5));
        let state = reduce(state, CartAction::SetQuantity(ProductId::new(2), 5));

        assert_eq!(state.len(), 1);
        assert_eq!(state.quantity_of(ProductId::new(1)), 5);
        assert_eq!(state.total(), Decimal::new(50, 0));
    }

    #[test]
    fn clear_empties_cart() {
        let state = reduce(CartState::new(), CartAction::Add(widget()));
        let state = reduce(state, CartAction::Clear);

        assert_eq!(state, CartState::new());
    }

    #[test]
    fn load_replaces_state_and_rederives_total() {
        let current = reduce(CartState::new(), CartAction::Add(widget()));
        let prior = CartState::from_items([CartItem::new(4, "Soap", Decimal::new(250, 2), 3)]);

        let state = reduce(current, CartAction::Load(prior.clone()));

        assert_eq!(state, prior);
        assert_eq!(state.total(), Decimal::new(750, 2));
    }
}
