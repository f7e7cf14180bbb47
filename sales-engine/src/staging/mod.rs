//! Staged selections
//!
//! The sale editors hand the user off to an item picker and take them back
//! afterwards. What the editor held (header fields, the lines so far and the
//! order discount) and what the picker chose are parked here in between,
//! keyed per editor.
//!
//! Flow for one editor:
//! 1. editor → picker: [`SelectionBridge::leave_editor`] stashes form + order
//! 2. picker reads [`SelectionBridge::current_selection`] to pre-check items
//! 3. picker confirms: [`SelectionBridge::submit_selection`] (discount kept)
//! 4. editor mounts: [`SelectionBridge::enter_editor`] consumes both entries
//! 5. after a successful submit or a cancel: [`SelectionBridge::discard`]

mod storage;

pub use storage::{STAGE_SCHEMA_VERSION, StagingError, StagingResult, StagingStore};

use crate::form::SaleForm;
use serde::{Deserialize, Serialize};
use shared::order::{ItemKind, LineItem, Order};

/// Storage slot for one staged value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKey {
    /// Product-sale order (picked lines + discount)
    SelectedProducts,
    /// Product-sale editor header while the picker is open
    ProductSellForm,
    /// Therapy-sale order (packages with session counts + discount)
    SelectedTherapyPackages,
    /// Therapy-sale editor header while the picker is open
    TherapySellForm,
}

impl StageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StageKey::SelectedProducts => "selected_products",
            StageKey::ProductSellForm => "product_sell_form",
            StageKey::SelectedTherapyPackages => "selected_therapy_packages",
            StageKey::TherapySellForm => "therapy_sell_form",
        }
    }

    /// Selection slot for an editor
    pub fn selection(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Product => StageKey::SelectedProducts,
            ItemKind::Therapy => StageKey::SelectedTherapyPackages,
        }
    }

    /// Form slot for an editor
    pub fn form(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Product => StageKey::ProductSellForm,
            ItemKind::Therapy => StageKey::TherapySellForm,
        }
    }
}

/// What an editor finds on mount
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedSale {
    pub form: Option<SaleForm>,
    /// Lines and discount; totals are recomputed by the editor
    pub order: Order,
}

impl StagedSale {
    pub fn is_empty(&self) -> bool {
        self.form.is_none() && self.order.is_empty()
    }
}

/// Editor ⇄ picker hand-off over a [`StagingStore`]
#[derive(Debug, Clone)]
pub struct SelectionBridge {
    store: StagingStore,
}

impl SelectionBridge {
    pub fn new(store: StagingStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StagingStore {
        &self.store
    }

    /// Editor is navigating to the picker: keep its header and order
    pub fn leave_editor(&self, form: &SaleForm, order: &Order) -> StagingResult<()> {
        self.store.save(StageKey::form(form.kind), form)?;
        self.store.save(StageKey::selection(form.kind), order)?;
        Ok(())
    }

    /// Lines currently staged for `kind`, without consuming them
    pub fn current_selection(&self, kind: ItemKind) -> Vec<LineItem> {
        self.load_order(kind, false).lines
    }

    /// Picker confirmed: replace the staged lines with its selection
    ///
    /// The staged discount is left as the editor set it.
    pub fn submit_selection(&self, kind: ItemKind, lines: &[LineItem]) -> StagingResult<()> {
        let mut order = self.load_order(kind, false);
        order.lines = lines.to_vec();
        self.store.save(StageKey::selection(kind), &order)
    }

    /// Editor is mounting: take whatever was staged for it
    pub fn enter_editor(&self, kind: ItemKind) -> StagedSale {
        let form: Option<SaleForm> = self.store.take(StageKey::form(kind));
        let form = form.filter(|f| {
            let matches = f.kind == kind;
            if !matches {
                tracing::warn!(?kind, staged = ?f.kind, "Staged form belongs to another editor");
            }
            matches
        });
        let order = self.load_order(kind, true);
        tracing::debug!(
            ?kind,
            restored_form = form.is_some(),
            lines = order.lines.len(),
            "Editor restored staged sale"
        );
        StagedSale { form, order }
    }

    /// Drop everything staged for `kind`
    pub fn discard(&self, kind: ItemKind) -> StagingResult<()> {
        self.store.clear(StageKey::form(kind))?;
        self.store.clear(StageKey::selection(kind))?;
        Ok(())
    }

    fn load_order(&self, kind: ItemKind, consume: bool) -> Order {
        let key = StageKey::selection(kind);
        let order: Option<Order> = if consume {
            self.store.take(key)
        } else {
            self.store.load(key)
        };
        let mut order = order.unwrap_or_default();
        let before = order.lines.len();
        order.lines.retain(|l| l.kind == kind);
        if order.lines.len() < before {
            tracing::warn!(
                ?kind,
                dropped = before - order.lines.len(),
                "Dropped staged lines of another kind"
            );
        }
        order
    }
}
