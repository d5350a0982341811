//! Inventory items and stock classification.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use officeline_core::{AppError, AppResult, NonEmptyString, OfficeId};
use serde::{Deserialize, Serialize};

use crate::ItemId;

/// Share of `max_stock`, in percent, at which an item counts as overstocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OverstockRatio(u8);

impl OverstockRatio {
    /// Creates a ratio in `1..=100` percent.
    pub fn new(percent: u8) -> AppResult<Self> {
        if !(1..=100).contains(&percent) {
            return Err(AppError::Validation(format!(
                "overstock ratio must be between 1 and 100 percent, got {percent}"
            )));
        }

        Ok(Self(percent))
    }

    /// Returns the ratio in percent.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl Default for OverstockRatio {
    fn default() -> Self {
        Self(90)
    }
}

impl From<OverstockRatio> for u8 {
    fn from(value: OverstockRatio) -> Self {
        value.0
    }
}

impl TryFrom<u8> for OverstockRatio {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Derived stock level of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// No units left.
    OutOfStock,
    /// At or below the minimum.
    Low,
    /// Between the minimum and the overstock threshold.
    Good,
    /// At or above the overstock threshold.
    Overstocked,
}

impl StockStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfStock => "out_of_stock",
            Self::Low => "low",
            Self::Good => "good",
            Self::Overstocked => "overstocked",
        }
    }

    /// Returns true for statuses that need restocking.
    #[must_use]
    pub fn needs_restock(&self) -> bool {
        matches!(self, Self::OutOfStock | Self::Low)
    }
}

impl FromStr for StockStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "out_of_stock" => Ok(Self::OutOfStock),
            "low" => Ok(Self::Low),
            "good" => Ok(Self::Good),
            "overstocked" => Ok(Self::Overstocked),
            _ => Err(AppError::Validation(format!(
                "unknown stock status '{value}'"
            ))),
        }
    }
}

/// Classifies a stock level.
///
/// Zero is checked before the minimum, so an item with `min_stock == 0`
/// and no units is out of stock rather than good.
#[must_use]
pub fn classify_stock(
    current_stock: u32,
    min_stock: u32,
    max_stock: u32,
    ratio: OverstockRatio,
) -> StockStatus {
    if current_stock == 0 {
        StockStatus::OutOfStock
    } else if current_stock <= min_stock {
        StockStatus::Low
    } else if u64::from(current_stock) * 100 >= u64::from(max_stock) * u64::from(ratio.percent()) {
        StockStatus::Overstocked
    } else {
        StockStatus::Good
    }
}

/// Input for adding an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInventoryItem {
    /// Item name.
    pub name: String,
    /// Grouping label.
    pub category: String,
    /// Units on hand.
    pub current_stock: u32,
    /// Restock threshold.
    pub min_stock: u32,
    /// Capacity; must exceed `min_stock`.
    pub max_stock: u32,
    /// Unit label such as `reams` or `boxes`.
    pub unit: String,
    /// Optional supplier.
    pub supplier: Option<String>,
    /// Optional storage location.
    pub location: Option<String>,
    /// Optional stock keeping unit.
    pub sku: Option<String>,
    /// Unit cost in minor currency units.
    pub cost_cents: u64,
}

/// A stocked item of an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    office_id: OfficeId,
    name: NonEmptyString,
    category: NonEmptyString,
    current_stock: u32,
    min_stock: u32,
    max_stock: u32,
    unit: NonEmptyString,
    supplier: Option<String>,
    location: Option<String>,
    sku: Option<String>,
    cost_cents: u64,
    last_updated: DateTime<Utc>,
}

impl InventoryItem {
    /// Creates a validated item.
    pub fn new(
        office_id: OfficeId,
        input: NewInventoryItem,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if input.max_stock <= input.min_stock {
            return Err(AppError::Validation(format!(
                "max stock ({}) must be greater than min stock ({})",
                input.max_stock, input.min_stock
            )));
        }

        Ok(Self {
            id: ItemId::new(),
            office_id,
            name: NonEmptyString::for_field("item name", input.name)?,
            category: NonEmptyString::for_field("item category", input.category)?,
            current_stock: input.current_stock,
            min_stock: input.min_stock,
            max_stock: input.max_stock,
            unit: NonEmptyString::for_field("item unit", input.unit)?,
            supplier: optional_text(input.supplier),
            location: optional_text(input.location),
            sku: optional_text(input.sku),
            cost_cents: input.cost_cents,
            last_updated: created_at,
        })
    }

    /// Returns the item id.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the owning office.
    #[must_use]
    pub fn office_id(&self) -> OfficeId {
        self.office_id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> &NonEmptyString {
        &self.category
    }

    /// Returns units on hand.
    #[must_use]
    pub fn current_stock(&self) -> u32 {
        self.current_stock
    }

    /// Returns the restock threshold.
    #[must_use]
    pub fn min_stock(&self) -> u32 {
        self.min_stock
    }

    /// Returns the capacity.
    #[must_use]
    pub fn max_stock(&self) -> u32 {
        self.max_stock
    }

    /// Returns the unit label.
    #[must_use]
    pub fn unit(&self) -> &NonEmptyString {
        &self.unit
    }

    /// Returns the supplier.
    #[must_use]
    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref()
    }

    /// Returns the storage location.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the stock keeping unit.
    #[must_use]
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    /// Returns the unit cost in minor units.
    #[must_use]
    pub fn cost_cents(&self) -> u64 {
        self.cost_cents
    }

    /// Returns when stock was last changed.
    #[must_use]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Classifies the item with the default overstock ratio.
    #[must_use]
    pub fn classify(&self) -> StockStatus {
        self.classify_with(OverstockRatio::default())
    }

    /// Classifies the item with an explicit overstock ratio.
    #[must_use]
    pub fn classify_with(&self, ratio: OverstockRatio) -> StockStatus {
        classify_stock(self.current_stock, self.min_stock, self.max_stock, ratio)
    }

    /// Value of the units on hand in minor units.
    #[must_use]
    pub fn stock_value_cents(&self) -> u64 {
        u64::from(self.current_stock).saturating_mul(self.cost_cents)
    }

    /// Adds `delta` units, clamping at zero. `last_updated` is always stamped.
    pub fn adjust_stock(
        &mut self,
        delta: i64,
        now: DateTime<Utc>,
        ratio: OverstockRatio,
    ) -> StockAdjustment {
        let target = i64::from(self.current_stock).saturating_add(delta);
        let clamped = u32::try_from(target.max(0)).unwrap_or(u32::MAX);
        self.apply_stock(clamped, now, ratio)
    }

    /// Replaces the stock count. `last_updated` is always stamped.
    pub fn set_stock(
        &mut self,
        current_stock: u32,
        now: DateTime<Utc>,
        ratio: OverstockRatio,
    ) -> StockAdjustment {
        self.apply_stock(current_stock, now, ratio)
    }

    fn apply_stock(
        &mut self,
        current_stock: u32,
        now: DateTime<Utc>,
        ratio: OverstockRatio,
    ) -> StockAdjustment {
        let previous_stock = self.current_stock;
        let previous_status = self.classify_with(ratio);

        self.current_stock = current_stock;
        self.last_updated = now;

        StockAdjustment {
            previous_stock,
            current_stock,
            previous_status,
            status: self.classify_with(ratio),
        }
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Outcome of a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    /// Units before the change.
    pub previous_stock: u32,
    /// Units after the change.
    pub current_stock: u32,
    /// Classification before the change.
    pub previous_status: StockStatus,
    /// Classification after the change.
    pub status: StockStatus,
}

impl StockAdjustment {
    /// Returns true when the change moved the item into a restock status.
    #[must_use]
    pub fn crossed_restock_threshold(&self) -> bool {
        self.status.needs_restock() && self.status != self.previous_status
    }
}

/// Notification payload for an item that needs restocking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    /// Office owning the item.
    pub office_id: OfficeId,
    /// Item id.
    pub item_id: ItemId,
    /// Item name.
    pub item_name: String,
    /// New classification.
    pub status: StockStatus,
    /// Units on hand.
    pub current_stock: u32,
    /// Restock threshold.
    pub min_stock: u32,
}

impl StockAlert {
    /// Builds an alert when `adjustment` crossed into a restock status.
    #[must_use]
    pub fn from_adjustment(item: &InventoryItem, adjustment: &StockAdjustment) -> Option<Self> {
        adjustment.crossed_restock_threshold().then(|| Self {
            office_id: item.office_id(),
            item_id: item.id(),
            item_name: item.name().as_str().to_owned(),
            status: adjustment.status,
            current_stock: adjustment.current_stock,
            min_stock: item.min_stock(),
        })
    }
}

/// Optional inventory predicates; every provided predicate must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    /// Keep only items in this category.
    pub category: Option<String>,
    /// Keep only items with this classification.
    pub status: Option<StockStatus>,
}

impl InventoryFilter {
    /// Returns true when `item` passes every provided predicate.
    #[must_use]
    pub fn matches(&self, item: &InventoryItem, ratio: OverstockRatio) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| item.category().as_str() == category)
            && self
                .status
                .is_none_or(|status| item.classify_with(ratio) == status)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn item(current_stock: u32, min_stock: u32, max_stock: u32) -> InventoryItem {
        InventoryItem::new(
            OfficeId::new(),
            NewInventoryItem {
                name: "Office Paper A4".to_owned(),
                category: "Office Supplies".to_owned(),
                current_stock,
                min_stock,
                max_stock,
                unit: "reams".to_owned(),
                supplier: Some("Staples".to_owned()),
                location: None,
                sku: Some("  ".to_owned()),
                cost_cents: 899,
            },
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn zero_stock_with_zero_minimum_is_out_of_stock() {
        assert_eq!(item(0, 0, 10).classify(), StockStatus::OutOfStock);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(item(2, 5, 20).classify(), StockStatus::Low);
        assert_eq!(item(5, 5, 20).classify(), StockStatus::Low);
        assert_eq!(item(6, 5, 20).classify(), StockStatus::Good);
        assert_eq!(item(17, 5, 20).classify(), StockStatus::Good);
        assert_eq!(item(18, 5, 20).classify(), StockStatus::Overstocked);
        assert_eq!(item(25, 5, 20).classify(), StockStatus::Overstocked);
    }

    #[test]
    fn custom_ratio_moves_overstock_threshold() {
        let ratio = OverstockRatio::new(100).unwrap_or_else(|_| unreachable!());
        assert_eq!(item(18, 5, 20).classify_with(ratio), StockStatus::Good);
        assert!(OverstockRatio::new(0).is_err());
        assert!(OverstockRatio::new(101).is_err());
    }

    #[test]
    fn max_stock_must_exceed_min_stock() {
        let created = InventoryItem::new(
            OfficeId::new(),
            NewInventoryItem {
                name: "Coffee".to_owned(),
                category: "Pantry".to_owned(),
                current_stock: 1,
                min_stock: 5,
                max_stock: 5,
                unit: "bags".to_owned(),
                supplier: None,
                location: None,
                sku: None,
                cost_cents: 1250,
            },
            Utc::now(),
        );

        assert!(created.is_err());
    }

    #[test]
    fn clamped_adjustment_still_stamps_last_updated() {
        let mut paper = item(0, 5, 20);
        let later = paper.last_updated() + chrono::Duration::minutes(5);

        let adjustment = paper.adjust_stock(-3, later, OverstockRatio::default());
        assert_eq!(adjustment.current_stock, 0);
        assert_eq!(paper.last_updated(), later);
        assert!(!adjustment.crossed_restock_threshold());
    }

    #[test]
    fn dropping_below_minimum_produces_alert() {
        let mut paper = item(10, 5, 20);
        let adjustment = paper.adjust_stock(-6, Utc::now(), OverstockRatio::default());

        let alert = StockAlert::from_adjustment(&paper, &adjustment);
        assert_eq!(alert.map(|value| value.status), Some(StockStatus::Low));
    }

    #[test]
    fn blank_optional_fields_are_dropped() {
        let paper = item(10, 5, 20);
        assert_eq!(paper.sku(), None);
        assert_eq!(paper.supplier(), Some("Staples"));
        assert_eq!(paper.stock_value_cents(), 8990);
    }

    #[test]
    fn inventory_filter_ands_predicates() {
        let paper = item(2, 5, 20);
        let filter = InventoryFilter {
            category: Some("Office Supplies".to_owned()),
            status: Some(StockStatus::Low),
        };
        let other_category = InventoryFilter {
            category: Some("Pantry".to_owned()),
            status: None,
        };

        assert!(filter.matches(&paper, OverstockRatio::default()));
        assert!(!other_category.matches(&paper, OverstockRatio::default()));
    }

    proptest! {
        #[test]
        fn classification_is_total_and_consistent(
            current in 0_u32..10_000,
            min in 0_u32..5_000,
            span in 1_u32..5_000,
        ) {
            let status = classify_stock(current, min, min + span, OverstockRatio::default());
            let expected = if current == 0 {
                StockStatus::OutOfStock
            } else if current <= min {
                StockStatus::Low
            } else if u64::from(current) * 10 >= u64::from(min + span) * 9 {
                StockStatus::Overstocked
            } else {
                StockStatus::Good
            };
            prop_assert_eq!(status, expected);
        }

        #[test]
        fn adjustment_never_goes_negative(start in 0_u32..1_000, delta in -100_000_i64..100_000) {
            let mut paper = item(start, 5, 20);
            let adjustment = paper.adjust_stock(delta, Utc::now(), OverstockRatio::default());
            let expected = (i64::from(start) + delta).max(0);
            prop_assert_eq!(i64::from(adjustment.current_stock), expected);
            prop_assert_eq!(i64::from(paper.current_stock()), expected);
        }
    }
}
