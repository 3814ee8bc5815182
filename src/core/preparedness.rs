//! Preparedness rating - a 0 to 5 star summary of food and water readiness.
//!
//! Five conditions are checked in order:
//!
//! 1. some food product has non-expired stock
//! 2. some water product has non-expired stock
//! 3. non-expired food covers at least half of the total food target
//! 4. non-expired water covers at least half of the total water target
//! 5. every food product meets its own target and water meets its total target
//!
//! Food and water are judged independently. Stars are earned as a contiguous
//! prefix: the first unmet condition caps the rating and picks the hint, so a
//! later condition never earns a star while an earlier one is missing.

use crate::{
    core::stock::expired_quantity_by_product,
    entities::{Category, product, stock_entry},
};
use serde::Serialize;

/// Number of conditions, and therefore the maximum star count.
pub const MAX_STARS: u8 = 5;

/// Share of the total target that counts as "half stocked".
const HALF_TARGET: f64 = 0.5;

/// What the user should do next to earn another star.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    /// No usable food (but some water)
    AddFood,
    /// No usable water (but some food)
    AddWater,
    /// Neither food nor water in stock
    AddFoodOrWater,
    /// Food below half its target
    FoodHalf,
    /// Water below half its target
    WaterHalf,
    /// Both food and water below half their targets
    FoodOrWaterHalf,
    /// Half-stocked; fill every food target and the water target
    FullBoth,
    /// Every condition met
    Perfect,
}

/// Result of rating an inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PreparednessRating {
    /// Earned stars, `0..=5`
    pub stars: u8,
    /// Outcome of each condition in order
    pub conditions: [bool; MAX_STARS as usize],
    /// Advice for the first unmet condition
    pub hint: Hint,
}

/// Rates the inventory.
///
/// `expired` lists the batches that have passed their expiry date; their
/// quantities are subtracted from each product's `current_stock` (never going
/// below zero). Returns `None` when there are no food or water products,
/// since an empty inventory has no score.
#[must_use]
pub fn rate(
    products: &[product::Model],
    expired: &[stock_entry::Model],
) -> Option<PreparednessRating> {
    let expired_by_product = expired_quantity_by_product(expired);
    let non_expired = |p: &product::Model| {
        let spoiled = expired_by_product.get(&p.id).copied().unwrap_or(0.0);
        (p.current_stock - spoiled).max(0.0)
    };

    let food: Vec<&product::Model> = products.iter().filter(|p| p.category.is_food()).collect();
    let water: Vec<&product::Model> = products
        .iter()
        .filter(|p| p.category == Category::Water)
        .collect();

    if food.is_empty() && water.is_empty() {
        return None;
    }

    let food_target: f64 = food.iter().map(|p| p.target_quantity).sum();
    let water_target: f64 = water.iter().map(|p| p.target_quantity).sum();
    let food_stock: f64 = food.iter().map(|p| non_expired(p)).sum();
    let water_stock: f64 = water.iter().map(|p| non_expired(p)).sum();

    let covers = |stock: f64, target: f64, share: f64, any: bool| {
        any && target > 0.0 && stock >= target * share
    };

    let conditions = [
        food.iter().any(|p| non_expired(p) > 0.0),
        water.iter().any(|p| non_expired(p) > 0.0),
        covers(food_stock, food_target, HALF_TARGET, !food.is_empty()),
        covers(water_stock, water_target, HALF_TARGET, !water.is_empty()),
        !food.is_empty()
            && food.iter().all(|p| non_expired(p) >= p.target_quantity)
            && covers(water_stock, water_target, 1.0, !water.is_empty()),
    ];

    let first_unmet = conditions.iter().position(|met| !met);
    let hint = match first_unmet {
        None => Hint::Perfect,
        Some(0) if !conditions[1] => Hint::AddFoodOrWater,
        Some(0) => Hint::AddFood,
        Some(1) => Hint::AddWater,
        Some(2) if !conditions[3] => Hint::FoodOrWaterHalf,
        Some(2) => Hint::FoodHalf,
        Some(3) => Hint::WaterHalf,
        Some(_) => Hint::FullBoth,
    };

    // position() is at most 4 here, so the cast cannot truncate
    #[allow(clippy::cast_possible_truncation)]
    let stars = first_unmet.map_or(MAX_STARS, |i| i as u8);

    Some(PreparednessRating {
        stars,
        conditions,
        hint,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{sample_entry, sample_product};

    fn expired_entry(product_id: i64, quantity: f64) -> stock_entry::Model {
        sample_entry(99, product_id, quantity, Some("2020-01-01"))
    }

    #[test]
    fn test_empty_inventory_has_no_rating() {
        assert_eq!(rate(&[], &[]), None);
    }

    #[test]
    fn test_only_non_food_non_water_has_no_rating() {
        let products = vec![
            sample_product(1, Category::Medicine, 5.0, 5.0),
            sample_product(2, Category::Fuel, 5.0, 5.0),
        ];
        assert_eq!(rate(&products, &[]), None);
    }

    #[test]
    fn test_no_stock_gives_zero_stars() {
        let products = vec![sample_product(1, Category::PreservedFood, 10.0, 0.0)];
        let rating = rate(&products, &[]).unwrap();
        assert_eq!(rating.stars, 0);
        assert_eq!(rating.hint, Hint::AddFoodOrWater);
    }

    #[test]
    fn test_all_targets_met_is_perfect() {
        let products = vec![
            sample_product(1, Category::PreservedFood, 10.0, 10.0),
            sample_product(2, Category::Water, 10.0, 10.0),
        ];
        let rating = rate(&products, &[]).unwrap();
        assert_eq!(rating.stars, 5);
        assert_eq!(rating.hint, Hint::Perfect);
        assert!(rating.conditions.iter().all(|c| *c));
    }

    #[test]
    fn test_both_halves_unmet_shows_combined_hint() {
        let products = vec![
            sample_product(1, Category::PreservedFood, 10.0, 1.0),
            sample_product(2, Category::Water, 10.0, 1.0),
        ];
        let rating = rate(&products, &[]).unwrap();
        assert_eq!(rating.stars, 2);
        assert_eq!(rating.hint, Hint::FoodOrWaterHalf);
    }

    #[test]
    fn test_only_food_half_unmet() {
        let products = vec![
            sample_product(1, Category::DryGoods, 10.0, 1.0),
            sample_product(2, Category::Water, 10.0, 6.0),
        ];
        let rating = rate(&products, &[]).unwrap();
        assert_eq!(rating.stars, 2);
        assert_eq!(rating.hint, Hint::FoodHalf);
    }

    #[test]
    fn test_only_water_half_unmet() {
        let products = vec![
            sample_product(1, Category::FreezeDried, 10.0, 6.0),
            sample_product(2, Category::Water, 10.0, 1.0),
        ];
        let rating = rate(&products, &[]).unwrap();
        assert_eq!(rating.stars, 3);
        assert_eq!(rating.hint, Hint::WaterHalf);
    }

    #[test]
    fn test_water_without_food() {
        let products = vec![sample_product(1, Category::Water, 10.0, 10.0)];
        let rating = rate(&products, &[]).unwrap();
        assert_eq!(rating.stars, 0);
        assert_eq!(rating.hint, Hint::AddFood);
    }

    #[test]
    fn test_food_without_water() {
        let products = vec![sample_product(1, Category::DryGoods, 2.0, 2.0)];
        let rating = rate(&products, &[]).unwrap();
        // Food-half would pass, but stars stop at the missing water
        assert_eq!(rating.conditions, [true, false, true, false, false]);
        assert_eq!(rating.stars, 1);
        assert_eq!(rating.hint, Hint::AddWater);
    }

    #[test]
    fn test_half_stocked_needs_full_targets() {
        let products = vec![
            sample_product(1, Category::PreservedFood, 10.0, 10.0),
            sample_product(2, Category::DryGoods, 10.0, 4.0),
            sample_product(3, Category::Water, 10.0, 10.0),
        ];
        let rating = rate(&products, &[]).unwrap();
        assert_eq!(rating.stars, 4);
        assert_eq!(rating.hint, Hint::FullBoth);
    }

    #[test]
    fn test_expired_stock_is_subtracted() {
        let products = vec![sample_product(1, Category::PreservedFood, 2.0, 2.0)];
        let before = rate(&products, &[]).unwrap();
        assert!(before.conditions[0]);

        let after = rate(&products, &[expired_entry(1, 2.0)]).unwrap();
        assert_eq!(after.stars, 0);
        assert_eq!(after.conditions, [false; 5]);
        assert_eq!(after.hint, Hint::AddFoodOrWater);
    }

    #[test]
    fn test_expired_beyond_current_stock_clamps_at_zero() {
        let products = vec![
            sample_product(1, Category::PreservedFood, 2.0, 1.0),
            sample_product(2, Category::PreservedFood, 2.0, 2.0),
            sample_product(3, Category::Water, 4.0, 4.0),
        ];
        // Product 1 over-expired must not eat into product 2's stock
        let rating = rate(&products, &[expired_entry(1, 5.0)]).unwrap();
        assert!(rating.conditions[0]);
        assert!(rating.conditions[2]);
        assert!(!rating.conditions[4]);
    }

    #[test]
    fn test_zero_targets_never_earn_half_stars() {
        let products = vec![
            sample_product(1, Category::PreservedFood, 0.0, 3.0),
            sample_product(2, Category::Water, 0.0, 3.0),
        ];
        let rating = rate(&products, &[]).unwrap();
        assert_eq!(rating.stars, 2);
        assert_eq!(rating.hint, Hint::FoodOrWaterHalf);
    }

    #[test]
    fn test_rating_is_monotonic_in_stock() {
        let base = vec![
            sample_product(1, Category::PreservedFood, 10.0, 0.0),
            sample_product(2, Category::DryGoods, 4.0, 1.0),
            sample_product(3, Category::Water, 20.0, 0.0),
        ];
        let expired = vec![expired_entry(2, 1.0)];

        for idx in 0..base.len() {
            let mut previous = 0;
            for step in 0..=25 {
                let mut products = base.clone();
                products[idx].current_stock = f64::from(step);
                let stars = rate(&products, &expired).unwrap().stars;
                assert!(stars >= previous, "product {idx} at {step}: {stars} < {previous}");
                previous = stars;
            }
        }
    }
}
