//! Item variants, identifiers, and weight classes.
//!
//! Every owned object is an [`Item`] whose behavior is selected by the
//! [`ItemKind`] sum type. Each variant carries only the fields relevant to
//! it; code dispatching on items matches exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Unique identifier for an item owned by a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// How much an item counts toward the carried load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightClass {
    /// Weightless (coins, scraps of paper).
    None,
    /// Small enough not to count.
    Small,
    /// Counts as one load.
    #[default]
    Normal,
    /// Counts as two load.
    Heavy,
}

impl WeightClass {
    /// The load this weight class contributes per unit.
    pub fn load(self) -> i32 {
        match self {
            Self::None | Self::Small => 0,
            Self::Normal => 1,
            Self::Heavy => 2,
        }
    }
}

/// Hands required to wield a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    /// One-handed; up to two may be equipped at once.
    #[default]
    One,
    /// Two-handed; excludes every other weapon.
    Two,
}

/// Whether a weapon strikes in melee or at range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Melee weapon; attacks test vigor.
    #[default]
    Melee,
    /// Ranged weapon; attacks test spirit and may consume ammo.
    Ranged,
}

/// A weapon: sword, spear, bow, musket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Damage dice expression (e.g. "d6", "1d8").
    pub damage: String,
    /// Hands required to wield.
    pub hand: Hand,
    /// Melee or ranged.
    pub kind: WeaponKind,
    /// Whether firing consumes ammo (ranged only).
    pub use_ammo: bool,
    /// The ammo item this weapon draws from. Only meaningful when ranged
    /// and `use_ammo`; forced to `None` otherwise.
    pub ammo_id: Option<ItemId>,
    /// Weight class.
    pub weight: WeightClass,
    /// Whether the weapon is currently wielded.
    pub equipped: bool,
}

impl Weapon {
    /// Create a one-handed melee weapon with the given damage expression.
    pub fn melee(damage: impl Into<String>) -> Self {
        Self {
            damage: damage.into(),
            hand: Hand::One,
            kind: WeaponKind::Melee,
            use_ammo: false,
            ammo_id: None,
            weight: WeightClass::Normal,
            equipped: false,
        }
    }

    /// Create a ranged weapon with the given damage expression.
    pub fn ranged(damage: impl Into<String>) -> Self {
        Self {
            kind: WeaponKind::Ranged,
            ..Self::melee(damage)
        }
    }

    /// Set the hand requirement.
    pub fn with_hand(mut self, hand: Hand) -> Self {
        self.hand = hand;
        self
    }

    /// Mark the weapon as ammo-consuming, drawing from the given item.
    pub fn with_ammo(mut self, ammo_id: Option<ItemId>) -> Self {
        self.use_ammo = true;
        self.ammo_id = ammo_id;
        self.normalize();
        self
    }

    /// Set the weight class.
    pub fn with_weight(mut self, weight: WeightClass) -> Self {
        self.weight = weight;
        self
    }

    /// Clear the ammo reference unless the weapon is ranged and uses ammo.
    pub fn normalize(&mut self) {
        if self.kind != WeaponKind::Ranged || !self.use_ammo {
            self.ammo_id = None;
        }
    }
}

/// Armor protection categories and the damage-reduction dice they roll.
const PROTECTION_DICE: [&str; 4] = ["0", "1d2", "1d4", "1d6"];

/// The highest armor category.
pub const MAX_ARMOR_CATEGORY: u8 = 3;

/// A suit of armor with a degradable protection category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    /// The category the armor was made at (0..=3).
    pub max_category: u8,
    /// The current, possibly degraded, category (0..=max).
    pub current_category: u8,
    /// Flat penalty added to swiftness-check DRs while equipped.
    pub swiftness_penalty: i32,
    /// Flat penalty added to defense and parry DRs while equipped.
    pub defense_penalty: i32,
    /// Weight class.
    pub weight: WeightClass,
    /// Whether the armor is currently worn.
    pub equipped: bool,
}

impl Armor {
    /// Create armor at full category. The category is capped at 3.
    pub fn new(category: u8) -> Self {
        let category = category.min(MAX_ARMOR_CATEGORY);
        Self {
            max_category: category,
            current_category: category,
            swiftness_penalty: 0,
            defense_penalty: 0,
            weight: WeightClass::Normal,
            equipped: false,
        }
    }

    /// Set the swiftness and defense penalties.
    pub fn with_penalties(mut self, swiftness: i32, defense: i32) -> Self {
        self.swiftness_penalty = swiftness;
        self.defense_penalty = defense;
        self
    }

    /// Set the weight class.
    pub fn with_weight(mut self, weight: WeightClass) -> Self {
        self.weight = weight;
        self
    }

    /// The damage-reduction dice expression for the current category.
    pub fn protection(&self) -> &'static str {
        PROTECTION_DICE[usize::from(self.current_category.min(MAX_ARMOR_CATEGORY))]
    }

    /// Set the current category. Fails if above the maximum.
    pub fn set_category(&mut self, category: u8) -> CoreResult<()> {
        if category > self.max_category {
            return Err(CoreError::CategoryExceedsMax {
                category,
                max: self.max_category,
            });
        }
        self.current_category = category;
        Ok(())
    }

    /// Degrade the armor by one category, to a floor of 0.
    /// Returns true if the category actually dropped.
    pub fn degrade(&mut self) -> bool {
        if self.current_category > 0 {
            self.current_category -= 1;
            true
        } else {
            false
        }
    }
}

/// Mundane equipment with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    /// How many the character carries.
    pub quantity: u32,
    /// Weight class per unit.
    pub weight: WeightClass,
}

impl Gear {
    /// Create gear with a quantity of one.
    pub fn new() -> Self {
        Self {
            quantity: 1,
            weight: WeightClass::Normal,
        }
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the weight class.
    pub fn with_weight(mut self, weight: WeightClass) -> Self {
        self.weight = weight;
        self
    }
}

impl Default for Gear {
    fn default() -> Self {
        Self::new()
    }
}

/// Ammunition for ranged weapons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ammo {
    /// Shots remaining.
    pub quantity: u32,
    /// Weapons this ammo fits.
    pub compatible: Vec<ItemId>,
    /// Weight class per unit.
    pub weight: WeightClass,
}

impl Ammo {
    /// Create ammo with the given quantity.
    pub fn new(quantity: u32) -> Self {
        Self {
            quantity,
            compatible: Vec::new(),
            weight: WeightClass::Small,
        }
    }

    /// Spend one shot, to a floor of 0. Returns the remaining quantity.
    pub fn spend(&mut self) -> u32 {
        self.quantity = self.quantity.saturating_sub(1);
        self.quantity
    }
}

/// Per-unit uses of a consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uses {
    /// Uses remaining on the current unit.
    pub value: u32,
    /// Uses a fresh unit starts with.
    pub max: u32,
}

/// A consumable item: rations, medicine, incense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumable {
    /// Units carried.
    pub quantity: u32,
    /// Uses on the current unit.
    pub uses: Uses,
    /// Weight class per unit.
    pub weight: WeightClass,
}

impl Consumable {
    /// Create a consumable with one unit of `uses` uses.
    pub fn new(quantity: u32, uses: u32) -> Self {
        Self {
            quantity,
            uses: Uses {
                value: uses,
                max: uses,
            },
            weight: WeightClass::Small,
        }
    }

    /// Use the consumable once: spend a use from the current unit, or
    /// break open a fresh unit when the current one is spent.
    pub fn use_once(&mut self) -> CoreResult<()> {
        if self.uses.value > 0 {
            self.uses.value -= 1;
            Ok(())
        } else if self.quantity > 0 {
            self.quantity -= 1;
            self.uses.value = self.uses.max;
            Ok(())
        } else {
            Err(CoreError::ConsumableExhausted)
        }
    }
}

/// The kind-specific data of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A weapon.
    Weapon(Weapon),
    /// A suit of armor.
    Armor(Armor),
    /// Mundane equipment.
    Gear(Gear),
    /// Ammunition.
    Ammo(Ammo),
    /// A consumable.
    Consumable(Consumable),
    /// Narrative text with no mechanical weight.
    Text {
        /// The written content.
        content: String,
    },
}

impl ItemKind {
    /// A short name for the kind, used in errors and records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weapon(_) => "weapon",
            Self::Armor(_) => "armor",
            Self::Gear(_) => "gear",
            Self::Ammo(_) => "ammo",
            Self::Consumable(_) => "consumable",
            Self::Text { .. } => "text",
        }
    }
}

/// An item owned by a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Kind-specific data.
    pub kind: ItemKind,
}

impl Item {
    /// Create an item with a fresh ID.
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        let mut item = Self {
            id: ItemId::new(),
            name: name.into(),
            kind,
        };
        if let ItemKind::Weapon(w) = &mut item.kind {
            w.normalize();
        }
        item
    }

    /// The load this item contributes to the carried total. Stackable
    /// kinds (gear, ammo, consumables) multiply by quantity; weapons and
    /// armor count once. Equipped armor is excluded by the capacity
    /// computation, not here.
    pub fn load(&self) -> i32 {
        match &self.kind {
            ItemKind::Weapon(w) => w.weight.load(),
            ItemKind::Armor(a) => a.weight.load(),
            ItemKind::Gear(g) => g.weight.load() * g.quantity as i32,
            ItemKind::Ammo(a) => a.weight.load() * a.quantity as i32,
            ItemKind::Consumable(c) => c.weight.load() * c.quantity as i32,
            ItemKind::Text { .. } => 0,
        }
    }

    /// The marginal load one unit of this item adds, before quantity is
    /// taken into account. Used by the admission gate, which runs before
    /// the item (and so its quantity) fully exists.
    pub fn marginal_load(&self) -> i32 {
        match &self.kind {
            ItemKind::Weapon(w) => w.weight.load(),
            ItemKind::Armor(a) => a.weight.load(),
            ItemKind::Gear(g) => g.weight.load(),
            ItemKind::Ammo(a) => a.weight.load(),
            ItemKind::Consumable(c) => c.weight.load(),
            ItemKind::Text { .. } => 0,
        }
    }

    /// Borrow the weapon data, or fail with a kind mismatch.
    pub fn as_weapon(&self) -> CoreResult<&Weapon> {
        match &self.kind {
            ItemKind::Weapon(w) => Ok(w),
            _ => Err(CoreError::WrongItemKind {
                id: self.id,
                expected: "weapon",
            }),
        }
    }

    /// Borrow the armor data, or fail with a kind mismatch.
    pub fn as_armor(&self) -> CoreResult<&Armor> {
        match &self.kind {
            ItemKind::Armor(a) => Ok(a),
            _ => Err(CoreError::WrongItemKind {
                id: self.id,
                expected: "armor",
            }),
        }
    }

    /// Borrow the ammo data, or fail with a kind mismatch.
    pub fn as_ammo(&self) -> CoreResult<&Ammo> {
        match &self.kind {
            ItemKind::Ammo(a) => Ok(a),
            _ => Err(CoreError::WrongItemKind {
                id: self.id,
                expected: "ammo",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_class_loads() {
        assert_eq!(WeightClass::None.load(), 0);
        assert_eq!(WeightClass::Small.load(), 0);
        assert_eq!(WeightClass::Normal.load(), 1);
        assert_eq!(WeightClass::Heavy.load(), 2);
    }

    #[test]
    fn weapon_normalization_clears_ammo_for_melee() {
        let mut weapon = Weapon::melee("d6");
        weapon.use_ammo = true;
        weapon.ammo_id = Some(ItemId::new());
        weapon.normalize();
        assert_eq!(weapon.ammo_id, None);
    }

    #[test]
    fn ranged_weapon_keeps_ammo_reference() {
        let ammo_id = ItemId::new();
        let weapon = Weapon::ranged("1d6").with_ammo(Some(ammo_id));
        assert_eq!(weapon.ammo_id, Some(ammo_id));
    }

    #[test]
    fn armor_protection_by_category() {
        assert_eq!(Armor::new(0).protection(), "0");
        assert_eq!(Armor::new(1).protection(), "1d2");
        assert_eq!(Armor::new(2).protection(), "1d4");
        assert_eq!(Armor::new(3).protection(), "1d6");
    }

    #[test]
    fn armor_new_caps_category() {
        let armor = Armor::new(7);
        assert_eq!(armor.max_category, 3);
        assert_eq!(armor.current_category, 3);
    }

    #[test]
    fn armor_set_category_rejects_above_max() {
        let mut armor = Armor::new(2);
        assert!(armor.set_category(3).is_err());
        assert_eq!(armor.current_category, 2);
        armor.set_category(0).unwrap();
        assert_eq!(armor.protection(), "0");
    }

    #[test]
    fn armor_degrade_floors_at_zero() {
        let mut armor = Armor::new(1);
        assert!(armor.degrade());
        assert_eq!(armor.current_category, 0);
        assert!(!armor.degrade());
        assert_eq!(armor.current_category, 0);
    }

    #[test]
    fn ammo_spend_floors_at_zero() {
        let mut ammo = Ammo::new(1);
        assert_eq!(ammo.spend(), 0);
        assert_eq!(ammo.spend(), 0);
    }

    #[test]
    fn consumable_use_once() {
        let mut rations = Consumable::new(2, 3);
        rations.use_once().unwrap();
        assert_eq!(rations.uses.value, 2);

        // Exhaust the current unit, then break open the next.
        rations.uses.value = 0;
        rations.use_once().unwrap();
        assert_eq!(rations.quantity, 1);
        assert_eq!(rations.uses.value, 3);

        rations.uses.value = 0;
        rations.quantity = 0;
        assert!(rations.use_once().is_err());
    }

    #[test]
    fn stackable_load_multiplies_by_quantity() {
        let arrows = Item::new(
            "Arrows",
            ItemKind::Ammo(Ammo {
                quantity: 5,
                compatible: Vec::new(),
                weight: WeightClass::Normal,
            }),
        );
        assert_eq!(arrows.load(), 5);
        assert_eq!(arrows.marginal_load(), 1);

        let sword = Item::new(
            "Katana",
            ItemKind::Weapon(Weapon::melee("d8").with_weight(WeightClass::Heavy)),
        );
        assert_eq!(sword.load(), 2);
    }

    #[test]
    fn kind_mismatch_errors() {
        let gear = Item::new("Rope", ItemKind::Gear(Gear::new()));
        assert!(gear.as_weapon().is_err());
        assert!(gear.as_armor().is_err());
        assert!(gear.as_ammo().is_err());
    }
}
