//! The character data holder.
//!
//! A [`Character`] is a plain composition of ability scores, resources,
//! and an owned item collection — the host document model maps onto it
//! directly. Carrying capacity is derived and recomputed synchronously
//! after every change that can affect it; it is never authoritative input.

use serde::{Deserialize, Serialize};

use crate::ability::{Abilities, Ability};
use crate::equipment;
use crate::error::{CoreError, CoreResult};
use crate::item::{Armor, Item, ItemId, ItemKind, Weapon};
use crate::resource::Resource;

/// Lowest possible honor.
pub const HONOR_MIN: i32 = 1;
/// Highest possible honor.
pub const HONOR_MAX: i32 = 20;
/// Honor at or below this value marks the character as dishonored.
pub const DISHONOR_THRESHOLD: i32 = 9;

/// A player character: abilities, resources, and owned items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// The four ability scores.
    pub abilities: Abilities,
    /// Hit points.
    pub hp: Resource,
    /// Honor, bounded 1..=20.
    pub honor: Resource,
    /// Derived carried load; recomputed, never written directly.
    carrying_capacity: i32,
    /// Owned items, in acquisition order.
    items: Vec<Item>,
}

impl Character {
    /// Create a character with zeroed abilities, 10/10 HP, and honor 10.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abilities: Abilities::default(),
            hp: Resource::new(10, 0, 10),
            honor: Resource::new(10, HONOR_MIN, HONOR_MAX),
            carrying_capacity: 0,
            items: Vec::new(),
        }
    }

    /// Set the ability scores.
    pub fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self
    }

    /// Set current and maximum hit points.
    pub fn with_hp(mut self, value: i32, max: i32) -> Self {
        self.hp = Resource::new(value, 0, max);
        self
    }

    /// Set the honor value (clamped to 1..=20).
    pub fn with_honor(mut self, value: i32) -> Self {
        self.honor = Resource::new(value, HONOR_MIN, HONOR_MAX);
        self
    }

    /// The score of one ability.
    pub fn ability(&self, ability: Ability) -> i32 {
        self.abilities.get(ability)
    }

    /// Returns true when honor has fallen to the dishonor threshold.
    pub fn is_dishonored(&self) -> bool {
        self.honor.value <= DISHONOR_THRESHOLD
    }

    /// The derived carried load.
    pub fn carrying_capacity(&self) -> i32 {
        self.carrying_capacity
    }

    /// All owned items.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by ID.
    pub fn item(&self, id: ItemId) -> CoreResult<&Item> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotFound(id))
    }

    /// Look up an item by ID, mutably.
    pub fn item_mut(&mut self, id: ItemId) -> CoreResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotFound(id))
    }

    /// Add an item, subject to the hard carrying-load ceiling. The gate
    /// uses the item's marginal (per-unit) load, matching a check that
    /// runs before the item fully exists. Recomputes capacity on success.
    pub fn add_item(&mut self, item: Item) -> CoreResult<ItemId> {
        equipment::admit_item(self, &item)?;
        let id = item.id;
        self.items.push(item);
        self.recompute_carrying_capacity();
        Ok(id)
    }

    /// Remove an item, returning it. Recomputes capacity.
    pub fn remove_item(&mut self, id: ItemId) -> CoreResult<Item> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(CoreError::ItemNotFound(id))?;
        let item = self.items.remove(index);
        self.recompute_carrying_capacity();
        Ok(item)
    }

    /// Set the quantity of a stackable item (gear, ammo, consumable).
    /// Recomputes capacity.
    pub fn set_quantity(&mut self, id: ItemId, quantity: u32) -> CoreResult<()> {
        let item = self.item_mut(id)?;
        match &mut item.kind {
            ItemKind::Gear(g) => g.quantity = quantity,
            ItemKind::Ammo(a) => a.quantity = quantity,
            ItemKind::Consumable(c) => c.quantity = quantity,
            _ => {
                return Err(CoreError::WrongItemKind {
                    id,
                    expected: "stackable",
                });
            }
        }
        self.recompute_carrying_capacity();
        Ok(())
    }

    /// Select the ammunition stack a weapon draws from. Selecting a
    /// stack marks the weapon as ammo-consuming; passing `None` clears
    /// the selection. The referenced item must exist and be ammo.
    pub fn set_weapon_ammo(&mut self, weapon: ItemId, ammo: Option<ItemId>) -> CoreResult<()> {
        if let Some(ammo_id) = ammo {
            self.item(ammo_id)?.as_ammo()?;
        }
        let item = self.item_mut(weapon)?;
        match &mut item.kind {
            ItemKind::Weapon(w) => {
                if ammo.is_some() {
                    w.use_ammo = true;
                }
                w.ammo_id = ammo;
                w.normalize();
                Ok(())
            }
            _ => Err(CoreError::WrongItemKind {
                id: weapon,
                expected: "weapon",
            }),
        }
    }

    /// Spend one shot of ammo, to a floor of 0. Returns the remaining
    /// quantity. Recomputes capacity.
    pub fn spend_ammo(&mut self, id: ItemId) -> CoreResult<u32> {
        let item = self.item_mut(id)?;
        let remaining = match &mut item.kind {
            ItemKind::Ammo(a) => a.spend(),
            _ => {
                return Err(CoreError::WrongItemKind {
                    id,
                    expected: "ammo",
                });
            }
        };
        self.recompute_carrying_capacity();
        Ok(remaining)
    }

    /// Use a consumable once. Recomputes capacity (using a unit up can
    /// drop the stacked quantity).
    pub fn use_consumable(&mut self, id: ItemId) -> CoreResult<()> {
        let item = self.item_mut(id)?;
        match &mut item.kind {
            ItemKind::Consumable(c) => c.use_once()?,
            _ => {
                return Err(CoreError::WrongItemKind {
                    id,
                    expected: "consumable",
                });
            }
        }
        self.recompute_carrying_capacity();
        Ok(())
    }

    /// The equipped armor, if any. At most one armor is ever equipped.
    pub fn equipped_armor(&self) -> Option<(ItemId, &Armor)> {
        self.items.iter().find_map(|i| match &i.kind {
            ItemKind::Armor(a) if a.equipped => Some((i.id, a)),
            _ => None,
        })
    }

    /// The equipped armor, mutably.
    pub fn equipped_armor_mut(&mut self) -> Option<&mut Armor> {
        self.items.iter_mut().find_map(|i| match &mut i.kind {
            ItemKind::Armor(a) if a.equipped => Some(a),
            _ => None,
        })
    }

    /// All equipped weapons with their IDs.
    pub fn equipped_weapons(&self) -> Vec<(ItemId, &Weapon)> {
        self.items
            .iter()
            .filter_map(|i| match &i.kind {
                ItemKind::Weapon(w) if w.equipped => Some((i.id, w)),
                _ => None,
            })
            .collect()
    }

    /// Equip a weapon, enforcing the hand limit. On rejection nothing
    /// changes — the host reverts its optimistic toggle.
    pub fn equip_weapon(&mut self, id: ItemId) -> CoreResult<()> {
        equipment::validate_weapon_equip(self, id)?;
        self.set_weapon_equipped(id, true)
    }

    /// Unequip a weapon. Always allowed.
    pub fn unequip_weapon(&mut self, id: ItemId) -> CoreResult<()> {
        self.set_weapon_equipped(id, false)
    }

    /// Equip armor. Rejected while another armor is equipped; the current
    /// one must be removed first (never an implicit swap). Recomputes
    /// capacity, since equipped armor stops counting toward load.
    pub fn equip_armor(&mut self, id: ItemId) -> CoreResult<()> {
        equipment::validate_armor_equip(self, id)?;
        self.set_armor_equipped(id, true)
    }

    /// Unequip armor. Recomputes capacity.
    pub fn unequip_armor(&mut self, id: ItemId) -> CoreResult<()> {
        self.set_armor_equipped(id, false)
    }

    /// Recompute the derived carried load from the item collection.
    pub fn recompute_carrying_capacity(&mut self) {
        self.carrying_capacity = equipment::carrying_load(self);
    }

    fn set_weapon_equipped(&mut self, id: ItemId, equipped: bool) -> CoreResult<()> {
        let item = self.item_mut(id)?;
        match &mut item.kind {
            ItemKind::Weapon(w) => {
                w.equipped = equipped;
                Ok(())
            }
            _ => Err(CoreError::WrongItemKind {
                id,
                expected: "weapon",
            }),
        }
    }

    fn set_armor_equipped(&mut self, id: ItemId, equipped: bool) -> CoreResult<()> {
        let item = self.item_mut(id)?;
        match &mut item.kind {
            ItemKind::Armor(a) => a.equipped = equipped,
            _ => {
                return Err(CoreError::WrongItemKind {
                    id,
                    expected: "armor",
                });
            }
        }
        self.recompute_carrying_capacity();
        Ok(())
    }
}
