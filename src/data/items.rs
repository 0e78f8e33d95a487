use crate::shared::*;

/// Populate the ItemRegistry with every resource the professions can yield.
///
/// Sale values are deliberately small; the economy leans on volume, and
/// inventory capacity is the real bottleneck early on.
pub fn populate_items(registry: &mut ItemRegistry) {
    let mut add = |id: &str, def: ItemDef| {
        registry.items.insert(id.to_string(), def);
    };

    // ── Mining ────────────────────────────────────────────────────────
    add(
        "Copper Ore",
        ItemDef {
            name: "Copper Ore".into(),
            value: 4,
            description: "A malleable metal good for early smithing recipes.".into(),
            category: ItemCategory::Resource,
            icon: "🪨".into(),
            lore: Some(
                "Weathered miners swear you can smell the tang of copper before you see it."
                    .into(),
            ),
            uses: Some(vec!["Bronze Bars".into(), "Basic Smithing Contracts".into()]),
        },
    );
    add(
        "Tin Ore",
        ItemDef {
            name: "Tin Ore".into(),
            value: 5,
            description: "Combine with copper to create sturdy bronze alloys.".into(),
            category: ItemCategory::Resource,
            icon: "⛏".into(),
            lore: Some("Soft to the touch, but priceless when alloyed.".into()),
            uses: Some(vec!["Bronze Bars".into()]),
        },
    );
    add(
        "Iron Ore",
        ItemDef {
            name: "Iron Ore".into(),
            value: 8,
            description: "A dependable ore used in everyday equipment.".into(),
            category: ItemCategory::Resource,
            icon: "🪨".into(),
            lore: Some("The backbone of every blacksmith.".into()),
            uses: Some(vec!["Iron Bars".into(), "Fortified Tools".into()]),
        },
    );
    add(
        "Coal",
        ItemDef {
            name: "Coal".into(),
            value: 6,
            description: "Essential fuel for forges and cooking fires alike.".into(),
            category: ItemCategory::Resource,
            icon: "⬛".into(),
            lore: Some("Still warm from the depths below.".into()),
            uses: Some(vec!["Furnace Fuel".into(), "Campfire Meals".into()]),
        },
    );

    // ── Woodcutting ───────────────────────────────────────────────────
    add(
        "Logs",
        ItemDef {
            name: "Logs".into(),
            value: 3,
            description: "Fresh-cut timber, perfect for crafting basic structures.".into(),
            category: ItemCategory::Resource,
            icon: "🪵".into(),
            lore: Some("Sap still clings to the bark.".into()),
            uses: Some(vec!["Campfire".into(), "Simple Bows".into()]),
        },
    );
    add(
        "Oak Logs",
        ItemDef {
            name: "Oak Logs".into(),
            value: 7,
            description: "Dense hardwood prized by skilled carpenters.".into(),
            category: ItemCategory::Resource,
            icon: "🌳".into(),
            lore: Some("The rings whisper stories of centuries.".into()),
            uses: Some(vec!["Reinforced Beams".into(), "Carved Furniture".into()]),
        },
    );

    // ── Fishing ───────────────────────────────────────────────────────
    add(
        "Raw Shrimp",
        ItemDef {
            name: "Raw Shrimp".into(),
            value: 3,
            description: "Small shellfish netted in the shallows.".into(),
            category: ItemCategory::Resource,
            icon: "🦐".into(),
            lore: Some("The guild kitchens take these by the crate.".into()),
            uses: Some(vec!["Campfire Meals".into()]),
        },
    );
    add(
        "Raw Trout",
        ItemDef {
            name: "Raw Trout".into(),
            value: 6,
            description: "A river fish that puts up a decent fight.".into(),
            category: ItemCategory::Resource,
            icon: "🐟".into(),
            lore: Some("Caught upstream, where the water runs cold.".into()),
            uses: Some(vec!["Hearty Stews".into()]),
        },
    );

    // ── Farming ───────────────────────────────────────────────────────
    add(
        "Potatoes",
        ItemDef {
            name: "Potatoes".into(),
            value: 3,
            description: "A filling staple crop that grows almost anywhere.".into(),
            category: ItemCategory::Resource,
            icon: "🥔".into(),
            lore: Some("No feast hall runs without them.".into()),
            uses: Some(vec!["Hearty Stews".into(), "Travel Rations".into()]),
        },
    );
    add(
        "Wheat",
        ItemDef {
            name: "Wheat".into(),
            value: 4,
            description: "Golden sheaves ready for the mill.".into(),
            category: ItemCategory::Resource,
            icon: "🌾".into(),
            lore: Some("Cut at dawn, milled by dusk.".into()),
            uses: Some(vec!["Flour".into(), "Travel Rations".into()]),
        },
    );
}

/// Fallback definition for a resource id with no catalog entry. Unknown
/// resources are legal (forward-compatible content additions), so the
/// fallback simply takes the unknown id as its display name.
pub fn default_item_def(resource_id: &str) -> ItemDef {
    ItemDef {
        name: resource_id.to_string(),
        value: 2,
        description: "A curious item recovered during your travels.".into(),
        category: ItemCategory::Misc,
        icon: "❓".into(),
        lore: Some("You are not entirely sure what this does, but it looks important.".into()),
        uses: None,
    }
}

/// Catalog lookup. Never fails; unknown ids get the default definition
/// renamed to the id itself.
pub fn item_definition(registry: &ItemRegistry, resource_id: &str) -> ItemDef {
    registry
        .items
        .get(resource_id)
        .cloned()
        .unwrap_or_else(|| default_item_def(resource_id))
}
