use std::{borrow::Cow, fmt};

use task_models::{EntityId, EntityKind};

/// Cache key of one entity kind.
///
/// `all_<plural>` holds the full collection, `<kind>_<id>` a single item.
/// Plural names always end in `s` and never equal a singular prefix, so the
/// two shapes cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey<'a> {
    Collection(EntityKind),
    Item(EntityKind, &'a EntityId),
}

impl CacheKey<'_> {
    pub fn as_key(&self) -> Cow<'static, str> {
        match self {
            CacheKey::Collection(kind) => {
                Cow::Owned(format!("all_{}", kind.plural()))
            }
            CacheKey::Item(kind, id) => Cow::Owned(format!("{}_{}", kind.name(), id)),
        }
    }
}

impl fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

pub fn collection_key(kind: EntityKind) -> String {
    CacheKey::Collection(kind).to_string()
}

pub fn item_key(kind: EntityKind, id: &EntityId) -> String {
    CacheKey::Item(kind, id).to_string()
}

/// Keys a mutation of `kind` has to evict: the collection key, plus the item
/// key when a specific entity changed.
pub fn mutation_keys(kind: EntityKind, id: Option<&EntityId>) -> Vec<String> {
    let mut keys = Vec::with_capacity(2);
    if let Some(id) = id {
        keys.push(item_key(kind, id));
    }
    keys.push(collection_key(kind));
    keys
}
