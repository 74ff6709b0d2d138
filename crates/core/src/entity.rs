//! Entity hierarchy references and the pure ancestry resolver.
//!
//! The hierarchy is a strict tree: Property → Room → Product →
//! {Specification, Dimension}, with Drawings attached to properties and
//! Images attached to exactly one entity of any kind. Parent links are
//! modeled as id-keyed lookup tables loaded by the caller; resolution is a
//! pure function over those tables and fails with `NotFound` on a dangling
//! link instead of walking further.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// EntityRef
// ---------------------------------------------------------------------------

/// The kind of an entity in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Property,
    Room,
    Product,
    Specification,
    Dimension,
    Drawing,
    Image,
}

impl EntityKind {
    /// Convert from the string value used in query parameters and columns.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "property" => Ok(Self::Property),
            "room" => Ok(Self::Room),
            "product" => Ok(Self::Product),
            "specification" => Ok(Self::Specification),
            "dimension" => Ok(Self::Dimension),
            "drawing" => Ok(Self::Drawing),
            "image" => Ok(Self::Image),
            _ => Err(CoreError::Validation(format!(
                "Invalid entity kind '{s}'"
            ))),
        }
    }

    /// The string value used in query parameters and columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Room => "room",
            Self::Product => "product",
            Self::Specification => "specification",
            Self::Dimension => "dimension",
            Self::Drawing => "drawing",
            Self::Image => "image",
        }
    }
}

/// A typed reference to one entity in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Property(DbId),
    Room(DbId),
    Product(DbId),
    Specification(DbId),
    Dimension(DbId),
    Drawing(DbId),
    Image(DbId),
}

impl EntityRef {
    /// Build a reference from a kind discriminant and an id.
    pub fn new(kind: EntityKind, id: DbId) -> Self {
        match kind {
            EntityKind::Property => Self::Property(id),
            EntityKind::Room => Self::Room(id),
            EntityKind::Product => Self::Product(id),
            EntityKind::Specification => Self::Specification(id),
            EntityKind::Dimension => Self::Dimension(id),
            EntityKind::Drawing => Self::Drawing(id),
            EntityKind::Image => Self::Image(id),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Property(_) => EntityKind::Property,
            Self::Room(_) => EntityKind::Room,
            Self::Product(_) => EntityKind::Product,
            Self::Specification(_) => EntityKind::Specification,
            Self::Dimension(_) => EntityKind::Dimension,
            Self::Drawing(_) => EntityKind::Drawing,
            Self::Image(_) => EntityKind::Image,
        }
    }

    pub fn id(&self) -> DbId {
        match *self {
            Self::Property(id)
            | Self::Room(id)
            | Self::Product(id)
            | Self::Specification(id)
            | Self::Dimension(id)
            | Self::Drawing(id)
            | Self::Image(id) => id,
        }
    }
}

// ---------------------------------------------------------------------------
// Ancestry
// ---------------------------------------------------------------------------

/// The resolved ancestor chain of an entity, up to its root property.
///
/// For a property target only `property_id` is set; for a room target
/// `room_id` is also set; for products and below `product_id` as well.
/// Drawings resolve to their property with no room or product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ancestry {
    pub property_id: DbId,
    pub room_id: Option<DbId>,
    pub product_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// EntityGraph
// ---------------------------------------------------------------------------

/// Id-keyed parent-link tables for one loaded slice of the hierarchy.
///
/// Built by the caller (typically from database rows) and queried through
/// pure functions. Child id vectors preserve insertion order, which is the
/// caller's load order.
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    property_owner: HashMap<DbId, DbId>,
    room_parent: HashMap<DbId, DbId>,
    product_parent: HashMap<DbId, DbId>,
    specification_parent: HashMap<DbId, DbId>,
    dimension_parent: HashMap<DbId, DbId>,
    drawing_parent: HashMap<DbId, DbId>,
    image_parent: HashMap<DbId, EntityRef>,

    rooms_by_property: HashMap<DbId, Vec<DbId>>,
    products_by_room: HashMap<DbId, Vec<DbId>>,
    specifications_by_product: HashMap<DbId, Vec<DbId>>,
    dimensions_by_product: HashMap<DbId, Vec<DbId>>,
    drawings_by_property: HashMap<DbId, Vec<DbId>>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_property(&mut self, id: DbId, owner_user_id: DbId) {
        self.property_owner.insert(id, owner_user_id);
    }

    pub fn insert_room(&mut self, id: DbId, property_id: DbId) {
        self.room_parent.insert(id, property_id);
        self.rooms_by_property.entry(property_id).or_default().push(id);
    }

    pub fn insert_product(&mut self, id: DbId, room_id: DbId) {
        self.product_parent.insert(id, room_id);
        self.products_by_room.entry(room_id).or_default().push(id);
    }

    pub fn insert_specification(&mut self, id: DbId, product_id: DbId) {
        self.specification_parent.insert(id, product_id);
        self.specifications_by_product
            .entry(product_id)
            .or_default()
            .push(id);
    }

    pub fn insert_dimension(&mut self, id: DbId, product_id: DbId) {
        self.dimension_parent.insert(id, product_id);
        self.dimensions_by_product
            .entry(product_id)
            .or_default()
            .push(id);
    }

    pub fn insert_drawing(&mut self, id: DbId, property_id: DbId) {
        self.drawing_parent.insert(id, property_id);
        self.drawings_by_property
            .entry(property_id)
            .or_default()
            .push(id);
    }

    pub fn insert_image(&mut self, id: DbId, parent: EntityRef) {
        self.image_parent.insert(id, parent);
    }

    /// The owner user id of a loaded property.
    pub fn owner_of_property(&self, property_id: DbId) -> Option<DbId> {
        self.property_owner.get(&property_id).copied()
    }

    /// Ordered children of a parent entity. Images are attachments, not
    /// hierarchy nodes, and are not returned here.
    pub fn children(&self, parent: EntityRef) -> Vec<EntityRef> {
        match parent {
            EntityRef::Property(id) => {
                let mut out: Vec<EntityRef> = self
                    .rooms_by_property
                    .get(&id)
                    .into_iter()
                    .flatten()
                    .map(|&r| EntityRef::Room(r))
                    .collect();
                out.extend(
                    self.drawings_by_property
                        .get(&id)
                        .into_iter()
                        .flatten()
                        .map(|&d| EntityRef::Drawing(d)),
                );
                out
            }
            EntityRef::Room(id) => self
                .products_by_room
                .get(&id)
                .into_iter()
                .flatten()
                .map(|&p| EntityRef::Product(p))
                .collect(),
            EntityRef::Product(id) => {
                let mut out: Vec<EntityRef> = self
                    .specifications_by_product
                    .get(&id)
                    .into_iter()
                    .flatten()
                    .map(|&s| EntityRef::Specification(s))
                    .collect();
                out.extend(
                    self.dimensions_by_product
                        .get(&id)
                        .into_iter()
                        .flatten()
                        .map(|&d| EntityRef::Dimension(d)),
                );
                out
            }
            EntityRef::Specification(_)
            | EntityRef::Dimension(_)
            | EntityRef::Drawing(_)
            | EntityRef::Image(_) => Vec::new(),
        }
    }

    /// Resolve the full ancestor chain of `target` up to its root property.
    ///
    /// Fails with `NotFound` when any link along the way is dangling. The
    /// hierarchy is a tree by construction, so resolution never loops.
    pub fn ancestry(&self, target: EntityRef) -> Result<Ancestry, CoreError> {
        match target {
            EntityRef::Property(id) => {
                if !self.property_owner.contains_key(&id) {
                    return Err(CoreError::NotFound {
                        entity: "Property",
                        id,
                    });
                }
                Ok(Ancestry {
                    property_id: id,
                    room_id: None,
                    product_id: None,
                })
            }
            EntityRef::Room(id) => {
                let property_id = self.room_to_property(id)?;
                Ok(Ancestry {
                    property_id,
                    room_id: Some(id),
                    product_id: None,
                })
            }
            EntityRef::Product(id) => self.product_ancestry(id),
            EntityRef::Specification(id) => {
                let product_id =
                    *self
                        .specification_parent
                        .get(&id)
                        .ok_or(CoreError::NotFound {
                            entity: "ProductSpecification",
                            id,
                        })?;
                self.product_ancestry(product_id)
            }
            EntityRef::Dimension(id) => {
                let product_id = *self.dimension_parent.get(&id).ok_or(CoreError::NotFound {
                    entity: "ProductDimension",
                    id,
                })?;
                self.product_ancestry(product_id)
            }
            EntityRef::Drawing(id) => {
                let property_id =
                    *self.drawing_parent.get(&id).ok_or(CoreError::NotFound {
                        entity: "Drawing",
                        id,
                    })?;
                if !self.property_owner.contains_key(&property_id) {
                    return Err(CoreError::NotFound {
                        entity: "Property",
                        id: property_id,
                    });
                }
                Ok(Ancestry {
                    property_id,
                    room_id: None,
                    product_id: None,
                })
            }
            EntityRef::Image(id) => {
                let parent = *self.image_parent.get(&id).ok_or(CoreError::NotFound {
                    entity: "Image",
                    id,
                })?;
                self.ancestry(parent)
            }
        }
    }

    /// Resolve the root property id of `target`.
    pub fn ancestor_property(&self, target: EntityRef) -> Result<DbId, CoreError> {
        Ok(self.ancestry(target)?.property_id)
    }

    fn product_ancestry(&self, product_id: DbId) -> Result<Ancestry, CoreError> {
        let room_id = *self
            .product_parent
            .get(&product_id)
            .ok_or(CoreError::NotFound {
                entity: "Product",
                id: product_id,
            })?;
        let property_id = self.room_to_property(room_id)?;
        Ok(Ancestry {
            property_id,
            room_id: Some(room_id),
            product_id: Some(product_id),
        })
    }

    fn room_to_property(&self, room_id: DbId) -> Result<DbId, CoreError> {
        let property_id = *self.room_parent.get(&room_id).ok_or(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        })?;
        if !self.property_owner.contains_key(&property_id) {
            return Err(CoreError::NotFound {
                entity: "Property",
                id: property_id,
            });
        }
        Ok(property_id)
    }
}
