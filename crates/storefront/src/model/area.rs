use crate::model::record_id;
use serde::{Deserialize, Serialize};

record_id!(
    /// Identifier of an [`Area`].
    AreaId,
    "area"
);

/// A delivery zone. Schemes are scoped to one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaCreate {
    pub name: String,
}
