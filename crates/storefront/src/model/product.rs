use crate::model::record_id;
use serde::{Deserialize, Serialize};

record_id!(
    /// Identifier of a [`Product`].
    ProductId,
    "product"
);

/// Something that can be sold. `image` is a URL, usually one handed out by the blob store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub image: String,
}
