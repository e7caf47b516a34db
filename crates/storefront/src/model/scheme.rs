//! Schemes and their joined read models.
//!
//! A [`Scheme`] only holds references. Readers get a [`SchemeWithProduct`] (public
//! listing for one area) or a [`SchemeDetail`] (admin listing). A reference that no
//! longer resolves shows up as `null` instead of failing the listing.

use crate::model::numeric::number_or_text;
use crate::model::{record_id, Area, AreaId, Product, ProductId};
use serde::{Deserialize, Serialize};

record_id!(
    /// Identifier of a [`Scheme`].
    SchemeId,
    "scheme"
);

/// "This product is sold in this area at this price, with this label."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub area: AreaId,
    pub product: ProductId,
    pub price: f64,
    pub offer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemeCreate {
    pub area: AreaId,
    pub product: ProductId,
    #[serde(deserialize_with = "number_or_text")]
    pub price: f64,
    #[serde(default)]
    pub offer: String,
}

/// A scheme with its product resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeWithProduct {
    pub id: SchemeId,
    pub area: AreaId,
    pub product: Option<Product>,
    pub price: f64,
    pub offer: String,
}

/// A scheme with both references resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeDetail {
    pub id: SchemeId,
    pub area: Option<Area>,
    pub product: Option<Product>,
    pub price: f64,
    pub offer: String,
}

impl Scheme {
    pub fn with_product(self, product: Option<Product>) -> SchemeWithProduct {
        SchemeWithProduct {
            id: self.id,
            area: self.area,
            product,
            price: self.price,
            offer: self.offer,
        }
    }

    pub fn with_area_and_product(
        self,
        area: Option<Area>,
        product: Option<Product>,
    ) -> SchemeDetail {
        SchemeDetail {
            id: self.id,
            area,
            product,
            price: self.price,
            offer: self.offer,
        }
    }
}
