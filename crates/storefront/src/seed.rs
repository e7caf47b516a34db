//! Reference data for a fresh store.
//!
//! Runs only when there are no areas yet. Failures are logged and never stop startup.

use crate::auth::AuthGateway;
use crate::clients::{AreaClient, ProductClient, SchemeClient};
use crate::error::ServiceError;
use crate::model::{AreaCreate, ProductCreate, SchemeCreate};
use resource_actor::ActorClient;
use tracing::{error, info, instrument};

const AREAS: [&str; 3] = ["Kidwai Nagar", "Saket Nagar", "Hanspuram"];

/// (area, almond price, almond offer, cashew price, cashew offer)
const PRICE_LIST: [(&str, f64, &str, f64, &str); 3] = [
    ("Kidwai Nagar", 700.0, "Best Seller", 800.0, "Fresh Stock"),
    ("Saket Nagar", 750.0, "Premium Quality", 820.0, "Limited Time Deal"),
    ("Hanspuram", 720.0, "Special Discount", 810.0, "Bulk Saver"),
];

pub struct Seeder<'a> {
    pub areas: &'a AreaClient,
    pub products: &'a ProductClient,
    pub schemes: &'a SchemeClient,
    pub auth: &'a AuthGateway,
    /// Base for the product image URLs, e.g. `http://localhost:5000`.
    pub public_base_url: &'a str,
    pub admin_password: &'a str,
}

impl Seeder<'_> {
    /// Seeds if the store is empty. Returns whether anything was written.
    #[instrument(skip(self))]
    pub async fn run(&self) -> bool {
        match self.seed_if_empty().await {
            Ok(seeded) => seeded,
            Err(e) => {
                error!(error = %e, "Seeding failed");
                false
            }
        }
    }

    async fn seed_if_empty(&self) -> Result<bool, ServiceError> {
        if self.areas.count().await? > 0 {
            return Ok(false);
        }
        info!("Seeding data");

        let mut area_ids = Vec::with_capacity(AREAS.len());
        for name in AREAS {
            let id = self.areas.create_area(AreaCreate { name: name.to_string() }).await?;
            area_ids.push((name, id));
        }

        let almond = self
            .products
            .create_product(ProductCreate {
                name: "Almond".to_string(),
                image: format!("{}/uploads/almond.png", self.public_base_url),
            })
            .await?;
        let cashew = self
            .products
            .create_product(ProductCreate {
                name: "Cashew".to_string(),
                image: format!("{}/uploads/cashew.png", self.public_base_url),
            })
            .await?;

        for (area_name, almond_price, almond_offer, cashew_price, cashew_offer) in PRICE_LIST {
            let Some(&(_, area)) = area_ids.iter().find(|(name, _)| *name == area_name) else {
                continue;
            };
            for (product, price, offer) in [(almond, almond_price, almond_offer), (cashew, cashew_price, cashew_offer)] {
                self.schemes
                    .create_scheme(SchemeCreate {
                        area,
                        product,
                        price,
                        offer: offer.to_string(),
                    })
                    .await?;
            }
        }

        self.auth.bootstrap_administrator("admin", self.admin_password).await?;

        info!("Data seeded successfully");
        Ok(true)
    }
}
