//! # Scheme Resolver
//!
//! Read and write access to the catalog: areas, products and schemes. Reads are public;
//! writes need an administrator claim.
//!
//! Schemes reference their area and product by id. Listings join those references and
//! render one that no longer resolves as `None` rather than failing.

use crate::auth::AuthGateway;
use crate::clients::{AreaClient, ProductClient, SchemeClient};
use crate::error::{NotFoundError, ServiceError};
use crate::model::{
    Area, AreaCreate, AreaId, Product, ProductCreate, ProductId, Scheme, SchemeCreate, SchemeDetail, SchemeId,
    SchemeWithProduct,
};
use resource_actor::ActorClient;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct SchemeResolver {
    areas: AreaClient,
    products: ProductClient,
    schemes: SchemeClient,
    auth: AuthGateway,
}

impl SchemeResolver {
    pub fn new(areas: AreaClient, products: ProductClient, schemes: SchemeClient, auth: AuthGateway) -> Self {
        Self {
            areas,
            products,
            schemes,
            auth,
        }
    }

    // --- Areas ---

    /// All areas in creation order.
    pub async fn list_areas(&self) -> Result<Vec<Area>, ServiceError> {
        Ok(self.areas.list().await?)
    }

    /// Looks `token` up as an area name first, then as an area id.
    ///
    /// An area whose name reads like another area's id still resolves by name.
    #[instrument(skip(self))]
    pub async fn resolve_area(&self, token: &str) -> Result<Area, ServiceError> {
        if let Some(area) = self.areas.find_by_name(token).await? {
            return Ok(area);
        }
        if let Ok(id) = token.parse::<AreaId>() {
            if let Some(area) = self.areas.get(id).await? {
                debug!(area_id = %id, "Resolved by id");
                return Ok(area);
            }
        }
        Err(NotFoundError::Area(token.to_string()).into())
    }

    #[instrument(skip(self, token))]
    pub async fn create_area(&self, token: Option<&str>, params: AreaCreate) -> Result<Area, ServiceError> {
        self.auth.require_admin(token)?;
        let id = self.areas.create_area(params).await?;
        let area = self.areas.get(id).await?.ok_or_else(|| NotFoundError::Area(id.to_string()))?;
        info!(area_id = %id, name = %area.name, "Area created");
        Ok(area)
    }

    /// Deletes the area together with all of its schemes.
    ///
    /// The schemes go first (the Area actor's delete hook), so a failure part-way leaves
    /// the area in place rather than orphaned schemes. Deleting a missing area succeeds.
    #[instrument(skip(self, token))]
    pub async fn delete_area(&self, token: Option<&str>, id: AreaId) -> Result<(), ServiceError> {
        self.auth.require_admin(token)?;
        match self.areas.delete(id).await.map_err(ServiceError::from) {
            Ok(()) => info!(area_id = %id, "Area deleted"),
            Err(ServiceError::NotFound(_)) => debug!(area_id = %id, "Area already gone"),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    // --- Products ---

    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.list().await?)
    }

    #[instrument(skip(self, token))]
    pub async fn create_product(&self, token: Option<&str>, params: ProductCreate) -> Result<Product, ServiceError> {
        self.auth.require_admin(token)?;
        let id = self.products.create_product(params).await?;
        let product = self
            .products
            .get(id)
            .await?
            .ok_or_else(|| NotFoundError::Product(id.to_string()))?;
        info!(product_id = %id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Deletes a product. Its schemes stay and list it as unavailable.
    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: Option<&str>, id: ProductId) -> Result<(), ServiceError> {
        self.auth.require_admin(token)?;
        self.products.delete(id).await?;
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    // --- Schemes ---

    /// Schemes of the area named or identified by `token`, each with its product.
    #[instrument(skip(self))]
    pub async fn list_schemes_for_area(&self, token: &str) -> Result<Vec<SchemeWithProduct>, ServiceError> {
        let area = self.resolve_area(token).await?;
        let schemes = self.schemes.list_for_area(area.id).await?;
        let products = self.product_index().await?;

        Ok(schemes
            .into_iter()
            .map(|scheme| {
                let product = products.get(&scheme.product).cloned();
                scheme.with_product(product)
            })
            .collect())
    }

    /// Every scheme with both area and product joined.
    #[instrument(skip(self, token))]
    pub async fn list_all_schemes(&self, token: Option<&str>) -> Result<Vec<SchemeDetail>, ServiceError> {
        self.auth.require_admin(token)?;
        let schemes = self.schemes.list().await?;
        let products = self.product_index().await?;
        let areas: BTreeMap<AreaId, Area> = self.areas.list().await?.into_iter().map(|a| (a.id, a)).collect();

        Ok(schemes
            .into_iter()
            .map(|scheme| {
                let area = areas.get(&scheme.area).cloned();
                let product = products.get(&scheme.product).cloned();
                scheme.with_area_and_product(area, product)
            })
            .collect())
    }

    /// Creates a scheme after checking its area and product exist.
    #[instrument(skip(self, token))]
    pub async fn create_scheme(&self, token: Option<&str>, params: SchemeCreate) -> Result<Scheme, ServiceError> {
        self.auth.require_admin(token)?;
        if self.areas.get(params.area).await?.is_none() {
            return Err(NotFoundError::Area(params.area.to_string()).into());
        }
        if self.products.get(params.product).await?.is_none() {
            return Err(NotFoundError::Product(params.product.to_string()).into());
        }

        let id = self.schemes.create_scheme(params).await?;
        let scheme = self
            .schemes
            .get(id)
            .await?
            .ok_or_else(|| NotFoundError::Scheme(id.to_string()))?;
        info!(scheme_id = %id, area_id = %scheme.area, product_id = %scheme.product, "Scheme created");
        Ok(scheme)
    }

    /// Deleting a missing scheme succeeds.
    #[instrument(skip(self, token))]
    pub async fn delete_scheme(&self, token: Option<&str>, id: SchemeId) -> Result<(), ServiceError> {
        self.auth.require_admin(token)?;
        match self.schemes.delete(id).await.map_err(ServiceError::from) {
            Ok(()) => info!(scheme_id = %id, "Scheme deleted"),
            Err(ServiceError::NotFound(_)) => debug!(scheme_id = %id, "Scheme already gone"),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn product_index(&self) -> Result<BTreeMap<ProductId, Product>, ServiceError> {
        Ok(self.products.list().await?.into_iter().map(|p| (p.id, p)).collect())
    }
}
