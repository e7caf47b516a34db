use crate::auth::{AuthGateway, BcryptHasher, ClaimSigner, JwtSigner, PasswordHasher, SessionPolicy, SignedClaim};
use crate::catalog::SchemeResolver;
use crate::clients::{AdminClient, AreaClient, CustomerClient, OrderClient, ProductClient, SchemeClient};
use crate::config::Config;
use crate::model::Order;
use crate::orders::OrderWorkflow;
use crate::seed::Seeder;
use crate::session::{self, DEFAULT_ORDER_POLL};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The running storefront: one actor per collection plus the services built on them.
///
/// Services are cheap to clone; each clone shares the same actors.
pub struct StorefrontSystem {
    pub admins: AdminClient,
    pub customers: CustomerClient,
    pub areas: AreaClient,
    pub products: ProductClient,
    pub schemes: SchemeClient,
    pub orders: OrderClient,

    pub auth: AuthGateway,
    pub resolver: SchemeResolver,
    pub workflow: OrderWorkflow,

    order_poll: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Starts the system with bcrypt and JWT configured from `config`.
    pub fn start(config: &Config) -> Self {
        let policy = SessionPolicy {
            admin_ttl: config.admin_session_ttl(),
            customer_ttl: config.customer_session_ttl(),
        };
        let mut system = Self::with_capabilities(
            config.actor_buffer,
            Arc::new(BcryptHasher::new(config.bcrypt_cost)),
            Arc::new(JwtSigner::new(&config.jwt_secret)),
            policy,
        );
        system.order_poll = config.order_poll_interval();
        system
    }

    /// Starts the system with the given password hasher and claim signer.
    pub fn with_capabilities(
        buffer_size: usize,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn ClaimSigner>,
        policy: SessionPolicy,
    ) -> Self {
        let (admin_actor, admins) = crate::admin_actor::new(buffer_size);
        let (customer_actor, customers) = crate::customer_actor::new(buffer_size);
        let (scheme_actor, schemes) = crate::scheme_actor::new(buffer_size);
        let (area_actor, areas) = crate::area_actor::new(buffer_size);
        let (product_actor, products) = crate::product_actor::new(buffer_size);
        let (order_actor, orders) = crate::order_actor::new(buffer_size);

        let handles = vec![
            tokio::spawn(admin_actor.run(())),
            tokio::spawn(customer_actor.run(())),
            tokio::spawn(scheme_actor.run(())),
            // Area deletes purge schemes through this client.
            tokio::spawn(area_actor.run(schemes.clone())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        let auth = AuthGateway::new(admins.clone(), customers.clone(), hasher, signer, policy);
        let resolver = SchemeResolver::new(areas.clone(), products.clone(), schemes.clone(), auth.clone());
        let workflow = OrderWorkflow::new(orders.clone(), auth.clone());

        info!(actors = handles.len(), "Storefront started");
        Self {
            admins,
            customers,
            areas,
            products,
            schemes,
            orders,
            auth,
            resolver,
            workflow,
            order_poll: DEFAULT_ORDER_POLL,
            handles,
        }
    }

    /// Loads the reference catalog and the bootstrap administrator into an empty store.
    pub async fn seed(&self, public_base_url: &str, admin_password: &str) -> bool {
        Seeder {
            areas: &self.areas,
            products: &self.products,
            schemes: &self.schemes,
            auth: &self.auth,
            public_base_url,
            admin_password,
        }
        .run()
        .await
    }

    /// Keeps a customer's order list fresh at the configured polling interval.
    pub fn watch_own_orders(&self, token: SignedClaim) -> watch::Receiver<Vec<Order>> {
        session::watch_own_orders(self.workflow.clone(), token, self.order_poll)
    }

    pub fn order_poll_interval(&self) -> Duration {
        self.order_poll
    }

    /// Drops every client held here and waits for the actors to stop.
    ///
    /// Clones handed out elsewhere (e.g. to the HTTP router) must be gone first, or the
    /// actors they point at keep running and this waits for them.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down storefront");
        let Self {
            admins,
            customers,
            areas,
            products,
            schemes,
            orders,
            auth,
            resolver,
            workflow,
            order_poll: _,
            handles,
        } = self;
        drop((resolver, workflow, auth));
        drop((admins, customers, areas, products, schemes, orders));

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }
        info!("Shutdown complete");
        Ok(())
    }
}
