//! Composition root for the clinic client platform.
//!
//! Wires a single session store and query cache through every cell
//! service so that one login serves all of them and a 401 anywhere
//! invalidates the whole session.

use std::sync::Arc;

use shared_cache::{QueryCache, QueryKey};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::pagination::{ListParams, Page};
use shared_session::{FileSessionStore, MemorySessionStore, Session, SessionStore};

use auth_cell::AuthService;
use catalog_cell::models::{
    CreateProductServiceRequest, CreateVoucherRequest, ProductService, Voucher,
};
use catalog_cell::{ProductCatalogService, VoucherService};
use doctor_cell::models::DoctorField;
use doctor_cell::{DoctorService, ScheduleService};
use health_cell::HealthService;
use media_cell::MediaService;
use meeting_cell::MeetingService;
use order_cell::OrderService;
use patient_cell::{PatientRecordService, PatientService};
use user_cell::UserService;

pub struct ClinicClient {
    session: Session,
    cache: QueryCache,
    auth: AuthService,
    users: UserService,
    doctors: DoctorService,
    schedules: ScheduleService,
    patients: PatientService,
    records: PatientRecordService,
    orders: OrderService,
    products: ProductCatalogService,
    vouchers: VoucherService,
    meetings: MeetingService,
    health: HealthService,
    media: MediaService,
}

impl ClinicClient {
    /// In-memory session, suitable for short-lived embedders and tests.
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(MemorySessionStore::new()))
    }

    /// Environment-driven construction; `CLINIC_SESSION_FILE` selects the
    /// file-backed session store.
    pub fn from_env() -> Self {
        let config = AppConfig::from_env();

        let store: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => Arc::new(FileSessionStore::open(path)),
            None => Arc::new(MemorySessionStore::new()),
        };

        Self::with_store(config, store)
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            session: Session::new(store.clone()),
            cache: QueryCache::default(),
            auth: AuthService::new(&config, store.clone()),
            users: UserService::new(&config, store.clone()),
            doctors: DoctorService::new(&config, store.clone()),
            schedules: ScheduleService::new(&config, store.clone()),
            patients: PatientService::new(&config, store.clone()),
            records: PatientRecordService::new(&config, store.clone()),
            orders: OrderService::new(&config, store.clone()),
            products: ProductCatalogService::new(&config, store.clone()),
            vouchers: VoucherService::new(&config, store.clone()),
            meetings: MeetingService::new(&config, store.clone()),
            health: HealthService::new(&config, store.clone()),
            media: MediaService::new(&config, store),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn doctors(&self) -> &DoctorService {
        &self.doctors
    }

    pub fn schedules(&self) -> &ScheduleService {
        &self.schedules
    }

    pub fn patients(&self) -> &PatientService {
        &self.patients
    }

    pub fn records(&self) -> &PatientRecordService {
        &self.records
    }

    pub fn orders(&self) -> &OrderService {
        &self.orders
    }

    pub fn products(&self) -> &ProductCatalogService {
        &self.products
    }

    pub fn vouchers(&self) -> &VoucherService {
        &self.vouchers
    }

    pub fn meetings(&self) -> &MeetingService {
        &self.meetings
    }

    pub fn health(&self) -> &HealthService {
        &self.health
    }

    pub fn media(&self) -> &MediaService {
        &self.media
    }

    // ------------------------------------------------------------------
    // Cached reads and the mutations that invalidate them
    // ------------------------------------------------------------------

    /// Specialty catalog, cached until invalidated or stale.
    pub async fn doctor_fields(&self) -> Result<Vec<DoctorField>, AppError> {
        self.cache
            .get_or_fetch(QueryKey::new(["doctor-fields"]), || self.doctors.fields())
            .await
    }

    /// Product-service listing, cached per page.
    pub async fn product_catalog(
        &self,
        params: ListParams,
    ) -> Result<Page<ProductService>, AppError> {
        let key = list_key("product-services", &params);
        self.cache
            .get_or_fetch(key, || self.products.list(params.clone()))
            .await
    }

    /// Voucher listing, cached per page.
    pub async fn voucher_catalog(&self, params: ListParams) -> Result<Page<Voucher>, AppError> {
        let key = list_key("vouchers", &params);
        self.cache
            .get_or_fetch(key, || self.vouchers.list(params.clone()))
            .await
    }

    pub async fn create_product(
        &self,
        request: CreateProductServiceRequest,
    ) -> Result<ProductService, AppError> {
        let product = self.products.create(request).await?;
        self.cache.invalidate(&QueryKey::new(["product-services"]));
        Ok(product)
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<(), AppError> {
        self.products.delete(product_id).await?;
        self.cache.invalidate(&QueryKey::new(["product-services"]));
        Ok(())
    }

    pub async fn create_voucher(&self, request: CreateVoucherRequest) -> Result<Voucher, AppError> {
        let voucher = self.vouchers.create(request).await?;
        self.cache.invalidate(&QueryKey::new(["vouchers"]));
        Ok(voucher)
    }

    pub async fn delete_voucher(&self, voucher_id: &str) -> Result<(), AppError> {
        self.vouchers.delete(voucher_id).await?;
        self.cache.invalidate(&QueryKey::new(["vouchers"]));
        Ok(())
    }
}

fn list_key(resource: &str, params: &ListParams) -> QueryKey {
    let mut segments = vec![resource.to_string(), "list".to_string()];
    for (name, value) in params.to_query_pairs() {
        segments.push(format!("{}={}", name, value));
    }
    QueryKey::new(segments)
}
