use mongodb::{Client, Collection, Database};
use std::error::Error;

// Collection names, matching the documents the frontend already writes.
pub const APPOINTMENT_OPTIONS: &str = "AppointmentOptions";
pub const BOOKINGS: &str = "bookings";
pub const USERS: &str = "users";
pub const DOCTORS_INFO: &str = "doctorsInfo";
pub const REVIEWS: &str = "reviews";
pub const CONTACTS: &str = "contacts";

/// Long-lived MongoDB handle, built once at startup and cloned into every
/// handler through `web::Data`. The driver pools connections internally.
#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains('@'))
            .unwrap_or("dochouse");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the service relies on.
    ///
    /// The unique compound index on bookings is the storage-level backstop for
    /// the write-time uniqueness check: two racing identical requests cannot
    /// both insert even though check-then-insert is not atomic.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let bookings = self.collection::<mongodb::bson::Document>(BOOKINGS);
        let booking_slot_index = IndexModel::builder()
            .keys(doc! { "appointmentDate": 1, "slot": 1, "treatmentName": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        match bookings.create_index(booking_slot_index).await {
            Ok(_) => log::info!("   ✅ Index created: bookings(appointmentDate, slot, treatmentName) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let users = self.collection::<mongodb::bson::Document>(USERS);
        let user_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        match users.create_index(user_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let doctors_info = self.collection::<mongodb::bson::Document>(DOCTORS_INFO);
        let doctor_email_index = IndexModel::builder().keys(doc! { "email": 1 }).build();
        match doctors_info.create_index(doctor_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: doctorsInfo(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
