//! Singleton dependency injection registry
//!
//! The `#[service]` and `#[repository]` macros register a constructor for
//! each annotated struct through `inventory`. The [`ServiceLocator`] resolves
//! those registrations lazily by type, caches the created instances, and
//! detects dependency cycles during construction.
//!
//! Infrastructure components that are not macro managed (the MongoDB and
//! Redis handles) are registered manually with [`ServiceLocator::set`] during
//! startup, before [`ServiceLocator::initialize_all`] eagerly builds every
//! registered service and repository.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// Common interface for business logic services.
///
/// Implemented automatically for every struct annotated with `#[service]`.
#[async_trait]
pub trait Service: Send + Sync {
    /// Registry key of the service, derived from the macro `name` argument.
    fn name(&self) -> &str;

    /// Runs once after the service instance is first created.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// Common interface for data access repositories.
///
/// Implemented automatically for every struct annotated with `#[repository]`.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Registry key of the repository.
    fn name(&self) -> &str;

    /// Name of the backing MongoDB collection.
    fn collection_name(&self) -> &str;

    /// Runs once after creation; index setup belongs here.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// Registration metadata emitted by the `#[service]` macro and collected by
/// `inventory` at link time.
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// Registration metadata emitted by the `#[repository]` macro.
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// Service name → registration lookup, built once on first access.
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let mut cache = HashMap::new();

    for registration in inventory::iter::<ServiceRegistration>() {
        let clean_name = extract_clean_name_static(registration.name);
        cache.insert(clean_name, registration);
    }

    print_cache_initialized("Service", cache.len());
    cache
});

/// Repository name → registration lookup, built once on first access.
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let mut cache = HashMap::new();

    for registration in inventory::iter::<RepositoryRegistration>() {
        let clean_name = extract_clean_name_static(registration.name);
        cache.insert(clean_name, registration);
    }

    print_cache_initialized("Repository", cache.len());
    cache
});

/// Normalizes a registered name (`user_service`, `user_repository`) down to
/// its entity part (`user`) so it can be matched against type names.
fn extract_clean_name_static(name: &str) -> String {
    if name.ends_with("_service") {
        name[..name.len() - 8].to_string()
    } else if name.ends_with("_repository") {
        name[..name.len() - 11].to_string()
    } else {
        name.to_string()
    }
}

/// Global singleton container.
///
/// Each type gets exactly one instance, created lazily on first request and
/// shared behind `Arc`. Access is thread safe through `RwLock`; a type that
/// is requested while its own constructor is still running trips the cycle
/// detector and panics with a clear message instead of deadlocking.
pub struct ServiceLocator {
    /// Instance cache, keyed by `TypeId`.
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// Types currently under construction (cycle detection).
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// Returns the singleton instance of `T`, creating it if necessary.
    ///
    /// The type name is matched against the registries: `ProfileRepository`
    /// resolves the repository registered as `profile`, `ProfileService` the
    /// service registered as `profile`.
    ///
    /// # Panics
    ///
    /// - circular dependency between constructors
    /// - no registration matching the requested type
    /// - registration constructor produced a different type
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        {
            let instances = LOCATOR.instances.read().unwrap();
            if let Some(instance) = instances.get(&type_id) {
                return instance.clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator");
            }
        }

        {
            let initializing = LOCATOR.initializing.read().unwrap();
            if initializing.contains(&type_id) {
                eprintln!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }
        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            initializing.insert(type_id);
        }

        let result = std::panic::catch_unwind(|| {
            let mut instances = LOCATOR.instances.write().unwrap();

            // double check under the write lock
            if let Some(instance) = instances.get(&type_id) {
                return instance.clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator");
            }

            let clean_type_name = Self::extract_clean_type_name(type_name);

            if clean_type_name.contains("Repository") {
                // "ProfileRepository" -> "profile"
                let entity_name = clean_type_name
                    .strip_suffix("Repository")
                    .unwrap_or(&clean_type_name)
                    .to_lowercase();

                if let Some(registration) = REPOSITORY_NAME_CACHE.get(&entity_name) {
                    let boxed_instance = (registration.constructor)();

                    if let Ok(arc_instance) = boxed_instance.downcast::<Arc<T>>() {
                        let instance = (*arc_instance).clone();
                        instances.insert(type_id, instance.clone() as Arc<dyn Any + Send + Sync>);
                        return instance;
                    } else {
                        panic!("Type mismatch for repository: {}", registration.name);
                    }
                } else {
                    panic!("No repository found for entity: {}", entity_name);
                }
            }

            if clean_type_name.contains("Service") {
                // "ProfileService" -> "profile"
                let entity_name = clean_type_name
                    .strip_suffix("Service")
                    .unwrap_or(&clean_type_name)
                    .to_lowercase();

                if let Some(registration) = SERVICE_NAME_CACHE.get(&entity_name) {
                    let boxed_instance = (registration.constructor)();

                    if let Ok(arc_instance) = boxed_instance.downcast::<Arc<T>>() {
                        let instance = (*arc_instance).clone();
                        instances.insert(type_id, instance.clone() as Arc<dyn Any + Send + Sync>);
                        return instance;
                    } else {
                        panic!("Type mismatch for service: {}", registration.name);
                    }
                } else {
                    panic!("No service found for entity: {}", entity_name);
                }
            }

            panic!("Service not found: {}. Make sure it's registered with #[service] or #[repository] macro, or manually registered with ServiceLocator::set()", type_name);
        });

        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            initializing.remove(&type_id);
        }

        match result {
            Ok(instance) => instance,
            Err(e) => {
                let mut initializing = LOCATOR.initializing.write().unwrap();
                initializing.remove(&type_id);

                eprintln!("ERROR: Failed to create instance for {}: {:?}", type_name, e);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    /// Strips the module path from `std::any::type_name` output.
    fn extract_clean_type_name(type_name: &str) -> String {
        if let Some(pos) = type_name.rfind("::") {
            type_name[pos + 2..].to_string()
        } else {
            type_name.to_string()
        }
    }

    /// Registers an externally constructed instance.
    ///
    /// Used for infrastructure components that need async setup before the
    /// registry exists, such as the MongoDB and Redis handles:
    ///
    /// ```rust,ignore
    /// let database = Arc::new(Database::new().await?);
    /// ServiceLocator::set(database);
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();
        let clean_name = Self::extract_clean_type_name(type_name);

        println!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap();
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// Eagerly constructs every registered repository and service.
    ///
    /// Repositories are built first so their instances exist by the time the
    /// services that depend on them are constructed.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");

            for registration in repo_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(1, "Repository instances created", repo_count);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");

            for registration in service_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

/// The single global locator instance.
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
