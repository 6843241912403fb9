//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 12;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (single-file SQLite, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://shelter.db?mode=rwc";

/// Collection names, as used by the change feed and in log output
pub const COLLECTION_ANIMALS: &str = "animals";
pub const COLLECTION_ADOPTIONS: &str = "adoptions";
pub const COLLECTION_ADOPTERS: &str = "adopters";
pub const COLLECTION_STAFF: &str = "staff";

/// Buffered change events per subscriber before it is considered lagged
pub const CHANGE_FEED_CAPACITY: usize = 256;

// =============================================================================
// Object Storage
// =============================================================================

/// Default directory for uploaded images
pub const DEFAULT_STORAGE_DIR: &str = "uploads";

/// Route prefix under which stored objects are served
pub const STORAGE_ROUTE_PREFIX: &str = "/files";

/// Default public base URL of stored objects
pub const DEFAULT_STORAGE_PUBLIC_URL: &str = "http://localhost:3000/files";

/// Largest accepted image upload (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit: a base64 encoded `MAX_IMAGE_BYTES` image plus the record fields
pub const MAX_REQUEST_BYTES: usize = MAX_IMAGE_BYTES.div_ceil(3) * 4 + 64 * 1024;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Accepted animal species
pub const ANIMAL_SPECIES: &[&str] = &["cachorro", "gato"];

/// Accepted animal sizes
pub const ANIMAL_SIZES: &[&str] = &["pequeno", "medio", "grande"];

/// Accepted animal sex markers
pub const ANIMAL_SEXES: &[&str] = &["M", "F"];

// =============================================================================
// Display
// =============================================================================

/// Name shown for records stored without one
pub const UNNAMED: &str = "Sem nome";

/// Name shown for references that no longer resolve
pub const UNKNOWN_NAME: &str = "Desconhecido";

/// Age label for animals without a birth date
pub const AGE_NOT_INFORMED: &str = "Não informado";
