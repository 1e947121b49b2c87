pub const IMAGGA_TAGS_URL: &str = "https://api.imagga.com/v2/tags";
pub const IMAGE_FIELD: &str = "image";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
// 25 MiB
pub const SERVER_REQUEST_BODY_LIMIT: usize = 25 * 1024 * 1024;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 60.0;

pub const NO_FILE_MESSAGE: &str = "No file uploaded";
pub const RECOGNITION_FAILED_MESSAGE: &str = "Error recognizing image";
