pub const ACTION_GET_CONFIG: &str = "getconfig";
pub const ACTION_SPIN: &str = "spin";
pub const CALLBACK_PARAM: &str = "callback";

pub const DEVICE_ID_KEY: &str = "cl_device_id";
pub const STORE_PARAM: &str = "store";
pub const DEVICE_PARAM: &str = "device";

pub const DEFAULT_TIMEOUT_MS: u64 = 6500;
pub const DEFAULT_SPIN_FLOOR_MS: u64 = 3900;
pub const DEFAULT_FULL_TURNS: u32 = 6;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R";

pub const LAUNCH_URL_HINT: &str = "URL must include ?store=CL-001&device=TAB-A9-HIGHVELD-01";
pub const UNKNOWN_VERSION: &str = "unknown";

pub const INVALID_EMAIL_ERROR: &str = "Enter a valid email.";
pub const INVALID_PHONE_ERROR: &str = "Phone must be exactly 10 digits.";
pub const GENERIC_RETRY_ERROR: &str = "Something went wrong. Please try again.";

pub const PHONE_DIGITS: usize = 10;
