pub const CONTAINER: &str = "min-h-screen w-full bg-gradient-to-b from-red-900 via-red-800 to-gray-900 px-4 py-6 sm:px-8";
pub const HEADER: &str = "mx-auto mb-6 flex max-w-6xl items-center justify-between";
pub const HEADER_TITLE: &str = "text-3xl font-black tracking-tight text-transparent bg-clip-text bg-gradient-to-r from-yellow-300 to-orange-400";
pub const HEADER_STORE: &str = "text-sm font-medium text-gray-200";
pub const HEADER_DEVICE: &str = "text-xs text-gray-400";
pub const LAYOUT: &str = "mx-auto grid max-w-6xl grid-cols-1 gap-6 lg:grid-cols-[1fr_1.1fr]";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-2xl shadow-xl dark:shadow-[0_8px_30px_-12px_rgba(255,255,255,0.1)] p-6 border border-gray-100 dark:border-gray-700";

// Form
pub const FORM: &str = "space-y-4";
pub const FORM_ROW: &str = "grid grid-cols-1 gap-4 sm:grid-cols-2";
pub const TEXT_LABEL: &str = "block text-sm font-medium text-gray-900 dark:text-white";
pub const INPUT: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-3 px-3 text-lg text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 placeholder:text-gray-400 focus:ring-2 focus:ring-orange-500";
pub const INPUT_ERROR: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-3 px-3 text-lg text-gray-900 dark:text-white shadow-sm ring-2 ring-inset ring-red-500 focus:ring-2 focus:ring-inset focus:ring-red-500";
pub const TEXT_ERROR: &str = "mt-1 text-sm text-red-500 dark:text-red-400";
pub const CHECKBOX_ROW: &str = "flex items-start gap-3 text-sm text-gray-700 dark:text-gray-300";
pub const CHECKBOX: &str = "mt-1 h-5 w-5 rounded border-gray-300 text-orange-600 focus:ring-orange-500";
pub const STATUS_READY: &str = "rounded-lg bg-green-50 dark:bg-green-900/40 p-3 text-center font-semibold text-green-700 dark:text-green-200";
pub const STATUS_BLOCKED: &str = "rounded-lg bg-yellow-50 dark:bg-gray-900 p-3 text-center font-semibold text-yellow-800 dark:text-yellow-300";

// Wheel
pub const WHEEL_CONTAINER: &str = "relative mx-auto w-full max-w-[520px]";
pub const WHEEL_POINTER: &str = "absolute left-1/2 top-0 z-10 -translate-x-1/2 -translate-y-1 text-4xl text-yellow-300 drop-shadow-lg";
pub const WHEEL_CAPTION: &str = "mt-4 text-center text-sm font-medium text-gray-600 dark:text-gray-300";
pub const WHEEL_COLORS: [&str; 2] = ["#b91c1c", "#f59e0b"];
pub const WHEEL_TEXT_COLORS: [&str; 2] = ["#ffffff", "#1f2937"];
pub const SPIN_BUTTON: &str = "mt-6 w-full py-4 px-8 rounded-full text-2xl font-black text-white bg-gradient-to-r from-orange-500 to-red-600 hover:from-orange-600 hover:to-red-700 shadow-lg transition-all duration-300 animate-pulse-subtle";
pub const SPIN_BUTTON_DISABLED: &str = "mt-6 w-full py-4 px-8 rounded-full text-2xl font-black text-gray-500 bg-gray-300 dark:bg-gray-700 cursor-not-allowed";

// Online indicator
pub const PILL_ONLINE: &str = "inline-flex items-center gap-2 rounded-full bg-green-100 px-3 py-1 text-xs font-semibold text-green-800";
pub const PILL_OFFLINE: &str = "inline-flex items-center gap-2 rounded-full bg-gray-200 px-3 py-1 text-xs font-semibold text-gray-700";
pub const PILL_DOT_ONLINE: &str = "h-2 w-2 rounded-full bg-green-500";
pub const PILL_DOT_OFFLINE: &str = "h-2 w-2 rounded-full bg-gray-500";

// Modal
pub const MODAL_BACKDROP: &str = "fixed inset-0 z-50 flex items-center justify-center bg-black/70 backdrop-blur-sm p-4";
pub const MODAL_CARD: &str = "w-full max-w-md rounded-2xl bg-white dark:bg-gray-900 p-8 text-center shadow-2xl";
pub const MODAL_TITLE_CELEBRATE: &str = "text-3xl font-black text-transparent bg-clip-text bg-gradient-to-r from-yellow-400 to-orange-500 animate-bounce";
pub const MODAL_TITLE_NEUTRAL: &str = "text-2xl font-bold text-gray-900 dark:text-white";
pub const MODAL_TITLE_PROBLEM: &str = "text-2xl font-bold text-red-600 dark:text-red-400";
pub const MODAL_BODY: &str = "mt-4 space-y-1 text-lg text-gray-700 dark:text-gray-300";
pub const MODAL_BUTTON: &str = "mt-8 w-full py-3 px-4 text-lg font-semibold text-white bg-gradient-to-r from-orange-500 to-red-600 hover:from-orange-600 hover:to-red-700 rounded-lg transition-all duration-200";

pub const LOADING_SPINNER: &str = "animate-spin h-5 w-5 text-orange-500";

pub const CUSTOM_CSS: &str = r#"
@keyframes pulse-subtle {
    0% { transform: scale(1); box-shadow: 0 0 0 0 rgba(255, 215, 0, 0.4); }
    70% { transform: scale(1.02); box-shadow: 0 0 0 10px rgba(255, 215, 0, 0); }
    100% { transform: scale(1); box-shadow: 0 0 0 0 rgba(255, 215, 0, 0); }
}

.animate-pulse-subtle {
    animation: pulse-subtle 2s infinite;
}
"#;
