use log::Level;

/// Number the booking requests are sent to over WhatsApp.
pub const BOOKING_WHATSAPP_NUMBER: &str = "971508149362";
/// Number behind the "chat with us" button in the floating contact menu.
pub const CHAT_WHATSAPP_NUMBER: &str = "971547655769";
pub const CLINIC_PHONE: &str = "+97167414199";
pub const CLINIC_EMAIL: &str = "basman-naimi@gmail.com";
pub const CLINIC_NAME: &str = "Basman Alnuaini medical center";

pub const MAP_EMBED_URL: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3607.788085904499!2d55.45817431501157!3d25.379414!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3e5f5d1b5a5b5b5b%3A0x5b5b5b5b5b5b5b5b!2sAl%20Nuaimia%201%20-%20Ajman%2C%20United%20Arab%20Emirates!5e0!3m2!1sen!2sae!4v1641234567890!5m2!1sen!2sae";

/// Local storage key holding the selected language code.
pub const LANGUAGE_STORAGE_KEY: &str = "lang";

/// How long to wait before deciding the WhatsApp hand-off did not happen.
pub const DISPATCH_FALLBACK_DELAY_MS: u32 = 2_000;
pub const TOAST_AUTO_CLOSE_MS: u32 = 2_000;
/// Re-run validation this often so date rules follow the wall clock.
pub const VALIDATION_TICK_MS: u32 = 60_000;

pub const HERO_ROTATE_MS: u32 = 5_000;
pub const HERO_FADE_MS: u32 = 300;

pub const BACK_TO_TOP_OFFSET: f64 = 500.0;
pub const MOBILE_BREAKPOINT: f64 = 768.0;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
