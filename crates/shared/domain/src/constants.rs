//! Names shared between slices: OpenAPI tags, table names and upload namespaces.

// OpenAPI tags
pub const SYSTEM_TAG: &str = "System";
pub const AUTH_TAG: &str = "Auth";
pub const THEME_TAG: &str = "Theme";
pub const SITE_TAG: &str = "Site";
pub const SLIDER_TAG: &str = "Sliders";
pub const PROMOTION_TAG: &str = "Promotions";
pub const BANNER_TAG: &str = "Banners";
pub const NOTICE_TAG: &str = "Notices";

// Tables
pub const ADMIN_TABLE: &str = "admin";
pub const SITE_SETTINGS_TABLE: &str = "site_settings";
pub const FOOTER_TABLE: &str = "footer";
pub const SLIDE_TABLE: &str = "slide";
pub const PROMOTION_TABLE: &str = "promotion";
pub const BANNER_TABLE: &str = "banner";
pub const NOTICE_TABLE: &str = "notice";

/// Record key of every config singleton.
pub const SINGLETON_KEY: &str = "main";

// Upload namespaces (first path segment below `/uploads`)
pub const SLIDER_UPLOADS: &str = "sliders";
pub const PROMOTION_UPLOADS: &str = "promotions";
pub const BANNER_UPLOADS: &str = "banners";
pub const BRANDING_UPLOADS: &str = "branding";

/// URL prefix under which stored uploads are served.
pub const UPLOADS_ROUTE: &str = "/uploads";
