//! Theme documents, one per styled component of the public site.

use crate::color::Color;
use lobby_derive::singleton;

/// Top navigation bar.
#[singleton(table = "navbar_color", slug = "navbar-color")]
pub struct NavbarColor {
    #[default("#0b0f1a")]
    pub background_color: Color,
    #[default("#e5e7eb")]
    pub text_color: Color,
    #[default("#facc15")]
    pub hover_color: Color,
    #[default("#f59e0b")]
    pub active_color: Color,
    #[default("#1f2937")]
    pub border_color: Color,
    #[default(64)]
    pub height: u32,
    #[default(15)]
    pub font_size: u32,
}

/// Thin strip above the navbar (contacts, language links).
#[singleton(table = "topbar_color", slug = "topbar-color")]
pub struct TopbarColor {
    #[default("#111827")]
    pub background_color: Color,
    #[default("#f9fafb")]
    pub text_color: Color,
    #[default("#fbbf24")]
    pub link_color: Color,
    #[default(36)]
    pub height: u32,
    #[default(13)]
    pub font_size: u32,
}

/// Slide-out menu on small screens.
#[singleton(table = "mobile_menu_color", slug = "mobile-menu-color")]
pub struct MobileMenuColor {
    #[default("#0b0f1a")]
    pub background_color: Color,
    #[default("#e5e7eb")]
    pub text_color: Color,
    #[default("#f59e0b")]
    pub active_color: Color,
    #[default("#1f2937")]
    pub divider_color: Color,
    #[default("#f9fafb")]
    pub icon_color: Color,
}

#[singleton(table = "sidebar_color", slug = "sidebar-color")]
pub struct SidebarColor {
    #[default("#111827")]
    pub background_color: Color,
    #[default("#d1d5db")]
    pub text_color: Color,
    #[default("#1f2937")]
    pub active_background: Color,
    #[default("#facc15")]
    pub active_text_color: Color,
    #[default(260)]
    pub width: u32,
}

#[singleton(table = "footer_color", slug = "footer-color")]
pub struct FooterColor {
    #[default("#05070d")]
    pub background_color: Color,
    #[default("#9ca3af")]
    pub text_color: Color,
    #[default("#f9fafb")]
    pub heading_color: Color,
    #[default("#d1d5db")]
    pub link_color: Color,
    #[default("#facc15")]
    pub link_hover_color: Color,
    #[default("#1f2937")]
    pub border_color: Color,
}

/// Promotional banners placed by `placement`.
#[singleton(table = "banner_color", slug = "banner-color")]
pub struct BannerColor {
    #[default("#111827")]
    pub background_color: Color,
    #[default("#ffffff")]
    pub title_color: Color,
    #[default("#d1d5db")]
    pub subtitle_color: Color,
    #[default("#f59e0b")]
    pub button_color: Color,
    #[default("#111827")]
    pub button_text_color: Color,
    #[default(12)]
    pub border_radius: u32,
}

/// Hero slider: arrows, dots, caption and autoplay timing.
#[singleton(table = "slider_color", slug = "slider-color")]
pub struct SliderColor {
    #[default("#ffffff")]
    pub arrow_color: Color,
    #[default("#00000080")]
    pub arrow_background: Color,
    #[default("#6b7280")]
    pub dot_color: Color,
    #[default("#f59e0b")]
    pub active_dot_color: Color,
    #[default("#00000099")]
    pub caption_background: Color,
    #[default("#ffffff")]
    pub caption_text_color: Color,
    #[default(420)]
    pub height: u32,
    /// Milliseconds between slides
    #[default(5000)]
    pub autoplay_interval_ms: u32,
}

/// Scrolling notice ticker.
#[singleton(table = "notice_color", slug = "notice-color")]
pub struct NoticeColor {
    #[default("#f59e0b")]
    pub background_color: Color,
    #[default("#111827")]
    pub text_color: Color,
    #[default("#111827")]
    pub icon_color: Color,
    /// Pixels per second
    #[default(40)]
    pub scroll_speed: u32,
    #[default(14)]
    pub font_size: u32,
}

#[singleton(table = "promotion_card_color", slug = "promotion-card-color")]
pub struct PromotionCardColor {
    #[default("#111827")]
    pub card_background: Color,
    #[default("#ffffff")]
    pub title_color: Color,
    #[default("#9ca3af")]
    pub description_color: Color,
    #[default("#dc2626")]
    pub badge_color: Color,
    #[default("#ffffff")]
    pub badge_text_color: Color,
    #[default("#f59e0b")]
    pub button_color: Color,
    #[default("#111827")]
    pub button_text_color: Color,
    #[default(12)]
    pub border_radius: u32,
}

/// Casino listing cards.
#[singleton(table = "casino_card_color", slug = "casino-card-color")]
pub struct CasinoCardColor {
    #[default("#111827")]
    pub card_background: Color,
    #[default("#1f2937")]
    pub border_color: Color,
    #[default("#ffffff")]
    pub name_color: Color,
    #[default("#facc15")]
    pub bonus_color: Color,
    #[default("#16a34a")]
    pub cta_background: Color,
    #[default("#ffffff")]
    pub cta_text_color: Color,
    #[default(12)]
    pub border_radius: u32,
}

#[singleton(table = "ranking_table_color", slug = "ranking-table-color")]
pub struct RankingTableColor {
    #[default("#1f2937")]
    pub header_background: Color,
    #[default("#f9fafb")]
    pub header_text_color: Color,
    #[default("#111827")]
    pub row_background: Color,
    #[default("#0f172a")]
    pub row_alt_background: Color,
    #[default("#d1d5db")]
    pub row_text_color: Color,
    #[default("#1f2937")]
    pub border_color: Color,
    #[default("#facc15")]
    pub highlight_color: Color,
}

/// Star ratings.
#[singleton(table = "rating_color", slug = "rating-color")]
pub struct RatingColor {
    #[default("#facc15")]
    pub filled_color: Color,
    #[default("#4b5563")]
    pub empty_color: Color,
    #[default("#ffffff")]
    pub score_color: Color,
    #[default(16)]
    pub size: u32,
}

/// Primary and secondary buttons.
#[singleton(table = "button_color", slug = "button-color")]
pub struct ButtonColor {
    #[default("#f59e0b")]
    pub primary_background: Color,
    #[default("#111827")]
    pub primary_text_color: Color,
    #[default("#d97706")]
    pub primary_hover_background: Color,
    #[default("#1f2937")]
    pub secondary_background: Color,
    #[default("#f9fafb")]
    pub secondary_text_color: Color,
    #[default("#374151")]
    pub secondary_hover_background: Color,
    #[default(8)]
    pub border_radius: u32,
}

/// Page body typography and background.
#[singleton(table = "body_color", slug = "body-color")]
pub struct BodyColor {
    #[default("#0b0f1a")]
    pub background_color: Color,
    #[default("#d1d5db")]
    pub text_color: Color,
    #[default("#ffffff")]
    pub heading_color: Color,
    #[default("#fbbf24")]
    pub link_color: Color,
    #[default("#6b7280")]
    pub muted_text_color: Color,
    #[default("Inter, sans-serif")]
    pub font_family: String,
    #[default(16)]
    pub font_size: u32,
}

#[singleton(table = "tab_color", slug = "tab-color")]
pub struct TabColor {
    #[default("#111827")]
    pub background_color: Color,
    #[default("#9ca3af")]
    pub text_color: Color,
    #[default("#ffffff")]
    pub active_text_color: Color,
    #[default("#f59e0b")]
    pub active_indicator_color: Color,
    #[default("#e5e7eb")]
    pub hover_text_color: Color,
}

#[singleton(table = "pagination_color", slug = "pagination-color")]
pub struct PaginationColor {
    #[default("#111827")]
    pub background_color: Color,
    #[default("#d1d5db")]
    pub text_color: Color,
    #[default("#f59e0b")]
    pub active_background: Color,
    #[default("#111827")]
    pub active_text_color: Color,
    #[default("#1f2937")]
    pub border_color: Color,
}

#[singleton(table = "search_bar_color", slug = "search-bar-color")]
pub struct SearchBarColor {
    #[default("#111827")]
    pub background_color: Color,
    #[default("#f9fafb")]
    pub text_color: Color,
    #[default("#6b7280")]
    pub placeholder_color: Color,
    #[default("#374151")]
    pub border_color: Color,
    #[default("#f59e0b")]
    pub focus_border_color: Color,
    #[default(8)]
    pub border_radius: u32,
}

/// "Hot", "New" and "Exclusive" badges.
#[singleton(table = "badge_color", slug = "badge-color")]
pub struct BadgeColor {
    #[default("#dc2626")]
    pub hot_background: Color,
    #[default("#2563eb")]
    pub new_background: Color,
    #[default("#7c3aed")]
    pub exclusive_background: Color,
    #[default("#ffffff")]
    pub text_color: Color,
    #[default(4)]
    pub border_radius: u32,
}

#[singleton(table = "modal_color", slug = "modal-color")]
pub struct ModalColor {
    #[default("#000000b3")]
    pub overlay_color: Color,
    #[default("#111827")]
    pub background_color: Color,
    #[default("#ffffff")]
    pub title_color: Color,
    #[default("#d1d5db")]
    pub text_color: Color,
    #[default("#9ca3af")]
    pub close_icon_color: Color,
    #[default(12)]
    pub border_radius: u32,
}

/// Form inputs.
#[singleton(table = "input_color", slug = "input-color")]
pub struct InputColor {
    #[default("#0f172a")]
    pub background_color: Color,
    #[default("#f9fafb")]
    pub text_color: Color,
    #[default("#6b7280")]
    pub placeholder_color: Color,
    #[default("#374151")]
    pub border_color: Color,
    #[default("#f59e0b")]
    pub focus_border_color: Color,
    #[default("#ef4444")]
    pub error_color: Color,
}

#[singleton(table = "toast_color", slug = "toast-color")]
pub struct ToastColor {
    #[default("#16a34a")]
    pub success_background: Color,
    #[default("#dc2626")]
    pub error_background: Color,
    #[default("#2563eb")]
    pub info_background: Color,
    #[default("#ffffff")]
    pub text_color: Color,
}

/// Floating contact button (bottom right).
#[singleton(table = "floating_button_color", slug = "floating-button-color")]
pub struct FloatingButtonColor {
    #[default("#229ed9")]
    pub background_color: Color,
    #[default("#ffffff")]
    pub icon_color: Color,
    #[default(56)]
    pub size: u32,
    #[default(24)]
    pub bottom_offset: u32,
    #[default(24)]
    pub right_offset: u32,
}

#[singleton(table = "scrollbar_color", slug = "scrollbar-color")]
pub struct ScrollbarColor {
    #[default("#0b0f1a")]
    pub track_color: Color,
    #[default("#374151")]
    pub thumb_color: Color,
    #[default("#4b5563")]
    pub thumb_hover_color: Color,
    #[default(8)]
    pub width: u32,
}

#[singleton(table = "login_form_color", slug = "login-form-color")]
pub struct LoginFormColor {
    #[default("#111827")]
    pub background_color: Color,
    #[default("#ffffff")]
    pub title_color: Color,
    #[default("#9ca3af")]
    pub label_color: Color,
    #[default("#f59e0b")]
    pub button_color: Color,
    #[default("#111827")]
    pub button_text_color: Color,
    #[default("#fbbf24")]
    pub link_color: Color,
}

/// Casino review pages.
#[singleton(table = "review_page_color", slug = "review-page-color")]
pub struct ReviewPageColor {
    #[default("#0b0f1a")]
    pub background_color: Color,
    #[default("#ffffff")]
    pub heading_color: Color,
    #[default("#d1d5db")]
    pub text_color: Color,
    #[default("#16a34a")]
    pub pros_color: Color,
    #[default("#dc2626")]
    pub cons_color: Color,
}

/// Affiliate dashboard cards and charts.
#[singleton(table = "affiliate_dashboard_color", slug = "affiliate-dashboard-color")]
pub struct AffiliateDashboardColor {
    #[default("#0b0f1a")]
    pub background_color: Color,
    #[default("#111827")]
    pub card_background: Color,
    #[default("#ffffff")]
    pub stat_value_color: Color,
    #[default("#9ca3af")]
    pub stat_label_color: Color,
    #[default("#f59e0b")]
    pub chart_primary_color: Color,
    #[default("#3b82f6")]
    pub chart_secondary_color: Color,
}
