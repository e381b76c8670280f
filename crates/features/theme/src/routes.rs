//! HTTP surface: `GET`/`PUT /<slug>`, `POST /<slug>/reset` and the aggregated `GET /theme`.

use crate::models::*;
use lobby_domain::constants::THEME_TAG;

lobby_kernel::singleton_routes! {
    tag = THEME_TAG;
    navbar_color: NavbarColor => "/navbar-color", "/navbar-color/reset";
    topbar_color: TopbarColor => "/topbar-color", "/topbar-color/reset";
    mobile_menu_color: MobileMenuColor => "/mobile-menu-color", "/mobile-menu-color/reset";
    sidebar_color: SidebarColor => "/sidebar-color", "/sidebar-color/reset";
    footer_color: FooterColor => "/footer-color", "/footer-color/reset";
    banner_color: BannerColor => "/banner-color", "/banner-color/reset";
    slider_color: SliderColor => "/slider-color", "/slider-color/reset";
    notice_color: NoticeColor => "/notice-color", "/notice-color/reset";
    promotion_card_color: PromotionCardColor => "/promotion-card-color", "/promotion-card-color/reset";
    casino_card_color: CasinoCardColor => "/casino-card-color", "/casino-card-color/reset";
    ranking_table_color: RankingTableColor => "/ranking-table-color", "/ranking-table-color/reset";
    rating_color: RatingColor => "/rating-color", "/rating-color/reset";
    button_color: ButtonColor => "/button-color", "/button-color/reset";
    body_color: BodyColor => "/body-color", "/body-color/reset";
    tab_color: TabColor => "/tab-color", "/tab-color/reset";
    pagination_color: PaginationColor => "/pagination-color", "/pagination-color/reset";
    search_bar_color: SearchBarColor => "/search-bar-color", "/search-bar-color/reset";
    badge_color: BadgeColor => "/badge-color", "/badge-color/reset";
    modal_color: ModalColor => "/modal-color", "/modal-color/reset";
    input_color: InputColor => "/input-color", "/input-color/reset";
    toast_color: ToastColor => "/toast-color", "/toast-color/reset";
    floating_button_color: FloatingButtonColor => "/floating-button-color", "/floating-button-color/reset";
    scrollbar_color: ScrollbarColor => "/scrollbar-color", "/scrollbar-color/reset";
    login_form_color: LoginFormColor => "/login-form-color", "/login-form-color/reset";
    review_page_color: ReviewPageColor => "/review-page-color", "/review-page-color/reset";
    affiliate_dashboard_color: AffiliateDashboardColor => "/affiliate-dashboard-color", "/affiliate-dashboard-color/reset";
}
