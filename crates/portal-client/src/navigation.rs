//! Portal navigation bar.
//!
//! Items either route to another page (`/...`) or scroll to a section of the
//! current page (`#...`). The bar also carries the language menu, the mobile
//! menu toggle and the login/logout action, which follows [`AuthState`].

use std::sync::Arc;

use portal_hero::Language;
use tracing::{debug, warn};

use crate::session::AuthState;

/// Route shown to signed-out users.
pub const LOGIN_ROUTE: &str = "/login";

/// Route opened after logging out.
pub const HOME_ROUTE: &str = "/";

/// The host's router.
pub trait Navigator: Send + Sync {
    /// Open a route.
    fn push(&self, route: &str);

    /// Scroll the section with `id` into view. Returns `false` if the page has
    /// no such section.
    fn scroll_to(&self, id: &str) -> bool;
}

/// Where a navigation item leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget<'a> {
    /// Another page, e.g. `/portal`.
    Route(&'a str),
    /// A section id on the current page, without the `#`.
    Anchor(&'a str),
}

impl<'a> NavTarget<'a> {
    pub fn parse(href: &'a str) -> Self {
        if href.starts_with('/') {
            Self::Route(href)
        } else {
            Self::Anchor(href.strip_prefix('#').unwrap_or(href))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

impl NavItem {
    pub fn target(&self) -> NavTarget<'static> {
        NavTarget::parse(self.href)
    }
}

/// Items shown in the bar, in display order.
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        name: "Add & Manage DPR",
        href: "/portal",
    },
    NavItem {
        name: "AI Chatbot",
        href: "/chatbot",
    },
    NavItem {
        name: "Demo Video",
        href: "#offline-feature",
    },
    NavItem {
        name: "How to Analyze DPR",
        href: "#offline-feature",
    },
    NavItem {
        name: "Offline",
        href: "#offline-feature",
    },
];

/// The auth control at the end of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Signed in: offer "Logout".
    Logout,
    /// Signed out: link to the login page.
    Login { href: &'static str },
}

/// Navigation bar state.
pub struct NavigationBar {
    auth: Arc<AuthState>,
    navigator: Arc<dyn Navigator>,
    pathname: String,
    active_section: Option<String>,
    language: Language,
    language_menu_open: bool,
    mobile_menu_open: bool,
}

impl NavigationBar {
    pub fn new(
        auth: Arc<AuthState>,
        navigator: Arc<dyn Navigator>,
        pathname: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            navigator,
            pathname: pathname.into(),
            active_section: None,
            language: Language::English,
            language_menu_open: false,
            mobile_menu_open: false,
        }
    }

    pub fn items(&self) -> &'static [NavItem] {
        &NAV_ITEMS
    }

    /// Follow `href`: routes go to the navigator, anchors scroll and become
    /// the active section when the page has them.
    pub fn navigate(&mut self, href: &str) {
        match NavTarget::parse(href) {
            NavTarget::Route(route) => {
                debug!(route, "navigating");
                self.navigator.push(route);
            }
            NavTarget::Anchor(id) => {
                if self.navigator.scroll_to(id) {
                    self.active_section = Some(id.to_owned());
                } else {
                    debug!(id, "no section to scroll to");
                }
            }
        }
    }

    /// Pick an item from the mobile menu, which then closes.
    pub fn navigate_mobile(&mut self, href: &str) {
        self.navigate(href);
        self.mobile_menu_open = false;
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// The host moved to another route; re-check authentication.
    pub async fn route_changed(&mut self, pathname: impl Into<String>) {
        self.pathname = pathname.into();
        self.auth.refresh().await;
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn auth_action(&self) -> AuthAction {
        if self.is_authenticated() {
            AuthAction::Logout
        } else {
            AuthAction::Login { href: LOGIN_ROUTE }
        }
    }

    /// Clear the session and go home. A storage failure is logged and the
    /// user is still sent home.
    pub async fn logout(&mut self) {
        if let Err(e) = self.auth.logout().await {
            warn!(error = %e, "failed to clear session on logout");
        }
        self.navigator.push(HOME_ROUTE);
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_language_menu_open(&self) -> bool {
        self.language_menu_open
    }

    pub fn toggle_language_menu(&mut self) {
        self.language_menu_open = !self.language_menu_open;
    }

    /// Choose a language from the menu, which then closes.
    pub fn select_language(&mut self, language: Language) {
        self.language = language;
        self.language_menu_open = false;
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }
}

impl std::fmt::Debug for NavigationBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationBar")
            .field("pathname", &self.pathname)
            .field("active_section", &self.active_section)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::storage::{ClientStorage, FailingStorage, MemoryStorage, TOKEN_KEY};

    /// Records routes and scroll requests; knows a fixed set of sections.
    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<String>>,
        scrolls: Mutex<Vec<String>>,
        sections: Vec<&'static str>,
    }

    impl Navigator for RecordingNavigator {
        fn push(&self, route: &str) {
            self.routes.lock().unwrap().push(route.to_owned());
        }

        fn scroll_to(&self, id: &str) -> bool {
            self.scrolls.lock().unwrap().push(id.to_owned());
            self.sections.iter().any(|s| *s == id)
        }
    }

    async fn bar(
        sections: Vec<&'static str>,
    ) -> (NavigationBar, Arc<RecordingNavigator>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let auth = Arc::new(AuthState::new(Arc::clone(&storage) as Arc<dyn ClientStorage>).await);
        let navigator = Arc::new(RecordingNavigator {
            sections,
            ..RecordingNavigator::default()
        });
        let bar = NavigationBar::new(auth, Arc::clone(&navigator) as Arc<dyn Navigator>, "/");
        (bar, navigator, storage)
    }

    #[test]
    fn targets_parse() {
        assert_eq!(NavTarget::parse("/portal"), NavTarget::Route("/portal"));
        assert_eq!(NavTarget::parse("#offline-feature"), NavTarget::Anchor("offline-feature"));
        assert_eq!(NAV_ITEMS[1].target(), NavTarget::Route("/chatbot"));
        assert_eq!(NAV_ITEMS[4].target(), NavTarget::Anchor("offline-feature"));
    }

    #[tokio::test]
    async fn routes_go_to_navigator() {
        let (mut bar, nav, _) = bar(vec![]).await;
        bar.navigate(NAV_ITEMS[0].href);
        assert_eq!(*nav.routes.lock().unwrap(), ["/portal"]);
        assert_eq!(bar.active_section(), None);
    }

    #[tokio::test]
    async fn anchors_scroll_and_mark_active_section() {
        let (mut bar, nav, _) = bar(vec!["offline-feature"]).await;
        bar.navigate("#offline-feature");
        assert_eq!(bar.active_section(), Some("offline-feature"));
        assert!(nav.routes.lock().unwrap().is_empty());

        bar.navigate("#missing");
        assert_eq!(bar.active_section(), Some("offline-feature"));
        assert_eq!(*nav.scrolls.lock().unwrap(), ["offline-feature", "missing"]);
    }

    #[tokio::test]
    async fn mobile_navigation_closes_menu() {
        let (mut bar, nav, _) = bar(vec![]).await;
        bar.toggle_mobile_menu();
        assert!(bar.is_mobile_menu_open());
        bar.navigate_mobile("/chatbot");
        assert!(!bar.is_mobile_menu_open());
        assert_eq!(*nav.routes.lock().unwrap(), ["/chatbot"]);
    }

    #[tokio::test]
    async fn language_menu_defaults_to_english() {
        let (mut bar, _, _) = bar(vec![]).await;
        assert_eq!(bar.language(), Language::English);
        bar.toggle_language_menu();
        assert!(bar.is_language_menu_open());
        bar.select_language(Language::Assamese);
        assert_eq!(bar.language(), Language::Assamese);
        assert!(!bar.is_language_menu_open());
    }

    #[tokio::test]
    async fn route_change_rechecks_auth_and_logout_goes_home() {
        let (mut bar, nav, storage) = bar(vec![]).await;
        assert_eq!(bar.auth_action(), AuthAction::Login { href: "/login" });

        storage.set(TOKEN_KEY, "t1").await.unwrap();
        bar.route_changed("/portal").await;
        assert_eq!(bar.pathname(), "/portal");
        assert_eq!(bar.auth_action(), AuthAction::Logout);

        bar.logout().await;
        assert!(!bar.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(*nav.routes.lock().unwrap(), ["/"]);
    }

    #[tokio::test]
    async fn logout_goes_home_even_when_storage_fails() {
        let auth = Arc::new(AuthState::new(Arc::new(FailingStorage::new())).await);
        let nav = Arc::new(RecordingNavigator::default());
        let mut bar = NavigationBar::new(auth, Arc::clone(&nav) as Arc<dyn Navigator>, "/portal");
        assert_eq!(bar.auth_action(), AuthAction::Login { href: LOGIN_ROUTE });

        bar.logout().await;
        assert_eq!(*nav.routes.lock().unwrap(), [HOME_ROUTE]);
    }
}
