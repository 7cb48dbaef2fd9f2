//! Router: runs the guard and applies its decision.

use std::sync::Arc;

use blogdeck_client::{Flavor, LogNavigator, Navigator, Notifier, TracingNotifier};
use blogdeck_session::Session;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::guard::{Decision, DecisionKind, Navigation, decide};
use crate::route::{ResolvedRoute, RouteTable};
use crate::routes;

/// Longest chain of guard redirects followed for one navigation.
const MAX_GUARD_HOPS: usize = 8;

#[derive(Debug, Default)]
struct RouterState {
    current: Option<String>,
    title: String,
}

/// Navigation state for one application.
pub struct Router {
    flavor: Flavor,
    table: RouteTable,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<RouterState>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("flavor", &self.flavor)
            .field("state", &*self.state.read())
            .finish()
    }
}

impl Router {
    /// Router over the flavor's own route table, reporting through `tracing`.
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            table: routes::table(flavor),
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(LogNavigator),
            state: RwLock::new(RouterState {
                current: None,
                title: flavor.app_name().to_string(),
            }),
        }
    }

    pub fn with_table(mut self, table: RouteTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Path of the last completed navigation.
    pub fn current_path(&self) -> Option<String> {
        self.state.read().current.clone()
    }

    /// Title for the most recent navigation target.
    pub fn document_title(&self) -> String {
        self.state.read().title.clone()
    }

    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        self.table.resolve(path)
    }

    /// Navigate to `to`.
    ///
    /// The title follows the requested route even when the guard turns the
    /// navigation away. On a redirect or denial the notice (if any) is
    /// emitted and the navigator is sent to the new path. The redirect
    /// target is guarded again, so a chain of redirects settles on the first
    /// page the guard lets through, which becomes the current path. The
    /// returned decision is the one taken for `to` itself.
    pub fn navigate(&self, to: &str, session: &Session) -> Decision {
        let navigation = Navigation {
            to: self.table.resolve(to),
            from: self.current_path(),
        };
        let title = match &navigation.to.meta.title {
            Some(title) => format!("{} - {}", title, self.flavor.app_name()),
            None => self.flavor.app_name().to_string(),
        };

        let decision = self.guard(&navigation, session);
        let mut landed = navigation.to.path.clone();
        let mut next = decision.redirect_target().map(str::to_string);

        for _ in 0..MAX_GUARD_HOPS {
            let Some(target) = next.take() else {
                break;
            };
            let hop = Navigation {
                to: self.table.resolve(&target),
                from: navigation.from.clone(),
            };
            landed = hop.to.path.clone();
            next = self.guard(&hop, session).redirect_target().map(str::to_string);
        }
        if let Some(target) = next {
            warn!(to = %navigation.to.path, redirect = %target, "Redirect chain too long, stopping");
            landed = self.table.resolve(&target).path;
        }

        let mut state = self.state.write();
        state.title = title;
        state.current = Some(landed);
        decision
    }

    /// Run the guard for one hop, emitting its notice and redirect.
    fn guard(&self, navigation: &Navigation, session: &Session) -> Decision {
        let decision = decide(self.flavor, navigation, session);
        debug!(
            flavor = %self.flavor,
            to = %navigation.to.path,
            from = navigation.from.as_deref().unwrap_or(""),
            decision = ?DecisionKind::from(&decision),
            "Navigation guarded"
        );

        if let Some(notice) = decision.notice() {
            self.notifier.notify(notice.clone());
        }
        if let Some(target) = decision.redirect_target() {
            info!(to = %navigation.to.path, redirect = target, "Navigation redirected");
            self.navigator.redirect(target);
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{Route, RouteMeta};
    use blogdeck_client::{Notice, NoticeLevel, User};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        notices: Mutex<Vec<Notice>>,
        redirects: Mutex<Vec<String>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.notices.lock().push(notice);
        }
    }

    impl Navigator for Recorder {
        fn redirect(&self, path: &str) {
            self.redirects.lock().push(path.to_string());
        }
    }

    fn router(flavor: Flavor) -> (Arc<Recorder>, Router) {
        let recorder = Arc::new(Recorder::default());
        let router = Router::new(flavor)
            .with_notifier(recorder.clone())
            .with_navigator(recorder.clone());
        (recorder, router)
    }

    fn signed_in(username: &str, role: i32) -> Session {
        Session {
            token: "t1".into(),
            user_info: Some(User {
                username: username.into(),
                role: Some(role),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_allowed_navigation_updates_state() {
        let (recorder, router) = router(Flavor::Site);
        let decision = router.navigate("/about", &Session::default());

        assert!(decision.is_allowed());
        assert_eq!(router.current_path().as_deref(), Some("/about"));
        assert_eq!(router.document_title(), "About - blog-web");
        assert!(recorder.redirects.lock().is_empty());
        assert!(recorder.notices.lock().is_empty());
    }

    #[test]
    fn test_non_admin_scenario() {
        let (recorder, router) = router(Flavor::Console);
        let bob = signed_in("bob", 0);

        assert!(router.navigate("/dashboard", &bob).is_allowed());
        let decision = router.navigate("/settings", &bob);

        assert!(matches!(decision, Decision::Deny { .. }));
        let notices = recorder.notices.lock();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(*recorder.redirects.lock(), vec!["/dashboard".to_string()]);
        assert_eq!(router.current_path().as_deref(), Some("/dashboard"));
        assert_eq!(router.document_title(), "Settings - blog-admin");
    }

    #[test]
    fn test_admin_reaches_settings() {
        let (recorder, router) = router(Flavor::Console);
        let decision = router.navigate("/settings", &signed_in("carol", 1));

        assert!(decision.is_allowed());
        assert_eq!(router.current_path().as_deref(), Some("/settings"));
        assert!(recorder.notices.lock().is_empty());
    }

    #[test]
    fn test_signed_out_navigation_goes_to_login() {
        let (recorder, router) = router(Flavor::Site);
        let decision = router.navigate("/my-articles", &Session::default());

        assert_eq!(decision.redirect_target(), Some("/login"));
        assert_eq!(*recorder.redirects.lock(), vec!["/login".to_string()]);
        assert_eq!(recorder.notices.lock()[0].level, NoticeLevel::Warning);
        assert_eq!(router.current_path().as_deref(), Some("/login"));
    }

    #[test]
    fn test_console_home_redirect_lands_on_dashboard() {
        let (recorder, router) = router(Flavor::Console);
        let decision = router.navigate("/login", &signed_in("admin", 1));

        assert_eq!(decision.redirect_target(), Some("/"));
        assert_eq!(*recorder.redirects.lock(), vec!["/".to_string()]);
        assert_eq!(router.current_path().as_deref(), Some("/dashboard"));
        assert_eq!(router.document_title(), "blog-admin");
    }

    #[test]
    fn test_redirect_target_is_guarded_again() {
        let (recorder, router) = router(Flavor::Site);
        // A token without a profile is not a login, but /login sends any
        // token holder home.
        let half_signed_in = Session {
            token: "t1".into(),
            user_info: None,
        };
        let decision = router.navigate("/profile", &half_signed_in);

        assert_eq!(decision.redirect_target(), Some("/login"));
        assert_eq!(
            *recorder.redirects.lock(),
            vec!["/login".to_string(), "/".to_string()]
        );
        assert_eq!(recorder.notices.lock().len(), 1);
        assert_eq!(router.current_path().as_deref(), Some("/"));
        assert_eq!(router.document_title(), "Profile - blog-web");
    }

    #[test]
    fn test_site_denial_settles_on_home() {
        let table = RouteTable::new(vec![
            Route::new("/", "Home", RouteMeta::titled("Home").public()),
            Route::new("/login", "Login", RouteMeta::default().public()),
            Route::new("/admin", "Admin", RouteMeta::titled("Admin").admin()),
        ]);
        let recorder = Arc::new(Recorder::default());
        let router = Router::new(Flavor::Site)
            .with_table(table)
            .with_notifier(recorder.clone())
            .with_navigator(recorder.clone());

        let decision = router.navigate("/admin", &signed_in("bob", 0));

        assert!(matches!(decision, Decision::Deny { .. }));
        assert_eq!(
            *recorder.redirects.lock(),
            vec!["/login".to_string(), "/".to_string()]
        );
        assert_eq!(router.current_path().as_deref(), Some("/"));
    }
}
