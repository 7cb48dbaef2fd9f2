//! Route tables for the two applications.

use blogdeck_client::Flavor;

use crate::route::{Route, RouteMeta, RouteTable};

/// Route table for `flavor`.
pub fn table(flavor: Flavor) -> RouteTable {
    match flavor {
        Flavor::Site => site(),
        Flavor::Console => console(),
    }
}

/// Public blog site.
pub fn site() -> RouteTable {
    let t = RouteMeta::titled;
    RouteTable::new(vec![
        Route::layout(
            "/",
            RouteMeta::default(),
            vec![
                Route::new("", "Home", t("Home").public()),
                Route::new("/article/:id", "ArticleDetail", t("Article").private()),
                Route::new("/search", "Search", t("Search").private()),
                Route::new("/category/:id", "Category", t("Category").private()),
                Route::new("/tag/:id", "Tag", t("Tag").private()),
                Route::new("/about", "About", t("About").public()),
                Route::new("/profile", "Profile", t("Profile").private()),
                Route::new("/publish", "Publish", t("Publish").private()),
                Route::new("/publish/:id", "EditArticle", t("Edit Article").private()),
                Route::new("/my-articles", "MyArticles", t("My Articles").private()),
            ],
        ),
        Route::new("/login", "Login", t("Log In").public()),
        Route::new("/register", "Register", t("Register").public()),
        Route::new("/forgot-password", "ForgotPassword", t("Reset Password").public()),
        Route::new("/:pathMatch(.*)*", "NotFound", t("404")),
    ])
}

/// Admin console.
pub fn console() -> RouteTable {
    let t = RouteMeta::titled;
    RouteTable::new(vec![
        Route::new("/login", "Login", RouteMeta::default().public()),
        Route::layout(
            "/",
            RouteMeta::default().private(),
            vec![
                Route::new("/dashboard", "Dashboard", t("Dashboard")),
                Route::new("/articles", "Articles", t("Articles")),
                Route::new("/articles/audit", "ArticleAudit", t("Article Review")),
                Route::new("/articles/edit/:id", "ArticleEdit", t("Edit Article").hidden()),
                Route::new("/categories", "Categories", t("Categories")),
                Route::new("/tags", "Tags", t("Tags")),
                Route::new("/comments", "Comments", t("Comments")),
                Route::new("/users", "Users", t("Users")),
                Route::new("/uploads", "Uploads", t("Files")),
                Route::new("/settings", "Settings", t("Settings").admin()),
                Route::new("/profile", "Profile", t("Profile").hidden()),
            ],
        )
        .with_name("Layout")
        .with_redirect("/dashboard"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_table() {
        let table = site();
        assert_eq!(table.resolve("/").name.as_deref(), Some("Home"));
        assert_eq!(table.resolve("/publish").name.as_deref(), Some("Publish"));
        assert_eq!(table.resolve("/publish/9").name.as_deref(), Some("EditArticle"));
        assert_eq!(table.resolve("/category/2").meta.requires_auth, Some(true));
        assert_eq!(table.resolve("/anything/else").name.as_deref(), Some("NotFound"));
    }

    #[test]
    fn test_console_root_redirects_to_dashboard() {
        let resolved = console().resolve("/");
        assert_eq!(resolved.path, "/dashboard");
        assert_eq!(resolved.meta.requires_auth, Some(true));
    }

    #[test]
    fn test_console_menu() {
        let visible: Vec<_> = console()
            .named()
            .filter(|(_, meta)| !meta.hidden && meta.title.is_some())
            .map(|(name, _)| name)
            .collect();
        assert!(visible.contains(&"Settings"));
        assert!(!visible.contains(&"ArticleEdit"));
        assert!(!visible.contains(&"Profile"));
    }

    #[test]
    fn test_only_settings_is_admin() {
        let admin: Vec<_> = console()
            .named()
            .filter(|(_, meta)| meta.requires_admin)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(admin, vec!["Settings"]);
        assert!(site().named().all(|(_, meta)| !meta.requires_admin));
    }
}
