//! Website paths whose rendered output depends on each table.

pub const HOME: &str = "/";
pub const ADMIN: &str = "/admin";

pub fn project_pages(slugs: &[&str]) -> Vec<String> {
    let mut pages = vec![
        "/projects".to_string(),
        HOME.to_string(),
        ADMIN.to_string(),
        "/admin/projects".to_string(),
    ];
    for slug in slugs {
        let page = format!("/projects/{}", slug);
        if !pages.contains(&page) {
            pages.push(page);
        }
    }
    pages
}

pub fn about_pages() -> Vec<String> {
    vec![HOME.into(), "/about".into(), ADMIN.into(), "/admin/about".into()]
}

pub fn contact_pages() -> Vec<String> {
    vec![HOME.into(), "/contact".into(), ADMIN.into(), "/admin/contact".into()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_pages_cover_listing_detail_home_and_admin() {
        let pages = project_pages(&["logo-set"]);
        for expected in ["/projects", "/projects/logo-set", "/", "/admin", "/admin/projects"] {
            assert!(pages.iter().any(|p| p == expected), "missing {expected}");
        }
    }

    #[test]
    fn repeated_slugs_are_listed_once() {
        let pages = project_pages(&["a", "a", "b"]);
        assert_eq!(pages.iter().filter(|p| *p == "/projects/a").count(), 1);
        assert!(pages.contains(&"/projects/b".to_string()));
    }
}
