use axum::{extract::State, http::header, response::IntoResponse};
use chrono::Utc;

use crate::AppState;

/// Routes advertised to crawlers: (path, change frequency, priority).
const SITEMAP_ROUTES: [(&str, &str, &str); 4] = [
    ("", "daily", "1.0"),
    ("/browse-tools", "daily", "0.9"),
    ("/submit-tool", "weekly", "0.8"),
    ("/about", "monthly", "0.7"),
];

/// Path prefixes kept out of crawler indexes.
const DISALLOWED_PREFIXES: [&str; 6] = [
    "/admin/",
    "/auth/",
    "/api/",
    "/private/",
    "/*.json$",
    "/*.xml$",
];

fn render_sitemap(base_url: &str, lastmod: &str) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for (path, changefreq, priority) in SITEMAP_ROUTES {
        xml.push_str(&format!(
            "  <url>\n    <loc>{base_url}{path}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>{changefreq}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n"
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn render_robots(base_url: &str) -> String {
    let mut body = String::from("User-agent: *\nAllow: /\n");
    for prefix in DISALLOWED_PREFIXES {
        body.push_str(&format!("Disallow: {prefix}\n"));
    }
    body.push_str(&format!("\nSitemap: {base_url}/sitemap.xml\nHost: {base_url}\n"));
    body
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let lastmod = Utc::now().format("%Y-%m-%d").to_string();
    let xml = render_sitemap(&state.config.base_url, &lastmod);
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

/// GET /robots.txt
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_robots(&state.config.base_url);
    ([(header::CONTENT_TYPE, "text/plain")], body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sitemap_lists_the_four_fixed_routes() {
        let xml = render_sitemap("https://clitools.dev", "2026-08-07");
        assert_eq!(xml.matches("<url>").count(), 4);
        assert!(xml.contains("<loc>https://clitools.dev</loc>"));
        assert!(xml.contains("<loc>https://clitools.dev/browse-tools</loc>"));
        assert!(xml.contains("<loc>https://clitools.dev/submit-tool</loc>"));
        assert!(xml.contains("<loc>https://clitools.dev/about</loc>"));
        assert!(xml.contains("<lastmod>2026-08-07</lastmod>"));
    }

    #[test]
    fn sitemap_carries_crawl_hints_per_route() {
        let xml = render_sitemap("https://clitools.dev", "2026-08-07");
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
    }

    #[test]
    fn robots_disallows_internal_prefixes() {
        let body = render_robots("https://clitools.dev");
        assert!(body.starts_with("User-agent: *\nAllow: /\n"));
        for prefix in DISALLOWED_PREFIXES {
            assert!(body.contains(&format!("Disallow: {prefix}\n")));
        }
        assert!(body.contains("Sitemap: https://clitools.dev/sitemap.xml"));
        assert!(body.contains("Host: https://clitools.dev"));
    }
}
