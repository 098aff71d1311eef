//! Robots.txt parser implementation
//!
//! Only the `Sitemap:` directive is of interest here; allow/disallow groups
//! are ignored.

/// Extracts every `Sitemap:` URL from robots.txt content, in file order
///
/// The directive name is matched case-insensitively. Directives with an
/// empty value are skipped.
///
/// # Examples
///
/// ```
/// use rival_watch::robots::parse_sitemap_directives;
///
/// let robots = "User-agent: *\nDisallow: /admin\nSitemap: https://a.example/sitemap.xml\n";
/// assert_eq!(parse_sitemap_directives(robots), vec!["https://a.example/sitemap.xml"]);
/// ```
pub fn parse_sitemap_directives(content: &str) -> Vec<String> {
    const DIRECTIVE: &str = "sitemap:";

    content
        .lines()
        .map(str::trim_start)
        .filter(|line| {
            line.get(..DIRECTIVE.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DIRECTIVE))
        })
        .map(|line| line[DIRECTIVE.len()..].trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
