use super::*;

#[test]
fn relative_reference_joins_base() {
    let media = BaseUrlMedia::new("https://cdn.example.com/assets/");
    assert_eq!(media.resolve("logos/acme.png").as_deref(), Some("https://cdn.example.com/assets/logos/acme.png"));
    assert_eq!(media.resolve("/logos/acme.png").as_deref(), Some("https://cdn.example.com/assets/logos/acme.png"));
}

#[test]
fn absolute_urls_pass_through() {
    let media = BaseUrlMedia::new("https://cdn.example.com");
    assert_eq!(media.resolve("http://other.test/a.png").as_deref(), Some("http://other.test/a.png"));
    assert_eq!(media.resolve("data:image/png;base64,AAAA").as_deref(), Some("data:image/png;base64,AAAA"));
}

#[test]
fn empty_reference_does_not_resolve() {
    let media = BaseUrlMedia::new("https://cdn.example.com");
    assert_eq!(media.resolve(""), None);
    assert_eq!(media.resolve("   "), None);
}
