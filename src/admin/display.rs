//! HTML snippets shown in admin list columns.

/// Escape text for safe inclusion in HTML element content or attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Anchor to a user's public endpoint, labelled with the username.
pub fn user_link(id: i32, username: &str) -> String {
    format!("<a href=\"/users/{}/\">{}</a>", id, escape_html(username))
}

/// Anchor to a movie's admin form, labelled with the title.
pub fn movie_link(id: i32, title: &str) -> String {
    format!("<a href=\"/admin/movies/{}/\">{}</a>", id, escape_html(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        assert_eq!(user_link(7, "ripley"), "<a href=\"/users/7/\">ripley</a>");
        assert_eq!(
            movie_link(5, "Alien"),
            "<a href=\"/admin/movies/5/\">Alien</a>"
        );
    }

    #[test]
    fn test_link_text_is_escaped() {
        assert_eq!(
            movie_link(1, "<script>alert('x')</script> & co"),
            "<a href=\"/admin/movies/1/\">&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt; &amp; co</a>"
        );
    }
}
