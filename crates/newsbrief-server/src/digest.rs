//! HTML rendering for the email digest.

use newsbrief_core::Article;

/// Renders a digest of articles as a self-contained HTML document.
///
/// Articles carrying a summary show it in place of the body text.
pub fn render_digest(articles: &[Article]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><body>\
         <h1>Your News Digest</h1>",
    );

    for article in articles {
        let body = article.summary.as_deref().unwrap_or(&article.content);
        html.push_str(&format!(
            "<div><h2>{}</h2>\
             <p><em>{} &middot; {}</em></p>\
             <p>{}</p>\
             <p><a href=\"{}\">Read more</a></p></div>",
            escape(&article.title),
            escape(&article.source),
            article.published.format("%Y-%m-%d"),
            escape(body),
            article.url,
        ));
    }

    html.push_str("</body></html>");
    html
}

/// Minimal HTML escaping for text content.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
