//! HTML sanitization at the trust boundary.
//!
//! Article bodies arrive as HTML from the admin editor and are injected
//! verbatim into pages by the rendering layer, so everything outside a small
//! formatting allowlist is stripped before storage. The service layer calls
//! [`clean_html`] on every insert and patch of article content.
//!
//! This is an allowlist filter, not a full HTML parser: unknown tags are
//! dropped (their text content is kept), `<script>`/`<style>` bodies are
//! dropped entirely, attributes outside the allowlist are removed, and URL
//! attributes must carry a safe scheme.

/// Formatting tags that survive sanitization.
const ALLOWED_TAGS: &[&str] = &[
  "a", "b", "blockquote", "br", "em", "figcaption", "figure", "h1", "h2",
  "h3", "h4", "i", "img", "li", "ol", "p", "pre", "span", "strong", "u",
  "ul",
];

/// Tags whose entire content is removed, not just the tag itself.
const DROP_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Attributes that survive on allowed tags. `href`/`src` are additionally
/// checked with [`is_safe_url`].
const ALLOWED_ATTRS: &[&str] = &["alt", "href", "src", "title"];

/// Strip everything outside the allowlist from an HTML fragment.
///
/// Text content is passed through untouched; a `<` that does not open a
/// well-formed tag is escaped.
pub fn clean_html(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut i = 0;

  while i < input.len() {
    let Some(lt) = input[i..].find('<') else {
      out.push_str(&input[i..]);
      break;
    };
    out.push_str(&input[i..i + lt]);
    i += lt;

    // Comments are dropped wholesale.
    if input[i..].starts_with("<!--") {
      match input[i..].find("-->") {
        Some(end) => i += end + 3,
        None => i = input.len(),
      }
      continue;
    }

    let Some(close) = input[i..].find('>') else {
      // Unterminated tag: escape the `<` and treat the rest as text.
      out.push_str("&lt;");
      i += 1;
      continue;
    };

    let raw = &input[i + 1..i + close];
    i += close + 1;

    let (is_closing, raw) = match raw.strip_prefix('/') {
      Some(rest) => (true, rest),
      None => (false, raw),
    };
    let raw = raw.trim_end_matches('/').trim();

    let name_end = raw
      .find(|c: char| c.is_whitespace())
      .unwrap_or(raw.len());
    let name = raw[..name_end].to_ascii_lowercase();

    if name.is_empty() {
      continue;
    }

    if DROP_CONTENT_TAGS.contains(&name.as_str()) {
      if !is_closing {
        // Skip everything up to and including the matching close tag.
        let close_tag = format!("</{name}");
        let lower = input[i..].to_ascii_lowercase();
        match lower.find(&close_tag) {
          Some(pos) => {
            let after = i + pos;
            i = match input[after..].find('>') {
              Some(end) => after + end + 1,
              None => input.len(),
            };
          }
          None => i = input.len(),
        }
      }
      continue;
    }

    if !ALLOWED_TAGS.contains(&name.as_str()) {
      // Tag dropped, inner text kept.
      continue;
    }

    if is_closing {
      out.push_str("</");
      out.push_str(&name);
      out.push('>');
      continue;
    }

    out.push('<');
    out.push_str(&name);
    for (attr, value) in parse_attrs(&raw[name_end..]) {
      let attr = attr.to_ascii_lowercase();
      if !ALLOWED_ATTRS.contains(&attr.as_str()) {
        continue;
      }
      if (attr == "href" || attr == "src") && !is_safe_url(&value) {
        continue;
      }
      out.push(' ');
      out.push_str(&attr);
      out.push_str("=\"");
      out.push_str(&escape_attr(&value));
      out.push('"');
    }
    out.push('>');
  }

  out
}

/// Parse `name="value"` pairs from the tail of a tag. Tolerates unquoted
/// and valueless attributes, since the admin editor is not the only source
/// of this input.
fn parse_attrs(raw: &str) -> Vec<(String, String)> {
  let mut attrs = Vec::new();
  let chars: Vec<char> = raw.chars().collect();
  let mut i = 0;

  while i < chars.len() {
    while i < chars.len() && chars[i].is_whitespace() {
      i += 1;
    }
    if i >= chars.len() {
      break;
    }

    let name_start = i;
    while i < chars.len() && !chars[i].is_whitespace() && chars[i] != '=' {
      i += 1;
    }
    let name: String = chars[name_start..i].iter().collect();
    if name.is_empty() {
      i += 1;
      continue;
    }

    while i < chars.len() && chars[i].is_whitespace() {
      i += 1;
    }
    if i >= chars.len() || chars[i] != '=' {
      attrs.push((name, String::new()));
      continue;
    }
    i += 1; // consume '='
    while i < chars.len() && chars[i].is_whitespace() {
      i += 1;
    }

    let value = if i < chars.len() && (chars[i] == '"' || chars[i] == '\'') {
      let quote = chars[i];
      i += 1;
      let start = i;
      while i < chars.len() && chars[i] != quote {
        i += 1;
      }
      let v: String = chars[start..i].iter().collect();
      i += 1; // consume closing quote
      v
    } else {
      let start = i;
      while i < chars.len() && !chars[i].is_whitespace() {
        i += 1;
      }
      chars[start..i].iter().collect()
    };

    attrs.push((name, value));
  }

  attrs
}

/// A URL is safe when its scheme is http, https, or mailto, or when it is
/// relative. Control characters and whitespace are ignored when checking
/// the scheme, so `java\tscript:` does not slip through.
fn is_safe_url(url: &str) -> bool {
  let compact: String = url
    .chars()
    .filter(|c| !c.is_whitespace() && !c.is_control())
    .collect::<String>()
    .to_ascii_lowercase();

  match compact.find(':') {
    None => true, // relative
    Some(pos) => {
      // A ':' after the first '/' is part of the path, not a scheme.
      if compact.find('/').is_some_and(|slash| slash < pos) {
        return true;
      }
      matches!(&compact[..pos], "http" | "https" | "mailto")
    }
  }
}

fn escape_attr(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '"' => out.push_str("&quot;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      _ => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_text_untouched() {
    assert_eq!(clean_html("Load shedding ends today."), "Load shedding ends today.");
  }

  #[test]
  fn formatting_tags_survive() {
    let html = "<p>The <strong>clinic</strong> reopens <em>Monday</em>.</p>";
    assert_eq!(clean_html(html), html);
  }

  #[test]
  fn script_tag_and_body_removed() {
    let html = "<p>hi</p><script>alert(1)</script><p>bye</p>";
    assert_eq!(clean_html(html), "<p>hi</p><p>bye</p>");
  }

  #[test]
  fn unknown_tag_dropped_but_text_kept() {
    assert_eq!(clean_html("<marquee>sale</marquee>"), "sale");
  }

  #[test]
  fn event_handler_attributes_removed() {
    let html = r#"<p onclick="steal()">text</p>"#;
    assert_eq!(clean_html(html), "<p>text</p>");
  }

  #[test]
  fn javascript_href_removed() {
    let html = r#"<a href="javascript:alert(1)">x</a>"#;
    assert_eq!(clean_html(html), "<a>x</a>");
  }

  #[test]
  fn obfuscated_javascript_scheme_removed() {
    let html = "<a href=\"java\tscript:alert(1)\">x</a>";
    assert_eq!(clean_html(html), "<a>x</a>");
  }

  #[test]
  fn https_href_kept() {
    let html = r#"<a href="https://example.org/news">x</a>"#;
    assert_eq!(clean_html(html), html);
  }

  #[test]
  fn relative_src_kept() {
    let html = r#"<img src="/uploads/pic.jpg" alt="pic">"#;
    assert_eq!(clean_html(html), html);
  }

  #[test]
  fn comments_removed() {
    assert_eq!(clean_html("a<!-- hidden -->b"), "ab");
  }

  #[test]
  fn stray_angle_bracket_escaped() {
    assert_eq!(clean_html("5 < 6"), "5 &lt; 6");
  }

  #[test]
  fn attribute_values_escaped() {
    let html = r#"<img src="/a.png" alt="a &quot;b&quot;">"#;
    let out = clean_html(html);
    assert!(out.contains("alt=\"a &amp;quot;b&amp;quot;\""), "{out}");
  }

  #[test]
  fn unterminated_script_drops_rest() {
    assert_eq!(clean_html("safe<script>evil"), "safe");
  }
}
