/// `name` attribute of the meta tag that carries the anti-forgery token.
pub const CSRF_META_NAME: &str = "_csrf";

/// Returns the `content` attribute of the first `<meta name="{name}">` tag.
///
/// This is a targeted scanner, not an HTML parser: it walks `<meta ...>` tags,
/// reads their attributes (double-quoted, single-quoted or bare values) and
/// decodes the handful of character references a token could contain. Tags
/// without a non-empty `content` attribute are skipped.
pub fn extract_meta_content(html: &str, name: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut cursor = 0;
    while let Some(offset) = lower[cursor..].find("<meta") {
        let start = cursor + offset + "<meta".len();
        // `<metadata>` and friends are not meta tags.
        let boundary = lower[start..].chars().next();
        if !matches!(boundary, Some(c) if c.is_ascii_whitespace() || c == '/' || c == '>') {
            cursor = start;
            continue;
        }
        let (attrs, end) = read_attributes(&html[start..]);
        cursor = start + end;

        let matches_name = attrs
            .iter()
            .any(|(key, value)| key == "name" && value == name);
        if !matches_name {
            continue;
        }
        let content = attrs
            .into_iter()
            .find(|(key, _)| key == "content")
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty());
        if content.is_some() {
            return content;
        }
    }
    None
}

/// Parses attributes up to the closing `>`; returns them with the consumed length.
fn read_attributes(tag: &str) -> (Vec<(String, String)>, usize) {
    let bytes = tag.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            return (attrs, i);
        }
        if bytes[i] == b'>' {
            return (attrs, i + 1);
        }

        let key_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let key = tag[key_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            attrs.push((key, String::new()));
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = match bytes.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = i + 1;
                let len = bytes[value_start..]
                    .iter()
                    .position(|&b| b == quote)
                    .unwrap_or(bytes.len() - value_start);
                i = (value_start + len + 1).min(bytes.len());
                &tag[value_start..value_start + len]
            }
            _ => {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                &tag[value_start..i]
            }
        };
        attrs.push((key, decode_entities(value)));
    }
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
