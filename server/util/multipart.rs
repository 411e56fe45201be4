/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`, returning the pieces
/// between occurrences (excluding the needle itself).
pub fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with("boundary="))
        .map(|s| s["boundary=".len()..].trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Value of one `key="value"` (or bare `key=value`) parameter of a
/// Content-Disposition header line.
fn disposition_param<'a>(headers: &'a str, key: &str) -> Option<&'a str> {
    let line = headers
        .lines()
        .find(|l| l.trim_start().to_ascii_lowercase().starts_with("content-disposition"))?;
    line.split(';')
        .skip(1)
        .filter_map(|param| param.trim().split_once('='))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim().trim_matches('"'))
}

/// Extracts the raw bytes of a named file part from a multipart/form-data body.
///
/// Only parts carrying a `filename` parameter count as files; a text field
/// that happens to share the name is skipped.
pub fn multipart_extract_file_by_name(body: &[u8], boundary: &str, field_name: &str) -> Option<Vec<u8>> {
    let delimiter = format!("--{}", boundary);
    let delim_bytes = delimiter.as_bytes();
    let parts = split_on(body, delim_bytes);

    for part in parts {
        let sep = b"\r\n\r\n";
        if let Some(sep_pos) = find_subsequence(part, sep) {
            let header_section = &part[..sep_pos];
            let headers_str = String::from_utf8_lossy(header_section);
            let has_name     = disposition_param(&headers_str, "name") == Some(field_name);
            let has_filename = disposition_param(&headers_str, "filename").is_some();
            if has_name && has_filename {
                let data_start = sep_pos + sep.len();
                let raw = &part[data_start..];
                let trimmed = raw.strip_suffix(b"\r\n").unwrap_or(raw);
                return Some(trimmed.to_vec());
            }
        }
    }
    None
}
