use crate::error::LovelaceError;

/// Lower-case `value` and join its ASCII alphanumeric runs with `separator`.
pub fn slugify(value: &str, separator: char) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;
    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(separator);
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Accept `value` only if it is already a `-`-separated slug.
pub fn url_slug(value: &str) -> Result<&str, LovelaceError> {
    if value.is_empty() {
        return Err(LovelaceError::Invalid("slug should not be empty".to_string()));
    }
    let slug = slugify(value, '-');
    if slug == value {
        Ok(value)
    } else {
        Err(LovelaceError::Invalid(format!(
            "invalid slug {value} (try {slug})"
        )))
    }
}

/// Strip path traversal tokens from a file name.
pub fn sanitize_filename(value: &str) -> String {
    ["~", "..", "/", "\\"]
        .iter()
        .fold(value.to_string(), |acc, token| acc.replace(token, ""))
}

/// Icons are written as `prefix:name`, e.g. `mdi:home`.
pub fn validate_icon(value: &str) -> Result<&str, LovelaceError> {
    match value.split_once(':') {
        Some((prefix, name)) if !prefix.is_empty() && !name.is_empty() => Ok(value),
        _ => Err(LovelaceError::Invalid(format!(
            "icon {value:?} should be specified in the form \"prefix:name\""
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World", '-'), "hello-world");
        assert_eq!(slugify("  Living  Room!! ", '-'), "living-room");
        assert_eq!(slugify("kitchen_lights", '-'), "kitchen-lights");
        assert_eq!(slugify("kitchen lights", '_'), "kitchen_lights");
        assert_eq!(slugify("---", '-'), "");
    }

    #[test]
    fn test_url_slug_accepts_slug() {
        assert_eq!(url_slug("energy-dashboard").unwrap(), "energy-dashboard");
        assert_eq!(url_slug("map").unwrap(), "map");
    }

    #[test]
    fn test_url_slug_rejects_with_suggestion() {
        let err = url_slug("My Dashboard").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid lovelace config: invalid slug My Dashboard (try my-dashboard)"
        );
        assert!(url_slug("with_underscore").is_err());
        assert!(url_slug("trailing-").is_err());
        assert!(url_slug("").is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("~/dash.yaml"), "dash.yaml");
        assert_eq!(sanitize_filename("dash\\board.yaml"), "dashboard.yaml");
        assert_eq!(sanitize_filename("plain.yaml"), "plain.yaml");
    }

    #[test]
    fn test_validate_icon() {
        assert!(validate_icon("mdi:home").is_ok());
        assert!(validate_icon("home").is_err());
        assert!(validate_icon(":home").is_err());
        assert!(validate_icon("mdi:").is_err());
    }
}
