use byte_unit::{Byte, UnitType};

pub fn format_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Decimal);
    format!("{:.1}", adjusted)
}

pub fn format_size_with(bytes: u64, in_bytes: bool) -> String {
    if in_bytes {
        format!("{} B", bytes)
    } else {
        format_size(bytes)
    }
}

/// Shows only the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

pub fn truncate_middle(text: &str, max_len: usize) -> String {
    let count = text.chars().count();
    if count <= max_len || max_len < 5 {
        return text.to_string();
    }
    let keep = max_len - 3;
    let head = keep / 2;
    let tail = keep - head;
    let start: String = text.chars().take(head).collect();
    let end: String = text.chars().skip(count - tail).collect();
    format!("{}...{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh"), "****efgh");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_truncate_middle() {
        assert_eq!(truncate_middle("short", 10), "short");
        assert_eq!(truncate_middle("https://example.com/a/very/long/path", 15), "https:...g/path");
    }

    #[test]
    fn test_format_size_in_bytes() {
        assert_eq!(format_size_with(2048, true), "2048 B");
        assert!(format_size(2_000_000).contains("MB"));
    }
}
