//! Join keys shared by widget kinds and widget data messages.

/// `SELECTOR_ROW` → `selectorrow`
pub fn normalize_kind(name: &str) -> String {
    name.to_lowercase().replace('_', "")
}

/// `SelectorRowData` → `selectorrow`
pub fn normalize_data_message(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.strip_suffix("data") {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_message_share_a_key() {
        assert_eq!(normalize_kind("SELECTOR_ROW"), "selectorrow");
        assert_eq!(normalize_data_message("SelectorRowData"), "selectorrow");
    }

    #[test]
    fn data_suffix_is_stripped_once() {
        assert_eq!(normalize_data_message("MetaDataData"), "metadata");
        assert_eq!(normalize_data_message("Title"), "title");
    }

    #[test]
    fn kind_without_underscores() {
        assert_eq!(normalize_kind("TITLE"), "title");
    }
}
