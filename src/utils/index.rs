pub fn format_label_count(count: usize) -> String {
    if count == 1 {
        "1 label".to_string()
    } else {
        format!("{} labels", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_label_count() {
        assert_eq!(format_label_count(0), "0 labels");
        assert_eq!(format_label_count(1), "1 label");
        assert_eq!(format_label_count(42), "42 labels");
    }
}
