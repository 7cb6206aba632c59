/// Format a contact number for display.
/// Ten-digit numbers, with or without a leading 91 or 0, become
/// "+91 XXXXX XXXXX"; anything else is returned unchanged.
pub fn format_contact_number(contact: &str) -> String {
    let digits: String = contact.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = match digits.len() {
        10 => &digits[..],
        11 if digits.starts_with('0') => &digits[1..],
        12 if digits.starts_with("91") => &digits[2..],
        _ => return contact.to_string(),
    };
    format!("+91 {} {}", &local[0..5], &local[5..10])
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
