/// Normalises a display name to the form stored in `users.username_safe`.
pub fn safe_username(username: &str) -> String {
    username.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_case_and_spaces() {
        assert_eq!(safe_username("  Cookiezi Fan "), "cookiezi_fan");
        assert_eq!(safe_username("RealistikDash"), "realistikdash");
    }
}
