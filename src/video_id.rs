//! Video identifier extraction.
//!
//! Agents pass either a full YouTube URL or a bare video ID. Only two URL
//! shapes are recognised: `youtu.be/<id>` and anything with a `v=<id>`
//! query parameter. Other YouTube URLs (`/embed/`, `/shorts/`, ...) are
//! passed through unchanged and will fail at the backend.

/// Extract the video ID from a YouTube URL, or return the input if it is already an ID.
pub fn normalize(input: &str) -> String {
    if input.contains("youtube.com") || input.contains("youtu.be") {
        if let Some(rest) = input.split("youtu.be/").nth(1) {
            return rest.split('?').next().unwrap_or(rest).to_string();
        }
        if let Some(rest) = input.split("v=").nth(1) {
            return rest.split('&').next().unwrap_or(rest).to_string();
        }
    }
    input.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url() {
        assert_eq!(normalize("https://youtu.be/abc123?t=5"), "abc123");
        assert_eq!(normalize("https://youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(normalize("https://www.youtube.com/watch?v=abc123&t=5"), "abc123");
        assert_eq!(normalize("youtube.com/watch?feature=share&v=xyz"), "xyz");
    }

    #[test]
    fn test_bare_id() {
        assert_eq!(normalize("abc123"), "abc123");
        // No host marker, so the v= rule does not apply
        assert_eq!(normalize("v=abc"), "v=abc");
    }

    #[test]
    fn test_bare_id_idempotent() {
        for id in ["abc123", "dQw4w9WgXcQ", "with-dash_und", ""] {
            let once = normalize(id);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_unrecognised_youtube_url_passes_through() {
        let embed = "https://www.youtube.com/embed/dQw4w9WgXcQ";
        assert_eq!(normalize(embed), embed);
        let shorts = "https://youtube.com/shorts/dQw4w9WgXcQ";
        assert_eq!(normalize(shorts), shorts);
    }
}
