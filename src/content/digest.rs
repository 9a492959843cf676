//! Personalized digest mailed to each recipient and saved as chat/report files.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Canned assistant replies, one picked per digest.
pub const ASSISTANT_MESSAGES: [&str; 6] = [
    "Today's weather in Hanoi is sunny, with a high of 35°C.",
    "VN-Index edged up; foreign investors were strong net buyers.",
    "Tip: press Ctrl+Shift+V to paste text without formatting.",
    "Copilot suggests: try 4-7-8 breathing to ease stress.",
    "You have a meeting at 10:00 today, don't forget to prepare.",
    "Copilot is ready to help you write an email or build a table.",
];

/// Pick one assistant message uniformly at random.
pub fn pick_assistant_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ASSISTANT_MESSAGES
        .choose(rng)
        .copied()
        // ASSISTANT_MESSAGES is a non-empty const array
        .unwrap_or(ASSISTANT_MESSAGES[0])
}

/// Render the digest body.
pub fn compose_body(date: NaiveDate, headlines: &[String], assistant_message: &str) -> String {
    let news = headlines
        .iter()
        .map(|title| format!("- {}", title))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Personal digest for {}:\n{}\n\nCopilot says:\n{}\n\nAutomated email to keep account activity going.",
        date.format("%Y-%m-%d"),
        news,
        assistant_message
    )
}

/// Archive file names carry the recipient address with `@` replaced by `_`.
pub fn recipient_slug(recipient: &str) -> String {
    recipient.replace('@', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_compose_body() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let headlines = vec!["One".to_string(), "Two".to_string()];
        let body = compose_body(date, &headlines, "Hello there");

        assert!(body.starts_with("Personal digest for 2026-10-19:\n- One\n- Two\n"));
        assert!(body.contains("Copilot says:\nHello there"));
    }

    #[test]
    fn test_compose_body_without_news() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let body = compose_body(date, &[], "msg");
        assert!(body.starts_with("Personal digest for 2026-01-02:\n\n"));
    }

    #[test]
    fn test_pick_is_from_fixed_set() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let msg = pick_assistant_message(&mut rng);
            assert!(ASSISTANT_MESSAGES.contains(&msg));
        }
    }

    #[test]
    fn test_recipient_slug() {
        assert_eq!(recipient_slug("b@contoso.com"), "b_contoso.com");
    }
}
