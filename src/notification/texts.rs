//! Canned reminder texts and the rotation over them.

use rand::Rng;

/// One reminder's wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderText {
    /// Notification title.
    pub title: &'static str,
    /// Short one-line content.
    pub content: &'static str,
    /// Longer text shown when the notification is expanded.
    pub expanded_text: &'static str,
}

impl ReminderText {
    /// Notification body: the short line first, the longer text after a blank line.
    ///
    /// Desktop services show the first line when collapsed and the rest on expand.
    #[must_use]
    pub fn body(&self) -> String {
        format!("{}\n\n{}", self.content, self.expanded_text)
    }
}

/// Every reminder the worker can post.
pub const REMINDER_TEXTS: &[ReminderText] = &[
    ReminderText {
        title: "Time to unwind",
        content: "Put on some rain and take a breather.",
        expanded_text: "You have been busy for a while. Put on the rain sound, \
                        lean back and let your shoulders drop for a few minutes.",
    },
    ReminderText {
        title: "Breathe with the waves",
        content: "Five slow breaths, in time with the tide.",
        expanded_text: "Open BackTune, pick the waves and breathe in for four \
                        counts and out for six. Five rounds are enough to reset.",
    },
    ReminderText {
        title: "A walk in the forest",
        content: "Rest your eyes and listen to the trees.",
        expanded_text: "Look away from the screen, close your eyes and let the \
                        forest sound carry you somewhere quiet for a moment.",
    },
    ReminderText {
        title: "Stretch break",
        content: "Stand up, stretch, and let the music play.",
        expanded_text: "Sitting still for hours is hard on the body. Stand up, \
                        roll your neck and stretch your arms while your favourite \
                        video keeps you company.",
    },
    ReminderText {
        title: "Hydration check",
        content: "Grab a glass of water and relax.",
        expanded_text: "A short pause is a good excuse for a glass of water. \
                        Queue up a calm video and enjoy the break.",
    },
    ReminderText {
        title: "Quiet minute",
        content: "Your calm corner is one tap away.",
        expanded_text: "Nothing to do, nowhere to be. Give yourself one quiet \
                        minute with an ambient sound of your choice.",
    },
];

/// Picks reminder texts at random without repeating the previous one.
#[derive(Debug, Default)]
pub struct ReminderTextPicker {
    last: Option<usize>,
}

impl ReminderTextPicker {
    /// Creates a picker with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the next text.
    ///
    /// # Arguments
    ///
    /// * `rng` - Source of randomness.
    ///
    /// # Returns
    ///
    /// A text different from the one returned by the previous call, as long
    /// as more than one text exists.
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static ReminderText {
        let count = REMINDER_TEXTS.len();
        let index = match self.last {
            Some(last) if count > 1 => {
                // Draw from the remaining entries and step over the last one
                let index = rng.gen_range(0..count - 1);
                if index >= last { index + 1 } else { index }
            }
            _ => rng.gen_range(0..count),
        };
        self.last = Some(index);
        &REMINDER_TEXTS[index]
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::notification::texts::{REMINDER_TEXTS, ReminderTextPicker};

    #[test]
    fn test_never_repeats_consecutively() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut picker = ReminderTextPicker::new();
        let mut previous = picker.pick(&mut rng);

        for _ in 0..500 {
            let next = picker.pick(&mut rng);
            assert_ne!(previous, next);
            previous = next;
        }
    }

    #[test]
    fn test_reaches_every_text() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut picker = ReminderTextPicker::new();
        let mut seen = vec![false; REMINDER_TEXTS.len()];

        for _ in 0..500 {
            let text = picker.pick(&mut rng);
            if let Some(index) = REMINDER_TEXTS.iter().position(|t| t == text) {
                seen[index] = true;
            }
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_texts_are_filled_in() {
        for text in REMINDER_TEXTS {
            assert!(!text.title.is_empty());
            assert!(!text.content.is_empty());
            assert!(text.expanded_text.len() > text.content.len());
        }
    }

    #[test]
    fn test_body_leads_with_short_content() {
        let text = &REMINDER_TEXTS[0];
        let body = text.body();

        assert_eq!(body.lines().next(), Some(text.content));
        assert!(body.ends_with(text.expanded_text));
    }
}
