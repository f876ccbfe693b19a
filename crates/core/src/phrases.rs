use crate::model::{Item, SoloBand};

/// Spoken and displayed phrases used by the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrasebook {
    where_is: String,
    times_up: String,
    try_again: String,
}

impl Phrasebook {
    /// Arabic prompts, as spoken to the player.
    #[must_use]
    pub fn arabic() -> Self {
        Self {
            where_is: "أَيْنَ".to_string(),
            times_up: "انتهى الوقت".to_string(),
            try_again: "حاول مرة أخرى".to_string(),
        }
    }

    #[must_use]
    pub fn prompt(&self, item: &Item) -> String {
        format!("{} {}؟", self.where_is, item.audio)
    }

    #[must_use]
    pub fn times_up(&self) -> &str {
        &self.times_up
    }

    #[must_use]
    pub fn try_again(&self) -> &str {
        &self.try_again
    }

    /// Headline and native-language headline for a solo finish.
    #[must_use]
    pub fn band_headline(band: SoloBand) -> (&'static str, &'static str) {
        match band {
            SoloBand::Perfect => ("Perfect!", "مُمْتَاز!"),
            SoloBand::WellDone => ("Well Done!", "أَحْسَنْتَ!"),
            SoloBand::GoodEffort => ("Good effort!", "جيد!"),
        }
    }
}

impl Default for Phrasebook {
    fn default() -> Self {
        Self::arabic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemGroup;

    #[test]
    fn prompt_names_the_item() {
        let cow = Item::new("cow", "Cow", "بَقَرَة", "Baqara", "🐄", ItemGroup::Barn);
        assert_eq!(Phrasebook::arabic().prompt(&cow), "أَيْنَ بَقَرَة؟");
    }

    #[test]
    fn band_headlines() {
        assert_eq!(Phrasebook::band_headline(SoloBand::Perfect).0, "Perfect!");
        assert_eq!(Phrasebook::band_headline(SoloBand::GoodEffort).0, "Good effort!");
    }
}
