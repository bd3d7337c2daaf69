use rustc_hash::FxHashSet;
use slug::slugify;

/// Assigns unique anchor slugs to the headings of a single document.
///
/// Repeated headings get a numeric suffix: `intro`, `intro-1`, `intro-2`.
pub struct Slugger {
    generated_slugs: FxHashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self {
            generated_slugs: FxHashSet::default(),
        }
    }

    pub fn slugify(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();
        let mut counter = 1;
        while !self.generated_slugs.insert(slug.clone()) {
            slug = format!("{}-{}", base, counter);
            counter += 1;
        }
        slug
    }
}

impl Default for Slugger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_repeated_headings() {
        let mut slugger = Slugger::new();

        assert_eq!(slugger.slugify("Intro"), "intro");
        assert_eq!(slugger.slugify("Intro"), "intro-1");
        assert_eq!(slugger.slugify("Intro"), "intro-2");
        assert_eq!(slugger.slugify("Outro"), "outro");
    }
}
