use std::{fmt::Write, ops::RangeInclusive};

/// Smallest size with a generated style rule.
pub const CATALOG_MIN: i32 = 1;
/// Largest size with a generated style rule.
pub const CATALOG_MAX: i32 = 99;

pub const DEFAULT_CLASS_PREFIX: &str = "text_scale_";

/// Maps integer font sizes to style class names and renders the rules for
/// the fixed range `[1, 99]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCatalog {
    prefix: String,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_PREFIX)
    }
}

impl StyleCatalog {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn sizes(&self) -> RangeInclusive<i32> {
        CATALOG_MIN..=CATALOG_MAX
    }

    /// Whether a rule exists for `size`.
    pub fn contains(&self, size: i32) -> bool {
        self.sizes().contains(&size)
    }

    /// Class name for `size`. Defined for every integer but only sizes in
    /// [`StyleCatalog::sizes`] have a rule behind them.
    pub fn class_name(&self, size: i32) -> String {
        format!("{}{size}", self.prefix)
    }

    pub fn rule(&self, size: i32) -> String {
        format!(".{} {{ font-size: {size}px; }}", self.class_name(size))
    }

    /// All rules in ascending size order, one per line.
    pub fn stylesheet(&self) -> String {
        self.sizes().fold(String::new(), |mut out, size| {
            let _ = writeln!(out, "{}", self.rule(size));
            out
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_class_name() {
        let catalog = StyleCatalog::default();
        assert_eq!(catalog.class_name(12), "text_scale_12");
        assert_eq!(StyleCatalog::new("fs-").class_name(7), "fs-7");
    }

    #[test]
    fn test_class_names_unique() {
        let catalog = StyleCatalog::default();
        let names: HashSet<_> = catalog.sizes().map(|s| catalog.class_name(s)).collect();
        assert_eq!(names.len(), 99);
    }

    #[test]
    fn test_contains() {
        let catalog = StyleCatalog::default();
        assert!(catalog.contains(1));
        assert!(catalog.contains(99));
        assert!(!catalog.contains(0));
        assert!(!catalog.contains(100));
    }

    #[test]
    fn test_stylesheet_rules() {
        let catalog = StyleCatalog::default();
        let sheet = catalog.stylesheet();
        let lines: Vec<_> = sheet.lines().collect();

        assert_eq!(lines.len(), 99);
        assert_eq!(lines[0], ".text_scale_1 { font-size: 1px; }");
        assert_eq!(lines[11], ".text_scale_12 { font-size: 12px; }");
        assert_eq!(lines[98], ".text_scale_99 { font-size: 99px; }");
        assert!(sheet.ends_with('\n'));
    }
}
