// src/extract/rules.rs
//
// Field extraction is data: each field is a table of structural locators
// tried first, then text patterns, plus the functions that accept a
// captured string as a typed value.

use crate::domain::Field;
use crate::errors::ExtractorBuildError;
use crate::extract::page::Page;
use regex::Regex;
use scraper::Selector;
use tracing::debug;

/// How a text-pattern tier chooses among several accepted matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// First accepted match, patterns in order.
    First,
    /// Most frequent value over all patterns; ties go to the value seen last.
    MostFrequent,
    /// Largest accepted value.
    Maximum,
}

/// A CSS selector whose first match must also satisfy `shape`.
/// `shape` capture group 1 (or the whole match) is handed to `accept`.
pub struct Locator {
    pub selector: &'static str,
    pub shape: &'static str,
}

pub struct FieldRules<T: 'static> {
    pub name: &'static str,
    pub locators: &'static [Locator],
    pub patterns: &'static [&'static str],
    pub pick: Pick,
    /// Validates a value found by a locator.
    pub accept: fn(&str) -> Option<T>,
    /// Validates a value found by a text pattern (capture group 1).
    pub accept_text: fn(&str) -> Option<T>,
}

struct CompiledLocator {
    selector: Selector,
    shape: Regex,
}

/// A compiled [`FieldRules`] table, ready to run against pages.
pub struct Cascade<T: 'static> {
    rules: &'static FieldRules<T>,
    locators: Vec<CompiledLocator>,
    patterns: Vec<Regex>,
}

impl<T: Clone + PartialEq + PartialOrd> Cascade<T> {
    pub fn build(rules: &'static FieldRules<T>) -> Result<Self, ExtractorBuildError> {
        let locators = rules
            .locators
            .iter()
            .map(|loc| {
                let selector = Selector::parse(loc.selector).map_err(|e| {
                    ExtractorBuildError::Selector(loc.selector.to_string(), e.to_string())
                })?;
                let shape = Regex::new(loc.shape)?;
                Ok(CompiledLocator { selector, shape })
            })
            .collect::<Result<Vec<_>, ExtractorBuildError>>()?;

        let patterns = rules
            .patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            locators,
            patterns,
        })
    }

    pub fn extract(&self, page: &Page) -> Field<T> {
        if let Some(v) = self.structural(page) {
            return Field::Value(v);
        }
        if let Some(v) = self.textual(page.text()) {
            return Field::Value(v);
        }
        debug!(field = self.rules.name, "no locator or pattern matched");
        Field::Unavailable
    }

    fn structural(&self, page: &Page) -> Option<T> {
        self.locators.iter().find_map(|loc| {
            let text = page.first_text(&loc.selector)?;
            let caps = loc.shape.captures(&text)?;
            let raw = caps.get(1).or_else(|| caps.get(0))?;
            (self.rules.accept)(raw.as_str())
        })
    }

    fn textual(&self, text: &str) -> Option<T> {
        let mut accepted = self
            .patterns
            .iter()
            .flat_map(|re| re.captures_iter(text))
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| (self.rules.accept_text)(m.as_str()));

        match self.rules.pick {
            Pick::First => accepted.next(),
            Pick::MostFrequent => most_frequent(accepted.collect()),
            Pick::Maximum => accepted.fold(None, |best, v| match best {
                Some(b) if b >= v => Some(b),
                _ => Some(v),
            }),
        }
    }
}

/// Most common value; on equal counts the value whose latest occurrence
/// comes last in scan order wins.
pub fn most_frequent<T: Clone + PartialEq>(values: Vec<T>) -> Option<T> {
    let mut best: Option<(usize, usize)> = None; // (count, last index)
    let mut best_value = None;

    for (i, v) in values.iter().enumerate() {
        if values[..i].contains(v) {
            continue;
        }
        let count = values.iter().filter(|x| *x == v).count();
        let last = values.iter().rposition(|x| x == v).unwrap_or(i);
        if best.map_or(true, |b| (count, last) > b) {
            best = Some((count, last));
            best_value = Some(v.clone());
        }
    }
    best_value
}
