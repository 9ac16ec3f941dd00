// Country autocomplete
// Lookup by localized name plus the keyboard state of the suggestion list.

use crate::i18n::Language;
use crate::reference::countries::{Country, COUNTRIES};

pub const MIN_QUERY_CHARS: usize = 2;
pub const MAX_RESULTS: usize = 10;

/// Lowercase and strip the accents found in the supported languages' country names.
pub fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars().flat_map(char::to_lowercase) {
        match ch {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'ç' => out.push('c'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'ñ' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => out.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'œ' => out.push_str("oe"),
            'æ' => out.push_str("ae"),
            'ß' => out.push_str("ss"),
            '’' => out.push('\''),
            c => out.push(c),
        }
    }
    out
}

fn rank(name: &str, query: &str) -> Option<u8> {
    if name.starts_with(query) {
        return Some(0);
    }
    let word_prefix = name
        .split(|c: char| c == ' ' || c == '-' || c == '\'' || c == '(')
        .any(|w| w.starts_with(query));
    if word_prefix {
        return Some(1);
    }
    name.contains(query).then_some(2)
}

/// Up to ten countries ranked: name prefix, word prefix, substring; ties alphabetical.
pub fn search_countries(query: &str, lang: Language) -> Vec<&'static Country> {
    let q = fold(query.trim());
    if q.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let mut hits: Vec<(u8, String, &'static Country)> = COUNTRIES
        .iter()
        .filter_map(|c| {
            let name = fold(c.name(lang));
            rank(&name, &q).map(|r| (r, name, c))
        })
        .collect();
    hits.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    hits.into_iter().take(MAX_RESULTS).map(|(_, _, c)| c).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteKey {
    Up,
    Down,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteEvent {
    None,
    Selected(&'static Country),
    Dismissed,
}

#[derive(Debug, Clone, Default)]
pub struct CountryAutocomplete {
    query: String,
    results: Vec<&'static Country>,
    active: Option<usize>,
    open: bool,
}

impl CountryAutocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[&'static Country] {
        &self.results
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The list is shown (the query is long enough, even when nothing matched).
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_query(&mut self, query: &str, lang: Language) {
        self.query = query.to_string();
        self.results = search_countries(query, lang);
        self.active = None;
        self.open = fold(query.trim()).chars().count() >= MIN_QUERY_CHARS;
    }

    pub fn handle_key(&mut self, key: AutocompleteKey) -> AutocompleteEvent {
        if !self.open {
            return AutocompleteEvent::None;
        }
        match key {
            AutocompleteKey::Down => {
                if !self.results.is_empty() {
                    let last = self.results.len() - 1;
                    self.active = Some(self.active.map(|i| (i + 1).min(last)).unwrap_or(0));
                }
                AutocompleteEvent::None
            }
            AutocompleteKey::Up => {
                if !self.results.is_empty() {
                    self.active = Some(self.active.map(|i| i.saturating_sub(1)).unwrap_or(0));
                }
                AutocompleteEvent::None
            }
            AutocompleteKey::Enter => {
                let chosen = match (self.active, self.results.len()) {
                    (Some(i), _) => self.results.get(i).copied(),
                    (None, 1) => self.results.first().copied(),
                    _ => None,
                };
                match chosen {
                    Some(country) => {
                        self.close();
                        AutocompleteEvent::Selected(country)
                    }
                    None => AutocompleteEvent::None,
                }
            }
            AutocompleteKey::Escape => {
                self.dismiss();
                AutocompleteEvent::Dismissed
            }
        }
    }

    /// Close without selecting (escape or focus leaving the field).
    pub fn dismiss(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.open = false;
        self.active = None;
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&'static Country]) -> Vec<&'static str> {
        list.iter().map(|c| c.code).collect()
    }

    #[test]
    fn short_queries_return_nothing() {
        assert!(search_countries("m", Language::En).is_empty());
        assert!(search_countries("  ", Language::Fr).is_empty());
    }

    #[test]
    fn prefix_matches_rank_before_substrings() {
        let hits = search_countries("ma", Language::En);
        assert_eq!(&codes(&hits)[..3], &["MG", "MY", "ML"]);
        assert!(codes(&hits).contains(&"PA"), "Panama matches as substring");
        let panama = codes(&hits).iter().position(|c| *c == "PA").expect("PA");
        assert!(panama > 2);
    }

    #[test]
    fn word_prefix_ranks_between_prefix_and_substring() {
        let hits = search_countries("gui", Language::Fr);
        assert_eq!(codes(&hits), vec!["GN", "PG"]);
    }

    #[test]
    fn matching_ignores_case_and_accents() {
        let hits = search_countries("EQUA", Language::Fr);
        assert_eq!(codes(&hits), vec!["EC"]);
        let hits = search_countries("öster", Language::De);
        assert_eq!(codes(&hits), vec!["AT"]);
        let hits = search_countries("suis", Language::Fr);
        assert_eq!(codes(&hits), vec!["CH"]);
    }

    #[test]
    fn results_are_capped_at_ten() {
        let hits = search_countries("ia", Language::En);
        assert_eq!(hits.len(), MAX_RESULTS);
    }

    #[test]
    fn keyboard_navigation_clamps_and_selects() {
        let mut ac = CountryAutocomplete::new();
        ac.set_query("ma", Language::En);
        assert!(ac.is_open());
        assert_eq!(ac.active(), None);

        ac.handle_key(AutocompleteKey::Up);
        assert_eq!(ac.active(), Some(0));
        ac.handle_key(AutocompleteKey::Down);
        ac.handle_key(AutocompleteKey::Down);
        assert_eq!(ac.active(), Some(2));
        for _ in 0..20 {
            ac.handle_key(AutocompleteKey::Down);
        }
        assert_eq!(ac.active(), Some(ac.results().len() - 1));

        ac.handle_key(AutocompleteKey::Up);
        let expected = ac.results()[ac.results().len() - 2];
        match ac.handle_key(AutocompleteKey::Enter) {
            AutocompleteEvent::Selected(c) => assert_eq!(c.code, expected.code),
            other => panic!("expected selection, got {:?}", other),
        }
        assert!(!ac.is_open());
    }

    #[test]
    fn enter_without_active_selects_sole_result() {
        let mut ac = CountryAutocomplete::new();
        ac.set_query("switz", Language::En);
        assert_eq!(
            ac.handle_key(AutocompleteKey::Enter),
            AutocompleteEvent::Selected(&COUNTRIES[COUNTRIES.iter().position(|c| c.code == "CH").expect("CH")])
        );

        ac.set_query("ma", Language::En);
        assert_eq!(ac.handle_key(AutocompleteKey::Enter), AutocompleteEvent::None);
        assert!(ac.is_open(), "ambiguous enter keeps the list open");
    }

    #[test]
    fn escape_and_outside_click_dismiss() {
        let mut ac = CountryAutocomplete::new();
        ac.set_query("ke", Language::En);
        assert_eq!(ac.handle_key(AutocompleteKey::Escape), AutocompleteEvent::Dismissed);
        assert!(!ac.is_open());
        assert_eq!(ac.handle_key(AutocompleteKey::Down), AutocompleteEvent::None);

        ac.set_query("ke", Language::En);
        ac.dismiss();
        assert!(!ac.is_open());
        assert_eq!(ac.query(), "ke");
    }

    #[test]
    fn no_match_keeps_list_open_but_empty() {
        let mut ac = CountryAutocomplete::new();
        ac.set_query("zzz", Language::En);
        assert!(ac.is_open());
        assert!(ac.results().is_empty());
    }
}
